//! Wraps a [`Transport`] and encodes each supported service's request, then waits for a response
//! with pending-response suppression and a client-side timeout.

use std::time::{Duration, Instant};

use crate::Result;
use crate::common::{ResetType, SessionType};
use crate::request::{Alfid, Request, RoutineControlSubFunction};
use crate::transport::Transport;

/// Default response wait window (`P3_client` in the diagnostic protocol's timing parameters).
pub const DEFAULT_P3_CLIENT: Duration = Duration::from_secs(5);

/// Sends diagnostic requests and waits for their responses, absorbing pending-response
/// (`NRC 0x78`) keep-alives along the way.
pub struct ProtocolClient<T: Transport> {
    transport: T,
    /// Response wait window. A scanner may temporarily tighten this for its own probes.
    pub p3_client: Duration,
}

impl<T: Transport> ProtocolClient<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            p3_client: DEFAULT_P3_CLIENT,
        }
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Wait up to `wait_window` for the next message that is not a pending-response keep-alive.
    ///
    /// The wait window is not reset when a pending-response arrives; the original deadline
    /// stands for the entire call.
    ///
    /// # Errors
    /// Propagates transport I/O errors.
    pub fn receive_response(&mut self, wait_window: Duration) -> Result<Option<Vec<u8>>> {
        let deadline = Instant::now() + wait_window;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(None);
            }
            match self.transport.receive_message(remaining)? {
                None => return Ok(None),
                Some(message) => {
                    let is_pending =
                        message.len() > 3 && message[0] == 0x7F && message[2] == 0x78;
                    if is_pending {
                        continue;
                    }
                    return Ok(Some(message));
                }
            }
        }
    }

    fn send_and_wait(&mut self, request: &Request) -> Result<Option<Vec<u8>>> {
        self.send_raw(&request.to_bytes()?)
    }

    /// Send a caller-built byte sequence directly, bypassing [`Request`] encoding.
    ///
    /// Used by scanners that brute-force sub-function or service-id bytes the typed request
    /// encoders don't model (e.g. an arbitrary, possibly-reserved sub-function byte).
    ///
    /// # Errors
    /// Propagates transport I/O errors.
    pub fn send_raw(&mut self, payload: &[u8]) -> Result<Option<Vec<u8>>> {
        self.transport.send_message(payload)?;
        let wait_window = self.p3_client;
        self.receive_response(wait_window)
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn diagnostic_session_control(
        &mut self,
        session_type: SessionType,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::DiagnosticSessionControl { session_type })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn ecu_reset(&mut self, reset_type: ResetType) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::EcuReset { reset_type })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn read_data_by_identifier(&mut self, ids: Vec<u16>) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::ReadDataByIdentifier { ids })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn read_memory_by_address(
        &mut self,
        alfid: Alfid,
        address: u64,
        size: u64,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::ReadMemoryByAddress {
            alfid,
            address,
            size,
        })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn security_access_request_seed(
        &mut self,
        level: u8,
        data_record: Vec<u8>,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::SecurityAccessRequestSeed { level, data_record })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn security_access_send_key(
        &mut self,
        level: u8,
        key: Vec<u8>,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::SecurityAccessSendKey { level, key })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn read_data_by_periodic_identifier(
        &mut self,
        mode: u8,
        ids: Vec<u8>,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::ReadDataByPeriodicIdentifier { mode, ids })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn dynamically_define_data_identifier(
        &mut self,
        sub_function: u8,
        did: u16,
        sources: Vec<(u16, u8, u8)>,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::DynamicallyDefineDataIdentifier {
            sub_function,
            did,
            sources,
        })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn write_data_by_identifier(&mut self, did: u16, data: Vec<u8>) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::WriteDataByIdentifier { did, data })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn input_output_control_by_identifier(
        &mut self,
        did: u16,
        control_option: Vec<u8>,
        control_enable_mask: Vec<u8>,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::InputOutputControlByIdentifier {
            did,
            control_option,
            control_enable_mask,
        })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn routine_control(
        &mut self,
        sub_function: RoutineControlSubFunction,
        routine_id: u16,
        data: Vec<u8>,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::RoutineControl {
            sub_function,
            routine_id,
            data,
        })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn write_memory_by_address(
        &mut self,
        alfid: Alfid,
        address: u64,
        size: u64,
        data: Vec<u8>,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::WriteMemoryByAddress {
            alfid,
            address,
            size,
            data,
        })
    }

    /// # Errors
    /// Propagates transport I/O errors.
    pub fn tester_present(
        &mut self,
        suppress_positive_response: bool,
    ) -> Result<Option<Vec<u8>>> {
        self.send_and_wait(&Request::TesterPresent {
            suppress_positive_response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn pending_response_is_absorbed_within_the_same_wait_window() {
        let mut transport = MockTransport::new();
        transport.queue_reply(Duration::from_millis(20), vec![0x7F, 0x10, 0x78]);
        transport.queue_reply(Duration::from_millis(40), vec![0x50, 0x03, 0, 0, 0, 0]);
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(500);
        let outcome = client
            .diagnostic_session_control(SessionType::Extended)
            .unwrap();
        assert_eq!(outcome, Some(vec![0x50, 0x03, 0, 0, 0, 0]));
    }

    #[test]
    fn pending_response_alone_times_out_once_window_elapses() {
        let mut transport = MockTransport::new();
        transport.queue_reply(Duration::from_millis(10), vec![0x7F, 0x10, 0x78]);
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(60);
        let outcome = client
            .diagnostic_session_control(SessionType::Extended)
            .unwrap();
        assert_eq!(outcome, None);
    }

    #[test]
    fn immediate_positive_response_is_returned() {
        let mut transport = MockTransport::new();
        transport.queue_reply(Duration::from_millis(5), vec![0x50, 0x03, 0, 0, 0, 0]);
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(200);
        let outcome = client
            .diagnostic_session_control(SessionType::Extended)
            .unwrap();
        assert_eq!(outcome, Some(vec![0x50, 0x03, 0, 0, 0, 0]));
    }

    #[test]
    fn no_response_within_window_is_absence() {
        let transport = MockTransport::new();
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(20);
        let outcome = client.tester_present(false).unwrap();
        assert_eq!(outcome, None);
    }
}
