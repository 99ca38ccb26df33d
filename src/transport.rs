//! Message-level transport abstraction, above frame reassembly.
//!
//! The protocol client and every scanner except endpoint discovery talk to this layer rather than
//! to individual CAN frames. Real segmentation/reassembly (ISO-TP) is not reimplemented here; a
//! production implementation plugs one in behind this trait.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::Result;

/// Send and receive reassembled diagnostic messages for one endpoint pair.
pub trait Transport {
    /// Transmit `payload` as a full diagnostic request.
    ///
    /// # Errors
    /// Returns an error on a lower-level I/O failure.
    fn send_message(&mut self, payload: &[u8]) -> Result<()>;

    /// Block up to `timeout` for the next reassembled message.
    ///
    /// # Errors
    /// Returns an error on a lower-level I/O failure. A timeout with no message is `Ok(None)`.
    fn receive_message(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>>;
}

/// An in-memory [`Transport`] driven by a script of scheduled replies.
///
/// Replies are queued globally (this mock models a single endpoint pair per instance, which is
/// all a scan invocation ever holds) and emitted in the order scheduled, respecting each entry's
/// delay relative to the `send_message` call that preceded it.
#[derive(Default)]
pub struct MockTransport {
    script: VecDeque<(Duration, Vec<u8>)>,
    pending: VecDeque<(Instant, Vec<u8>)>,
    pub sent: Vec<Vec<u8>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` to arrive `delay` after the next `send_message` call.
    ///
    /// All replies queued before that call are scheduled at once, each relative to the send, so
    /// a multi-reply exchange (e.g. a pending response followed by the real one) is expressed by
    /// queuing both with their respective cumulative delays.
    pub fn queue_reply(&mut self, delay: Duration, reply: Vec<u8>) {
        self.script.push_back((delay, reply));
    }
}

impl Transport for MockTransport {
    fn send_message(&mut self, payload: &[u8]) -> Result<()> {
        self.sent.push(payload.to_vec());
        let now = Instant::now();
        for (delay, reply) in self.script.drain(..) {
            self.pending.push_back((now + delay, reply));
        }
        Ok(())
    }

    fn receive_message(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>> {
        let deadline = Instant::now() + timeout;
        loop {
            let now = Instant::now();
            if let Some(front) = self.pending.front()
                && front.0 <= now
            {
                return Ok(Some(self.pending.pop_front().expect("front just checked").1));
            }
            if now >= deadline {
                return Ok(None);
            }
            std::thread::sleep(Duration::from_millis(1).min(deadline - now));
        }
    }
}

/// Per-request and per-response arbitration ids an endpoint is addressed by, at the transport
/// level where a scan operates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EndpointPair {
    pub request_id: u32,
    pub response_id: u32,
}

impl EndpointPair {
    #[must_use]
    pub fn new(request_id: u32, response_id: u32) -> Self {
        Self {
            request_id,
            response_id,
        }
    }
}

/// Multiplexes several [`MockTransport`]-like scripted endpoints behind one handle, keyed by
/// request id. Used by tests that exercise more than one endpoint in the same scan.
#[derive(Default)]
pub struct MultiEndpointMockTransport {
    endpoints: HashMap<u32, MockTransport>,
    active_request_id: Option<u32>,
}

impl MultiEndpointMockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint_mut(&mut self, request_id: u32) -> &mut MockTransport {
        self.endpoints.entry(request_id).or_default()
    }

    pub fn select(&mut self, request_id: u32) {
        self.active_request_id = Some(request_id);
    }
}

impl Transport for MultiEndpointMockTransport {
    fn send_message(&mut self, payload: &[u8]) -> Result<()> {
        let request_id = self.active_request_id.expect("select() called before send");
        self.endpoints
            .entry(request_id)
            .or_default()
            .send_message(payload)
    }

    fn receive_message(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>> {
        let request_id = self.active_request_id.expect("select() called before recv");
        self.endpoints
            .entry(request_id)
            .or_default()
            .receive_message(timeout)
    }
}

impl Transport for Box<dyn Transport + '_> {
    fn send_message(&mut self, payload: &[u8]) -> Result<()> {
        (**self).send_message(payload)
    }

    fn receive_message(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>> {
        (**self).receive_message(timeout)
    }
}

/// Reassembled-message transport backed by the kernel's SocketCAN ISO-TP stack.
#[cfg(feature = "socketcan")]
pub mod socketcan_transport {
    use std::time::{Duration, Instant};

    use socketcan::ExtendedId;
    use socketcan_isotp::IsoTpSocket;

    use super::Transport;
    use crate::Result;
    use crate::error::Error;

    fn io_err(source: impl std::fmt::Display) -> Error {
        Error::IoError(std::io::Error::other(source.to_string()))
    }

    pub struct SocketCanTransport {
        socket: IsoTpSocket,
    }

    impl SocketCanTransport {
        /// Open an ISO-TP socket on `interface`, transmitting to `tx_id` and receiving on
        /// `rx_id`.
        ///
        /// # Errors
        /// Returns an error if either id is out of range or the socket cannot be opened.
        pub fn open(interface: &str, tx_id: u32, rx_id: u32) -> Result<Self> {
            let ext_tx = ExtendedId::new(tx_id).ok_or_else(|| Error::InvalidArgument {
                field: "tx_id",
                constraint: "<= 0x1FFF_FFFF",
                value: format!("{tx_id:#x}"),
            })?;
            let ext_rx = ExtendedId::new(rx_id).ok_or_else(|| Error::InvalidArgument {
                field: "rx_id",
                constraint: "<= 0x1FFF_FFFF",
                value: format!("{rx_id:#x}"),
            })?;
            let socket = IsoTpSocket::open(interface, ext_rx, ext_tx).map_err(io_err)?;
            socket.set_nonblocking(true).map_err(io_err)?;
            Ok(Self { socket })
        }
    }

    impl Transport for SocketCanTransport {
        fn send_message(&mut self, payload: &[u8]) -> Result<()> {
            self.socket.write(payload).map_err(io_err)?;
            Ok(())
        }

        fn receive_message(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>> {
            let deadline = Instant::now() + timeout;
            loop {
                match self.socket.read() {
                    Ok(data) if !data.is_empty() => return Ok(Some(data.to_vec())),
                    Ok(_) => {}
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                    Err(e) => return Err(Error::IoError(e)),
                }
                if Instant::now() >= deadline {
                    return Ok(None);
                }
                std::thread::sleep(Duration::from_millis(1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_transport_replays_scripted_message() {
        let mut transport = MockTransport::new();
        transport.queue_reply(Duration::from_millis(5), vec![0x50, 0x03, 0, 0, 0, 0]);
        transport.send_message(&[0x10, 0x03]).unwrap();
        let reply = transport
            .receive_message(Duration::from_millis(50))
            .unwrap();
        assert_eq!(reply, Some(vec![0x50, 0x03, 0, 0, 0, 0]));
    }

    #[test]
    fn mock_transport_times_out_with_no_script() {
        let mut transport = MockTransport::new();
        transport.send_message(&[0x10, 0x03]).unwrap();
        let reply = transport
            .receive_message(Duration::from_millis(10))
            .unwrap();
        assert_eq!(reply, None);
    }
}
