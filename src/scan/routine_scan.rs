//! Probes `RoutineControl` with the intentionally-illegal sub-function `0x00` across a routine
//! identifier range and classifies the (necessarily negative, barring anomalies) replies.

use tracing::{info, warn};

use crate::Result;
use crate::cancel::CancellationToken;
use crate::client::ProtocolClient;
use crate::request::RoutineControlSubFunction;
use crate::response::{self, Outcome};
use crate::scan::ScanStatus;
use crate::transport::Transport;

const ROUTINE_CONTROL: u8 = 0x31;
const NRC_SUB_FUNCTION_NOT_SUPPORTED: u8 = 0x12;
const NRC_REQUEST_OUT_OF_RANGE: u8 = 0x31;
const NRC_SECURITY_ACCESS_DENIED: u8 = 0x33;
/// Defeats the server's optional-argument minimum-length checks for the probe sub-function.
const PROBE_PADDING: [u8; 10] = [1; 10];

/// Probe every routine identifier in `ids` and return the ones the server recognized.
///
/// # Errors
/// Propagates transport I/O errors.
pub fn scan_routines<T: Transport>(
    client: &mut ProtocolClient<T>,
    ids: impl IntoIterator<Item = u16>,
    cancel: &CancellationToken,
) -> Result<Vec<(u16, ScanStatus)>> {
    let mut found = Vec::new();
    for rid in ids {
        if cancel.is_cancelled() {
            break;
        }
        let mut reply = client.routine_control(
            RoutineControlSubFunction::Reserved(0x00),
            rid,
            PROBE_PADDING.to_vec(),
        )?;
        if reply.is_none() {
            reply = client.routine_control(
                RoutineControlSubFunction::Reserved(0x00),
                rid,
                PROBE_PADDING.to_vec(),
            )?;
        }

        match response::decode(reply.as_deref(), ROUTINE_CONTROL, None) {
            Outcome::Negative { nrc } => match u8::from(nrc) {
                NRC_REQUEST_OUT_OF_RANGE => {}
                NRC_SUB_FUNCTION_NOT_SUPPORTED => {
                    info!(rid, "routine supported, no security required");
                    found.push((rid, ScanStatus::SupportedNoSecurity));
                }
                NRC_SECURITY_ACCESS_DENIED => {
                    info!(rid, "routine supported, security access denied");
                    found.push((rid, ScanStatus::SupportedSecurityAccessDenied));
                }
                _ => {}
            },
            Outcome::Positive { .. } => {
                warn!(rid, "positive response to intentionally illegal sub-function");
                found.push((rid, ScanStatus::AnomalousPositiveResponse));
            }
            _ => {}
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use std::time::Duration;

    #[test]
    fn classifies_routine_replies() {
        let mut transport = MockTransport::new();
        transport.queue_reply(Duration::from_millis(1), vec![0x7F, 0x31, 0x12]);
        transport.queue_reply(Duration::from_millis(1), vec![0x7F, 0x31, 0x33]);
        transport.queue_reply(Duration::from_millis(1), vec![0x7F, 0x31, 0x31]);
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(20);
        let found = scan_routines(
            &mut client,
            vec![0x0203, 0x0204, 0x0205],
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(
            found,
            vec![
                (0x0203, ScanStatus::SupportedNoSecurity),
                (0x0204, ScanStatus::SupportedSecurityAccessDenied),
            ]
        );
    }
}
