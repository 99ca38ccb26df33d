//! Probes `DiagnosticSessionControl` sub-functions `0x00..=0x7F` and records which ones the
//! server accepts or explicitly rejects for a reason other than "not supported".

use std::time::Duration;

use tracing::info;

use crate::Result;
use crate::cancel::CancellationToken;
use crate::client::ProtocolClient;
use crate::common::SessionType;
use crate::response::{self, Outcome};
use crate::transport::Transport;

const DIAGNOSTIC_SESSION_CONTROL: u8 = 0x10;
const PROGRAMMING_SESSION: u8 = 0x02;
const SUB_FUNCTION_NOT_SUPPORTED: u8 = 0x12;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Probe every session sub-function `0x00..=0x7F` and return the ones found supported.
///
/// # Errors
/// Propagates transport I/O errors.
pub fn scan_sessions<T: Transport>(
    client: &mut ProtocolClient<T>,
    cancel: &CancellationToken,
) -> Result<Vec<u8>> {
    let mut found = Vec::new();
    for subfn in 0u8..=0x7F {
        if cancel.is_cancelled() {
            break;
        }
        let mut reply = client.send_raw(&[DIAGNOSTIC_SESSION_CONTROL, subfn])?;
        if reply.is_none() {
            std::thread::sleep(RETRY_DELAY);
            reply = client.send_raw(&[DIAGNOSTIC_SESSION_CONTROL, subfn])?;
        }

        match response::decode(reply.as_deref(), DIAGNOSTIC_SESSION_CONTROL, None) {
            Outcome::Positive { .. } => {
                info!(subfn, "session sub-function supported");
                found.push(subfn);
                if subfn == PROGRAMMING_SESSION {
                    std::thread::sleep(RETRY_DELAY);
                    client.diagnostic_session_control(SessionType::Default)?;
                    std::thread::sleep(RETRY_DELAY);
                }
            }
            Outcome::Negative { nrc } => {
                let nrc_byte: u8 = nrc.into();
                if nrc_byte != SUB_FUNCTION_NOT_SUPPORTED {
                    info!(subfn, nrc = nrc_byte, "session sub-function rejected");
                    found.push(subfn);
                }
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

    #[test]
    fn records_positive_and_non_unsupported_negative_replies() {
        let mut transport = MockTransport::new();
        for subfn in 0u8..=0x7F {
            let reply = match subfn {
                0x01 => vec![0x50, 0x01, 0, 0, 0, 0],
                0x03 => vec![0x7F, 0x10, 0x22],
                _ => vec![0x7F, 0x10, SUB_FUNCTION_NOT_SUPPORTED],
            };
            transport.queue_reply(Duration::from_millis(1), reply);
        }
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(20);
        let found = scan_sessions(&mut client, &CancellationToken::new()).unwrap();
        assert!(found.contains(&0x01));
        assert!(found.contains(&0x03));
        assert!(!found.contains(&0x05));
    }
}
