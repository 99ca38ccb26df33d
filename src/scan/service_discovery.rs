//! Probes service identifiers 0x00-0xFF against a known endpoint and records any reply other
//! than "service not supported".

use std::time::Duration;

use tracing::info;

use crate::Result;
use crate::cancel::CancellationToken;
use crate::response::SERVICE_RESPONSE_OFFSET;
use crate::transport::Transport;

const SERVICE_NOT_SUPPORTED: u8 = 0x11;
const NEGATIVE_RESPONSE: u8 = 0x7F;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// Probe `min_service..=max_service` and return every service id that drew something other than
/// `{0x7F, id, 0x11}`.
///
/// The recorded id is taken from the reply's echoed service byte, not the probe loop variable,
/// so a reply that arrives late (attributable to an earlier probe) is still correctly attributed.
///
/// # Errors
/// Propagates transport I/O errors.
pub fn discover_services<T: Transport>(
    transport: &mut T,
    timeout: Duration,
    min_service: u8,
    max_service: u8,
    cancel: &CancellationToken,
) -> Result<Vec<u8>> {
    let mut found = Vec::new();
    for sid in min_service..=max_service {
        if cancel.is_cancelled() {
            break;
        }
        transport.send_message(&[sid])?;
        let Some(reply) = transport.receive_message(timeout)? else {
            continue;
        };
        if reply.len() < 2 {
            continue;
        }
        if reply[0] == NEGATIVE_RESPONSE {
            if reply.len() >= 3 && reply[2] != SERVICE_NOT_SUPPORTED {
                info!(service = reply[1], "service supported");
                found.push(reply[1]);
            }
        } else {
            let echoed_sid = reply[0].wrapping_sub(SERVICE_RESPONSE_OFFSET);
            info!(service = echoed_sid, "service supported");
            found.push(echoed_sid);
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn records_only_non_unsupported_replies() {
        let mut transport = MockTransport::new();
        for sid in 0u8..=0xFF {
            let reply = if sid == 0x22 {
                vec![0x7F, 0x22, 0x31]
            } else {
                vec![0x7F, sid, SERVICE_NOT_SUPPORTED]
            };
            transport.queue_reply(Duration::from_millis(1), reply);
        }
        let found = discover_services(
            &mut transport,
            Duration::from_millis(20),
            0,
            0xFF,
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(found, vec![0x22]);
    }
}
