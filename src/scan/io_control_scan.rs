//! Probes `InputOutputControlByIdentifier` across a data-identifier range. Requires the caller
//! to have already entered an extended diagnostic session.

use tracing::info;

use crate::Result;
use crate::cancel::CancellationToken;
use crate::client::ProtocolClient;
use crate::response::{self, Outcome};
use crate::scan::ScanStatus;
use crate::transport::Transport;

const INPUT_OUTPUT_CONTROL: u8 = 0x2F;
const RETURN_CONTROL_TO_ECU: u8 = 0x00;
const NRC_INCORRECT_LENGTH_OR_FORMAT: u8 = 0x13;
const NRC_REQUEST_OUT_OF_RANGE: u8 = 0x31;
const NRC_SECURITY_ACCESS_DENIED: u8 = 0x33;
const MASK_GROWTH_BUDGET: u32 = 10;

/// Probe every data identifier in `ids` with `InputOutputControlByIdentifier`, growing the
/// control-enable mask by one byte each time the server complains about its length.
///
/// # Errors
/// Propagates transport I/O errors.
pub fn scan_io_control<T: Transport>(
    client: &mut ProtocolClient<T>,
    ids: impl IntoIterator<Item = u16>,
    cancel: &CancellationToken,
) -> Result<Vec<(u16, ScanStatus)>> {
    let mut found = Vec::new();
    'dids: for did in ids {
        if cancel.is_cancelled() {
            break;
        }
        let mut control_enable_mask: Vec<u8> = Vec::new();
        let mut mask_growth_budget = MASK_GROWTH_BUDGET;
        let mut retried_absence = false;

        loop {
            let reply = client.input_output_control_by_identifier(
                did,
                vec![RETURN_CONTROL_TO_ECU],
                control_enable_mask.clone(),
            )?;
            if reply.is_none() && !retried_absence {
                retried_absence = true;
                continue;
            }

            match response::decode(reply.as_deref(), INPUT_OUTPUT_CONTROL, None) {
                Outcome::Positive { .. } => {
                    info!(did, "io control supported, no security required");
                    found.push((did, ScanStatus::SupportedNoSecurity));
                    continue 'dids;
                }
                Outcome::Negative { nrc } => match u8::from(nrc) {
                    NRC_INCORRECT_LENGTH_OR_FORMAT => {
                        if mask_growth_budget == 0 {
                            continue 'dids;
                        }
                        mask_growth_budget -= 1;
                        control_enable_mask.push(0xFF);
                        retried_absence = false;
                    }
                    NRC_REQUEST_OUT_OF_RANGE => continue 'dids,
                    NRC_SECURITY_ACCESS_DENIED => {
                        info!(did, "io control supported, security access denied");
                        found.push((did, ScanStatus::SupportedSecurityAccessDenied));
                        continue 'dids;
                    }
                    _ => {
                        found.push((did, ScanStatus::SupportedNoSecurity));
                        continue 'dids;
                    }
                },
                _ => continue 'dids,
            }
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
    fn grows_mask_then_records_support() {
        let mut transport = MockTransport::new();
        transport.queue_reply(Duration::from_millis(1), vec![0x7F, 0x2F, 0x13]);
        transport.queue_reply(Duration::from_millis(1), vec![0x7F, 0x2F, 0x13]);
        transport.queue_reply(Duration::from_millis(1), vec![0x6F, 0xF2, 0x00]);
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(20);
        let found = scan_io_control(&mut client, vec![0xF200], &CancellationToken::new()).unwrap();
        assert_eq!(found, vec![(0xF200, ScanStatus::SupportedNoSecurity)]);
    }
}
