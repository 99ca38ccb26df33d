//! Repeatedly enters a session, requests a security-access seed, and optionally resets the ECU
//! between attempts, accumulating seeds until a target count or cancellation.

use std::time::Duration;

use tracing::{info, warn};

use crate::Result;
use crate::cancel::CancellationToken;
use crate::client::ProtocolClient;
use crate::common::{ResetType, SessionType, is_valid_request_seed_level};
use crate::error::Error;
use crate::response::{self, Outcome};
use crate::service::UdsServiceType;
use crate::transport::Transport;

const HARD_RESET_SETTLE: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct SecuritySeedConfig {
    pub session_type: SessionType,
    pub level: u8,
    pub reset_type: Option<ResetType>,
    /// Target number of seeds to capture; `0` means "until cancelled".
    pub count: usize,
}

/// Capture security-access seeds at `config.level` until `config.count` seeds are collected (or
/// forever, if `count == 0`, until `cancel` fires).
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if `config.level` is not a valid request-seed level, or
/// propagates transport I/O errors.
pub fn capture_seeds<T: Transport>(
    client: &mut ProtocolClient<T>,
    config: &SecuritySeedConfig,
    cancel: &CancellationToken,
) -> Result<Vec<Vec<u8>>> {
    if !is_valid_request_seed_level(config.level) {
        return Err(Error::InvalidArgument {
            field: "level",
            constraint: "an odd value in [0x01, 0x41]",
            value: format!("{:#04x}", config.level),
        });
    }

    let mut seeds = Vec::new();
    loop {
        if cancel.is_cancelled() {
            break;
        }
        if config.count > 0 && seeds.len() >= config.count {
            break;
        }

        if client.diagnostic_session_control(config.session_type)?.is_none() {
            client.diagnostic_session_control(config.session_type)?;
        }

        let reply = client.security_access_request_seed(config.level, Vec::new())?;
        let security_access_sid: u8 = UdsServiceType::SecurityAccess.request_service_to_byte();
        match response::decode(reply.as_deref(), security_access_sid, Some(config.level)) {
            Outcome::Positive { additional_bytes } => {
                info!(level = config.level, "seed captured");
                seeds.push(additional_bytes);
            }
            Outcome::Negative { nrc } => {
                warn!(nrc = u8::from(nrc), "security access rejected, stopping");
                break;
            }
            _ => break,
        }

        if let Some(reset_type) = config.reset_type {
            client.ecu_reset(reset_type)?;
            if reset_type == ResetType::HardReset {
                std::thread::sleep(HARD_RESET_SETTLE);
            }
        }
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn captures_requested_number_of_seeds_across_a_reset() {
        let mut transport = MockTransport::new();
        // Session entry before the first seed request.
        transport.queue_reply(Duration::from_millis(1), vec![0x50, 0x03, 0, 0, 0, 0]);
        transport.queue_reply(Duration::from_millis(1), vec![0x67, 0x01, 0xDE, 0xAD, 0xBE, 0xEF]);
        transport.queue_reply(Duration::from_millis(1), vec![0x51, 0x01]);
        // Session entry before the second seed request.
        transport.queue_reply(Duration::from_millis(1), vec![0x50, 0x03, 0, 0, 0, 0]);
        transport.queue_reply(Duration::from_millis(1), vec![0x67, 0x01, 0xCA, 0xFE]);

        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(20);
        let config = SecuritySeedConfig {
            session_type: SessionType::Extended,
            level: 0x01,
            reset_type: Some(ResetType::HardReset),
            count: 2,
        };
        let seeds = capture_seeds(&mut client, &config, &CancellationToken::new()).unwrap();
        assert_eq!(seeds, vec![vec![0xDE, 0xAD, 0xBE, 0xEF], vec![0xCA, 0xFE]]);
    }

    #[test]
    fn rejects_invalid_request_seed_level() {
        let transport = MockTransport::new();
        let mut client = ProtocolClient::new(transport);
        let config = SecuritySeedConfig {
            session_type: SessionType::Extended,
            level: 0x02,
            reset_type: None,
            count: 1,
        };
        let err = capture_seeds(&mut client, &config, &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
