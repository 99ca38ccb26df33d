//! Brute-forces request arbitration ids and observes which ids reply, with an optional
//! backtracking verification pass.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::info;

use crate::Result;
use crate::bus::{Bus, Frame, auto_blacklist};
use crate::cancel::CancellationToken;
use crate::error::Error;
use crate::transport::EndpointPair;

const SESSION_CONTROL_TO_DEFAULT: [u8; 2] = [0x10, 0x01];
/// How many arbitration ids below a candidate hit the verification pass re-probes.
const BACKTRACK_WINDOW: u32 = 5;
const VERIFY_EXTRA_DELAY: Duration = Duration::from_millis(500);
/// Upper bound when the caller's `min_id` is already in the 29-bit extended range.
const MAX_EXTENDED_ARBITRATION_ID: u32 = 0x1FFF_FFFF;
const MAX_STANDARD_ARBITRATION_ID: u32 = 0x7FF;

#[derive(Clone, Debug)]
pub struct DiscoveryConfig {
    pub min_id: u32,
    pub max_id: u32,
    pub blacklist: HashSet<u32>,
    pub auto_blacklist_duration: Duration,
    pub delay: Duration,
    pub verify: bool,
}

impl DiscoveryConfig {
    /// Default bounds: the standard 11-bit range unless `min_id` is already extended, in which
    /// case the full 29-bit range.
    #[must_use]
    pub fn new(min_id: u32) -> Self {
        let max_id = if min_id > MAX_STANDARD_ARBITRATION_ID {
            MAX_EXTENDED_ARBITRATION_ID
        } else {
            MAX_STANDARD_ARBITRATION_ID
        };
        Self {
            min_id,
            max_id,
            blacklist: HashSet::new(),
            auto_blacklist_duration: Duration::ZERO,
            delay: Duration::from_millis(10),
            verify: false,
        }
    }
}

fn qualifies(data: &[u8]) -> bool {
    data.len() >= 2 && matches!(data[1], 0x7F | 0x50)
}

fn drain_for(bus: &mut impl Bus, window: Duration) -> Result<Vec<Frame>> {
    let deadline = Instant::now() + window;
    let mut frames = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(frames);
        }
        if let Some(frame) = bus.recv_timeout(remaining)? {
            frames.push(frame);
        }
    }
}

/// Re-probe `candidate, candidate-1, ..., candidate-(BACKTRACK_WINDOW-1)` in that order; the
/// first one to reply again is the verified request id.
fn verify_backtrack(bus: &mut impl Bus, candidate: u32, delay: Duration) -> Result<Option<u32>> {
    let window = delay + VERIFY_EXTRA_DELAY;
    for offset in 0..BACKTRACK_WINDOW {
        let probe_id = candidate.saturating_sub(offset);
        bus.send(Frame::new(probe_id, SESSION_CONTROL_TO_DEFAULT.to_vec()))?;
        let replies = drain_for(bus, window)?;
        if replies.iter().any(|frame| qualifies(&frame.data)) {
            return Ok(Some(probe_id));
        }
    }
    Ok(None)
}

/// Probe `[config.min_id, config.max_id]` in ascending order and return every `(request_id,
/// response_id)` pair observed to reply.
///
/// # Errors
/// Returns an error if `max_id < min_id`, or propagates bus I/O errors.
pub fn discover_endpoints(
    bus: &mut impl Bus,
    config: &DiscoveryConfig,
    cancel: &CancellationToken,
) -> Result<Vec<EndpointPair>> {
    if config.max_id < config.min_id {
        return Err(Error::InvalidArgument {
            field: "max_id",
            constraint: ">= min_id",
            value: format!("{} < {}", config.max_id, config.min_id),
        });
    }

    let mut blacklist = config.blacklist.clone();
    if !config.auto_blacklist_duration.is_zero() {
        let observed = drain_for(bus, config.auto_blacklist_duration)?;
        blacklist.extend(auto_blacklist(&observed));
    }

    let mut found = Vec::new();
    let mut send_id = config.min_id;
    while send_id <= config.max_id {
        if cancel.is_cancelled() {
            break;
        }
        if blacklist.contains(&send_id) {
            send_id += 1;
            continue;
        }

        bus.send(Frame::new(send_id, SESSION_CONTROL_TO_DEFAULT.to_vec()))?;
        let replies = drain_for(bus, config.delay)?;
        let hit = replies
            .into_iter()
            .find(|frame| !blacklist.contains(&frame.id) && qualifies(&frame.data))
            .map(|frame| frame.id);

        if let Some(response_id) = hit {
            if config.verify {
                bus.set_filter(&[response_id]);
                let verified = verify_backtrack(bus, send_id, config.delay)?;
                bus.clear_filter();
                if let Some(confirmed_id) = verified {
                    info!(request_id = confirmed_id, response_id, "endpoint verified");
                    found.push(EndpointPair::new(confirmed_id, response_id));
                    send_id = confirmed_id + 1;
                    continue;
                }
            } else {
                info!(request_id = send_id, response_id, "endpoint found");
                found.push(EndpointPair::new(send_id, response_id));
            }
        }
        send_id += 1;
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MockBus;

    #[test]
    fn happy_path_discovery_with_verification() {
        let mut bus = MockBus::new();
        bus.on_send(
            0x7E0,
            Duration::from_millis(10),
            Frame::new(0x7E8, vec![0x50, 0x01, 0, 0, 0, 0]),
        );
        // Verification re-probes send_id..=send_id-4; only the exact id replies again.
        bus.on_send(
            0x7E0,
            Duration::from_millis(10),
            Frame::new(0x7E8, vec![0x50, 0x01, 0, 0, 0, 0]),
        );

        let config = DiscoveryConfig {
            min_id: 0x7E0,
            max_id: 0x7E0,
            blacklist: HashSet::new(),
            auto_blacklist_duration: Duration::ZERO,
            delay: Duration::from_millis(20),
            verify: true,
        };
        let found = discover_endpoints(&mut bus, &config, &CancellationToken::new()).unwrap();
        assert_eq!(found, vec![EndpointPair::new(0x7E0, 0x7E8)]);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut bus = MockBus::new();
        let config = DiscoveryConfig {
            min_id: 0x10,
            max_id: 0x05,
            blacklist: HashSet::new(),
            auto_blacklist_duration: Duration::ZERO,
            delay: Duration::from_millis(1),
            verify: false,
        };
        let err = discover_endpoints(&mut bus, &config, &CancellationToken::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn blacklisted_ids_are_never_recorded() {
        let mut bus = MockBus::new();
        bus.on_send(
            0x7E1,
            Duration::from_millis(5),
            Frame::new(0x7E9, vec![0x50, 0x01, 0, 0, 0, 0]),
        );
        let mut blacklist = HashSet::new();
        blacklist.insert(0x7E1);
        let config = DiscoveryConfig {
            min_id: 0x7E1,
            max_id: 0x7E1,
            blacklist,
            auto_blacklist_duration: Duration::ZERO,
            delay: Duration::from_millis(20),
            verify: false,
        };
        let found = discover_endpoints(&mut bus, &config, &CancellationToken::new()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn default_bounds_switch_to_extended_range() {
        assert_eq!(DiscoveryConfig::new(0x100).max_id, MAX_STANDARD_ARBITRATION_ID);
        assert_eq!(
            DiscoveryConfig::new(0x1000).max_id,
            MAX_EXTENDED_ARBITRATION_ID
        );
    }
}
