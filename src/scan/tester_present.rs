//! Periodic keep-alive: sends `TesterPresent` every `delay` until cancelled or, if set, until
//! wall-clock time reaches `start + duration`.

use std::time::{Duration, Instant, SystemTime};

use tracing::debug;

use crate::Result;
use crate::cancel::CancellationToken;
use crate::client::ProtocolClient;
use crate::transport::Transport;

#[derive(Clone, Copy, Debug)]
pub struct TesterPresentConfig {
    pub delay: Duration,
    /// Wall-clock auto-stop; the one place in this system that is not governed by the monotonic
    /// clock.
    pub duration: Option<Duration>,
    pub suppress_positive_response: bool,
}

/// Run the keep-alive loop, blocking the caller until cancellation or `duration` elapses.
///
/// Returns the number of `TesterPresent` messages sent.
///
/// # Errors
/// Propagates transport I/O errors.
pub fn run_tester_present<T: Transport>(
    client: &mut ProtocolClient<T>,
    config: &TesterPresentConfig,
    cancel: &CancellationToken,
) -> Result<u64> {
    let wall_clock_deadline = config.duration.map(|duration| SystemTime::now() + duration);
    let mut sent = 0u64;
    loop {
        if cancel.is_cancelled() {
            break;
        }
        if let Some(deadline) = wall_clock_deadline
            && SystemTime::now() >= deadline
        {
            break;
        }

        client.tester_present(config.suppress_positive_response)?;
        sent += 1;
        debug!(sent, "tester present sent");

        let sleep_until = Instant::now() + config.delay;
        while Instant::now() < sleep_until {
            if cancel.is_cancelled() {
                return Ok(sent);
            }
            std::thread::sleep(Duration::from_millis(1).min(sleep_until - Instant::now()));
        }
    }
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn stops_on_cancellation() {
        let transport = MockTransport::new();
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(5);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let config = TesterPresentConfig {
            delay: Duration::from_millis(10),
            duration: None,
            suppress_positive_response: true,
        };
        let sent = run_tester_present(&mut client, &config, &cancel).unwrap();
        assert_eq!(sent, 0);
    }

    #[test]
    fn stops_once_wall_clock_duration_elapses() {
        let transport = MockTransport::new();
        let mut client = ProtocolClient::new(transport);
        client.p3_client = Duration::from_millis(5);
        let config = TesterPresentConfig {
            delay: Duration::from_millis(5),
            duration: Some(Duration::from_millis(30)),
            suppress_positive_response: false,
        };
        let sent = run_tester_present(&mut client, &config, &CancellationToken::new()).unwrap();
        assert!(sent >= 1);
    }
}
