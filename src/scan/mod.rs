//! Discovery and enumeration state machines that probe a bus for live diagnostic endpoints,
//! enumerate supported services, and capture security-access seeds.

pub mod endpoint_discovery;
pub mod io_control_scan;
pub mod routine_scan;
pub mod security_seed;
pub mod service_discovery;
pub mod session_scan;
pub mod tester_present;

pub use endpoint_discovery::{DiscoveryConfig, discover_endpoints};
pub use io_control_scan::scan_io_control;
pub use routine_scan::scan_routines;
pub use security_seed::{SecuritySeedConfig, capture_seeds};
pub use service_discovery::discover_services;
pub use session_scan::scan_sessions;
pub use tester_present::run_tester_present;

/// Classification of a scanned sub-function or identifier, shared across the sub-scanners that
/// record findings beyond a bare pass/fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanStatus {
    /// The server accepted the probe without requiring an unlocked security level.
    SupportedNoSecurity,
    /// The server recognized the probe but refused it with `SECURITY_ACCESS_DENIED`.
    SupportedSecurityAccessDenied,
    /// The server returned a positive response to a probe that should only ever be rejected.
    /// Surfaced as an anomaly, not resolved away.
    AnomalousPositiveResponse,
}
