//! Command-line front end: wires the scanners in [`uds_recon::scan`] to a real SocketCAN
//! interface (behind the `socketcan` feature) or reports that no transport is available.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use uds_recon::bus::Bus;
use uds_recon::cancel::CancellationToken;
use uds_recon::client::ProtocolClient;
use uds_recon::common::{
    DataIdentifierRangeSelection, ResetType, RoutineIdentifierRangeSelection, SessionType,
    data_identifier_range, routine_identifier_range,
};
use uds_recon::scan::tester_present::TesterPresentConfig;
use uds_recon::scan::{self, DiscoveryConfig, ScanStatus, SecuritySeedConfig};
use uds_recon::transport::Transport;
use uds_recon::{Error, Result};

#[derive(Parser)]
#[command(name = "uds_recon")]
#[command(author, version, about = "Diagnostics reconnaissance for a UDS-speaking bus")]
struct Cli {
    /// CAN interface to operate on (e.g. "can0", "vcan0").
    #[arg(short, long, global = true, default_value = "can0")]
    interface: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScanKind {
    Session,
    Routine,
    IoControl,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetFlag {
    Oem,
    Supplier,
    Safety,
}

#[derive(Subcommand)]
enum Commands {
    /// Brute-force request arbitration ids and report which ones reply.
    Discovery {
        #[arg(long = "min")]
        min_id: u32,
        #[arg(long = "max")]
        max_id: Option<u32>,
        #[arg(short, long = "blacklist")]
        blacklist: Vec<u32>,
        #[arg(long = "auto-blacklist", value_name = "SECS", default_value_t = 0)]
        auto_blacklist: u64,
        #[arg(short = 's', long)]
        verify: bool,
        #[arg(short, long, default_value_t = 10)]
        delay: u64,
    },
    /// Enumerate supported service identifiers against a known endpoint.
    Services {
        src: u32,
        dst: u32,
        #[arg(short, long, default_value_t = 200)]
        timeout: u64,
    },
    /// Scan sub-functions or identifiers for one service.
    ServiceScan {
        #[arg(value_enum)]
        kind: ScanKind,
        src: u32,
        dst: u32,
        #[arg(long, value_enum)]
        preset: Option<PresetFlag>,
        #[arg(long = "min")]
        min_id: Option<u16>,
        #[arg(long = "max")]
        max_id: Option<u16>,
        #[arg(short, long, default_value_t = 200)]
        timeout: u64,
    },
    /// Enter an extended diagnostic session, then run a service scan.
    ExtServiceScan {
        #[arg(value_enum)]
        kind: ScanKind,
        src: u32,
        dst: u32,
        #[arg(long, value_enum)]
        preset: Option<PresetFlag>,
        #[arg(long = "min")]
        min_id: Option<u16>,
        #[arg(long = "max")]
        max_id: Option<u16>,
        #[arg(short, long, default_value_t = 200)]
        timeout: u64,
    },
    /// Issue a single ECU reset and print the decoded reply.
    EcuReset {
        #[arg(value_enum)]
        reset_type: CliResetType,
        src: u32,
        dst: u32,
        #[arg(short, long, default_value_t = 5000)]
        timeout: u64,
    },
    /// Periodically send TesterPresent until interrupted or a duration elapses.
    TesterPresent {
        src: u32,
        #[arg(short, long, default_value_t = 2000)]
        delay: u64,
        #[arg(long = "duration")]
        duration_secs: Option<u64>,
        #[arg(short = 'p', long = "suppress")]
        suppress_positive_response: bool,
    },
    /// Capture security-access seeds, optionally cycling the ECU between attempts.
    SecuritySeed {
        #[arg(value_enum)]
        session_type: CliSessionType,
        level: u8,
        src: u32,
        dst: u32,
        #[arg(short, long, value_enum)]
        reset_type: Option<CliResetType>,
        #[arg(short = 'n', long, default_value_t = 0)]
        count: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliSessionType {
    Default,
    Programming,
    Extended,
    Safety,
}

impl From<CliSessionType> for SessionType {
    fn from(value: CliSessionType) -> Self {
        match value {
            CliSessionType::Default => SessionType::Default,
            CliSessionType::Programming => SessionType::Programming,
            CliSessionType::Extended => SessionType::Extended,
            CliSessionType::Safety => SessionType::Safety,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliResetType {
    Hard,
    KeyOffOn,
    Soft,
}

impl From<CliResetType> for ResetType {
    fn from(value: CliResetType) -> Self {
        match value {
            CliResetType::Hard => ResetType::HardReset,
            CliResetType::KeyOffOn => ResetType::KeyOffOnReset,
            CliResetType::Soft => ResetType::SoftReset,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Cancelled) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn install_sigint_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let for_handler = token.clone();
    ctrlc::set_handler(move || for_handler.cancel()).expect("failed to install SIGINT handler");
    token
}

fn run(cli: Cli) -> Result<()> {
    let cancel = install_sigint_handler();
    match cli.command {
        Commands::Discovery {
            min_id,
            max_id,
            blacklist,
            auto_blacklist,
            verify,
            delay,
        } => run_discovery(
            &cli.interface,
            min_id,
            max_id,
            blacklist,
            auto_blacklist,
            verify,
            delay,
            &cancel,
        ),
        Commands::Services { src, dst, timeout } => {
            run_services(&cli.interface, src, dst, timeout, &cancel)
        }
        Commands::ServiceScan {
            kind,
            src,
            dst,
            preset,
            min_id,
            max_id,
            timeout,
        } => run_service_scan(
            &cli.interface,
            kind,
            src,
            dst,
            preset,
            min_id,
            max_id,
            timeout,
            false,
            &cancel,
        ),
        Commands::ExtServiceScan {
            kind,
            src,
            dst,
            preset,
            min_id,
            max_id,
            timeout,
        } => run_service_scan(
            &cli.interface,
            kind,
            src,
            dst,
            preset,
            min_id,
            max_id,
            timeout,
            true,
            &cancel,
        ),
        Commands::EcuReset {
            reset_type,
            src,
            dst,
            timeout,
        } => run_ecu_reset(&cli.interface, reset_type, src, dst, timeout),
        Commands::TesterPresent {
            src,
            delay,
            duration_secs,
            suppress_positive_response,
        } => run_tester_present_command(
            &cli.interface,
            src,
            delay,
            duration_secs,
            suppress_positive_response,
            &cancel,
        ),
        Commands::SecuritySeed {
            session_type,
            level,
            src,
            dst,
            reset_type,
            count,
        } => run_security_seed(
            &cli.interface,
            session_type,
            level,
            src,
            dst,
            reset_type,
            count,
            &cancel,
        ),
    }
}

fn run_discovery(
    interface: &str,
    min_id: u32,
    max_id: Option<u32>,
    blacklist: Vec<u32>,
    auto_blacklist_secs: u64,
    verify: bool,
    delay_ms: u64,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut bus = open_bus(interface)?;
    let mut config = DiscoveryConfig::new(min_id);
    if let Some(max_id) = max_id {
        config.max_id = max_id;
    }
    config.blacklist = blacklist.into_iter().collect();
    config.auto_blacklist_duration = Duration::from_secs(auto_blacklist_secs);
    config.verify = verify;
    config.delay = Duration::from_millis(delay_ms);

    let found = scan::discover_endpoints(&mut bus, &config, cancel)?;
    for pair in found {
        println!("{:#x} -> {:#x}", pair.request_id, pair.response_id);
    }
    Ok(())
}

fn run_services(
    interface: &str,
    src: u32,
    dst: u32,
    timeout_ms: u64,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut transport = open_transport(interface, src, dst)?;
    let found = scan::discover_services(
        &mut transport,
        Duration::from_millis(timeout_ms),
        0x00,
        0xFF,
        cancel,
    )?;
    for sid in found {
        println!("{sid:#04x}");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_service_scan(
    interface: &str,
    kind: ScanKind,
    src: u32,
    dst: u32,
    preset: Option<PresetFlag>,
    min_id: Option<u16>,
    max_id: Option<u16>,
    timeout_ms: u64,
    enter_extended_session: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let transport = open_transport(interface, src, dst)?;
    let mut client = ProtocolClient::new(transport);
    client.p3_client = Duration::from_millis(timeout_ms);

    if enter_extended_session {
        let mut reply = client.diagnostic_session_control(SessionType::Extended)?;
        if reply.is_none() {
            reply = client.diagnostic_session_control(SessionType::Extended)?;
        }
        if reply.is_none() {
            return Err(Error::NoResponse(client.p3_client));
        }
    }

    match kind {
        ScanKind::Session => {
            let found = scan::scan_sessions(&mut client, cancel)?;
            for subfn in found {
                println!("{subfn:#04x}");
            }
        }
        ScanKind::Routine => {
            let ids = routine_ids(preset, min_id, max_id)?;
            let found = scan::scan_routines(&mut client, ids, cancel)?;
            print_status_findings(&found);
        }
        ScanKind::IoControl => {
            let ids = data_ids(preset, min_id, max_id)?;
            let found = scan::scan_io_control(&mut client, ids, cancel)?;
            print_status_findings(&found);
        }
    }
    Ok(())
}

fn print_status_findings(found: &[(u16, ScanStatus)]) {
    for (id, status) in found {
        let tag = match status {
            ScanStatus::SupportedNoSecurity => "supported",
            ScanStatus::SupportedSecurityAccessDenied => "security-access-denied",
            ScanStatus::AnomalousPositiveResponse => "anomalous-positive-response",
        };
        println!("{id:#06x} {tag}");
    }
}

fn routine_ids(
    preset: Option<PresetFlag>,
    min_id: Option<u16>,
    max_id: Option<u16>,
) -> Result<Box<dyn Iterator<Item = u16>>> {
    if preset.is_none() && (min_id.is_some() || max_id.is_some()) {
        let selection = RoutineIdentifierRangeSelection {
            custom: Some((min_id.unwrap_or(0), max_id.unwrap_or(0xFFFF))),
            ..Default::default()
        };
        return routine_identifier_range(selection);
    }
    let selection = RoutineIdentifierRangeSelection {
        oem: matches!(preset, Some(PresetFlag::Oem)),
        supplier: matches!(preset, Some(PresetFlag::Supplier)),
        custom: None,
    };
    if matches!(preset, Some(PresetFlag::Safety)) {
        return Err(Error::InvalidArgument {
            field: "preset",
            constraint: "oem or supplier for a routine scan",
            value: "safety".to_string(),
        });
    }
    routine_identifier_range(selection)
}

fn data_ids(
    preset: Option<PresetFlag>,
    min_id: Option<u16>,
    max_id: Option<u16>,
) -> Result<Box<dyn Iterator<Item = u16>>> {
    if preset.is_none() && (min_id.is_some() || max_id.is_some()) {
        let selection = DataIdentifierRangeSelection {
            custom: Some((min_id.unwrap_or(0), max_id.unwrap_or(0xFFFF))),
            ..Default::default()
        };
        return data_identifier_range(selection);
    }
    let selection = DataIdentifierRangeSelection {
        oem: matches!(preset, Some(PresetFlag::Oem)),
        supplier: matches!(preset, Some(PresetFlag::Supplier)),
        safety: matches!(preset, Some(PresetFlag::Safety)),
        custom: None,
    };
    data_identifier_range(selection)
}

fn run_ecu_reset(
    interface: &str,
    reset_type: CliResetType,
    src: u32,
    dst: u32,
    timeout_ms: u64,
) -> Result<()> {
    let transport = open_transport(interface, src, dst)?;
    let mut client = ProtocolClient::new(transport);
    client.p3_client = Duration::from_millis(timeout_ms);
    let reply = client.ecu_reset(reset_type.into())?;
    match reply {
        Some(bytes) => println!("{bytes:02x?}"),
        None => println!("no response"),
    }
    Ok(())
}

fn run_tester_present_command(
    interface: &str,
    src: u32,
    delay_ms: u64,
    duration_secs: Option<u64>,
    suppress_positive_response: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    // TesterPresent addresses only a request endpoint; the response id is unused by the
    // keep-alive loop, so it is set equal to the request id.
    let transport = open_transport(interface, src, src)?;
    let mut client = ProtocolClient::new(transport);
    let config = TesterPresentConfig {
        delay: Duration::from_millis(delay_ms),
        duration: duration_secs.map(Duration::from_secs),
        suppress_positive_response,
    };
    let sent = scan::run_tester_present(&mut client, &config, cancel)?;
    println!("sent {sent} tester-present messages");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_security_seed(
    interface: &str,
    session_type: CliSessionType,
    level: u8,
    src: u32,
    dst: u32,
    reset_type: Option<CliResetType>,
    count: usize,
    cancel: &CancellationToken,
) -> Result<()> {
    let transport = open_transport(interface, src, dst)?;
    let mut client = ProtocolClient::new(transport);
    let config = SecuritySeedConfig {
        session_type: session_type.into(),
        level,
        reset_type: reset_type.map(Into::into),
        count,
    };
    let seeds = scan::capture_seeds(&mut client, &config, cancel)?;
    for seed in seeds {
        println!("{seed:02x?}");
    }
    Ok(())
}

#[cfg(feature = "socketcan")]
fn open_bus(interface: &str) -> Result<Box<dyn Bus>> {
    Ok(Box::new(uds_recon::bus::socketcan_bus::SocketCanBus::open(
        interface,
    )?))
}

#[cfg(not(feature = "socketcan"))]
fn open_bus(_interface: &str) -> Result<Box<dyn Bus>> {
    Err(Error::IoError(std::io::Error::other(
        "this binary was built without the `socketcan` feature; no bus backend is available",
    )))
}

#[cfg(feature = "socketcan")]
fn open_transport(interface: &str, tx_id: u32, rx_id: u32) -> Result<Box<dyn Transport>> {
    Ok(Box::new(
        uds_recon::transport::socketcan_transport::SocketCanTransport::open(
            interface, tx_id, rx_id,
        )?,
    ))
}

#[cfg(not(feature = "socketcan"))]
fn open_transport(_interface: &str, _tx_id: u32, _rx_id: u32) -> Result<Box<dyn Transport>> {
    Err(Error::IoError(std::io::Error::other(
        "this binary was built without the `socketcan` feature; no transport backend is available",
    )))
}
