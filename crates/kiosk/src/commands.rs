use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use tracing::{error, info, warn};

use kiosk_core::config::defaults::{CLIENT_CONNECT_TIMEOUT_SECS, OFFLINE_PAGE_NAME, kiosk_dir};
use kiosk_core::config::{DisplayConfig, KioskConfig};
use kiosk_core::control::{ControlCommand, send_command};
use kiosk_core::display::{BrowserSurface, DisplayExit, MonitorLayout, discover_layout};
use kiosk_core::events;
use kiosk_core::network::{HttpProbe, InterfaceSource, SystemInterfaces, primary_ipv4};
use kiosk_core::supervisor::{Collaborators, RuntimeSettings, STOPPED_EXIT_CODE, Supervisor};
use kiosk_core::targets::{Target, ensure_offline_page, load_or_create};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> KioskConfig {
    match KioskConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.kiosk/config.toml and ./.kiosk/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            KioskConfig::default()
        }
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<ExitCode, Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("run", sub_matches)) => handle_run_command(sub_matches),
        Some(("send", sub_matches)) => handle_send_command(sub_matches),
        Some(("stop", sub_matches)) => handle_stop_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

fn handle_run_command(matches: &ArgMatches) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match load_run_config(matches).and_then(|config| run_controller(&config)) {
        Ok(exit) => {
            events::log_controller_stopped(exit);
            Ok(ExitCode::from(STOPPED_EXIT_CODE))
        }
        Err(e) => {
            eprintln!("❌ Failed to start kiosk: {}", e);
            error!(event = "cli.run_failed", error = %e);
            events::log_app_error(&*e);
            Err(e)
        }
    }
}

/// Configuration for `run`. Unlike the client commands, a broken config file is
/// fatal here.
fn load_run_config(matches: &ArgMatches) -> Result<KioskConfig, Box<dyn std::error::Error>> {
    let mut config = KioskConfig::load_hierarchy()?;
    if let Some(file) = matches.get_one::<String>("targets-file") {
        config.targets.file = Some(PathBuf::from(file));
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.control.port = Some(*port);
    }
    if let Some(bind) = matches.get_one::<IpAddr>("bind") {
        config.control.bind_address = Some(*bind);
    }

    info!(event = "cli.run_started", port = config.control.port());
    Ok(config)
}

fn run_controller(config: &KioskConfig) -> Result<DisplayExit, Box<dyn std::error::Error>> {
    config.validate()?;

    let bind_addr = SocketAddr::new(resolve_host(config)?, config.control.port());

    let targets_file = config.targets.file();
    let default = Target::new(config.targets.default_target())?;
    let targets = load_or_create(&targets_file, &default)?;

    let fallback = match &config.targets.fallback {
        Some(fallback) => Target::new(fallback.as_str())?,
        None => {
            let dir = targets_file
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(kiosk_dir);
            ensure_offline_page(&dir, OFFLINE_PAGE_NAME)?
        }
    };

    let initial = targets.current().clone();
    let probe = HttpProbe::new(config.network.probe_url(), config.network.probe_timeout())?;
    info!(
        event = "cli.run_configured",
        bind = %bind_addr,
        targets_file = %targets_file.display(),
        probe_url = probe.url()
    );
    let settings = RuntimeSettings::from_config(config, bind_addr, targets, fallback);
    let supervisor = Supervisor::start(
        settings,
        Collaborators {
            probe: Arc::new(probe),
            interfaces: Arc::new(SystemInterfaces),
        },
    )?;

    println!("✅ Kiosk controller listening on {}", supervisor.local_addr());
    println!("   Showing: {}", initial);

    let layout = resolve_layout(&config.display);
    let mut surface = BrowserSurface::new(config.display.browser(), config.display.args(), layout);
    let exit = supervisor.run(&mut surface, &initial);

    println!("Kiosk stopped ({:?}).", exit);
    Ok(exit)
}

fn handle_send_command(matches: &ArgMatches) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let raw = matches
        .get_one::<String>("target")
        .ok_or("Target argument is required")?;
    let target = Target::new(raw.as_str())?;

    let addr = controller_addr(matches)?;
    info!(event = "cli.send_started", addr = %addr, target = %target);

    match send_command(&addr, &ControlCommand::SetTarget(target.clone()), client_timeout()) {
        Ok(()) => {
            println!("✅ Sent '{}' to {}", target, addr);
            info!(event = "cli.send_completed", addr = %addr);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("❌ Failed to send target to {}: {}", addr, e);
            error!(event = "cli.send_failed", addr = %addr, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_stop_command(matches: &ArgMatches) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let addr = controller_addr(matches)?;
    info!(event = "cli.stop_started", addr = %addr);

    match send_command(&addr, &ControlCommand::Exit, client_timeout()) {
        Ok(()) => {
            println!("✅ Asked the controller at {} to stop", addr);
            info!(event = "cli.stop_completed", addr = %addr);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("❌ Failed to stop controller at {}: {}", addr, e);
            error!(event = "cli.stop_failed", addr = %addr, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// `host:port` of the controller a client command talks to.
fn controller_addr(matches: &ArgMatches) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let port = matches
        .get_one::<u16>("port")
        .copied()
        .unwrap_or_else(|| config.control.port());

    let host = match matches.get_one::<String>("host") {
        Some(host) => host.clone(),
        None => resolve_host(&config)?.to_string(),
    };

    // Bare IPv6 literals need brackets before a port can be appended.
    if host.contains(':') && !host.starts_with('[') {
        Ok(format!("[{}]:{}", host, port))
    } else {
        Ok(format!("{}:{}", host, port))
    }
}

/// Configured bind address, or the primary IPv4 address of this host.
fn resolve_host(config: &KioskConfig) -> Result<IpAddr, Box<dyn std::error::Error>> {
    if let Some(addr) = config.control.bind_address {
        return Ok(addr);
    }
    let snapshot = SystemInterfaces.snapshot();
    Ok(IpAddr::V4(primary_ipv4(&snapshot)?))
}

fn resolve_layout(display: &DisplayConfig) -> MonitorLayout {
    if let (Some(width), Some(height)) = (display.width, display.height) {
        return MonitorLayout {
            total_width: width,
            total_height: height,
            origin_x: 0,
            origin_y: 0,
        };
    }

    match discover_layout() {
        Ok(layout) => {
            info!(
                event = "cli.layout_discovered",
                width = layout.total_width,
                height = layout.total_height
            );
            layout
        }
        Err(e) => {
            warn!(event = "cli.layout_discovery_failed", error = %e);
            MonitorLayout::FALLBACK
        }
    }
}

fn client_timeout() -> Duration {
    Duration::from_secs(CLIENT_CONNECT_TIMEOUT_SECS)
}
