//! Configuration loading and merging logic.
//!
//! Missing config files are expected and skipped; files that exist but cannot
//! be read or parsed fail the whole load.

use crate::config::types::{
    ControlConfig, DisplayConfig, KioskConfig, NetworkConfig, RefreshConfig, ShutdownConfig,
    TargetsConfig,
};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`~/.kiosk/config.toml`)
/// 3. Local config (`./.kiosk/config.toml`)
///
/// # Errors
///
/// Returns an error if a present file is unreadable or invalid, or if
/// validation of the merged result fails.
pub fn load_hierarchy() -> Result<KioskConfig, ConfigError> {
    let mut config = KioskConfig::default();

    if let Some(path) = user_config_path()
        && let Some(user_config) = load_config_file(&path)?
    {
        config = merge_configs(config, user_config);
    }

    if let Some(local_config) = load_config_file(&local_config_path())? {
        config = merge_configs(config, local_config);
    }

    validate_config(&config)?;

    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kiosk").join("config.toml"))
}

fn local_config_path() -> PathBuf {
    PathBuf::from(".kiosk").join("config.toml")
}

/// Load a configuration file, returning `None` when it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<KioskConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                event = "core.config.file_not_found",
                path = %path.display()
            );
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::ReadFailed {
                path: path.display().to_string(),
                source,
            });
        }
    };

    let config: KioskConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    debug!(
        event = "core.config.file_loaded",
        path = %path.display()
    );

    Ok(Some(config))
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Override values replace base values only where present.
pub fn merge_configs(base: KioskConfig, override_config: KioskConfig) -> KioskConfig {
    KioskConfig {
        control: ControlConfig {
            port: override_config.control.port.or(base.control.port),
            bind_address: override_config
                .control
                .bind_address
                .or(base.control.bind_address),
            read_timeout_secs: override_config
                .control
                .read_timeout_secs
                .or(base.control.read_timeout_secs),
        },
        refresh: RefreshConfig {
            interval_secs: override_config
                .refresh
                .interval_secs
                .or(base.refresh.interval_secs),
            navigate_timeout_secs: override_config
                .refresh
                .navigate_timeout_secs
                .or(base.refresh.navigate_timeout_secs),
        },
        network: NetworkConfig {
            poll_interval_secs: override_config
                .network
                .poll_interval_secs
                .or(base.network.poll_interval_secs),
            probe_url: override_config.network.probe_url.or(base.network.probe_url),
            probe_timeout_secs: override_config
                .network
                .probe_timeout_secs
                .or(base.network.probe_timeout_secs),
        },
        targets: TargetsConfig {
            file: override_config.targets.file.or(base.targets.file),
            default: override_config.targets.default.or(base.targets.default),
            fallback: override_config.targets.fallback.or(base.targets.fallback),
        },
        display: DisplayConfig {
            browser: override_config.display.browser.or(base.display.browser),
            args: override_config.display.args.or(base.display.args),
            width: override_config.display.width.or(base.display.width),
            height: override_config.display.height.or(base.display.height),
            pump_interval_ms: override_config
                .display
                .pump_interval_ms
                .or(base.display.pump_interval_ms),
        },
        shutdown: ShutdownConfig {
            timeout_secs: override_config
                .shutdown
                .timeout_secs
                .or(base.shutdown.timeout_secs),
        },
    }
}
