//! Configuration type definitions.
//!
//! Every field is optional so that config files can be merged section by
//! section. Accessors resolve the effective value against the defaults in
//! [`super::defaults`].

use crate::config::defaults;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KioskConfig {
    /// Remote command socket
    #[serde(default)]
    pub control: ControlConfig,

    /// Periodic reload
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Interface polling and connectivity probing
    #[serde(default)]
    pub network: NetworkConfig,

    /// Targets file and fallback page
    #[serde(default)]
    pub targets: TargetsConfig,

    /// Browser process and geometry
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ControlConfig {
    /// TCP port for remote commands. Default: 12345.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Address to bind instead of the discovered primary IPv4 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<IpAddr>,

    /// Maximum time to wait for a client to send its command. Default: 5 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,
}

impl ControlConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(defaults::DEFAULT_CONTROL_PORT)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(
            self.read_timeout_secs
                .unwrap_or(defaults::DEFAULT_READ_TIMEOUT_SECS),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RefreshConfig {
    /// Delay between the end of one periodic reload and the next. Default: 60 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Maximum time to wait for the display thread to acknowledge a navigation.
    /// Default: 15 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_timeout_secs: Option<u64>,
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(
            self.interval_secs
                .unwrap_or(defaults::DEFAULT_REFRESH_INTERVAL_SECS),
        )
    }

    pub fn navigate_timeout(&self) -> Duration {
        Duration::from_secs(
            self.navigate_timeout_secs
                .unwrap_or(defaults::DEFAULT_NAVIGATE_TIMEOUT_SECS),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    /// Interface polling cadence. Default: 1 second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,

    /// Well-known endpoint used to decide whether the network is usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_url: Option<String>,

    /// Default: 5 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_timeout_secs: Option<u64>,
}

impl NetworkConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(
            self.poll_interval_secs
                .unwrap_or(defaults::DEFAULT_POLL_INTERVAL_SECS),
        )
    }

    pub fn probe_url(&self) -> &str {
        self.probe_url
            .as_deref()
            .unwrap_or(defaults::DEFAULT_PROBE_URL)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(
            self.probe_timeout_secs
                .unwrap_or(defaults::DEFAULT_PROBE_TIMEOUT_SECS),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TargetsConfig {
    /// Targets file, one target per line. Default: `~/.kiosk/targets.txt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Target written to a freshly created targets file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Target shown while the network is unreachable. Default: the bundled
    /// offline page, written next to the targets file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl TargetsConfig {
    pub fn file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| defaults::kiosk_dir().join(defaults::TARGETS_FILE_NAME))
    }

    pub fn default_target(&self) -> &str {
        self.default
            .as_deref()
            .unwrap_or(defaults::DEFAULT_TARGET)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    /// Browser executable. Default: `chromium`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    /// Browser arguments. Supports `{x}`, `{y}`, `{width}`, `{height}` and
    /// `{target}` placeholders; the target is appended when no argument
    /// mentions `{target}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Geometry override used instead of monitor discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// How often the display thread checks whether the surface is still open.
    /// Default: 250 milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_interval_ms: Option<u64>,
}

impl DisplayConfig {
    pub fn browser(&self) -> &str {
        self.browser
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BROWSER)
    }

    pub fn args(&self) -> Vec<String> {
        self.args.clone().unwrap_or_else(defaults::default_browser_args)
    }

    pub fn pump_interval(&self) -> Duration {
        Duration::from_millis(
            self.pump_interval_ms
                .unwrap_or(defaults::DEFAULT_PUMP_INTERVAL_MS),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShutdownConfig {
    /// How long to wait for background workers after the stop flag is set.
    /// Default: 5 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ShutdownConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .unwrap_or(defaults::DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        )
    }
}
