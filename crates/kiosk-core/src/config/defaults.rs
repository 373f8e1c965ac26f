//! Built-in configuration values.

use std::path::PathBuf;

pub const DEFAULT_CONTROL_PORT: u16 = 12345;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_NAVIGATE_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;
pub const DEFAULT_PROBE_URL: &str = "http://www.google.com";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_TARGET: &str = "http://supranet.ar/carteleria/lomoro-x4/";
pub const DEFAULT_BROWSER: &str = "chromium";
pub const DEFAULT_PUMP_INTERVAL_MS: u64 = 250;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;
pub const CLIENT_CONNECT_TIMEOUT_SECS: u64 = 5;

pub const TARGETS_FILE_NAME: &str = "targets.txt";
pub const OFFLINE_PAGE_NAME: &str = "offline.html";

/// Base directory for kiosk data (default: ~/.kiosk)
pub fn kiosk_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".kiosk"),
        None => {
            eprintln!(
                "Warning: Could not find home directory. Set HOME environment variable. \
                Using fallback directory."
            );
            std::env::temp_dir().join(".kiosk")
        }
    }
}

/// Chromium flags for a frameless window covering the whole monitor layout.
pub fn default_browser_args() -> Vec<String> {
    [
        "--kiosk",
        "--noerrdialogs",
        "--disable-infobars",
        "--no-first-run",
        "--window-position={x},{y}",
        "--window-size={width},{height}",
        "--app={target}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
