//! # Configuration System
//!
//! Hierarchical TOML configuration for the kiosk controller.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.kiosk/config.toml`
//! 3. **Local config** - `./.kiosk/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.kiosk/config.toml
//! [control]
//! port = 12345
//!
//! [refresh]
//! interval_secs = 60
//!
//! [network]
//! probe_url = "http://www.google.com"
//!
//! [display]
//! browser = "chromium"
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{
    ControlConfig, DisplayConfig, KioskConfig, NetworkConfig, RefreshConfig, ShutdownConfig,
    TargetsConfig,
};
pub use validation::validate_config;

impl KioskConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
