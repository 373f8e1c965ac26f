//! kiosk-core: Core library for a network-aware kiosk display controller
//!
//! Keeps a full-screen browser pointed at a target, swapping in an offline page
//! while the network is unreachable. Refreshes come from remote commands, a
//! periodic timer and interface changes; they are serialized by a single
//! coordinator.
//!
//! # Main Entry Points
//!
//! - [`supervisor`] - Start workers, run the display loop, stop in order
//! - [`coordinator`] - The refresh critical section
//! - [`control`] - TCP command listener and client
//! - [`config`] - Configuration management
//! - [`targets`] - Targets file and offline page

pub mod config;
pub mod control;
pub mod coordinator;
pub mod display;
pub mod errors;
pub mod events;
pub mod logging;
pub mod network;
pub mod supervisor;
pub mod targets;
pub mod workers;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root for convenience
pub use config::KioskConfig;
pub use control::{ControlCommand, ControlError, send_command};
pub use coordinator::{RefreshCoordinator, RefreshOutcome, RefreshReason};
pub use display::{BrowserSurface, DisplayExit, DisplaySurface, MonitorLayout};
pub use errors::{KioskError, KioskResult};
pub use network::{ConnectivityProbe, HttpProbe, InterfaceSource, SystemInterfaces};
pub use supervisor::{Collaborators, RuntimeSettings, STOPPED_EXIT_CODE, Supervisor};
pub use targets::{Target, TargetList};

// Re-export logging initialization
pub use logging::init_logging;
