//! Background tasks that feed the coordinator.
//!
//! Each worker runs until the coordinator's shutdown token is cancelled.

pub mod signals;
pub mod ticker;
pub mod watcher;

pub use signals::run_signal_handler;
pub use ticker::run_periodic_ticker;
pub use watcher::run_network_watcher;
