//! The display side of the controller.
//!
//! The surface itself is owned by a single thread. Everyone else talks to it
//! through a [`DisplayHandle`], which marshals requests onto that thread and
//! waits for the acknowledgement.

pub mod browser;
pub mod channel;
pub mod errors;
pub mod event_loop;
pub mod monitors;
pub mod surface;
pub mod types;

pub use browser::BrowserSurface;
pub use channel::{DisplayHandle, DisplayReceiver, DisplayRequest, channel};
pub use errors::DisplayError;
pub use event_loop::run_display_loop;
pub use monitors::discover_layout;
pub use surface::DisplaySurface;
pub use types::{DisplayExit, Monitor, MonitorLayout, SurfaceStatus};
