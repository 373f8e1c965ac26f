//! Process lifecycle: start the workers, run the display loop on the calling
//! thread, then stop everything in order.
//!
//! ```text
//! Starting ──start()──▶ Running ──display loop ends──▶ Stopping ──workers joined──▶ Stopped
//! ```
//!
//! The display loop ends when `exit` arrives, when a termination signal is
//! received, or when the surface closes on its own. All three paths go through
//! [`RefreshCoordinator::shutdown`](crate::coordinator::RefreshCoordinator::shutdown).

pub mod errors;
pub mod lifecycle;
pub mod types;

pub use errors::SupervisorError;
pub use lifecycle::Supervisor;
pub use types::{Collaborators, LifecycleState, RuntimeSettings, STOPPED_EXIT_CODE};
