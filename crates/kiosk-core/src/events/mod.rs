use tracing::{error, info};

use crate::display::DisplayExit;
use crate::supervisor::STOPPED_EXIT_CODE;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

/// The controller has fully stopped; the process exits with
/// [`STOPPED_EXIT_CODE`] next.
pub fn log_controller_stopped(reason: DisplayExit) {
    info!(
        event = "core.app.controller_stopped",
        reason = ?reason,
        exit_code = STOPPED_EXIT_CODE
    );
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_events() {
        log_app_startup();
        log_app_shutdown();
        log_controller_stopped(DisplayExit::DestroyRequested);

        let test_error = std::io::Error::other("test");
        log_app_error(&test_error);
    }
}
