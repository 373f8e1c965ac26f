use crate::errors::KioskError;

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to launch '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    #[error("Display thread is no longer running")]
    SurfaceGone,

    #[error("Navigation to '{target}' was not acknowledged within {timeout_ms}ms")]
    NavigationTimedOut { target: String, timeout_ms: u128 },

    #[error("Monitor discovery failed: {message}")]
    MonitorDiscoveryFailed { message: String },
}

impl KioskError for DisplayError {
    fn error_code(&self) -> &'static str {
        match self {
            DisplayError::SpawnFailed { .. } => "DISPLAY_SPAWN_FAILED",
            DisplayError::SurfaceGone => "DISPLAY_SURFACE_GONE",
            DisplayError::NavigationTimedOut { .. } => "DISPLAY_NAVIGATION_TIMED_OUT",
            DisplayError::MonitorDiscoveryFailed { .. } => "DISPLAY_MONITOR_DISCOVERY_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, DisplayError::SpawnFailed { .. })
    }
}
