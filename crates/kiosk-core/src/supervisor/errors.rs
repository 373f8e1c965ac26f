use crate::control::ControlError;
use crate::errors::KioskError;

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("Failed to build async runtime: {source}")]
    RuntimeBuildFailed { source: std::io::Error },

    #[error(transparent)]
    Control(#[from] ControlError),
}

impl KioskError for SupervisorError {
    fn error_code(&self) -> &'static str {
        match self {
            SupervisorError::RuntimeBuildFailed { .. } => "SUPERVISOR_RUNTIME_BUILD_FAILED",
            SupervisorError::Control(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SupervisorError::RuntimeBuildFailed { .. } => false,
            SupervisorError::Control(e) => e.is_user_error(),
        }
    }
}
