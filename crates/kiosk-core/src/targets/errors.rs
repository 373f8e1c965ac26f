use crate::errors::KioskError;

#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("Target must not be empty")]
    Empty,

    #[error("Failed to read targets file '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },
}

impl KioskError for TargetError {
    fn error_code(&self) -> &'static str {
        match self {
            TargetError::Empty => "TARGET_EMPTY",
            TargetError::ReadFailed { .. } => "TARGETS_READ_FAILED",
            TargetError::WriteFailed { .. } => "TARGETS_WRITE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, TargetError::Empty)
    }
}
