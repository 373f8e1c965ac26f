use crate::errors::KioskError;

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Failed to bind control socket on {addr}: {source}")]
    BindFailed {
        addr: String,
        source: std::io::Error,
    },

    #[error("Could not resolve controller address '{addr}'")]
    AddressUnresolved { addr: String },

    #[error("Failed to connect to controller at {addr}: {source}")]
    ConnectFailed {
        addr: String,
        source: std::io::Error,
    },

    #[error("Failed to send command to {addr}: {source}")]
    SendFailed {
        addr: String,
        source: std::io::Error,
    },
}

impl KioskError for ControlError {
    fn error_code(&self) -> &'static str {
        match self {
            ControlError::BindFailed { .. } => "CONTROL_BIND_FAILED",
            ControlError::AddressUnresolved { .. } => "CONTROL_ADDRESS_UNRESOLVED",
            ControlError::ConnectFailed { .. } => "CONTROL_CONNECT_FAILED",
            ControlError::SendFailed { .. } => "CONTROL_SEND_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ControlError::AddressUnresolved { .. } | ControlError::ConnectFailed { .. }
        )
    }
}
