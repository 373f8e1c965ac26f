use crate::errors::KioskError;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("No network interface with an IPv4 address was found")]
    NoIpv4Interface,
}

impl KioskError for NetworkError {
    fn error_code(&self) -> &'static str {
        match self {
            NetworkError::NoIpv4Interface => "NETWORK_NO_IPV4_INTERFACE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to build probe client: {message}")]
    ClientBuild { message: String },

    #[error("Endpoint '{url}' unreachable: {message}")]
    Unreachable { url: String, message: String },

    #[error("Endpoint '{url}' did not answer within {timeout_ms}ms")]
    TimedOut { url: String, timeout_ms: u128 },
}

impl KioskError for ProbeError {
    fn error_code(&self) -> &'static str {
        match self {
            ProbeError::ClientBuild { .. } => "PROBE_CLIENT_BUILD_FAILED",
            ProbeError::Unreachable { .. } => "PROBE_UNREACHABLE",
            ProbeError::TimedOut { .. } => "PROBE_TIMED_OUT",
        }
    }
}
