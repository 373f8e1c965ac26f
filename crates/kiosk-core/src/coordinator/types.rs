use std::fmt;

use crate::targets::Target;

/// What asked for a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Command,
    Periodic,
    NetworkChange,
    Cycle,
}

impl RefreshReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshReason::Command => "command",
            RefreshReason::Periodic => "periodic",
            RefreshReason::NetworkChange => "network_change",
            RefreshReason::Cycle => "cycle",
        }
    }
}

impl fmt::Display for RefreshReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single refresh request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The surface acknowledged showing `target`.
    Navigated { target: Target, online: bool },
    /// Navigation failed; the next trigger retries.
    NavigationFailed { target: Target },
    /// A refresh that started after this request already covered it.
    Coalesced,
    /// The controller is shutting down.
    Stopped,
}
