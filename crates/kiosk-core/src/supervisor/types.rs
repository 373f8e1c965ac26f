use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::KioskConfig;
use crate::network::{ConnectivityProbe, InterfaceSource};
use crate::targets::{Target, TargetList};

/// Exit status of a controller that stopped normally.
///
/// Never zero, even after a clean `exit`.
pub const STOPPED_EXIT_CODE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Running,
    Stopping,
    Stopped,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Stopping => "stopping",
            LifecycleState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the supervisor needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub bind_addr: SocketAddr,
    pub read_timeout: Duration,
    pub refresh_interval: Duration,
    pub poll_interval: Duration,
    pub probe_timeout: Duration,
    pub navigate_timeout: Duration,
    pub pump_interval: Duration,
    pub shutdown_timeout: Duration,
    pub targets: TargetList,
    pub fallback: Target,
    /// Install OS signal handlers. Off in tests that share a process.
    pub handle_signals: bool,
}

impl RuntimeSettings {
    pub fn from_config(
        config: &KioskConfig,
        bind_addr: SocketAddr,
        targets: TargetList,
        fallback: Target,
    ) -> Self {
        Self {
            bind_addr,
            read_timeout: config.control.read_timeout(),
            refresh_interval: config.refresh.interval(),
            poll_interval: config.network.poll_interval(),
            probe_timeout: config.network.probe_timeout(),
            navigate_timeout: config.refresh.navigate_timeout(),
            pump_interval: config.display.pump_interval(),
            shutdown_timeout: config.shutdown.timeout(),
            targets,
            fallback,
            handle_signals: true,
        }
    }
}

/// Host-facing services, replaceable in tests.
pub struct Collaborators {
    pub probe: Arc<dyn ConnectivityProbe>,
    pub interfaces: Arc<dyn InterfaceSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_follow_config() {
        let mut config = KioskConfig::default();
        config.refresh.interval_secs = Some(30);
        config.network.poll_interval_secs = Some(2);

        let settings = RuntimeSettings::from_config(
            &config,
            "127.0.0.1:12345".parse().unwrap(),
            TargetList::single(Target::new("http://a").unwrap()),
            Target::new("file:///offline.html").unwrap(),
        );

        assert_eq!(settings.refresh_interval, Duration::from_secs(30));
        assert_eq!(settings.poll_interval, Duration::from_secs(2));
        assert_eq!(settings.probe_timeout, Duration::from_secs(5));
        assert_eq!(settings.shutdown_timeout, Duration::from_secs(5));
        assert!(settings.handle_signals);
    }

    #[test]
    fn test_stopped_exit_code_is_not_success() {
        assert_ne!(STOPPED_EXIT_CODE, 0);
    }
}
