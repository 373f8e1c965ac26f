use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::coordinator::{RefreshCoordinator, RefreshOutcome};
use crate::network::InterfaceSource;

/// Poll `source` every `interval` and hand each snapshot to the coordinator.
///
/// The first poll only records a baseline; later polls refresh the display
/// whenever anything about the interfaces differs.
pub async fn run_network_watcher(
    coordinator: Arc<RefreshCoordinator>,
    source: Arc<dyn InterfaceSource>,
    interval: Duration,
) {
    let shutdown = coordinator.shutdown_token().clone();
    let mut ticks = tokio::time::interval(interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        event = "core.watcher.started",
        interval_ms = interval.as_millis() as u64
    );

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticks.tick() => {}
        }

        let source = source.clone();
        let snapshot = match tokio::task::spawn_blocking(move || source.snapshot()).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(event = "core.watcher.poll_failed", error = %e);
                continue;
            }
        };

        let outcome = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            outcome = coordinator.on_network_poll(snapshot) => outcome,
        };

        match outcome {
            Some(RefreshOutcome::Stopped) => break,
            Some(outcome) => debug!(event = "core.watcher.change_handled", outcome = ?outcome),
            None => {}
        }
    }

    info!(event = "core.watcher.stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{InterfaceState, NetworkSnapshot};
    use crate::test_support::{FALLBACK, Harness, INITIAL};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    struct ScriptedInterfaces {
        current: Mutex<NetworkSnapshot>,
    }

    impl ScriptedInterfaces {
        fn new(addr: &str) -> Arc<Self> {
            Arc::new(Self {
                current: Mutex::new(snapshot_with(addr)),
            })
        }

        fn set(&self, addr: &str) {
            *self.current.lock().unwrap() = snapshot_with(addr);
        }
    }

    impl InterfaceSource for ScriptedInterfaces {
        fn snapshot(&self) -> NetworkSnapshot {
            self.current.lock().unwrap().clone()
        }
    }

    fn snapshot_with(addr: &str) -> NetworkSnapshot {
        let mut interfaces = BTreeMap::new();
        interfaces.insert(
            "eth0".to_string(),
            InterfaceState {
                mac: "aa:bb:cc:dd:ee:ff".to_string(),
                addresses: vec![(addr.parse().unwrap(), 24)],
                mtu: 1500,
                oper_state: Some("up".to_string()),
            },
        );
        NetworkSnapshot::new(interfaces)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_steady_network_never_refreshes() {
        let harness = Harness::start(true);
        let coordinator = harness.coordinator(&["http://a"]);
        let source = ScriptedInterfaces::new("10.0.0.2");

        let task = tokio::spawn(run_network_watcher(
            coordinator.clone(),
            source,
            Duration::from_millis(20),
        ));
        tokio::time::sleep(Duration::from_millis(200)).await;
        coordinator.shutdown();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(harness.join().navigations(), vec![INITIAL]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_change_triggers_one_refresh() {
        let harness = Harness::start(false);
        let coordinator = harness.coordinator(&["http://a"]);
        let source = ScriptedInterfaces::new("10.0.0.2");

        let task = tokio::spawn(run_network_watcher(
            coordinator.clone(),
            source.clone(),
            Duration::from_millis(20),
        ));
        tokio::time::sleep(Duration::from_millis(100)).await;

        harness.probe.set_online(true);
        source.set("10.0.0.3");
        tokio::time::sleep(Duration::from_millis(200)).await;

        coordinator.shutdown();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();

        let navigations = harness.join().navigations();
        assert_eq!(navigations, vec![INITIAL, "http://a"]);
        assert_ne!(navigations.last().map(String::as_str), Some(FALLBACK));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_change_while_offline_shows_fallback() {
        let harness = Harness::start(false);
        let coordinator = harness.coordinator(&["http://a"]);
        let source = ScriptedInterfaces::new("10.0.0.2");

        let task = tokio::spawn(run_network_watcher(
            coordinator.clone(),
            source.clone(),
            Duration::from_millis(20),
        ));
        tokio::time::sleep(Duration::from_millis(100)).await;
        source.set("10.0.0.9");
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!coordinator.is_online().await);
        coordinator.shutdown();
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(harness.join().navigations(), vec![INITIAL, FALLBACK]);
    }
}
