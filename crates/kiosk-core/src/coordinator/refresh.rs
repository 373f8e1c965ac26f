use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::coordinator::state::ControllerState;
use crate::coordinator::types::{RefreshOutcome, RefreshReason};
use crate::display::DisplayHandle;
use crate::network::{ConnectivityProbe, NetworkSnapshot};
use crate::targets::{Target, TargetList};

#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    /// Shown instead of the current target while the probe fails.
    pub fallback: Target,
    pub probe_timeout: Duration,
    pub navigate_timeout: Duration,
}

/// Owns the controller state and performs every refresh.
///
/// One async mutex covers probe and navigation, so refreshes never
/// interleave. Tokio's mutex is fair, which keeps refreshes in the order their
/// callers queued up. See the module docs for how waiting requests coalesce.
pub struct RefreshCoordinator {
    state: Mutex<ControllerState>,
    next_ticket: AtomicU64,
    running: AtomicBool,
    probe: Arc<dyn ConnectivityProbe>,
    display: DisplayHandle,
    shutdown: CancellationToken,
    settings: CoordinatorSettings,
}

impl RefreshCoordinator {
    pub fn new(
        targets: TargetList,
        probe: Arc<dyn ConnectivityProbe>,
        display: DisplayHandle,
        shutdown: CancellationToken,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            state: Mutex::new(ControllerState::new(targets)),
            next_ticket: AtomicU64::new(0),
            running: AtomicBool::new(true),
            probe,
            display,
            shutdown,
            settings,
        }
    }

    /// Probe connectivity and show the current target (or the fallback).
    ///
    /// Safe to call from any number of tasks at once.
    pub async fn refresh(&self, reason: RefreshReason) -> RefreshOutcome {
        let ticket = self.take_ticket();
        let mut state = self.state.lock().await;

        if !self.is_running() {
            return RefreshOutcome::Stopped;
        }

        if state.covered_ticket >= ticket {
            debug!(
                event = "core.coordinator.refresh_coalesced",
                reason = %reason,
                ticket = ticket,
                covered = state.covered_ticket
            );
            return RefreshOutcome::Coalesced;
        }

        self.refresh_locked(&mut state, reason).await
    }

    /// Replace the targets with `target` and refresh, as one unit.
    pub async fn set_target(&self, target: Target) -> RefreshOutcome {
        self.take_ticket();
        let mut state = self.state.lock().await;

        if !self.is_running() {
            return RefreshOutcome::Stopped;
        }

        info!(
            event = "core.coordinator.target_changed",
            previous = %state.targets.current(),
            target = %target
        );
        state.targets.replace_with(target);

        self.refresh_locked(&mut state, RefreshReason::Command).await
    }

    /// Advance to the next target of the list and refresh.
    pub async fn cycle_target(&self) -> RefreshOutcome {
        self.take_ticket();
        let mut state = self.state.lock().await;

        if !self.is_running() {
            return RefreshOutcome::Stopped;
        }

        let next = state.targets.advance().clone();
        info!(
            event = "core.coordinator.target_cycled",
            target = %next,
            count = state.targets.len()
        );

        self.refresh_locked(&mut state, RefreshReason::Cycle).await
    }

    /// Record a network snapshot and refresh if it differs from the last one.
    ///
    /// The snapshot is stored whether or not the refresh finds the network
    /// usable. Returns `None` when nothing changed.
    pub async fn on_network_poll(&self, snapshot: NetworkSnapshot) -> Option<RefreshOutcome> {
        let ticket = self.take_ticket();
        let mut state = self.state.lock().await;

        if !self.is_running() {
            return Some(RefreshOutcome::Stopped);
        }

        if !state.observe_network(snapshot) {
            return None;
        }

        info!(
            event = "core.coordinator.network_changed",
            ticket = ticket,
            interfaces = state
                .last_network_snapshot
                .as_ref()
                .map(|s| s.interfaces().len())
                .unwrap_or(0)
        );

        Some(
            self.refresh_locked(&mut state, RefreshReason::NetworkChange)
                .await,
        )
    }

    /// Stop the controller: no further refreshes, surface destroyed, workers
    /// signalled. Returns `true` for the call that actually initiated it.
    ///
    /// Does not wait for an in-flight refresh; that one either completes or
    /// finds the display gone.
    pub fn shutdown(&self) -> bool {
        if !self.running.swap(false, Ordering::SeqCst) {
            return false;
        }

        info!(event = "core.coordinator.shutdown_started");

        if let Err(e) = self.display.destroy() {
            debug!(event = "core.coordinator.destroy_not_delivered", error = %e);
        }
        self.shutdown.cancel();

        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Token cancelled when the controller stops.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    pub async fn current_target(&self) -> Target {
        self.state.lock().await.targets.current().clone()
    }

    pub async fn is_online(&self) -> bool {
        self.state.lock().await.is_online
    }

    pub async fn last_navigation(&self) -> Option<Target> {
        self.state.lock().await.last_navigation.clone()
    }

    fn take_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn refresh_locked(
        &self,
        state: &mut ControllerState,
        reason: RefreshReason,
    ) -> RefreshOutcome {
        state.covered_ticket = self.next_ticket.load(Ordering::SeqCst);

        let online = self.probe_online().await;
        state.is_online = online;

        let target = if online {
            state.targets.current().clone()
        } else {
            self.settings.fallback.clone()
        };

        match self
            .display
            .navigate(target.clone(), self.settings.navigate_timeout)
            .await
        {
            Ok(()) => {
                info!(
                    event = "core.coordinator.refresh_completed",
                    reason = %reason,
                    target = %target,
                    online = online
                );
                state.last_navigation = Some(target.clone());
                RefreshOutcome::Navigated { target, online }
            }
            Err(e) => {
                warn!(
                    event = "core.coordinator.refresh_failed",
                    reason = %reason,
                    target = %target,
                    error = %e
                );
                RefreshOutcome::NavigationFailed { target }
            }
        }
    }

    async fn probe_online(&self) -> bool {
        match tokio::time::timeout(self.settings.probe_timeout, self.probe.check()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                info!(event = "core.coordinator.probe_failed", error = %e);
                false
            }
            Err(_) => {
                warn!(
                    event = "core.coordinator.probe_timed_out",
                    timeout_ms = self.settings.probe_timeout.as_millis() as u64
                );
                false
            }
        }
    }
}
