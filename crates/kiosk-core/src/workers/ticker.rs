use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::coordinator::{RefreshCoordinator, RefreshOutcome, RefreshReason};

/// Refresh every `period`, measured from the end of the previous refresh.
///
/// A slow refresh delays the next tick instead of piling up behind it.
pub async fn run_periodic_ticker(coordinator: Arc<RefreshCoordinator>, period: Duration) {
    let shutdown = coordinator.shutdown_token().clone();
    info!(
        event = "core.ticker.started",
        period_secs = period.as_secs()
    );

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = tokio::time::sleep(period) => {}
        }

        let outcome = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            outcome = coordinator.refresh(RefreshReason::Periodic) => outcome,
        };

        debug!(event = "core.ticker.tick_completed", outcome = ?outcome);
        if outcome == RefreshOutcome::Stopped {
            break;
        }
    }

    info!(event = "core.ticker.stopped");
}
