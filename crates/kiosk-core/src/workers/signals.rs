use std::sync::Arc;

use tracing::info;

use crate::coordinator::RefreshCoordinator;

/// React to process signals until the controller stops.
///
/// SIGINT, SIGTERM and SIGQUIT shut the controller down. SIGUSR1 moves to
/// the next configured target.
#[cfg(unix)]
pub async fn run_signal_handler(coordinator: Arc<RefreshCoordinator>) -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;
    let mut sigusr1 = signal(SignalKind::user_defined1())?;
    let shutdown = coordinator.shutdown_token().clone();

    loop {
        let name = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
            _ = sigquit.recv() => "SIGQUIT",
            _ = sigusr1.recv() => {
                info!(event = "core.signals.cycle_requested");
                tokio::select! {
                    _ = coordinator.cycle_target() => {}
                    _ = shutdown.cancelled() => break,
                }
                continue;
            }
        };

        info!(event = "core.signals.shutdown_requested", signal = name);
        coordinator.shutdown();
        break;
    }

    Ok(())
}

#[cfg(not(unix))]
pub async fn run_signal_handler(coordinator: Arc<RefreshCoordinator>) -> std::io::Result<()> {
    let shutdown = coordinator.shutdown_token().clone();

    tokio::select! {
        _ = shutdown.cancelled() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!(event = "core.signals.shutdown_requested", signal = "ctrl-c");
            coordinator.shutdown();
        }
    }

    Ok(())
}
