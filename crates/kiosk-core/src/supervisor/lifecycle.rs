use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::control::{CommandListener, ControlError};
use crate::coordinator::{CoordinatorSettings, RefreshCoordinator};
use crate::display::{DisplayExit, DisplayReceiver, DisplaySurface, channel, run_display_loop};
use crate::events;
use crate::supervisor::errors::SupervisorError;
use crate::supervisor::types::{Collaborators, LifecycleState, RuntimeSettings};
use crate::targets::Target;
use crate::workers::{run_network_watcher, run_periodic_ticker, run_signal_handler};

/// Owns the worker runtime and the display request queue.
pub struct Supervisor {
    runtime: Runtime,
    coordinator: Arc<RefreshCoordinator>,
    workers: Vec<JoinHandle<()>>,
    requests: DisplayReceiver,
    local_addr: SocketAddr,
    pump_interval: Duration,
    shutdown_timeout: Duration,
}

impl Supervisor {
    /// Bind the control socket and launch every background worker.
    ///
    /// Nothing is navigated yet; that starts with [`Supervisor::run`].
    pub fn start(
        settings: RuntimeSettings,
        collaborators: Collaborators,
    ) -> Result<Self, SupervisorError> {
        info!(
            event = "core.supervisor.state_changed",
            state = %LifecycleState::Starting
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("kiosk-worker")
            .build()
            .map_err(|source| SupervisorError::RuntimeBuildFailed { source })?;

        let listener = runtime.block_on(CommandListener::bind(
            settings.bind_addr,
            settings.read_timeout,
        ))?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ControlError::BindFailed {
                addr: settings.bind_addr.to_string(),
                source,
            })?;

        let (display, requests) = channel();
        let coordinator = Arc::new(RefreshCoordinator::new(
            settings.targets,
            collaborators.probe,
            display,
            CancellationToken::new(),
            CoordinatorSettings {
                fallback: settings.fallback,
                probe_timeout: settings.probe_timeout,
                navigate_timeout: settings.navigate_timeout,
            },
        ));

        let mut workers = vec![
            runtime.spawn(listener.run(coordinator.clone())),
            runtime.spawn(run_periodic_ticker(
                coordinator.clone(),
                settings.refresh_interval,
            )),
            runtime.spawn(run_network_watcher(
                coordinator.clone(),
                collaborators.interfaces,
                settings.poll_interval,
            )),
        ];

        if settings.handle_signals {
            let coordinator = coordinator.clone();
            workers.push(runtime.spawn(async move {
                if let Err(e) = run_signal_handler(coordinator).await {
                    warn!(event = "core.supervisor.signal_handler_failed", error = %e);
                }
            }));
        }

        info!(
            event = "core.supervisor.workers_started",
            addr = %local_addr,
            workers = workers.len()
        );

        Ok(Self {
            runtime,
            coordinator,
            workers,
            requests,
            local_addr,
            pump_interval: settings.pump_interval,
            shutdown_timeout: settings.shutdown_timeout,
        })
    }

    /// Address the control socket actually listens on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    /// Drive `surface` on the calling thread until the controller stops, then
    /// join the workers.
    ///
    /// `initial` is shown before any worker-triggered refresh.
    pub fn run<S: DisplaySurface>(self, surface: &mut S, initial: &Target) -> DisplayExit {
        info!(
            event = "core.supervisor.state_changed",
            state = %LifecycleState::Running
        );

        let exit = run_display_loop(surface, self.requests, initial, self.pump_interval);

        info!(
            event = "core.supervisor.state_changed",
            state = %LifecycleState::Stopping,
            reason = ?exit
        );
        events::log_app_shutdown();

        // A surface that closed by itself leaves the coordinator running.
        self.coordinator.shutdown();

        let timeout = self.shutdown_timeout;
        let workers = self.workers;
        let joined = self
            .runtime
            .block_on(async { tokio::time::timeout(timeout, join_all(workers)).await });

        match joined {
            Ok(results) => {
                for result in results {
                    if let Err(e) = result {
                        error!(event = "core.supervisor.worker_failed", error = %e);
                    }
                }
                debug!(event = "core.supervisor.workers_joined");
            }
            Err(_) => warn!(
                event = "core.supervisor.join_timed_out",
                timeout_ms = timeout.as_millis() as u64
            ),
        }

        self.runtime.shutdown_timeout(timeout);
        info!(
            event = "core.supervisor.state_changed",
            state = %LifecycleState::Stopped
        );

        exit
    }
}
