//! Scripted collaborators shared by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::coordinator::{CoordinatorSettings, RefreshCoordinator};
use crate::display::{
    DisplayError, DisplayExit, DisplayHandle, DisplaySurface, SurfaceStatus, channel,
    run_display_loop,
};
use crate::network::{ConnectivityProbe, ProbeError};
use crate::targets::{Target, TargetList};

pub const INITIAL: &str = "http://initial";
pub const FALLBACK: &str = "file:///kiosk/offline.html";

/// Tracks how many refreshes are between probe start and navigation end.
#[derive(Default)]
pub struct Gauge {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl Gauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        let _ = self
            .current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_sub(1));
    }

    pub fn max(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }
}

pub struct ScriptedProbe {
    online: AtomicBool,
    delay: Duration,
    gauge: Arc<Gauge>,
}

impl ScriptedProbe {
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl ConnectivityProbe for ScriptedProbe {
    fn check(&self) -> BoxFuture<'_, Result<(), ProbeError>> {
        async move {
            self.gauge.enter();
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.online.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(ProbeError::Unreachable {
                    url: "http://probe.test".to_string(),
                    message: "scripted offline".to_string(),
                })
            }
        }
        .boxed()
    }
}

#[derive(Default)]
pub struct Recorder {
    navigations: Mutex<Vec<String>>,
    destroyed: AtomicUsize,
}

impl Recorder {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }
}

struct RecordingSurface {
    recorder: Arc<Recorder>,
    gauge: Arc<Gauge>,
    delay: Duration,
}

impl DisplaySurface for RecordingSurface {
    fn navigate(&mut self, target: &Target) -> Result<(), DisplayError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.recorder
            .navigations
            .lock()
            .unwrap()
            .push(target.to_string());
        self.gauge.exit();
        Ok(())
    }

    fn status(&mut self) -> SurfaceStatus {
        SurfaceStatus::Open
    }

    fn destroy(&mut self) {
        self.recorder.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct HarnessBuilder {
    online: bool,
    probe_delay: Duration,
    navigate_delay: Duration,
}

impl HarnessBuilder {
    pub fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    pub fn probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = delay;
        self
    }

    pub fn navigate_delay(mut self, delay: Duration) -> Self {
        self.navigate_delay = delay;
        self
    }

    pub fn start(self) -> Harness {
        let gauge = Arc::new(Gauge::default());
        let recorder = Arc::new(Recorder::default());
        let probe = Arc::new(ScriptedProbe {
            online: AtomicBool::new(self.online),
            delay: self.probe_delay,
            gauge: gauge.clone(),
        });

        let (handle, requests) = channel();
        let mut surface = RecordingSurface {
            recorder: recorder.clone(),
            gauge: gauge.clone(),
            delay: self.navigate_delay,
        };
        let thread = std::thread::spawn(move || {
            run_display_loop(
                &mut surface,
                requests,
                &Target::new(INITIAL).unwrap(),
                Duration::from_millis(10),
            )
        });

        Harness {
            probe,
            gauge,
            recorder,
            handle,
            thread,
        }
    }
}

/// A display thread with a recording surface plus a scripted probe.
pub struct Harness {
    pub probe: Arc<ScriptedProbe>,
    pub gauge: Arc<Gauge>,
    recorder: Arc<Recorder>,
    handle: DisplayHandle,
    thread: JoinHandle<DisplayExit>,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            online: true,
            probe_delay: Duration::ZERO,
            navigate_delay: Duration::ZERO,
        }
    }

    pub fn start(online: bool) -> Harness {
        Self::builder().online(online).start()
    }

    pub fn coordinator(&self, targets: &[&str]) -> Arc<RefreshCoordinator> {
        let targets = TargetList::from_targets(
            targets.iter().map(|t| Target::new(*t).unwrap()).collect(),
        )
        .expect("at least one target");

        Arc::new(RefreshCoordinator::new(
            targets,
            self.probe.clone(),
            self.handle.clone(),
            CancellationToken::new(),
            CoordinatorSettings {
                fallback: Target::new(FALLBACK).unwrap(),
                probe_timeout: Duration::from_secs(1),
                navigate_timeout: Duration::from_secs(2),
            },
        ))
    }

    /// Wait for the display loop to end (it needs a shutdown first).
    pub fn join(self) -> Arc<Recorder> {
        drop(self.handle);
        self.thread.join().expect("display thread panicked");
        self.recorder
    }
}
