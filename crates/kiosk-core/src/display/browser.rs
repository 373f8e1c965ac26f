use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::display::errors::DisplayError;
use crate::display::surface::DisplaySurface;
use crate::display::types::{MonitorLayout, SurfaceStatus};
use crate::targets::Target;

const TERMINATE_GRACE: Duration = Duration::from_secs(2);
const TERMINATE_POLL: Duration = Duration::from_millis(50);

/// Display surface backed by an external browser process in kiosk mode.
///
/// Every navigation replaces the browser process, so a reload of the same
/// target is a fresh start. The surface counts as closed once the current
/// process exits without having been told to.
pub struct BrowserSurface {
    command: String,
    args: Vec<String>,
    layout: MonitorLayout,
    child: Option<Child>,
}

impl BrowserSurface {
    pub fn new(command: impl Into<String>, args: Vec<String>, layout: MonitorLayout) -> Self {
        Self {
            command: command.into(),
            args,
            layout,
            child: None,
        }
    }

    /// Arguments for showing `target`, with placeholders filled in.
    pub fn render_args(&self, target: &Target) -> Vec<String> {
        let mut mentions_target = false;
        let mut rendered: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains("{target}") {
                    mentions_target = true;
                }
                arg.replace("{x}", &self.layout.origin_x.to_string())
                    .replace("{y}", &self.layout.origin_y.to_string())
                    .replace("{width}", &self.layout.total_width.to_string())
                    .replace("{height}", &self.layout.total_height.to_string())
                    .replace("{target}", target.as_str())
            })
            .collect();

        if !mentions_target {
            rendered.push(target.to_string());
        }
        rendered
    }

    fn stop_child(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        if let Ok(Some(_)) = child.try_wait() {
            return;
        }

        request_terminate(&child);

        let deadline = Instant::now() + TERMINATE_GRACE;
        while Instant::now() < deadline {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!(
                        event = "core.browser.stopped",
                        pid = child.id(),
                        status = %status
                    );
                    return;
                }
                Ok(None) => std::thread::sleep(TERMINATE_POLL),
                Err(_) => break,
            }
        }

        warn!(event = "core.browser.kill_after_grace", pid = child.id());
        if let Err(e) = child.kill() {
            warn!(event = "core.browser.kill_failed", pid = child.id(), error = %e);
        }
        let _ = child.wait();
    }
}

#[cfg(unix)]
fn request_terminate(child: &Child) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    if let Err(e) = kill(Pid::from_raw(child.id() as i32), Signal::SIGTERM) {
        debug!(event = "core.browser.sigterm_failed", pid = child.id(), error = %e);
    }
}

#[cfg(not(unix))]
fn request_terminate(_child: &Child) {}

impl DisplaySurface for BrowserSurface {
    fn navigate(&mut self, target: &Target) -> Result<(), DisplayError> {
        self.stop_child();

        let args = self.render_args(target);
        let child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DisplayError::SpawnFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        info!(
            event = "core.browser.launched",
            pid = child.id(),
            command = %self.command,
            target = %target
        );
        self.child = Some(child);
        Ok(())
    }

    fn status(&mut self) -> SurfaceStatus {
        let Some(child) = self.child.as_mut() else {
            return SurfaceStatus::Open;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                info!(
                    event = "core.browser.exited",
                    pid = child.id(),
                    status = %status
                );
                SurfaceStatus::Closed
            }
            Ok(None) => SurfaceStatus::Open,
            Err(e) => {
                warn!(event = "core.browser.wait_failed", error = %e);
                SurfaceStatus::Open
            }
        }
    }

    fn destroy(&mut self) {
        self.stop_child();
    }
}

impl Drop for BrowserSurface {
    fn drop(&mut self) {
        self.stop_child();
    }
}
