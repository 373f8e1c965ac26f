use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::display::channel::{DisplayReceiver, DisplayRequest};
use crate::display::surface::DisplaySurface;
use crate::display::types::{DisplayExit, SurfaceStatus};
use crate::targets::Target;

/// Drive `surface` on the current thread until it is destroyed or closes.
///
/// Shows `initial` first, then serves requests one at a time, pumping the
/// surface every `pump_interval` while idle. `destroy()` is called exactly
/// once, on the way out, whatever the reason for leaving.
pub fn run_display_loop<S: DisplaySurface>(
    surface: &mut S,
    requests: DisplayReceiver,
    initial: &Target,
    pump_interval: Duration,
) -> DisplayExit {
    info!(event = "core.display.loop_started", target = %initial);

    if let Err(e) = surface.navigate(initial) {
        warn!(
            event = "core.display.initial_navigation_failed",
            target = %initial,
            error = %e
        );
    }

    let exit = loop {
        match requests.recv_timeout(pump_interval) {
            Ok(DisplayRequest::Navigate { target, reply }) => {
                let result = surface.navigate(&target);
                match &result {
                    Ok(()) => debug!(event = "core.display.navigated", target = %target),
                    Err(e) => warn!(
                        event = "core.display.navigation_failed",
                        target = %target,
                        error = %e
                    ),
                }
                if reply.send(result).is_err() {
                    debug!(event = "core.display.reply_dropped", target = %target);
                }
            }
            Ok(DisplayRequest::Destroy) => break DisplayExit::DestroyRequested,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break DisplayExit::RequestsClosed,
        }

        if surface.status() == SurfaceStatus::Closed {
            break DisplayExit::SurfaceClosed;
        }
    };

    surface.destroy();
    info!(event = "core.display.loop_stopped", reason = ?exit);

    exit
}
