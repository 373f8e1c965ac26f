use std::sync::mpsc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;

use crate::display::errors::DisplayError;
use crate::targets::Target;

/// A request marshalled onto the thread that owns the surface.
#[derive(Debug)]
pub enum DisplayRequest {
    Navigate {
        target: Target,
        reply: oneshot::Sender<Result<(), DisplayError>>,
    },
    Destroy,
}

/// Receiving end, consumed by [`super::run_display_loop`] on the owning thread.
pub type DisplayReceiver = mpsc::Receiver<DisplayRequest>;

/// Cloneable sender used by workers to reach the surface.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    tx: mpsc::Sender<DisplayRequest>,
}

pub fn channel() -> (DisplayHandle, DisplayReceiver) {
    let (tx, rx) = mpsc::channel();
    (DisplayHandle { tx }, rx)
}

impl DisplayHandle {
    /// Ask the display thread to show `target` and wait for it to finish.
    ///
    /// Waits at most `timeout` for the acknowledgement. A dropped reply means
    /// the display loop ended while the request was queued.
    pub async fn navigate(&self, target: Target, timeout: Duration) -> Result<(), DisplayError> {
        let (reply, done) = oneshot::channel();
        let label = target.to_string();

        self.tx
            .send(DisplayRequest::Navigate { target, reply })
            .map_err(|_| DisplayError::SurfaceGone)?;

        match tokio::time::timeout(timeout, done).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(DisplayError::SurfaceGone),
            Err(_) => Err(DisplayError::NavigationTimedOut {
                target: label,
                timeout_ms: timeout.as_millis(),
            }),
        }
    }

    /// Ask the display thread to tear the surface down. Does not wait.
    pub fn destroy(&self) -> Result<(), DisplayError> {
        self.tx.send(DisplayRequest::Destroy).map_err(|_| {
            debug!(event = "core.display.destroy_after_loop_exit");
            DisplayError::SurfaceGone
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigate_fails_when_loop_is_gone() {
        let (handle, rx) = channel();
        drop(rx);

        let result = handle
            .navigate(Target::new("http://x").unwrap(), Duration::from_secs(1))
            .await;
        assert!(matches!(result, Err(DisplayError::SurfaceGone)));
        assert!(handle.destroy().is_err());
    }

    #[tokio::test]
    async fn test_navigate_times_out_without_ack() {
        let (handle, _rx) = channel();

        let result = handle
            .navigate(Target::new("http://x").unwrap(), Duration::from_millis(50))
            .await;
        assert!(matches!(
            result,
            Err(DisplayError::NavigationTimedOut { .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_reply_is_surface_gone() {
        let (handle, rx) = channel();
        let consumer = std::thread::spawn(move || {
            // Take the request and drop it unanswered.
            let _ = rx.recv();
        });

        let result = handle
            .navigate(Target::new("http://x").unwrap(), Duration::from_secs(2))
            .await;
        consumer.join().unwrap();
        assert!(matches!(result, Err(DisplayError::SurfaceGone)));
    }
}
