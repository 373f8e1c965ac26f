use crate::display::errors::DisplayError;
use crate::display::types::SurfaceStatus;
use crate::targets::Target;

/// A full-screen surface that can show one target at a time.
///
/// Implementations are driven from exactly one thread and need not be `Send`.
pub trait DisplaySurface {
    /// Show `target`, replacing whatever is on screen.
    fn navigate(&mut self, target: &Target) -> Result<(), DisplayError>;

    /// Pump the surface's own events and report whether it is still open.
    fn status(&mut self) -> SurfaceStatus;

    /// Tear the surface down. Called exactly once, when the display loop ends.
    fn destroy(&mut self);
}
