/// One physical monitor as reported by the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
}

/// Geometry of a surface spanning every monitor, anchored at the primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorLayout {
    pub total_width: u32,
    pub total_height: u32,
    pub origin_x: i32,
    pub origin_y: i32,
}

impl MonitorLayout {
    pub const FALLBACK: MonitorLayout = MonitorLayout {
        total_width: 1920,
        total_height: 1080,
        origin_x: 0,
        origin_y: 0,
    };

    /// Widths add up side by side, the height is the tallest monitor, and the
    /// origin is the primary monitor (or the first one when none is primary).
    pub fn from_monitors(monitors: &[Monitor]) -> Option<Self> {
        let first = monitors.first()?;
        let origin = monitors.iter().find(|m| m.is_primary).unwrap_or(first);

        Some(Self {
            total_width: monitors.iter().map(|m| m.width).sum(),
            total_height: monitors.iter().map(|m| m.height).max().unwrap_or(0),
            origin_x: origin.x,
            origin_y: origin.y,
        })
    }
}

/// Whether the surface is still showing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    Open,
    /// Closed by its own mechanism (window closed, browser exited).
    Closed,
}

/// Why the display loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayExit {
    DestroyRequested,
    SurfaceClosed,
    /// Every [`super::DisplayHandle`] was dropped.
    RequestsClosed,
}
