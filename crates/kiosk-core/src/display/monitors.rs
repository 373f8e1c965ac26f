use tracing::{debug, info, warn};

use crate::display::errors::DisplayError;
use crate::display::types::{Monitor, MonitorLayout};

/// Discover the layout spanning every connected monitor.
///
/// Monitors whose geometry cannot be read are skipped. Fails when the
/// windowing system cannot be queried or no usable monitor remains.
pub fn discover_layout() -> Result<MonitorLayout, DisplayError> {
    info!(event = "core.monitors.discovery_started");

    let monitors = xcap::Monitor::all().map_err(|e| DisplayError::MonitorDiscoveryFailed {
        message: e.to_string(),
    })?;

    let mut skipped_count = 0;

    let result: Vec<Monitor> = monitors
        .iter()
        .enumerate()
        .filter_map(|(idx, m)| {
            let (x, y, width, height) = match read_geometry(m) {
                Ok(geometry) => geometry,
                Err((property, e)) => {
                    debug!(
                        event = "core.monitors.property_access_failed",
                        property = property,
                        monitor_index = idx,
                        error = %e
                    );
                    skipped_count += 1;
                    return None;
                }
            };

            let is_primary = match m.is_primary() {
                Ok(primary) => primary,
                Err(e) => {
                    debug!(
                        event = "core.monitors.is_primary_check_failed",
                        monitor_index = idx,
                        error = %e
                    );
                    false
                }
            };

            Some(Monitor {
                x,
                y,
                width,
                height,
                is_primary,
            })
        })
        .collect();

    if skipped_count > 0 {
        warn!(
            event = "core.monitors.discovery_incomplete",
            skipped_count = skipped_count,
            returned_count = result.len()
        );
    }

    layout_from(&result)
}

/// Position and size of `monitor`, or the name of the first unreadable property.
fn read_geometry(
    monitor: &xcap::Monitor,
) -> Result<(i32, i32, u32, u32), (&'static str, xcap::XCapError)> {
    Ok((
        monitor.x().map_err(|e| ("x", e))?,
        monitor.y().map_err(|e| ("y", e))?,
        monitor.width().map_err(|e| ("width", e))?,
        monitor.height().map_err(|e| ("height", e))?,
    ))
}

fn layout_from(monitors: &[Monitor]) -> Result<MonitorLayout, DisplayError> {
    let layout =
        MonitorLayout::from_monitors(monitors).ok_or_else(|| DisplayError::MonitorDiscoveryFailed {
            message: "no usable monitor found".to_string(),
        })?;

    info!(
        event = "core.monitors.discovery_completed",
        count = monitors.len(),
        width = layout.total_width,
        height = layout.total_height
    );
    Ok(layout)
}
