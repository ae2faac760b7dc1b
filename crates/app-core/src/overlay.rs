//! Debug overlay model.
//!
//! Computed as plain data (positioned strings plus a marker rect) so a
//! frontend only has to draw what it is handed.

use glam::Vec2;

use crate::constants::{
    OVERLAY_LINE_STEP, OVERLAY_MARGIN_X, OVERLAY_SETTINGS_Y, OVERLAY_VALUES_Y,
    POINTER_MARKER_SIZE,
};
use crate::tracking::{RenderTransform, TrackerReading, ViewSettings};

/// One positioned line of diagnostic text.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLine {
    pub pos: Vec2,
    pub text: String,
}

/// Axis-aligned filled rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerRect {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DebugOverlay {
    pub lines: Vec<OverlayLine>,
    /// Small filled square centered on the raw beacon position.
    pub marker: MarkerRect,
}

/// Build the overlay for the current frame: the live transform values in
/// one block, the settings in another, and the pointer marker.
pub fn build(
    reading: &TrackerReading,
    transform: &RenderTransform,
    settings: &ViewSettings,
) -> DebugOverlay {
    let value_line = |index: u32, text: String| OverlayLine {
        pos: Vec2::new(
            OVERLAY_MARGIN_X,
            OVERLAY_VALUES_Y + index as f32 * OVERLAY_LINE_STEP,
        ),
        text,
    };
    let settings_line = |index: u32, text: String| OverlayLine {
        pos: Vec2::new(
            OVERLAY_MARGIN_X,
            OVERLAY_SETTINGS_Y + index as f32 * OVERLAY_LINE_STEP,
        ),
        text,
    };

    let lines = vec![
        value_line(0, format!("Distance: {:.2} meters", reading.distance)),
        value_line(
            1,
            format!(
                "Zoom used: {:.3} ({:.3})",
                transform.zoom, transform.absolute_zoom
            ),
        ),
        value_line(
            2,
            format!(
                "Image placement: {:.2}, {:.2}",
                transform.norm.x, transform.norm.y
            ),
        ),
        value_line(
            3,
            format!(
                "Absolute placement: {:.2}, {:.2}",
                transform.origin.x, transform.origin.y
            ),
        ),
        value_line(
            4,
            format!("Image Size: {:.2}, {:.2}", transform.size.x, transform.size.y),
        ),
        settings_line(0, "Settings".to_string()),
        settings_line(1, format!("min_distance: {:.2}", settings.min_distance)),
        settings_line(2, format!("max_distance: {:.2}", settings.max_distance)),
        settings_line(3, format!("max_zoom: {:.2}", settings.max_zoom)),
    ];

    let half = POINTER_MARKER_SIZE / 2.0;
    DebugOverlay {
        lines,
        marker: MarkerRect {
            pos: reading.position - Vec2::splat(half),
            size: Vec2::splat(POINTER_MARKER_SIZE),
        },
    }
}
