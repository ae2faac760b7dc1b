//! View-transform math for the head-coupled window effect.
//!
//! These types intentionally avoid referencing platform APIs: a frontend
//! feeds in tracker readings and a viewport, and reads back where to place
//! the zoomed image. That keeps the per-frame math unit-testable away from
//! the device and presentation boundaries.

use glam::Vec2;
use thiserror::Error;

use crate::constants::{
    DEFAULT_MAX_DISTANCE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_DISTANCE, MAX_ZOOM_FLOOR,
    MIN_DISTANCE_FLOOR, SETTING_STEP,
};

/// One raw sample from the infrared tracker.
///
/// `valid == false` means the beacon was not visible this frame; the loop
/// keeps the previous placement rather than resetting anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerReading {
    /// Beacon position in screen pixels.
    pub position: Vec2,
    /// Beacon distance from the sensor in meters.
    pub distance: f32,
    pub valid: bool,
}

impl TrackerReading {
    pub fn new(position: Vec2, distance: f32) -> Self {
        Self {
            position,
            distance,
            valid: true,
        }
    }

    /// A sample with no visible beacon.
    pub fn invalid() -> Self {
        Self {
            position: Vec2::ZERO,
            distance: 0.0,
            valid: false,
        }
    }
}

/// Output screen size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("min_distance must be positive, got {0}")]
    NonPositiveMinDistance(f32),
    #[error("max_distance ({max}) must exceed min_distance ({min})")]
    DistanceRangeInverted { min: f32, max: f32 },
    #[error("max_zoom must exceed 1.0, got {0}")]
    MaxZoomTooSmall(f32),
}

/// User-tunable view settings, mutated only by discrete button presses in
/// fixed steps of [`SETTING_STEP`]. Invariants: `min_distance > 0`,
/// `max_distance > min_distance`, `max_zoom > 1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSettings {
    /// Distance at which the entire image is visible on the screen.
    pub min_distance: f32,
    /// Distance at which the image is at maximum zoom level.
    pub max_distance: f32,
    /// How much bigger the image gets at maximum distance.
    pub max_zoom: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_distance: DEFAULT_MAX_DISTANCE,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl ViewSettings {
    pub fn new(min_distance: f32, max_distance: f32, max_zoom: f32) -> Result<Self, SettingsError> {
        if min_distance <= 0.0 {
            return Err(SettingsError::NonPositiveMinDistance(min_distance));
        }
        if max_distance <= min_distance {
            return Err(SettingsError::DistanceRangeInverted {
                min: min_distance,
                max: max_distance,
            });
        }
        if max_zoom <= 1.0 {
            return Err(SettingsError::MaxZoomTooSmall(max_zoom));
        }
        Ok(Self {
            min_distance,
            max_distance,
            max_zoom,
        })
    }

    // Button-driven adjustments. Decrements check the pre-decrement value
    // against a floor and are otherwise ignored; increments are unguarded.

    pub fn lower_min_distance(&mut self) {
        if self.min_distance > MIN_DISTANCE_FLOOR {
            self.min_distance -= SETTING_STEP;
        }
    }

    pub fn raise_min_distance(&mut self) {
        self.min_distance += SETTING_STEP;
    }

    pub fn lower_max_distance(&mut self) {
        if self.max_distance > self.min_distance + SETTING_STEP {
            self.max_distance -= SETTING_STEP;
        }
    }

    pub fn raise_max_distance(&mut self) {
        self.max_distance += SETTING_STEP;
    }

    pub fn lower_max_zoom(&mut self) {
        if self.max_zoom > MAX_ZOOM_FLOOR {
            self.max_zoom -= SETTING_STEP;
        }
    }

    pub fn raise_max_zoom(&mut self) {
        self.max_zoom += SETTING_STEP;
    }
}

/// Where the zoomed image sits on screen this frame. Fully recomputed from
/// a valid reading; carries no history of its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    /// Normalized zoom: 0 when the beacon is at `min_distance` or closer,
    /// 1 at `max_distance` or farther.
    pub zoom: f32,
    /// Zoom applied to the screen size, in `[1, max_zoom]`.
    pub absolute_zoom: f32,
    /// On-screen size of the zoomed image in pixels.
    pub size: Vec2,
    /// Normalized placement; (0, 0) shows the top-left of the zoomed image.
    /// Deliberately not clamped to [0, 1]: positions past the screen edge
    /// extrapolate linearly.
    pub norm: Vec2,
    /// Absolute top-left corner of the image on screen.
    pub origin: Vec2,
}

impl RenderTransform {
    /// The transform before any beacon has been seen: the image exactly
    /// fills the screen.
    pub fn neutral(viewport: Viewport) -> Self {
        Self {
            zoom: 0.0,
            absolute_zoom: 1.0,
            size: viewport.size(),
            norm: Vec2::ZERO,
            origin: Vec2::ZERO,
        }
    }

    /// Recompute the transform from a beacon position/distance.
    ///
    /// The horizontal axis is mirrored: sensor x increases in the opposite
    /// screen direction. `norm` maps [0, 1] linearly onto the top-left-corner
    /// range `[-(size - screen), 0]`, so the zoomed image always fully covers
    /// the screen for any in-range position.
    pub fn compute(
        position: Vec2,
        distance: f32,
        settings: &ViewSettings,
        viewport: Viewport,
    ) -> Self {
        let zoom = ((distance - settings.min_distance)
            / (settings.max_distance - settings.min_distance))
            .clamp(0.0, 1.0);
        let absolute_zoom = 1.0 + zoom * (settings.max_zoom - 1.0);
        let size = viewport.size() * absolute_zoom;

        let norm = Vec2::new(
            1.0 - position.x / viewport.width,
            position.y / viewport.height,
        );
        let origin = norm * -(size - viewport.size());

        Self {
            zoom,
            absolute_zoom,
            size,
            norm,
            origin,
        }
    }

    /// Draw parameters for blitting an image of native size `image_size`:
    /// scale factors per axis, and the point the image's geometric center
    /// must land on (the presentation layer scales at the center, not the
    /// corner).
    pub fn placement(&self, image_size: Vec2) -> ImagePlacement {
        ImagePlacement {
            center: self.origin + self.size * 0.5,
            scale: self.size / image_size,
        }
    }
}

/// Center-anchored blit parameters for the background image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePlacement {
    pub center: Vec2,
    pub scale: Vec2,
}

/// All loop-owned state, passed by mutable reference into the per-frame
/// functions so there are no ambient globals.
#[derive(Clone, Debug)]
pub struct ViewState {
    pub settings: ViewSettings,
    pub debug_overlay: bool,
    pub transform: RenderTransform,
    /// Most recent sample offered by any source, valid or not. The debug
    /// overlay reports it raw.
    pub last_reading: TrackerReading,
}

impl ViewState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            settings: ViewSettings::default(),
            debug_overlay: false,
            transform: RenderTransform::neutral(viewport),
            last_reading: TrackerReading::invalid(),
        }
    }

    /// Fold one frame's reading into the state. `None` (the probe failed)
    /// and invalid readings both leave the previous transform untouched:
    /// sticky last-known placement.
    pub fn ingest(&mut self, reading: Option<TrackerReading>, viewport: Viewport) {
        let Some(reading) = reading else {
            return;
        };
        self.last_reading = reading;
        if reading.valid {
            self.transform = RenderTransform::compute(
                reading.position,
                reading.distance,
                &self.settings,
                viewport,
            );
        }
    }
}
