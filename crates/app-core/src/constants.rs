// Control-loop tuning constants shared by the tracking math and frontends.

// Output screen size in pixels (the pointer hardware reports positions in
// this coordinate space)
pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 480.0;

// Distance in meters at which the whole image fits the screen
pub const DEFAULT_MIN_DISTANCE: f32 = 1.5;
// Distance in meters at which the image reaches maximum zoom
pub const DEFAULT_MAX_DISTANCE: f32 = 4.6;
// Image size multiplier applied at maximum distance
pub const DEFAULT_MAX_ZOOM: f32 = 2.0;

// Per-press adjustment applied to every tunable setting
pub const SETTING_STEP: f32 = 0.2;

// Decrement guards: a press is ignored unless the current value is above these
pub const MIN_DISTANCE_FLOOR: f32 = 0.2;
pub const MAX_ZOOM_FLOOR: f32 = 1.2;

// Debug overlay layout
pub const OVERLAY_MARGIN_X: f32 = 20.0;
pub const OVERLAY_LINE_STEP: f32 = 20.0;
pub const OVERLAY_VALUES_Y: f32 = 20.0;
pub const OVERLAY_SETTINGS_Y: f32 = 200.0;
pub const OVERLAY_TEXT_SCALE: f32 = 2.0;
pub const POINTER_MARKER_SIZE: f32 = 10.0;

// Clamp range for frontends that emulate the beacon distance (meters)
pub const EMULATED_DISTANCE_MIN: f32 = 0.2;
pub const EMULATED_DISTANCE_MAX: f32 = 8.0;
pub const EMULATED_DISTANCE_STEP: f32 = 0.1;
