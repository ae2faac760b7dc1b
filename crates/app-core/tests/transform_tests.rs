// Host-side tests for the per-frame transform math.

use app_core::{RenderTransform, TrackerReading, ViewSettings, ViewState, Viewport};
use glam::Vec2;

const VIEWPORT: Viewport = Viewport {
    width: 640.0,
    height: 480.0,
};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn zoom_floors_at_min_distance() {
    let settings = ViewSettings::default();
    // At min_distance and anywhere closer the whole image fits the screen
    for distance in [settings.min_distance, 1.0, 0.3, 0.0] {
        let t = RenderTransform::compute(Vec2::new(320.0, 240.0), distance, &settings, VIEWPORT);
        assert_eq!(t.zoom, 0.0, "distance {distance}");
        assert_eq!(t.absolute_zoom, 1.0, "distance {distance}");
        assert_eq!(t.size, VIEWPORT.size());
    }
}

#[test]
fn zoom_caps_at_max_distance() {
    let settings = ViewSettings::default();
    for distance in [settings.max_distance, 5.0, 20.0] {
        let t = RenderTransform::compute(Vec2::new(320.0, 240.0), distance, &settings, VIEWPORT);
        assert_eq!(t.zoom, 1.0, "distance {distance}");
        assert_eq!(t.absolute_zoom, settings.max_zoom, "distance {distance}");
    }
}

#[test]
fn zoom_is_monotone_in_distance() {
    let settings = ViewSettings::default();
    let mut previous = -1.0f32;
    let mut distance = 0.0f32;
    while distance < 6.0 {
        let t = RenderTransform::compute(Vec2::new(100.0, 100.0), distance, &settings, VIEWPORT);
        assert!(
            t.zoom >= previous,
            "zoom decreased at distance {distance}: {} -> {}",
            previous,
            t.zoom
        );
        previous = t.zoom;
        distance += 0.05;
    }
}

#[test]
fn placement_endpoints_pin_the_corner_range() {
    let settings = ViewSettings::default();
    // position.x == screen width makes norm.x == 0 (mirrored axis): the
    // image's left edge sits on the screen's left edge
    let t = RenderTransform::compute(Vec2::new(640.0, 0.0), 3.05, &settings, VIEWPORT);
    assert!(close(t.norm.x, 0.0));
    assert!(close(t.origin.x, 0.0));
    assert!(close(t.norm.y, 0.0));
    assert!(close(t.origin.y, 0.0));

    // position.x == 0 makes norm.x == 1: the right edge is flush instead
    let t = RenderTransform::compute(Vec2::new(0.0, 480.0), 3.05, &settings, VIEWPORT);
    assert!(close(t.norm.x, 1.0));
    assert!(close(t.origin.x, -(t.size.x - VIEWPORT.width)));
    assert!(close(t.norm.y, 1.0));
    assert!(close(t.origin.y, -(t.size.y - VIEWPORT.height)));
}

#[test]
fn out_of_range_positions_extrapolate_unclamped() {
    let settings = ViewSettings::default();
    // A reading past the right screen edge pushes norm.x negative; the
    // origin extrapolates linearly instead of clamping
    let t = RenderTransform::compute(Vec2::new(720.0, 240.0), 3.05, &settings, VIEWPORT);
    assert!(t.norm.x < 0.0);
    assert!(t.origin.x > 0.0);
}

#[test]
fn recomputation_is_idempotent() {
    let settings = ViewSettings::default();
    let position = Vec2::new(123.0, 456.0);
    let a = RenderTransform::compute(position, 2.7, &settings, VIEWPORT);
    let b = RenderTransform::compute(position, 2.7, &settings, VIEWPORT);
    assert_eq!(a, b);
}

#[test]
fn worked_example_end_to_end() {
    // SW=640, SH=480, defaults, beacon centered at distance 3.05
    let settings = ViewSettings::default();
    let t = RenderTransform::compute(Vec2::new(320.0, 240.0), 3.05, &settings, VIEWPORT);
    assert!(close(t.zoom, 0.5));
    assert!(close(t.absolute_zoom, 1.5));
    assert!(close(t.size.x, 960.0));
    assert!(close(t.size.y, 720.0));
    assert!(close(t.norm.x, 0.5));
    assert!(close(t.norm.y, 0.5));
    assert!(close(t.origin.x, -160.0));
    assert!(close(t.origin.y, -120.0));

    // Center-anchored blit of the 800x600 source image
    let placement = t.placement(Vec2::new(800.0, 600.0));
    assert!(close(placement.scale.x, 1.2));
    assert!(close(placement.scale.y, 1.2));
    assert!(close(placement.center.x, 320.0));
    assert!(close(placement.center.y, 240.0));
}

#[test]
fn invalid_reading_keeps_previous_transform() {
    let mut state = ViewState::new(VIEWPORT);
    let reading = TrackerReading::new(Vec2::new(320.0, 240.0), 3.05);
    state.ingest(Some(reading), VIEWPORT);
    let fixed = state.transform;

    // Beacon lost: placement sticks exactly
    state.ingest(Some(TrackerReading::invalid()), VIEWPORT);
    assert_eq!(state.transform, fixed);

    // Probe failure (no snapshot at all): same sticky behavior
    state.ingest(None, VIEWPORT);
    assert_eq!(state.transform, fixed);
}

#[test]
fn initial_transform_is_the_neutral_fit() {
    let state = ViewState::new(VIEWPORT);
    assert_eq!(state.transform.zoom, 0.0);
    assert_eq!(state.transform.absolute_zoom, 1.0);
    assert_eq!(state.transform.size, VIEWPORT.size());
    assert_eq!(state.transform.origin, Vec2::ZERO);
}
