// Tests for the debug overlay layout and formatting.

use app_core::overlay;
use app_core::{RenderTransform, TrackerReading, ViewSettings, Viewport};
use glam::Vec2;

const VIEWPORT: Viewport = Viewport {
    width: 640.0,
    height: 480.0,
};

#[test]
fn overlay_lines_match_the_documented_layout() {
    let settings = ViewSettings::default();
    let reading = TrackerReading::new(Vec2::new(320.0, 240.0), 3.05);
    let transform =
        RenderTransform::compute(reading.position, reading.distance, &settings, VIEWPORT);

    let overlay = overlay::build(&reading, &transform, &settings);
    let expected = [
        (20.0, 20.0, "Distance: 3.05 meters"),
        (20.0, 40.0, "Zoom used: 0.500 (1.500)"),
        (20.0, 60.0, "Image placement: 0.50, 0.50"),
        (20.0, 80.0, "Absolute placement: -160.00, -120.00"),
        (20.0, 100.0, "Image Size: 960.00, 720.00"),
        (20.0, 200.0, "Settings"),
        (20.0, 220.0, "min_distance: 1.50"),
        (20.0, 240.0, "max_distance: 4.60"),
        (20.0, 260.0, "max_zoom: 2.00"),
    ];
    assert_eq!(overlay.lines.len(), expected.len());
    for (line, (x, y, text)) in overlay.lines.iter().zip(expected) {
        assert_eq!(line.pos, Vec2::new(x, y), "{text}");
        assert_eq!(line.text, text);
    }
}

#[test]
fn marker_is_centered_on_the_raw_reading() {
    let settings = ViewSettings::default();
    let reading = TrackerReading::new(Vec2::new(320.0, 240.0), 3.05);
    let transform =
        RenderTransform::compute(reading.position, reading.distance, &settings, VIEWPORT);

    let overlay = overlay::build(&reading, &transform, &settings);
    assert_eq!(overlay.marker.pos, Vec2::new(315.0, 235.0));
    assert_eq!(overlay.marker.size, Vec2::new(10.0, 10.0));
}

#[test]
fn overlay_reports_the_reading_even_without_a_fix() {
    // The raw sample is shown as-is; validity only gates the transform
    let settings = ViewSettings::default();
    let reading = TrackerReading {
        position: Vec2::new(50.0, 60.0),
        distance: 1.23,
        valid: false,
    };
    let transform = RenderTransform::neutral(VIEWPORT);

    let overlay = overlay::build(&reading, &transform, &settings);
    assert_eq!(overlay.lines[0].text, "Distance: 1.23 meters");
    assert_eq!(overlay.marker.pos, Vec2::new(45.0, 55.0));
}
