// Tests for the button-driven view settings and their guards.

use app_core::{SettingsError, ViewSettings};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn defaults_match_the_documented_values() {
    let s = ViewSettings::default();
    assert!(close(s.min_distance, 1.5));
    assert!(close(s.max_distance, 4.6));
    assert!(close(s.max_zoom, 2.0));
}

#[test]
fn construction_rejects_invalid_ranges() {
    assert!(matches!(
        ViewSettings::new(0.0, 4.6, 2.0),
        Err(SettingsError::NonPositiveMinDistance(_))
    ));
    assert!(matches!(
        ViewSettings::new(2.0, 1.0, 2.0),
        Err(SettingsError::DistanceRangeInverted { .. })
    ));
    assert!(matches!(
        ViewSettings::new(1.5, 4.6, 1.0),
        Err(SettingsError::MaxZoomTooSmall(_))
    ));
    assert!(ViewSettings::new(1.5, 4.6, 2.0).is_ok());
}

#[test]
fn min_distance_guard_checks_the_pre_decrement_value() {
    // 0.3 passes the > 0.2 guard and drops to 0.1
    let mut s = ViewSettings::new(0.3, 4.6, 2.0).unwrap();
    s.lower_min_distance();
    assert!(close(s.min_distance, 0.1));

    // 0.2 fails the guard and stays put
    let mut s = ViewSettings {
        min_distance: 0.2,
        max_distance: 4.6,
        max_zoom: 2.0,
    };
    s.lower_min_distance();
    assert!(close(s.min_distance, 0.2));
}

#[test]
fn min_distance_increment_is_unguarded() {
    let mut s = ViewSettings::default();
    s.raise_min_distance();
    assert!(close(s.min_distance, 1.7));
}

#[test]
fn max_distance_cannot_cross_min_distance() {
    let mut s = ViewSettings::new(1.5, 1.9, 2.0).unwrap();
    s.lower_max_distance();
    assert!(close(s.max_distance, 1.7));
    // now max == min + step; a further decrement is refused
    s.lower_max_distance();
    assert!(close(s.max_distance, 1.7));

    s.raise_max_distance();
    assert!(close(s.max_distance, 1.9));
}

#[test]
fn max_zoom_floors_at_its_guard() {
    let mut s = ViewSettings::new(1.5, 4.6, 1.4).unwrap();
    s.lower_max_zoom();
    assert!(close(s.max_zoom, 1.2));
    // 1.2 fails the > 1.2 guard
    s.lower_max_zoom();
    assert!(close(s.max_zoom, 1.2));

    s.raise_max_zoom();
    assert!(close(s.max_zoom, 1.4));
}
