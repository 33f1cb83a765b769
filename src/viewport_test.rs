#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn vp(offset_x: f64, offset_y: f64, scale: f64) -> Viewport {
    Viewport { offset_x, offset_y, scale }
}

// --- Point ---

#[test]
fn point_sub_and_add() {
    let a = Point::new(5.0, 7.0);
    let b = Point::new(2.0, 3.0);
    assert_eq!(a.sub(b), Point::new(3.0, 4.0));
    assert_eq!(a.add(b), Point::new(7.0, 10.0));
}

// --- Defaults ---

#[test]
fn viewport_default_is_identity() {
    let v = Viewport::default();
    assert_eq!(v.offset_x, 0.0);
    assert_eq!(v.offset_y, 0.0);
    assert_eq!(v.scale, 1.0);
}

#[test]
fn zoom_limits_default_is_free_canvas() {
    let limits = ZoomLimits::default();
    assert_eq!(limits.min_scale, 0.2);
    assert_eq!(limits.max_scale, 2.8);
    assert_eq!(limits.sensitivity, 0.0015);
}

// --- Conversions ---

#[test]
fn screen_to_world_with_pan_and_scale() {
    let v = vp(20.0, 10.0, 2.0);
    assert!(point_approx_eq(v.screen_to_world(Point::new(20.0, 10.0)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(v.screen_to_world(Point::new(0.0, 0.0)), Point::new(-10.0, -5.0)));
}

#[test]
fn world_to_screen_with_pan_and_scale() {
    let v = vp(20.0, 10.0, 3.0);
    assert!(point_approx_eq(v.world_to_screen(Point::new(5.0, 5.0)), Point::new(35.0, 25.0)));
}

#[test]
fn conversions_are_inverse() {
    let v = vp(13.7, -42.3, 0.75);
    let world = Point::new(333.3, -999.9);
    assert!(point_approx_eq(v.screen_to_world(v.world_to_screen(world)), world));
}

#[test]
fn screen_dist_to_world_ignores_offset() {
    let v = vp(999.0, -999.0, 4.0);
    assert!(approx_eq(v.screen_dist_to_world(8.0), 2.0));
}

// --- zoom_at ---

#[test]
fn zoom_at_wheel_up_zooms_in() {
    let mut v = Viewport::default();
    v.zoom_at(Point::new(0.0, 0.0), -100.0, &ZoomLimits::default());
    assert!(v.scale > 1.0);
}

#[test]
fn zoom_at_wheel_down_zooms_out() {
    let mut v = Viewport::default();
    v.zoom_at(Point::new(0.0, 0.0), 100.0, &ZoomLimits::default());
    assert!(v.scale < 1.0);
}

#[test]
fn zoom_at_matches_reference_scenario() {
    let mut v = Viewport::default();
    v.zoom_at(Point::new(200.0, 200.0), -100.0, &ZoomLimits::default());
    let factor = 0.15_f64.exp();
    assert!(approx_eq(v.scale, factor));
    assert!(approx_eq(v.offset_x, 200.0 - 200.0 * factor));
    assert!((v.offset_x - -32.366).abs() < 1e-3);
    assert!(point_approx_eq(v.screen_to_world(Point::new(200.0, 200.0)), Point::new(200.0, 200.0)));
}

#[test]
fn zoom_at_keeps_point_under_cursor_fixed() {
    let limits = ZoomLimits::default();
    let mut v = vp(-120.0, 45.0, 1.3);
    let cursors = [Point::new(0.0, 0.0), Point::new(640.0, 360.0), Point::new(-50.0, 900.0)];
    let deltas = [-300.0, -40.0, 0.0, 25.0, 480.0];
    for cursor in cursors {
        for delta in deltas {
            let before = v.screen_to_world(cursor);
            v.zoom_at(cursor, delta, &limits);
            let after = v.screen_to_world(cursor);
            assert!(point_approx_eq(before, after), "cursor {cursor:?} delta {delta}");
        }
    }
}

#[test]
fn zoom_at_clamps_to_max() {
    let limits = ZoomLimits::default();
    let mut v = Viewport::default();
    for _ in 0..100 {
        v.zoom_at(Point::new(100.0, 100.0), -500.0, &limits);
    }
    assert_eq!(v.scale, limits.max_scale);
}

#[test]
fn zoom_at_clamps_to_min() {
    let limits = ZoomLimits::default();
    let mut v = Viewport::default();
    for _ in 0..100 {
        v.zoom_at(Point::new(100.0, 100.0), 500.0, &limits);
    }
    assert_eq!(v.scale, limits.min_scale);
}

#[test]
fn zoom_at_clamped_still_anchors() {
    let limits = ZoomLimits { min_scale: 0.3, max_scale: 2.0, sensitivity: 0.0015 };
    let mut v = vp(10.0, 10.0, 1.9);
    let cursor = Point::new(300.0, 150.0);
    let before = v.screen_to_world(cursor);
    v.zoom_at(cursor, -1000.0, &limits);
    assert_eq!(v.scale, 2.0);
    assert!(point_approx_eq(before, v.screen_to_world(cursor)));
}

// --- zoom_by ---

#[test]
fn zoom_by_anchors_and_clamps() {
    let limits = ZoomLimits::default();
    let mut v = Viewport::default();
    let center = Point::new(400.0, 300.0);
    v.zoom_by(center, 1.5, &limits);
    assert!(approx_eq(v.scale, 1.5));
    assert!(point_approx_eq(v.screen_to_world(center), center));
    v.zoom_by(center, 10.0, &limits);
    assert_eq!(v.scale, 2.8);
}

// --- pan / reset ---

#[test]
fn pan_by_accumulates() {
    let mut v = Viewport::default();
    v.pan_by(10.0, 5.0);
    v.pan_by(-3.0, 2.0);
    assert_eq!(v.offset_x, 7.0);
    assert_eq!(v.offset_y, 7.0);
}

#[test]
fn reset_restores_default() {
    let mut v = vp(55.0, -12.0, 2.2);
    let default = vp(10.0, 20.0, 1.0);
    v.reset(default);
    assert_eq!(v, default);
}

#[test]
fn clamp_with_inverted_limits_does_not_panic() {
    let limits = ZoomLimits { min_scale: 3.0, max_scale: 1.0, sensitivity: ZOOM_SENSITIVITY };
    assert_eq!(limits.clamp(5.0), 1.0);
    assert_eq!(limits.clamp(0.1), 1.0);
}
