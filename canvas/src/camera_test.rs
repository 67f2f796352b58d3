#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn viewport() -> Viewport {
    Viewport { width: 900.0, height: 600.0, panel_offset: 0.0 }
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn viewport_default_is_reference_size() {
    let vp = Viewport::default();
    assert_eq!(vp.width, 1200.0);
    assert_eq!(vp.height, 800.0);
    assert_eq!(vp.panel_offset, 0.0);
}

// --- Grid spacing ---

#[test]
fn base_spacing_uses_limiting_axis() {
    // 600 / 6 = 100, 900 / 9 = 100.
    assert_eq!(Camera::base_spacing(viewport()), 100.0);
    let wide = Viewport { width: 2000.0, height: 600.0, panel_offset: 0.0 };
    assert_eq!(Camera::base_spacing(wide), 100.0);
}

#[test]
fn pixels_per_unit_scales_with_zoom() {
    let cam = Camera { zoom: 2.0, ..Camera::default() };
    assert_eq!(cam.pixels_per_unit(viewport()), 200.0);
}

// --- Transforms ---

#[test]
fn screen_center_maps_to_diagram_origin() {
    let cam = Camera::default();
    let p = cam.screen_to_diagram(Vec2::new(450.0, 300.0), viewport());
    assert!(point_approx_eq(p, Vec2::ZERO));
}

#[test]
fn screen_y_is_flipped() {
    let cam = Camera::default();
    // 100 px above center is +1 unit in diagram space.
    let p = cam.screen_to_diagram(Vec2::new(550.0, 200.0), viewport());
    assert!(point_approx_eq(p, Vec2::new(1.0, 1.0)), "got {p:?}");
}

#[test]
fn panel_offset_shifts_origin() {
    let cam = Camera::default();
    let vp = Viewport { panel_offset: 100.0, ..viewport() };
    let p = cam.screen_to_diagram(Vec2::new(550.0, 300.0), vp);
    assert!(point_approx_eq(p, Vec2::ZERO));
}

#[test]
fn roundtrip_screen_diagram_screen() {
    let cam = Camera { pan_x: 37.0, pan_y: -12.0, zoom: 1.375 };
    let screen = Vec2::new(123.0, 456.0);
    let back = cam.diagram_to_screen(cam.screen_to_diagram(screen, viewport()), viewport());
    assert!(point_approx_eq(screen, back), "got {back:?}");
}

#[test]
fn screen_dist_to_diagram_divides_by_spacing() {
    let cam = Camera { zoom: 0.5, ..Camera::default() };
    assert!(approx_eq(cam.screen_dist_to_diagram(50.0, viewport()), 1.0));
}

// --- Zoom / pan ---

#[test]
fn zoom_in_steps_and_clamps() {
    let mut cam = Camera::default();
    cam.zoom_in();
    assert_eq!(cam.zoom, 1.125);
    for _ in 0..20 {
        cam.zoom_in();
    }
    assert_eq!(cam.zoom, 2.0);
}

#[test]
fn zoom_out_steps_and_clamps() {
    let mut cam = Camera::default();
    cam.zoom_out();
    assert_eq!(cam.zoom, 0.875);
    for _ in 0..20 {
        cam.zoom_out();
    }
    assert_eq!(cam.zoom, 0.25);
}

#[test]
fn reset_zoom_restores_identity() {
    let mut cam = Camera { zoom: 1.75, ..Camera::default() };
    cam.reset_zoom();
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn pan_steps_accumulate() {
    let mut cam = Camera::default();
    cam.pan_steps(1, 0);
    cam.pan_steps(1, -2);
    assert_eq!(cam.pan_x, 20.0);
    assert_eq!(cam.pan_y, -20.0);
}

// --- Snapping ---

#[test]
fn snap_to_grid_rounds_to_tenths() {
    assert_eq!(snap_to_grid(Vec2::new(1.04, -0.96)), Vec2::new(1.0, -1.0));
    assert_eq!(snap_to_grid(Vec2::new(0.25, 0.349)), Vec2::new(0.3, 0.3));
}
