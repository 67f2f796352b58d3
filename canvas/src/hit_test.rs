#![allow(clippy::float_cmp)]

use super::*;

fn curve() -> Shape {
    Shape::bezier(
        Vec2::new(0.0, 0.0),
        vec![Vec2::new(1.0, 1.0), Vec2::new(2.0, -1.0)],
        Vec2::new(3.0, 0.0),
    )
}

// =============================================================
// Grab radius
// =============================================================

#[test]
fn radius_at_reference_viewport() {
    // 1200x800 at zoom 1: 133.3 px per unit, ui scale 1.5, so 10 px * 1.5 = 0.1125 units.
    let vp = Viewport::default();
    let cam = Camera::default();
    let expected = 0.1125;
    assert!((handle_radius(&cam, vp) - expected).abs() < 1e-12);
}

#[test]
fn radius_is_the_scaled_pixel_radius_in_diagram_units() {
    let vp = Viewport { width: 600.0, height: 400.0, ..Viewport::default() };
    let cam = Camera::default();
    let pixels = HANDLE_RADIUS_PX * Camera::ui_scaling(vp);
    assert!((handle_radius(&cam, vp) - cam.screen_dist_to_diagram(pixels, vp)).abs() < 1e-12);
}

#[test]
fn radius_shrinks_when_zoomed_in() {
    let vp = Viewport::default();
    let mut cam = Camera::default();
    let before = handle_radius(&cam, vp);
    cam.zoom_in();
    assert!(handle_radius(&cam, vp) < before);
}

// =============================================================
// Handles
// =============================================================

#[test]
fn handles_are_ordered_origin_end_controls() {
    let targets: Vec<DragTarget> = bezier_handles(&curve()).into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        targets,
        vec![DragTarget::Origin, DragTarget::EndPoint, DragTarget::Control(0), DragTarget::Control(1)]
    );
}

#[test]
fn non_bezier_has_no_handles() {
    assert!(bezier_handles(&Shape::line(Vec2::ZERO, Vec2::new(1.0, 0.0))).is_empty());
    assert_eq!(hit_handle(&Shape::circle(Vec2::ZERO, 1.0), Vec2::ZERO, 1.0), DragTarget::None);
}

#[test]
fn hit_within_radius() {
    let c = curve();
    assert_eq!(hit_handle(&c, Vec2::new(0.05, 0.0), 0.1), DragTarget::Origin);
    assert_eq!(hit_handle(&c, Vec2::new(3.0, 0.09), 0.1), DragTarget::EndPoint);
    assert_eq!(hit_handle(&c, Vec2::new(2.0, -1.0), 0.1), DragTarget::Control(1));
}

#[test]
fn miss_outside_radius() {
    assert_eq!(hit_handle(&curve(), Vec2::new(1.5, 0.0), 0.1), DragTarget::None);
}

#[test]
fn overlapping_handles_prefer_origin() {
    let c = Shape::bezier(Vec2::ZERO, vec![Vec2::ZERO], Vec2::ZERO);
    assert_eq!(hit_handle(&c, Vec2::ZERO, 0.1), DragTarget::Origin);
}

// =============================================================
// Dragging
// =============================================================

#[test]
fn apply_drag_moves_target() {
    let mut c = curve();
    let p = Vec2::new(9.0, 9.0);
    assert!(apply_drag(&mut c, DragTarget::Control(0), p));
    assert_eq!(c.vertices()[0], p);
    assert!(apply_drag(&mut c, DragTarget::EndPoint, p));
    assert!(apply_drag(&mut c, DragTarget::Origin, p));
    assert_eq!(c.geometry(), &Geometry::Bezier { origin: p, end: p, controls: vec![p, Vec2::new(2.0, -1.0)] });
}

#[test]
fn apply_drag_none_or_bad_index_is_noop() {
    let mut c = curve();
    assert!(!apply_drag(&mut c, DragTarget::None, Vec2::ZERO));
    assert!(!apply_drag(&mut c, DragTarget::Control(5), Vec2::ZERO));
    assert_eq!(c, curve());
}
