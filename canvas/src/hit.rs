//! Hit-testing for Bezier handles.
//!
//! While a curve is under construction its origin, end point and every
//! control point can be grabbed. A handle is hit when the pointer lies
//! within a fixed screen-pixel radius of it, converted to diagram units at
//! the current zoom and UI scale.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Viewport};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{Geometry, Shape};
use crate::geom::Vec2;
use crate::input::DragTarget;

/// Grab radius in diagram units for the given camera and viewport.
#[must_use]
pub fn handle_radius(camera: &Camera, viewport: Viewport) -> f64 {
    camera.screen_dist_to_diagram(HANDLE_RADIUS_PX * Camera::ui_scaling(viewport), viewport)
}

/// Draggable handles of a Bezier in hit-test order: origin, end point, controls.
///
/// Empty for every other kind.
#[must_use]
pub fn bezier_handles(shape: &Shape) -> Vec<(DragTarget, Vec2)> {
    let Geometry::Bezier { origin, end, controls } = shape.geometry() else {
        return Vec::new();
    };
    let mut handles = Vec::with_capacity(controls.len() + 2);
    handles.push((DragTarget::Origin, *origin));
    handles.push((DragTarget::EndPoint, *end));
    handles.extend(controls.iter().enumerate().map(|(i, c)| (DragTarget::Control(i), *c)));
    handles
}

/// First handle within `radius` of `pointer`, or [`DragTarget::None`].
#[must_use]
pub fn hit_handle(shape: &Shape, pointer: Vec2, radius: f64) -> DragTarget {
    let r2 = radius * radius;
    bezier_handles(shape)
        .into_iter()
        .find(|(_, p)| p.dst2(pointer) <= r2)
        .map_or(DragTarget::None, |(target, _)| target)
}

/// Move the dragged handle to `p`. Returns false if nothing moved.
pub fn apply_drag(shape: &mut Shape, target: DragTarget, p: Vec2) -> bool {
    match target {
        DragTarget::None => false,
        DragTarget::Origin => {
            shape.set_origin(p);
            true
        }
        DragTarget::EndPoint => {
            shape.set_end(p);
            true
        }
        DragTarget::Control(i) => shape.set_control(i, p),
    }
}
