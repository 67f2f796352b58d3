//! Rendering: turns the diagram into a backend-agnostic display list.
//!
//! [`build_scene`] walks committed shapes front to back, then the editing
//! shape, and emits screen-space [`Primitive`]s (pixels, y down). The host
//! draws them with whatever graphics backend it owns. This module never
//! changes geometry; it only fills the per-shape caches it needs (triangle
//! fans, label raster handles).
//!
//! Math labels are rasterized by an external [`LabelRasterizer`]. A failed
//! rasterization is logged and replaced by the rasterizer's placeholder.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use tracing::warn;

use crate::bezier::{control_polygon, sample};
use crate::camera::{Camera, Viewport};
use crate::consts::{ARROW_ANGLE, ARROW_SIZE_PX, RENDER_BEZIER_STEPS};
use crate::doc::{Diagram, Geometry, Shape, Style};
use crate::geom::Vec2;
use crate::input::DrawMode;

/// Bezier handle marker radius in pixels (before UI scaling).
const HANDLE_MARKER_PX: f64 = 5.0;

const HANDLE_COLOR_LIGHT: [f32; 3] = [0.5, 0.5, 0.5];
const HANDLE_COLOR_DARK: [f32; 3] = [0.855, 0.647, 0.125];

/// Opaque handle to a label image owned by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RasterHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("label rasterization failed: {0}")]
    Failed(String),
}

/// External service that turns `$…$` label text into an image.
pub trait LabelRasterizer {
    /// Rasterize `text`, returning a handle the host can draw.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError`] when the text cannot be typeset.
    fn rasterize(&mut self, text: &str) -> Result<RasterHandle, RasterError>;

    /// Image drawn in place of a label that failed to rasterize.
    fn placeholder(&self) -> RasterHandle;
}

/// Everything besides shapes that affects the scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneView {
    pub camera: Camera,
    pub viewport: Viewport,
    pub mode: DrawMode,
    /// Snapped pointer in diagram space.
    pub pointer: Vec2,
    pub light_mode: bool,
    pub wireframe: bool,
}

impl SceneView {
    fn to_screen(&self, p: Vec2) -> Vec2 {
        self.camera.diagram_to_screen(p, self.viewport)
    }

    fn pixel_scale(&self) -> f64 {
        Camera::ui_scaling(self.viewport) * self.camera.zoom
    }
}

/// One screen-space drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Open polyline through `points`.
    Stroke { points: Vec<Vec2>, dashed: bool, width: f64, color: [f32; 3] },
    /// Filled triangles.
    Fill { triangles: Vec<[Vec2; 3]>, color: [f32; 3] },
    /// Filled circle.
    Disc { center: Vec2, radius: f64, color: [f32; 3] },
    /// Filled arrowhead triangle.
    Arrowhead { tip: Vec2, left: Vec2, right: Vec2, color: [f32; 3] },
    /// Text label; `raster` is set for math labels.
    Label { anchor: Vec2, text: String, raster: Option<RasterHandle>, color: [f32; 3] },
}

/// Ordered display list, back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

/// Build the display list for the committed diagram plus the editing shape.
pub fn build_scene(
    diagram: &mut Diagram,
    editing: Option<&mut Shape>,
    view: &SceneView,
    rasterizer: &mut dyn LabelRasterizer,
) -> Scene {
    let mut out = Vec::new();

    for shape in diagram.shapes_mut() {
        draw_shape(&mut out, shape, view, rasterizer, Vec2::ZERO);
    }

    if let Some(shape) = editing {
        draw_editing(&mut out, shape, view, rasterizer);
    }

    Scene { primitives: out }
}

// =============================================================
// Shapes
// =============================================================

fn draw_shape(
    out: &mut Vec<Primitive>,
    shape: &mut Shape,
    view: &SceneView,
    rasterizer: &mut dyn LabelRasterizer,
    offset: Vec2,
) {
    let style = shape.style;
    let color = style.color.display_rgb(view.light_mode);
    let fill = style.filled && !view.wireframe;

    if fill && let Some(fan) = shape.triangle_fan().map(<[_]>::to_vec) {
        let vertices = shape.vertices();
        let triangles = fan
            .iter()
            .map(|t| t.map(|i| view.to_screen(vertices[i] + offset)))
            .collect();
        out.push(Primitive::Fill { triangles, color });
    }

    match shape.geometry() {
        Geometry::Line { origin, end } => {
            let points = vec![view.to_screen(*origin + offset), view.to_screen(*end + offset)];
            draw_path(out, points, &style, view, color);
        }
        Geometry::Circle { center, rim } => {
            let center = view.to_screen(*center + offset);
            let radius = view.to_screen(*rim + offset).dst(center);
            if fill {
                out.push(Primitive::Disc { center, radius, color });
            } else {
                out.push(stroke(circle_points(center, radius), &style, view, color));
            }
        }
        Geometry::MultiLine { vertices } => {
            let points = vertices.iter().map(|v| view.to_screen(*v + offset)).collect();
            draw_path(out, points, &style, view, color);
        }
        Geometry::Bezier { origin, end, controls } => {
            let curve = sample(&control_polygon(*origin, controls, *end), RENDER_BEZIER_STEPS);
            let points = curve.into_iter().map(|p| view.to_screen(p + offset)).collect();
            draw_path(out, points, &style, view, color);
        }
        Geometry::Text { anchor, text } => {
            let anchor = view.to_screen(*anchor + offset);
            let text = text.clone();
            let raster = label_raster(shape, rasterizer);
            out.push(Primitive::Label { anchor, text, raster, color });
        }
    }
}

/// Editing shapes get construction aids on top of the shape itself.
fn draw_editing(out: &mut Vec<Primitive>, shape: &mut Shape, view: &SceneView, rasterizer: &mut dyn LabelRasterizer) {
    if view.mode == DrawMode::DroppedPolygon {
        draw_shape(out, shape, view, rasterizer, view.pointer);
        return;
    }

    draw_shape(out, shape, view, rasterizer, Vec2::ZERO);
    let style = shape.style;
    let color = style.color.display_rgb(view.light_mode);

    match shape.geometry() {
        // Rubber band from the last vertex to the pointer.
        Geometry::MultiLine { vertices } => {
            if let Some(last) = vertices.last() {
                let band = Style { back_arrow: false, ..style };
                let points = vec![view.to_screen(*last), view.to_screen(view.pointer)];
                draw_path(out, points, &band, view, color);
            }
        }
        Geometry::Bezier { origin, end, controls } => draw_handles(out, *origin, controls, *end, view),
        Geometry::Line { .. } | Geometry::Circle { .. } | Geometry::Text { .. } => {}
    }
}

/// Dashed control polygon plus a marker on every handle.
fn draw_handles(out: &mut Vec<Primitive>, origin: Vec2, controls: &[Vec2], end: Vec2, view: &SceneView) {
    let color = if view.light_mode { HANDLE_COLOR_LIGHT } else { HANDLE_COLOR_DARK };
    let points: Vec<Vec2> = control_polygon(origin, controls, end)
        .into_iter()
        .map(|p| view.to_screen(p))
        .collect();
    let radius = HANDLE_MARKER_PX * Camera::ui_scaling(view.viewport);

    out.push(Primitive::Stroke { points: points.clone(), dashed: true, width: 1.0, color });
    out.extend(points.into_iter().map(|center| Primitive::Disc { center, radius, color }));
}

fn label_raster(shape: &mut Shape, rasterizer: &mut dyn LabelRasterizer) -> Option<RasterHandle> {
    if !shape.is_math_label() {
        return None;
    }
    if let Some(handle) = shape.label_raster() {
        return Some(handle);
    }
    let Geometry::Text { text, .. } = shape.geometry() else {
        return None;
    };
    let handle = match rasterizer.rasterize(text) {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, label = %text, "using placeholder for label");
            rasterizer.placeholder()
        }
    };
    shape.set_label_raster(handle);
    Some(handle)
}

// =============================================================
// Strokes
// =============================================================

fn stroke(points: Vec<Vec2>, style: &Style, view: &SceneView, color: [f32; 3]) -> Primitive {
    let width = (style.thickness.line_width() * view.pixel_scale()).max(1.0);
    Primitive::Stroke { points, dashed: style.dashed, width, color }
}

/// Stroke `points` and add arrowheads on the first and last segments.
fn draw_path(out: &mut Vec<Primitive>, points: Vec<Vec2>, style: &Style, view: &SceneView, color: [f32; 3]) {
    let size = ARROW_SIZE_PX * view.pixel_scale();
    let back = match points.as_slice() {
        [first, second, ..] if style.back_arrow => Some(arrowhead(*first, *second, size, color)),
        _ => None,
    };
    let front = match points.as_slice() {
        [.., before, last] if style.front_arrow => Some(arrowhead(*last, *before, size, color)),
        _ => None,
    };
    out.push(stroke(points, style, view, color));
    out.extend(back);
    out.extend(front);
}

/// Arrowhead with its tip at `tip`, pointing away from `from`.
fn arrowhead(tip: Vec2, from: Vec2, size: f64, color: [f32; 3]) -> Primitive {
    let angle = (tip - from).angle();
    let left = tip - Vec2::new((angle - ARROW_ANGLE).cos(), (angle - ARROW_ANGLE).sin()).scale(size);
    let right = tip - Vec2::new((angle + ARROW_ANGLE).cos(), (angle + ARROW_ANGLE).sin()).scale(size);
    Primitive::Arrowhead { tip, left, right, color }
}

/// Closed ring of points around `center`; segment count grows with the cube root of the radius.
fn circle_points(center: Vec2, radius: f64) -> Vec<Vec2> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let segments = ((6.0 * radius.cbrt()) as usize).max(1);
    #[allow(clippy::cast_precision_loss)]
    let step = std::f64::consts::TAU / segments as f64;
    (0..=segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let alpha = step * i as f64;
            center + Vec2::new(radius * alpha.cos(), radius * alpha.sin())
        })
        .collect()
}
