#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::LineThickness;
use crate::palette::{Color, lookup};

/// Rasterizer that hands out sequential handles and fails on labels containing `bad`.
#[derive(Default)]
struct FakeRasterizer {
    next: u64,
    calls: usize,
}

impl LabelRasterizer for FakeRasterizer {
    fn rasterize(&mut self, text: &str) -> Result<RasterHandle, RasterError> {
        self.calls += 1;
        if text.contains("bad") {
            return Err(RasterError::Failed(text.to_owned()));
        }
        self.next += 1;
        Ok(RasterHandle(self.next))
    }

    fn placeholder(&self) -> RasterHandle {
        RasterHandle(0)
    }
}

/// 900x600 viewport: 100 px per unit, origin at (450, 300).
fn view() -> SceneView {
    SceneView {
        camera: Camera::default(),
        viewport: Viewport { width: 900.0, height: 600.0, panel_offset: 0.0 },
        mode: DrawMode::Line,
        pointer: Vec2::ZERO,
        light_mode: true,
        wireframe: false,
    }
}

fn scene_of(shapes: Vec<Shape>, view: &SceneView) -> Scene {
    let mut diagram = Diagram::new();
    diagram.extend(shapes);
    build_scene(&mut diagram, None, view, &mut FakeRasterizer::default())
}

fn strokes(scene: &Scene) -> Vec<&Primitive> {
    scene.primitives.iter().filter(|p| matches!(p, Primitive::Stroke { .. })).collect()
}

fn count_arrowheads(scene: &Scene) -> usize {
    scene.primitives.iter().filter(|p| matches!(p, Primitive::Arrowhead { .. })).count()
}

// =============================================================
// Lines and paths
// =============================================================

#[test]
fn line_maps_to_screen_space() {
    let scene = scene_of(vec![Shape::line(Vec2::ZERO, Vec2::new(1.0, 1.0))], &view());
    let Primitive::Stroke { points, dashed, .. } = &scene.primitives[0] else {
        panic!("expected stroke");
    };
    assert_eq!(points, &vec![Vec2::new(450.0, 300.0), Vec2::new(550.0, 200.0)]);
    assert!(!dashed);
}

#[test]
fn stroke_width_follows_thickness_and_scale() {
    let style = Style { thickness: LineThickness::VeryThick, dashed: true, ..Style::default() };
    let scene = scene_of(vec![Shape::line(Vec2::ZERO, Vec2::new(1.0, 0.0)).with_style(style)], &view());
    let Primitive::Stroke { width, dashed, .. } = &scene.primitives[0] else {
        panic!("expected stroke");
    };
    let expected = 3.0 * Camera::ui_scaling(view().viewport);
    assert!((width - expected).abs() < 1e-9);
    assert!(dashed);
}

#[test]
fn arrows_on_requested_ends() {
    let both = Style { front_arrow: true, back_arrow: true, ..Style::default() };
    let scene = scene_of(vec![Shape::line(Vec2::ZERO, Vec2::new(1.0, 0.0)).with_style(both)], &view());
    assert_eq!(count_arrowheads(&scene), 2);

    let none = scene_of(vec![Shape::line(Vec2::ZERO, Vec2::new(1.0, 0.0))], &view());
    assert_eq!(count_arrowheads(&none), 0);
}

#[test]
fn front_arrow_points_along_last_segment() {
    let style = Style { front_arrow: true, ..Style::default() };
    let poly = Shape::multi_line(vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)]).with_style(style);
    let scene = scene_of(vec![poly], &view());
    let Some(Primitive::Arrowhead { tip, left, right, .. }) = scene.primitives.last() else {
        panic!("expected arrowhead");
    };
    assert_eq!(*tip, Vec2::new(550.0, 200.0));
    // Segment points up the screen, so both barbs sit below the tip.
    assert!(left.y > tip.y && right.y > tip.y);
}

#[test]
fn bezier_is_sampled_densely() {
    let curve = Shape::bezier(Vec2::ZERO, vec![Vec2::new(1.0, 1.0)], Vec2::new(2.0, 0.0));
    let scene = scene_of(vec![curve], &view());
    let Primitive::Stroke { points, .. } = &scene.primitives[0] else {
        panic!("expected stroke");
    };
    assert_eq!(points.len(), RENDER_BEZIER_STEPS + 1);
    assert_eq!(points[0], Vec2::new(450.0, 300.0));
}

// =============================================================
// Circles and fills
// =============================================================

#[test]
fn outlined_circle_is_a_closed_ring() {
    let scene = scene_of(vec![Shape::circle(Vec2::ZERO, 1.0)], &view());
    let Primitive::Stroke { points, .. } = &scene.primitives[0] else {
        panic!("expected stroke");
    };
    // 100 px radius: 6 * cbrt(100) = 27 segments.
    assert_eq!(points.len(), 28);
    let first = points[0];
    let last = points[points.len() - 1];
    assert!(first.dst(last) < 1e-9);
}

#[test]
fn filled_circle_is_a_disc_unless_wireframe() {
    let filled = Style { filled: true, ..Style::default() };
    let scene = scene_of(vec![Shape::circle(Vec2::ZERO, 1.0).with_style(filled)], &view());
    assert!(matches!(scene.primitives[0], Primitive::Disc { radius, .. } if (radius - 100.0).abs() < 1e-9));

    let wire = SceneView { wireframe: true, ..view() };
    let scene = scene_of(vec![Shape::circle(Vec2::ZERO, 1.0).with_style(filled)], &wire);
    assert!(matches!(scene.primitives[0], Primitive::Stroke { .. }));
}

#[test]
fn filled_polygon_emits_fan_before_outline() {
    let filled = Style { filled: true, ..Style::default() };
    let ring = vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0), Vec2::ZERO];
    let scene = scene_of(vec![Shape::multi_line(ring).with_style(filled)], &view());
    let Primitive::Fill { triangles, .. } = &scene.primitives[0] else {
        panic!("expected fill");
    };
    assert_eq!(triangles.len(), 2);
    assert!(matches!(scene.primitives[1], Primitive::Stroke { .. }));
}

#[test]
fn fill_caches_triangle_fan_on_the_shape() {
    let filled = Style { filled: true, ..Style::default() };
    let mut diagram = Diagram::new();
    diagram.push(Shape::multi_line(vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]).with_style(filled));
    build_scene(&mut diagram, None, &view(), &mut FakeRasterizer::default());
    assert!(diagram.shapes()[0].has_cached_fan());
}

// =============================================================
// Colors
// =============================================================

#[test]
fn black_is_drawn_white_on_dark_background() {
    let dark = SceneView { light_mode: false, ..view() };
    let scene = scene_of(vec![Shape::line(Vec2::ZERO, Vec2::new(1.0, 0.0))], &dark);
    let Primitive::Stroke { color, .. } = &scene.primitives[0] else {
        panic!("expected stroke");
    };
    assert_eq!(*color, [1.0, 1.0, 1.0]);
}

#[test]
fn tint_blends_toward_background() {
    let style = Style { color: Color::new(*lookup("black").unwrap(), 0.5), ..Style::default() };
    let scene = scene_of(vec![Shape::line(Vec2::ZERO, Vec2::new(1.0, 0.0)).with_style(style)], &view());
    let Primitive::Stroke { color, .. } = &scene.primitives[0] else {
        panic!("expected stroke");
    };
    assert_eq!(*color, [0.5, 0.5, 0.5]);
}

// =============================================================
// Labels
// =============================================================

#[test]
fn plain_label_has_no_raster() {
    let mut r = FakeRasterizer::default();
    let mut diagram = Diagram::new();
    diagram.push(Shape::text(Vec2::ZERO, "hello"));
    let scene = build_scene(&mut diagram, None, &view(), &mut r);
    assert!(matches!(&scene.primitives[0], Primitive::Label { raster: None, text, .. } if text == "hello"));
    assert_eq!(r.calls, 0);
}

#[test]
fn math_label_is_rasterized_once() {
    let mut r = FakeRasterizer::default();
    let mut diagram = Diagram::new();
    diagram.push(Shape::text(Vec2::ZERO, "$x^2$"));
    build_scene(&mut diagram, None, &view(), &mut r);
    let scene = build_scene(&mut diagram, None, &view(), &mut r);
    assert_eq!(r.calls, 1);
    assert!(matches!(scene.primitives[0], Primitive::Label { raster: Some(RasterHandle(1)), .. }));
    assert_eq!(diagram.shapes()[0].label_raster(), Some(RasterHandle(1)));
}

#[test]
fn failed_rasterization_uses_placeholder() {
    let mut r = FakeRasterizer::default();
    let mut diagram = Diagram::new();
    diagram.push(Shape::text(Vec2::ZERO, "$bad$"));
    let scene = build_scene(&mut diagram, None, &view(), &mut r);
    assert!(matches!(scene.primitives[0], Primitive::Label { raster: Some(RasterHandle(0)), .. }));
}

// =============================================================
// Editing aids
// =============================================================

#[test]
fn open_polyline_gets_rubber_band_to_pointer() {
    let v = SceneView { mode: DrawMode::MultiLine, pointer: Vec2::new(2.0, 0.0), ..view() };
    let mut editing = Shape::multi_line(vec![Vec2::ZERO, Vec2::new(1.0, 0.0)]);
    let scene = build_scene(&mut Diagram::new(), Some(&mut editing), &v, &mut FakeRasterizer::default());
    let lines = strokes(&scene);
    assert_eq!(lines.len(), 2);
    let Primitive::Stroke { points, .. } = lines[1] else {
        panic!("expected stroke");
    };
    assert_eq!(points, &vec![Vec2::new(550.0, 300.0), Vec2::new(650.0, 300.0)]);
}

#[test]
fn editing_bezier_shows_handles() {
    let v = SceneView { mode: DrawMode::Bezier, ..view() };
    let mut editing = Shape::bezier(Vec2::ZERO, vec![Vec2::new(1.0, 1.0), Vec2::new(1.5, -1.0)], Vec2::new(2.0, 0.0));
    let scene = build_scene(&mut Diagram::new(), Some(&mut editing), &v, &mut FakeRasterizer::default());
    let discs = scene.primitives.iter().filter(|p| matches!(p, Primitive::Disc { .. })).count();
    assert_eq!(discs, 4);
    assert!(strokes(&scene).iter().any(|p| matches!(p, Primitive::Stroke { dashed: true, .. })));
}

#[test]
fn dropped_polygon_follows_pointer() {
    let v = SceneView { mode: DrawMode::DroppedPolygon, pointer: Vec2::new(1.0, 1.0), ..view() };
    let mut editing = Shape::multi_line(vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);
    let scene = build_scene(&mut Diagram::new(), Some(&mut editing), &v, &mut FakeRasterizer::default());
    let Primitive::Stroke { points, .. } = &scene.primitives[0] else {
        panic!("expected stroke");
    };
    assert_eq!(points[0], Vec2::new(550.0, 200.0));
}

#[test]
fn scene_serializes_tagged_primitives() {
    let scene = scene_of(vec![Shape::circle(Vec2::ZERO, 0.5)], &view());
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["primitives"][0]["type"], "stroke");
}
