//! Document model: shapes, their style attributes, and the ordered diagram.
//!
//! This module defines what is on the canvas (`Shape`, `Geometry`), the style
//! shared by every shape (`Style`, `LineThickness`), and the runtime store
//! that owns all committed shapes (`Diagram`).
//!
//! Shapes arrive from the authoring engine (interactive construction) and
//! from the diagram-text parser (bulk import). The renderer walks `Diagram`
//! front to back; its order is both z-order and undo order.
//!
//! Derived data (triangle fan, label raster handle) is cached on the shape
//! and dropped whenever the geometry changes, so every geometry mutation goes
//! through a `Shape` method.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::Serialize;
use tracing::debug;

use crate::geom::Vec2;
use crate::palette::Color;
use crate::render::RasterHandle;
use crate::triangulate::{Triangle, triangulate};

/// Stroke weight, named as in diagram text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineThickness {
    UltraThin,
    VeryThin,
    #[default]
    Thin,
    Thick,
    VeryThick,
    UltraThick,
}

impl LineThickness {
    pub const ALL: [Self; 6] =
        [Self::UltraThin, Self::VeryThin, Self::Thin, Self::Thick, Self::VeryThick, Self::UltraThick];

    /// Token used in a diagram-text modifier block.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::UltraThin => "ultra thin",
            Self::VeryThin => "very thin",
            Self::Thin => "thin",
            Self::Thick => "thick",
            Self::VeryThick => "very thick",
            Self::UltraThick => "ultra thick",
        }
    }

    /// Parse a modifier token, tolerating repeated inner whitespace.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let normalized = token.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|t| t.token().eq_ignore_ascii_case(&normalized))
    }

    /// Stroke width in screen pixels before UI scaling and zoom.
    #[must_use]
    pub fn line_width(self) -> f64 {
        match self {
            Self::UltraThin => 0.5,
            Self::VeryThin => 1.25,
            Self::Thin => 1.55,
            Self::Thick => 2.0,
            Self::VeryThick => 3.0,
            Self::UltraThick => 5.0,
        }
    }
}

/// Style attributes carried by every shape.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Style {
    pub color: Color,
    pub dashed: bool,
    /// Arrowhead at the end point (last vertex).
    pub front_arrow: bool,
    /// Arrowhead at the origin (first vertex).
    pub back_arrow: bool,
    pub filled: bool,
    pub thickness: LineThickness,
}

/// Fieldless tag of a [`Geometry`], for dispatch and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Line,
    Circle,
    MultiLine,
    Bezier,
    Text,
}

/// Per-variant geometry of a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Straight segment from `origin` to `end`.
    Line { origin: Vec2, end: Vec2 },
    /// Circle around `center`; its radius is the distance to `rim`.
    Circle { center: Vec2, rim: Vec2 },
    /// Open polyline, or a closed polygon when the last vertex repeats the first.
    MultiLine { vertices: Vec<Vec2> },
    /// Curve from `origin` to `end` shaped by 0–6 interior control points.
    Bezier { origin: Vec2, end: Vec2, controls: Vec<Vec2> },
    /// Label anchored at `anchor`; `$…$` content is rendered as math.
    Text { anchor: Vec2, text: String },
}

impl Geometry {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Line { .. } => ShapeKind::Line,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::MultiLine { .. } => ShapeKind::MultiLine,
            Self::Bezier { .. } => ShapeKind::Bezier,
            Self::Text { .. } => ShapeKind::Text,
        }
    }
}

/// One drawable diagram element.
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    geometry: Geometry,
    pub style: Style,
    #[serde(skip)]
    triangle_fan: Option<Vec<Triangle>>,
    #[serde(skip)]
    label_raster: Option<RasterHandle>,
}

impl PartialEq for Shape {
    /// Caches are derived data and never take part in equality. Circles
    /// compare by center and radius; the rim direction is not kept by text.
    fn eq(&self, other: &Self) -> bool {
        let same_geometry = match (&self.geometry, &other.geometry) {
            (Geometry::Circle { center: a, .. }, Geometry::Circle { center: b, .. }) => {
                a == b && self.radius() == other.radius()
            }
            (a, b) => a == b,
        };
        same_geometry && self.style == other.style
    }
}

impl Shape {
    #[must_use]
    pub fn new(geometry: Geometry, style: Style) -> Self {
        Self { geometry, style, triangle_fan: None, label_raster: None }
    }

    #[must_use]
    pub fn line(origin: Vec2, end: Vec2) -> Self {
        Self::new(Geometry::Line { origin, end }, Style::default())
    }

    /// Circle of `radius` around `center`; the rim point lies on the +x axis.
    #[must_use]
    pub fn circle(center: Vec2, radius: f64) -> Self {
        Self::new(Geometry::Circle { center, rim: center + Vec2::new(radius, 0.0) }, Style::default())
    }

    #[must_use]
    pub fn multi_line(vertices: Vec<Vec2>) -> Self {
        Self::new(Geometry::MultiLine { vertices }, Style::default())
    }

    #[must_use]
    pub fn bezier(origin: Vec2, controls: Vec<Vec2>, end: Vec2) -> Self {
        Self::new(Geometry::Bezier { origin, end, controls }, Style::default())
    }

    #[must_use]
    pub fn text(anchor: Vec2, text: impl Into<String>) -> Self {
        Self::new(Geometry::Text { anchor, text: text.into() }, Style::default())
    }

    /// Replace the style, builder-style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Radius of a circle, derived from its center and rim.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        match &self.geometry {
            Geometry::Circle { center, rim } => Some(center.dst(*rim)),
            _ => None,
        }
    }

    /// Polygon vertices (MultiLine) or control points (Bezier); empty otherwise.
    #[must_use]
    pub fn vertices(&self) -> &[Vec2] {
        match &self.geometry {
            Geometry::MultiLine { vertices } => vertices,
            Geometry::Bezier { controls, .. } => controls,
            _ => &[],
        }
    }

    /// Whether this MultiLine is a closed ring (last vertex repeats the first).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match &self.geometry {
            Geometry::MultiLine { vertices } => vertices.len() > 2 && vertices.first() == vertices.last(),
            _ => false,
        }
    }

    /// `$…$` math content on a Text shape.
    #[must_use]
    pub fn is_math_label(&self) -> bool {
        match &self.geometry {
            Geometry::Text { text, .. } => text.len() >= 2 && text.starts_with('$') && text.ends_with('$'),
            _ => false,
        }
    }

    // --- Mutation ---

    /// Mutable access to the geometry; drops every cache.
    pub fn geometry_mut(&mut self) -> &mut Geometry {
        self.invalidate();
        &mut self.geometry
    }

    /// Move the origin (Line, Bezier), center (Circle), anchor (Text) or first vertex.
    pub fn set_origin(&mut self, p: Vec2) {
        match self.geometry_mut() {
            Geometry::Line { origin, .. } | Geometry::Bezier { origin, .. } => *origin = p,
            Geometry::Circle { center, .. } => *center = p,
            Geometry::Text { anchor, .. } => *anchor = p,
            Geometry::MultiLine { vertices } => {
                if let Some(first) = vertices.first_mut() {
                    *first = p;
                }
            }
        }
    }

    /// Move the end point (Line, Bezier), rim (Circle) or last vertex. Text has none.
    pub fn set_end(&mut self, p: Vec2) {
        match self.geometry_mut() {
            Geometry::Line { end, .. } | Geometry::Bezier { end, .. } => *end = p,
            Geometry::Circle { rim, .. } => *rim = p,
            Geometry::MultiLine { vertices } => {
                if let Some(last) = vertices.last_mut() {
                    *last = p;
                }
            }
            Geometry::Text { .. } => {}
        }
    }

    /// Move Bezier control point `index`. Returns false if there is no such point.
    pub fn set_control(&mut self, index: usize, p: Vec2) -> bool {
        let Geometry::Bezier { controls, .. } = &mut self.geometry else {
            return false;
        };
        let Some(c) = controls.get_mut(index) else {
            return false;
        };
        *c = p;
        self.invalidate();
        true
    }

    /// Append a vertex to a MultiLine. Returns false for every other kind.
    pub fn push_vertex(&mut self, p: Vec2) -> bool {
        let Geometry::MultiLine { vertices } = &mut self.geometry else {
            return false;
        };
        vertices.push(p);
        self.invalidate();
        true
    }

    /// Translate every point of the shape by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        match self.geometry_mut() {
            Geometry::Line { origin, end } => {
                *origin += offset;
                *end += offset;
            }
            Geometry::Circle { center, rim } => {
                *center += offset;
                *rim += offset;
            }
            Geometry::MultiLine { vertices } => vertices.iter_mut().for_each(|v| *v += offset),
            Geometry::Bezier { origin, end, controls } => {
                *origin += offset;
                *end += offset;
                controls.iter_mut().for_each(|c| *c += offset);
            }
            Geometry::Text { anchor, .. } => *anchor += offset,
        }
    }

    // --- Derived caches ---

    /// Triangle fan for a filled MultiLine, computed on first access.
    ///
    /// Returns `None` for unfilled shapes, non-polygons, and polygons with
    /// fewer than three distinct vertices.
    pub fn triangle_fan(&mut self) -> Option<&[Triangle]> {
        if !self.style.filled {
            return None;
        }
        let Geometry::MultiLine { vertices } = &self.geometry else {
            return None;
        };
        if self.triangle_fan.is_none() {
            match triangulate(vertices) {
                Ok(fan) => self.triangle_fan = Some(fan),
                Err(e) => {
                    debug!(error = %e, "skipping fill for degenerate polygon");
                    return None;
                }
            }
        }
        self.triangle_fan.as_deref()
    }

    /// Whether a triangle fan is currently cached.
    #[must_use]
    pub fn has_cached_fan(&self) -> bool {
        self.triangle_fan.is_some()
    }

    #[must_use]
    pub fn label_raster(&self) -> Option<RasterHandle> {
        self.label_raster
    }

    pub fn set_label_raster(&mut self, handle: RasterHandle) {
        self.label_raster = Some(handle);
    }

    /// Detach the label raster so its owner can free it.
    pub fn take_label_raster(&mut self) -> Option<RasterHandle> {
        self.label_raster.take()
    }

    fn invalidate(&mut self) {
        self.triangle_fan = None;
        if matches!(self.geometry, Geometry::Text { .. }) {
            // Raster handles are keyed by text, not position; keep them across moves.
            return;
        }
        self.label_raster = None;
    }
}

/// Ordered collection of committed shapes. Order is z-order and undo order.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    shapes: Vec<Shape>,
}

impl Diagram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed shape on top.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove and return the most recently committed shape.
    pub fn pop(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    /// Remove every shape, returning them in commit order.
    pub fn clear(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.shapes)
    }

    /// Replace all shapes, returning the previous contents.
    pub fn replace(&mut self, shapes: Vec<Shape>) -> Vec<Shape> {
        std::mem::replace(&mut self.shapes, shapes)
    }

    /// Append shapes after the existing ones.
    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.shapes.extend(shapes);
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    #[must_use]
    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
