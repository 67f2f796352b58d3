//! Authoring configuration: current style and global toggles.
//!
//! Every shape the session creates copies its style from here at creation
//! time, so changing the configuration never restyles committed shapes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Serialize;

use crate::consts::{MAX_CONTROL_POINTS, MIN_CONTROL_POINTS};
use crate::doc::{LineThickness, Style};
use crate::palette::Color;

/// Label placed by Text mode until the host supplies one.
pub const DEFAULT_LABEL: &str = "Insert Text";

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthoringConfig {
    pub color: Color,
    pub dashed: bool,
    pub front_arrow: bool,
    pub back_arrow: bool,
    /// Fill closed polygons and circles.
    pub filled: bool,
    pub thickness: LineThickness,
    /// Round pointer coordinates to the nearest 0.1 unit.
    pub snap_to_grid: bool,
    /// Draw filled shapes as outlines only.
    pub wireframe: bool,
    pub show_grid: bool,
    pub light_mode: bool,
    control_points: usize,
    /// Content of the next Text shape.
    pub label: String,
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self {
            color: Color::default(),
            dashed: false,
            front_arrow: false,
            back_arrow: false,
            filled: false,
            thickness: LineThickness::Thin,
            snap_to_grid: true,
            wireframe: false,
            show_grid: true,
            light_mode: true,
            control_points: MIN_CONTROL_POINTS,
            label: DEFAULT_LABEL.to_owned(),
        }
    }
}

impl AuthoringConfig {
    /// Style copied onto stroked shapes (Line, Bezier, open MultiLine). Never filled.
    #[must_use]
    pub fn stroke_style(&self) -> Style {
        Style {
            color: self.color,
            dashed: self.dashed,
            front_arrow: self.front_arrow,
            back_arrow: self.back_arrow,
            filled: false,
            thickness: self.thickness,
        }
    }

    /// Style copied onto fillable shapes (Circle, closed MultiLine).
    #[must_use]
    pub fn fill_style(&self) -> Style {
        Style { filled: self.filled, ..self.stroke_style() }
    }

    /// Style for Text shapes: color only.
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style { color: self.color, ..Style::default() }
    }

    /// Control points given to a freshly placed Bezier.
    #[must_use]
    pub fn control_points(&self) -> usize {
        self.control_points
    }

    /// Set the Bezier control point count, clamped to the supported range.
    pub fn set_control_points(&mut self, count: usize) {
        self.control_points = count.clamp(MIN_CONTROL_POINTS, MAX_CONTROL_POINTS);
    }

    pub fn more_control_points(&mut self) {
        self.set_control_points(self.control_points + 1);
    }

    pub fn fewer_control_points(&mut self) {
        self.set_control_points(self.control_points.saturating_sub(1));
    }
}
