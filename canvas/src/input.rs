//! Input model: draw modes, per-tick input frames, and the drag target.
//!
//! The authoring session is driven by exactly one [`InputFrame`] per tick.
//! A frame carries the pointer position in diagram space, edge-and-level
//! state for both mouse buttons, the named key edges that fired this tick,
//! and whether a text field currently holds keyboard focus.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::geom::Vec2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown draw mode: {0}")]
    UnknownDrawMode(String),
}

/// Which kind of shape the session constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Two clicks: origin, then end point.
    #[default]
    Line,
    /// Two clicks: center, then a point on the rim.
    Circle,
    /// One click per vertex; clicking vertex 0 closes the ring.
    MultiLine,
    /// One click places a default curve; handles are then dragged.
    Bezier,
    /// Each click places a label.
    Text,
    /// Transient: a pre-built polygon follows the pointer until placed.
    DroppedPolygon,
}

impl DrawMode {
    pub const ALL: [Self; 6] =
        [Self::Line, Self::Circle, Self::MultiLine, Self::Bezier, Self::Text, Self::DroppedPolygon];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Circle => "circle",
            Self::MultiLine => "multi_line",
            Self::Bezier => "bezier",
            Self::Text => "text",
            Self::DroppedPolygon => "dropped_polygon",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "polygon" | "multiline" => Ok(Self::MultiLine),
            "droppedpolygon" => Ok(Self::DroppedPolygon),
            other => Self::ALL
                .into_iter()
                .find(|m| m.name() == other)
                .ok_or_else(|| InputError::UnknownDrawMode(s.to_owned())),
        }
    }
}

/// Edge and level state of one mouse button for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Went down this tick.
    pub pressed: bool,
    /// Is down at the end of this tick.
    pub held: bool,
}

impl ButtonState {
    /// Pressed this tick and still held.
    pub const CLICK: Self = Self { pressed: true, held: true };
    /// Held since an earlier tick.
    pub const HELD: Self = Self { pressed: false, held: true };
    pub const UP: Self = Self { pressed: false, held: false };
}

/// Named key edges the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Commit the editing shape.
    Commit,
    /// Remove the most recently committed shape.
    DeleteLast,
    /// Remove every committed shape.
    ClearAll,
    ToggleSnap,
    /// Toggle between filled and wireframe rendering.
    ToggleWireframe,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    /// Add a Bezier control point for the next curve.
    MoreControlPoints,
    /// Remove a Bezier control point for the next curve.
    FewerControlPoints,
}

/// Everything the session sees in one tick.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Pointer in diagram space, before snapping.
    pub pointer: Vec2,
    pub primary: ButtonState,
    pub secondary: ButtonState,
    /// Key edges that fired this tick.
    pub keys: Vec<Key>,
    /// A text field has keyboard focus; pointer construction and keys are ignored.
    pub typing: bool,
}

impl InputFrame {
    /// Idle frame with the pointer at `pointer`.
    #[must_use]
    pub fn at(pointer: Vec2) -> Self {
        Self { pointer, ..Self::default() }
    }

    /// Primary click at `pointer`.
    #[must_use]
    pub fn click(pointer: Vec2) -> Self {
        Self { pointer, primary: ButtonState::CLICK, ..Self::default() }
    }

    /// Secondary click at `pointer`.
    #[must_use]
    pub fn right_click(pointer: Vec2) -> Self {
        Self { pointer, secondary: ButtonState::CLICK, ..Self::default() }
    }

    /// Primary button held (no new press) at `pointer`.
    #[must_use]
    pub fn held(pointer: Vec2) -> Self {
        Self { pointer, primary: ButtonState::HELD, ..Self::default() }
    }

    /// Add a key edge, builder-style.
    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }

    #[must_use]
    pub fn has_key(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

/// Which Bezier handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    Origin,
    EndPoint,
    /// Interior control point by index.
    Control(usize),
}

impl DragTarget {
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}
