//! Authoring session: the per-tick shape construction state machine.
//!
//! A [`Session`] owns the committed [`Diagram`], at most one editing shape,
//! the camera, and the [`AuthoringConfig`]. The host feeds it one
//! [`InputFrame`] per tick through [`Session::tick`] and processes the
//! returned [`Action`]s (persisting commits, freeing label rasters,
//! scheduling a redraw).
//!
//! Construction never fails: clicks that cannot advance a shape are ignored,
//! and commits guarded by a point count are no-ops until the count is met.

use tracing::debug;

use crate::camera::{Camera, Viewport, snap_to_grid};
use crate::config::AuthoringConfig;
use crate::consts::{BEZIER_DEFAULT_SPAN, CREATE_EPSILON};
use crate::doc::{Diagram, Geometry, Shape, ShapeKind};
use crate::geom::Vec2;
use crate::hit::{apply_drag, handle_radius, hit_handle};
use crate::input::{DragTarget, DrawMode, InputError, InputFrame, Key};
use crate::render::{LabelRasterizer, RasterHandle, Scene, SceneView, build_scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from [`Session::tick`] and friends for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A shape was appended to the diagram at `index`.
    ShapeCommitted { index: usize, kind: ShapeKind },
    /// The most recently committed shape was removed.
    ShapeRemoved { kind: ShapeKind },
    /// Every committed shape was removed.
    DiagramCleared { removed: usize },
    /// The diagram was replaced by or extended with imported shapes.
    DiagramLoaded { count: usize },
    ModeChanged(DrawMode),
    /// A label raster is no longer referenced and can be freed.
    RasterReleased(RasterHandle),
    RenderNeeded,
}

/// One interactive authoring session.
#[derive(Debug, Default)]
pub struct Session {
    pub diagram: Diagram,
    pub config: AuthoringConfig,
    pub camera: Camera,
    pub viewport: Viewport,
    mode: DrawMode,
    editing: Option<Shape>,
    drag: DragTarget,
    pointer: Vec2,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// The shape under construction, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&Shape> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn drag(&self) -> DragTarget {
        self.drag
    }

    /// Pointer in diagram space as of the last tick, after snapping.
    #[must_use]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// A shape is mid-construction. The Text preview does not count.
    #[must_use]
    pub fn is_constructing(&self) -> bool {
        self.editing.is_some() && self.mode != DrawMode::Text
    }

    /// Convert a screen position (pixels, y down) to an unsnapped diagram point.
    #[must_use]
    pub fn pointer_from_screen(&self, screen: Vec2) -> Vec2 {
        self.camera.screen_to_diagram(screen, self.viewport)
    }

    // --- Mode ---

    /// Switch draw mode, discarding any shape under construction.
    pub fn set_mode(&mut self, mode: DrawMode) -> Vec<Action> {
        let mut actions = Vec::new();
        self.cancel_editing(&mut actions);
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "draw mode changed");
            self.mode = mode;
            actions.push(Action::ModeChanged(mode));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Switch draw mode by name, as supplied by a host menu or command line.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownDrawMode`] if `name` names no mode.
    pub fn set_mode_named(&mut self, name: &str) -> Result<Vec<Action>, InputError> {
        Ok(self.set_mode(name.parse()?))
    }

    /// Pick up a pre-built polygon so it follows the pointer until placed.
    ///
    /// The polygon's vertices are offsets from the pointer. Anything other
    /// than a MultiLine is ignored.
    pub fn begin_dropped_polygon(&mut self, polygon: Shape) -> Vec<Action> {
        if polygon.kind() != ShapeKind::MultiLine {
            debug!(kind = ?polygon.kind(), "ignoring non-polygon drop");
            return Vec::new();
        }
        let actions = self.set_mode(DrawMode::DroppedPolygon);
        self.editing = Some(polygon);
        actions
    }

    // --- Bulk import ---

    /// Replace every committed shape with `shapes`.
    pub fn replace_diagram(&mut self, shapes: Vec<Shape>) -> Vec<Action> {
        let count = shapes.len();
        let removed = self.diagram.replace(shapes);
        let mut actions = release_rasters(removed);
        debug!(count, "diagram replaced");
        actions.push(Action::DiagramLoaded { count });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Append `shapes` after the committed ones.
    pub fn append_shapes(&mut self, shapes: Vec<Shape>) -> Vec<Action> {
        let count = shapes.len();
        self.diagram.extend(shapes);
        debug!(count, total = self.diagram.len(), "shapes appended");
        vec![Action::DiagramLoaded { count }, Action::RenderNeeded]
    }

    // --- Per-tick input ---

    /// Advance the state machine by one input sample.
    pub fn tick(&mut self, frame: &InputFrame) -> Vec<Action> {
        let mut actions = Vec::new();
        let pointer = if self.config.snap_to_grid { snap_to_grid(frame.pointer) } else { frame.pointer };
        let moved = pointer != self.pointer;
        self.pointer = pointer;

        if frame.typing {
            return actions;
        }

        let view_changed = self.handle_view_keys(frame);
        if moved {
            self.follow_pointer(&mut actions);
        }

        let created = if frame.primary.pressed {
            self.on_primary_click(&mut actions)
        } else {
            if frame.secondary.pressed {
                self.on_secondary_click(&mut actions);
            }
            false
        };

        if !created {
            self.drag_handles(frame);
        }

        if frame.has_key(Key::Commit) && !self.drag.is_active() {
            self.on_commit_key(&mut actions);
        }
        if frame.has_key(Key::DeleteLast) && !self.is_constructing() {
            self.delete_last(&mut actions);
        }
        if frame.has_key(Key::ClearAll) && !self.is_constructing() {
            self.clear_all(&mut actions);
        }

        actions.retain(|a| *a != Action::RenderNeeded);
        if view_changed || !actions.is_empty() || (moved && self.editing.is_some()) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Build the display list for the current state.
    pub fn render(&mut self, rasterizer: &mut dyn LabelRasterizer) -> Scene {
        let view = SceneView {
            camera: self.camera,
            viewport: self.viewport,
            mode: self.mode,
            pointer: self.pointer,
            light_mode: self.config.light_mode,
            wireframe: self.config.wireframe,
        };
        build_scene(&mut self.diagram, self.editing.as_mut(), &view, rasterizer)
    }

    // --- Handlers ---

    /// Apply view and configuration keys. Returns true if any fired.
    fn handle_view_keys(&mut self, frame: &InputFrame) -> bool {
        let mut changed = false;
        for key in &frame.keys {
            match key {
                Key::ToggleSnap => self.config.snap_to_grid = !self.config.snap_to_grid,
                Key::ToggleWireframe => self.config.wireframe = !self.config.wireframe,
                Key::ZoomIn => self.camera.zoom_in(),
                Key::ZoomOut => self.camera.zoom_out(),
                Key::ZoomReset => self.camera.reset_zoom(),
                Key::PanLeft => self.camera.pan_steps(-1, 0),
                Key::PanRight => self.camera.pan_steps(1, 0),
                Key::PanUp => self.camera.pan_steps(0, 1),
                Key::PanDown => self.camera.pan_steps(0, -1),
                Key::MoreControlPoints => self.config.more_control_points(),
                Key::FewerControlPoints => self.config.fewer_control_points(),
                Key::Commit | Key::DeleteLast | Key::ClearAll => continue,
            }
            changed = true;
        }
        changed
    }

    /// Keep the live end of a Line/Circle and the Text preview under the pointer.
    fn follow_pointer(&mut self, actions: &mut Vec<Action>) {
        let p = self.pointer;
        let Some(shape) = self.editing.as_mut() else {
            return;
        };
        match self.mode {
            DrawMode::Line | DrawMode::Circle => shape.set_end(p),
            DrawMode::Text => {
                let label_changed =
                    matches!(shape.geometry(), Geometry::Text { text, .. } if *text != self.config.label);
                if label_changed {
                    if let Some(handle) = shape.take_label_raster() {
                        actions.push(Action::RasterReleased(handle));
                    }
                    *shape = Shape::text(p, self.config.label.clone()).with_style(self.config.label_style());
                } else {
                    shape.set_origin(p);
                }
            }
            DrawMode::MultiLine | DrawMode::Bezier | DrawMode::DroppedPolygon => {}
        }
    }

    /// Returns true when the click created a new editing shape.
    fn on_primary_click(&mut self, actions: &mut Vec<Action>) -> bool {
        let p = self.pointer;
        match self.mode {
            DrawMode::Line | DrawMode::Circle => {
                if let Some(mut shape) = self.editing.take() {
                    shape.set_end(p);
                    self.commit(shape, actions);
                    return false;
                }
                let end = p + Vec2::new(CREATE_EPSILON, CREATE_EPSILON);
                self.editing = Some(if self.mode == DrawMode::Line {
                    Shape::line(p, end).with_style(self.config.stroke_style())
                } else {
                    Shape::new(Geometry::Circle { center: p, rim: end }, self.config.fill_style())
                });
                true
            }
            DrawMode::MultiLine => {
                if self.editing.is_none() {
                    self.editing = Some(Shape::multi_line(vec![p]).with_style(self.config.stroke_style()));
                    return true;
                }
                let Some(shape) = self.editing.as_mut() else {
                    return false;
                };
                let closes_ring = shape.vertices().first() == Some(&p);
                if !closes_ring {
                    shape.push_vertex(p);
                } else if shape.vertices().len() >= 3 {
                    self.close_polygon(actions);
                }
                false
            }
            DrawMode::Bezier => {
                if self.editing.is_some() {
                    return false;
                }
                let count = self.config.control_points();
                #[allow(clippy::cast_precision_loss)]
                let step = BEZIER_DEFAULT_SPAN / (count + 1) as f64;
                let controls = (0..count)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let along = step * (i + 1) as f64;
                        let across = if i % 2 == 0 { 1.0 } else { -1.0 };
                        p + Vec2::new(along, across)
                    })
                    .collect();
                let end = p + Vec2::new(BEZIER_DEFAULT_SPAN, 0.0);
                self.editing = Some(Shape::bezier(p, controls, end).with_style(self.config.stroke_style()));
                self.drag = DragTarget::None;
                true
            }
            DrawMode::Text => {
                let label = Shape::text(p, self.config.label.clone()).with_style(self.config.label_style());
                if self.editing.is_none() {
                    self.editing = Some(label);
                    return true;
                }
                self.commit(label, actions);
                false
            }
            DrawMode::DroppedPolygon => {
                let Some(polygon) = self.editing.take() else {
                    return false;
                };
                let mut placed = polygon;
                placed.translate(p);
                placed.style.color = self.config.color;
                placed.style.filled = self.config.filled;
                placed.style.thickness = self.config.thickness;
                self.commit(placed, actions);
                actions.extend(self.set_mode(DrawMode::MultiLine));
                false
            }
        }
    }

    fn on_secondary_click(&mut self, actions: &mut Vec<Action>) {
        match self.mode {
            DrawMode::MultiLine => self.finish_polyline(actions),
            DrawMode::DroppedPolygon => actions.extend(self.set_mode(DrawMode::MultiLine)),
            DrawMode::Line | DrawMode::Circle | DrawMode::Bezier | DrawMode::Text => {
                self.cancel_editing(actions);
            }
        }
    }

    /// Commit key: finish the editing shape where that makes sense.
    fn on_commit_key(&mut self, actions: &mut Vec<Action>) {
        match self.mode {
            DrawMode::Line | DrawMode::Circle => {
                if let Some(mut shape) = self.editing.take() {
                    shape.set_end(self.pointer);
                    self.commit(shape, actions);
                }
            }
            DrawMode::MultiLine => self.finish_polyline(actions),
            DrawMode::Bezier => {
                if let Some(shape) = self.editing.take() {
                    self.drag = DragTarget::None;
                    self.commit(shape, actions);
                }
            }
            DrawMode::Text | DrawMode::DroppedPolygon => {}
        }
    }

    /// Drag Bezier handles while the primary button is held.
    fn drag_handles(&mut self, frame: &InputFrame) {
        if self.mode != DrawMode::Bezier {
            return;
        }
        let Some(shape) = self.editing.as_mut() else {
            return;
        };
        if !frame.primary.held {
            self.drag = DragTarget::None;
            return;
        }
        if !self.drag.is_active() {
            let radius = handle_radius(&self.camera, self.viewport);
            self.drag = hit_handle(shape, frame.pointer, radius);
        }
        apply_drag(shape, self.drag, self.pointer);
    }

    /// Close the ring on vertex 0 and commit it.
    fn close_polygon(&mut self, actions: &mut Vec<Action>) {
        let Some(mut shape) = self.editing.take() else {
            return;
        };
        if let Some(&first) = shape.vertices().first() {
            shape.push_vertex(first);
        }
        shape.style.front_arrow = false;
        shape.style.back_arrow = false;
        shape.style.filled = self.config.filled;
        self.commit(shape, actions);
    }

    /// End an open polyline early. Two vertices become a Line; one is discarded.
    fn finish_polyline(&mut self, actions: &mut Vec<Action>) {
        let Some(shape) = self.editing.take() else {
            return;
        };
        match *shape.vertices() {
            [a, b] => {
                let line = Shape::line(a, b).with_style(shape.style);
                self.commit(line, actions);
            }
            [_, _, _, ..] => self.commit(shape, actions),
            _ => debug!("discarding polyline with a single vertex"),
        }
    }

    fn cancel_editing(&mut self, actions: &mut Vec<Action>) {
        self.drag = DragTarget::None;
        if let Some(mut shape) = self.editing.take()
            && let Some(handle) = shape.take_label_raster()
        {
            actions.push(Action::RasterReleased(handle));
        }
    }

    fn commit(&mut self, shape: Shape, actions: &mut Vec<Action>) {
        let kind = shape.kind();
        self.diagram.push(shape);
        let index = self.diagram.len() - 1;
        debug!(?kind, index, "shape committed");
        actions.push(Action::ShapeCommitted { index, kind });
    }

    fn delete_last(&mut self, actions: &mut Vec<Action>) {
        let Some(mut shape) = self.diagram.pop() else {
            return;
        };
        debug!(kind = ?shape.kind(), remaining = self.diagram.len(), "removed last shape");
        if let Some(handle) = shape.take_label_raster() {
            actions.push(Action::RasterReleased(handle));
        }
        actions.push(Action::ShapeRemoved { kind: shape.kind() });
    }

    fn clear_all(&mut self, actions: &mut Vec<Action>) {
        let removed = self.diagram.clear();
        if removed.is_empty() {
            return;
        }
        let count = removed.len();
        debug!(count, "diagram cleared");
        actions.extend(release_rasters(removed));
        actions.push(Action::DiagramCleared { removed: count });
    }
}

fn release_rasters(shapes: Vec<Shape>) -> Vec<Action> {
    shapes
        .into_iter()
        .filter_map(|mut s| s.take_label_raster())
        .map(Action::RasterReleased)
        .collect()
}
