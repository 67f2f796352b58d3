#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{
    GRID_COLS, GRID_ROWS, PAN_STEP_PX, REFERENCE_HEIGHT_PX, REFERENCE_WIDTH_PX, SNAP_DIVISIONS, ZOOM_MAX, ZOOM_MIN,
    ZOOM_STEP,
};
use crate::geom::Vec2;

/// Size of the drawing surface in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Width of any side panel occupying the left of the surface.
    pub panel_offset: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: REFERENCE_WIDTH_PX, height: REFERENCE_HEIGHT_PX, panel_offset: 0.0 }
    }
}

/// Camera state for pan/zoom over the diagram grid.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Grid spacing at zoom 1: the largest square cell that fits the grid.
    #[must_use]
    pub fn base_spacing(viewport: Viewport) -> f64 {
        (viewport.height / GRID_ROWS).min(viewport.width / GRID_COLS)
    }

    /// Screen pixels per diagram unit at the current zoom.
    #[must_use]
    pub fn pixels_per_unit(&self, viewport: Viewport) -> f64 {
        Self::base_spacing(viewport) * self.zoom
    }

    /// UI scaling relative to the reference viewport; handle and arrow sizes use it.
    #[must_use]
    pub fn ui_scaling(viewport: Viewport) -> f64 {
        Self::base_spacing(viewport) / (REFERENCE_WIDTH_PX / GRID_ROWS).min(REFERENCE_HEIGHT_PX / GRID_COLS)
    }

    /// Screen position (y up) of the diagram origin.
    #[must_use]
    pub fn origin_on_screen(&self, viewport: Viewport) -> Vec2 {
        Vec2::new(
            viewport.width / 2.0 + viewport.panel_offset - self.pan_x,
            viewport.height / 2.0 - self.pan_y,
        )
    }

    /// Convert a screen-space point (pixels, y down) to diagram coordinates.
    #[must_use]
    pub fn screen_to_diagram(&self, screen: Vec2, viewport: Viewport) -> Vec2 {
        let origin = self.origin_on_screen(viewport);
        let ppu = self.pixels_per_unit(viewport);
        let flipped = Vec2::new(screen.x, viewport.height - screen.y);
        (flipped - origin).scale(1.0 / ppu)
    }

    /// Convert a diagram point to screen coordinates (pixels, y down).
    #[must_use]
    pub fn diagram_to_screen(&self, diagram: Vec2, viewport: Viewport) -> Vec2 {
        let up = diagram.scale(self.pixels_per_unit(viewport)) + self.origin_on_screen(viewport);
        Vec2::new(up.x, viewport.height - up.y)
    }

    /// Convert a screen-space distance (pixels) to a diagram-space distance.
    #[must_use]
    pub fn screen_dist_to_diagram(&self, screen_dist: f64, viewport: Viewport) -> f64 {
        screen_dist / self.pixels_per_unit(viewport)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Pan by whole key steps; positive `dx` moves the view right, positive `dy` up.
    pub fn pan_steps(&mut self, dx: i32, dy: i32) {
        self.pan_x += f64::from(dx) * PAN_STEP_PX;
        self.pan_y += f64::from(dy) * PAN_STEP_PX;
    }
}

/// Snap a diagram point to the authoring grid.
#[must_use]
pub fn snap_to_grid(p: Vec2) -> Vec2 {
    p.snap(SNAP_DIVISIONS)
}
