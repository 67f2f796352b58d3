//! Shared numeric constants for the canvas crate.

// ── Grid / camera ───────────────────────────────────────────────

/// Number of major grid rows that fit the viewport height at zoom 1.
pub const GRID_ROWS: f64 = 6.0;

/// Number of major grid columns that fit the viewport width at zoom 1.
pub const GRID_COLS: f64 = 9.0;

/// Reference viewport used to derive the UI scaling factor.
pub const REFERENCE_WIDTH_PX: f64 = 1200.0;
pub const REFERENCE_HEIGHT_PX: f64 = 800.0;

/// Snap-to-grid resolution: pointer coordinates round to 1/10 unit.
pub const SNAP_DIVISIONS: f64 = 10.0;

pub const ZOOM_STEP: f64 = 0.125;
pub const ZOOM_MIN: f64 = 0.25;
pub const ZOOM_MAX: f64 = 2.0;

/// Pan distance per arrow-key tick, in screen pixels.
pub const PAN_STEP_PX: f64 = 10.0;

// ── Authoring ───────────────────────────────────────────────────

/// Offset applied to a fresh Line/Circle end point so it never starts degenerate.
pub const CREATE_EPSILON: f64 = 0.01;

/// Bezier control point count limits.
pub const MIN_CONTROL_POINTS: usize = 1;
pub const MAX_CONTROL_POINTS: usize = 6;

/// Horizontal span of the default Bezier fan, in grid units.
pub const BEZIER_DEFAULT_SPAN: f64 = 2.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space grab radius in pixels for Bezier handles (before UI scaling).
pub const HANDLE_RADIUS_PX: f64 = 10.0;

// ── Curve sampling ──────────────────────────────────────────────

/// Uniform steps used when drawing a Bezier on screen.
pub const RENDER_BEZIER_STEPS: usize = 50;

/// Base step count for exporting a Bezier; two more steps per control point.
pub const EXPORT_BEZIER_BASE_STEPS: usize = 23;

// ── Rendering ───────────────────────────────────────────────────

/// Arrowhead length in screen pixels (before UI scaling and zoom).
pub const ARROW_SIZE_PX: f64 = 20.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Dash period along dashed strokes, in screen pixels.
pub const DASH_PERIOD_PX: f64 = 20.0;
