//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Wheel sensitivity: `factor = exp(-delta_y * ZOOM_SENSITIVITY)`.
pub const ZOOM_SENSITIVITY: f64 = 0.0015;

/// Scale factor applied by a single zoom-in / zoom-out button press.
pub const ZOOM_STEP: f64 = 1.2;

/// Scale limits for the free-form node canvas.
pub const CANVAS_MIN_SCALE: f64 = 0.2;
pub const CANVAS_MAX_SCALE: f64 = 2.8;

/// Scale limits for the task board.
pub const BOARD_MIN_SCALE: f64 = 0.3;
pub const BOARD_MAX_SCALE: f64 = 2.0;

// ── Layout ──────────────────────────────────────────────────────

/// Default node size on the free canvas, in world units.
pub const CANVAS_NODE_WIDTH: f64 = 180.0;
pub const CANVAS_NODE_HEIGHT: f64 = 72.0;

/// Grid seeding on the free canvas.
pub const CANVAS_GRID_ORIGIN: f64 = 80.0;
pub const CANVAS_GRID_SPACING_X: f64 = 260.0;
pub const CANVAS_GRID_SPACING_Y: f64 = 160.0;

/// Default card size on the task board, in world units.
pub const BOARD_NODE_WIDTH: f64 = 220.0;
pub const BOARD_NODE_HEIGHT: f64 = 96.0;

/// Grid seeding on the task board.
pub const BOARD_GRID_ORIGIN: f64 = 40.0;
pub const BOARD_GRID_SPACING_X: f64 = 280.0;
pub const BOARD_GRID_SPACING_Y: f64 = 170.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space radius of the drag-to-connect handle, in pixels.
pub const CONNECT_HANDLE_RADIUS_PX: f64 = 8.0;

// ── Context menu ────────────────────────────────────────────────

/// Screen-space footprint of the context menu, used for outside-click detection.
pub const MENU_WIDTH_PX: f64 = 180.0;
pub const MENU_HEIGHT_PX: f64 = 44.0;
