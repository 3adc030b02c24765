//! Canvas-wide constants.
//!
//! Centralizes magic numbers and layout values to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Item Size Limits
// ============================================================================

/// Minimum item width in world units
pub const MIN_ITEM_WIDTH: f64 = 280.0;

/// Minimum item height in world units
pub const MIN_ITEM_HEIGHT: f64 = 200.0;

/// Layout used for an item that has never been placed
pub const FALLBACK_LAYOUT: (f64, f64, f64, f64) = (0.0, 0.0, 320.0, 240.0);

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_SCALE: f64 = 0.25;

/// Maximum zoom level
pub const MAX_SCALE: f64 = 3.0;

/// Default zoom level
pub const DEFAULT_SCALE: f64 = 1.0;

/// Exponent multiplier applied to the wheel delta: `factor = exp(-delta * k)`
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.002;

/// Pixels per line for line-based wheel deltas
pub const WHEEL_LINE_HEIGHT: f64 = 20.0;

// ============================================================================
// Default Grid Placement
// ============================================================================

/// Gap between cards in the default grid, and fallback position for
/// malformed layout records
pub const GRID_GAP: f64 = 16.0;

/// Preferred card width for newly placed items
pub const DEFAULT_CARD_WIDTH: f64 = 320.0;

/// Card height for newly placed items
pub const DEFAULT_CARD_HEIGHT: f64 = 240.0;

/// Card height on narrow canvases
pub const COMPACT_CARD_HEIGHT: f64 = 220.0;

/// Canvas width below which cards use the compact height
pub const COMPACT_CANVAS_WIDTH: f64 = 480.0;

/// Canvas size assumed when the surface has not been measured yet
pub const ASSUMED_CANVAS_SIZE: (f64, f64) = (1200.0, 700.0);

// ============================================================================
// Input Handling
// ============================================================================

/// Threshold in milliseconds above which a profiled operation is logged
pub const SLOW_OPERATION_MS: f64 = 4.0;
