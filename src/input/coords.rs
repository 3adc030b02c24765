//! Coordinate conversion utilities for canvas interactions.
//!
//! This module provides centralized coordinate conversion functions to eliminate
//! duplicated formulas across input handling code. Screen positions here are
//! relative to the canvas surface, not the window.

use crate::clamp::sanitize_scale;
use crate::types::Point;

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    pub offset: &'a Point,
    pub scale: f64,
}

impl<'a> CoordinateContext<'a> {
    /// Create a new coordinate context. A degenerate scale is treated as `1.0`.
    #[inline]
    pub fn new(offset: &'a Point, scale: f64) -> Self {
        Self {
            offset,
            scale: sanitize_scale(scale),
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert surface position to world position: `(screen - offset) / scale`
    #[inline]
    pub fn screen_to_world(screen_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        Point::new(
            (screen_pos.x - ctx.offset.x) / ctx.scale,
            (screen_pos.y - ctx.offset.y) / ctx.scale,
        )
    }

    /// Convert world position to surface position: `world * scale + offset`
    #[inline]
    pub fn world_to_screen(world_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        Point::new(
            world_pos.x * ctx.scale + ctx.offset.x,
            world_pos.y * ctx.scale + ctx.offset.y,
        )
    }

    /// Offset that places `world_pos` under `screen_pos` at `scale`
    #[inline]
    pub fn anchor_offset(screen_pos: Point, world_pos: Point, scale: f64) -> Point {
        Point::new(screen_pos.x - world_pos.x * scale, screen_pos.y - world_pos.y * scale)
    }

    /// Convert a delta from screen to world (for drag operations)
    #[inline]
    pub fn delta_screen_to_world(delta: Point, scale: f64) -> Point {
        let scale = sanitize_scale(scale);
        Point::new(delta.x / scale, delta.y / scale)
    }
}
