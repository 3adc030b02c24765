//! Geometry clamping - minimum size floor and optional containment.
//!
//! All functions here are pure. Inputs that would produce `NaN` or infinity
//! are replaced with safe defaults instead of being rejected, so a bad
//! measurement never interrupts a gesture.

use crate::constants::{MIN_ITEM_HEIGHT, MIN_ITEM_WIDTH};
use crate::types::{Rectangle, Size};

/// Minimum item dimensions in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: MIN_ITEM_WIDTH,
            min_height: MIN_ITEM_HEIGHT,
        }
    }
}

/// Replace a zero, negative or non-finite scale with `1.0`.
#[inline]
pub fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

/// Clamp a proposed rectangle using the default size limits.
///
/// `container` is the container size in screen pixels, or `None` when no
/// containment is requested (or the container could not be measured).
pub fn clamp(proposed: Rectangle, container: Option<Size>, scale: f64) -> Rectangle {
    clamp_with(proposed, container, scale, &SizeLimits::default())
}

/// Clamp a proposed rectangle with explicit size limits.
///
/// The container is converted to world units by dividing by `scale`. Size is
/// capped to the container but never below the minimums, so a container
/// smaller than the minimum lets the item overflow. Position is then clamped
/// into `[0, container - size]`, an empty range collapsing to `[0, 0]`.
pub fn clamp_with(proposed: Rectangle, container: Option<Size>, scale: f64, limits: &SizeLimits) -> Rectangle {
    // f64::max ignores NaN, so non-finite sizes fall back to the floor
    let mut width = finite_or(proposed.width, limits.min_width).max(limits.min_width);
    let mut height = finite_or(proposed.height, limits.min_height).max(limits.min_height);
    let mut x = finite_or(proposed.x, 0.0);
    let mut y = finite_or(proposed.y, 0.0);

    let Some(container) = container.filter(Size::is_usable) else {
        return Rectangle { x, y, width, height };
    };

    let scale = sanitize_scale(scale);
    let world_width = container.width / scale;
    let world_height = container.height / scale;

    width = width.min(world_width.max(limits.min_width));
    height = height.min(world_height.max(limits.min_height));

    let max_x = (world_width - width).max(0.0);
    let max_y = (world_height - height).max(0.0);
    x = x.max(0.0).min(max_x);
    y = y.max(0.0).min(max_y);

    Rectangle { x, y, width, height }
}

#[inline]
fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
