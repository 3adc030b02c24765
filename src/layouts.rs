//! Layout map hygiene.
//!
//! The layout store is external, and records coming back from it may be
//! partial or malformed. These helpers sanitise records, give new items a
//! default grid slot, and compute the bounding box used by recenter.

use crate::clamp::SizeLimits;
use crate::constants::{
    ASSUMED_CANVAS_SIZE, COMPACT_CANVAS_WIDTH, COMPACT_CARD_HEIGHT, DEFAULT_CARD_HEIGHT, DEFAULT_CARD_WIDTH,
};
use crate::types::{ItemKey, Point, Rectangle, Size};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Committed layouts by item key.
pub type LayoutMap = BTreeMap<ItemKey, Rectangle>;

/// A layout record as it may arrive from storage: any field may be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLayout {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl From<Rectangle> for RawLayout {
    fn from(r: Rectangle) -> Self {
        Self {
            x: Some(r.x),
            y: Some(r.y),
            width: Some(r.width),
            height: Some(r.height),
        }
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Bounding box over every finite rectangle. Rectangles with a non-finite
/// coordinate are skipped; `None` when nothing usable remains.
pub fn layout_bounds<'a>(layouts: impl IntoIterator<Item = &'a Rectangle>) -> Option<Bounds> {
    layouts
        .into_iter()
        .filter(|r| r.is_finite())
        .fold(None, |acc: Option<Bounds>, r| {
            Some(match acc {
                None => Bounds {
                    min_x: r.x,
                    min_y: r.y,
                    max_x: r.right(),
                    max_y: r.bottom(),
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(r.x),
                    min_y: b.min_y.min(r.y),
                    max_x: b.max_x.max(r.right()),
                    max_y: b.max_y.max(r.bottom()),
                },
            })
        })
        .filter(|b| b.min_x.is_finite() && b.min_y.is_finite() && b.max_x.is_finite() && b.max_y.is_finite())
}

/// Turn a stored record into a usable layout.
///
/// Missing or non-finite positions fall back to `gap`; missing or
/// non-finite sizes fall back to the minimum, and sizes are floored to it.
/// Positions are never clamped to the visible canvas: the world is
/// unbounded and items moved off-screen must stay there.
pub fn sanitize_layout(raw: &RawLayout, gap: f64, limits: &SizeLimits) -> Rectangle {
    let finite = |v: Option<f64>| v.filter(|v| v.is_finite());

    Rectangle {
        x: finite(raw.x).unwrap_or(gap),
        y: finite(raw.y).unwrap_or(gap),
        width: finite(raw.width).unwrap_or(limits.min_width).max(limits.min_width),
        height: finite(raw.height).unwrap_or(limits.min_height).max(limits.min_height),
    }
}

/// Default slot for the `index`-th item on a canvas of the given size.
///
/// Cards fill rows left to right. A slot that would overflow the canvas
/// horizontally goes back to the left edge; one that would overflow
/// vertically goes back to the top-left corner.
pub fn default_grid_layout(index: usize, canvas: Option<Size>, gap: f64, limits: &SizeLimits) -> Rectangle {
    let canvas = canvas
        .filter(Size::is_usable)
        .unwrap_or(Size::new(ASSUMED_CANVAS_SIZE.0, ASSUMED_CANVAS_SIZE.1));

    let card_width = DEFAULT_CARD_WIDTH.min((canvas.width - gap * 2.0).max(limits.min_width));
    let card_height = if canvas.width < COMPACT_CANVAS_WIDTH {
        COMPACT_CARD_HEIGHT
    } else {
        DEFAULT_CARD_HEIGHT
    };
    let cols = (((canvas.width - gap) / (card_width + gap)).floor() as usize).max(1);

    let col = index % cols;
    let row = index / cols;
    let mut x = col as f64 * (card_width + gap) + gap;
    let mut y = row as f64 * (card_height + gap) + gap;

    if x + card_width > canvas.width - gap {
        x = gap;
    }
    if y + card_height > canvas.height - gap {
        x = gap;
        y = gap;
    }

    sanitize_layout(
        &RawLayout {
            x: Some(x),
            y: Some(y),
            width: Some(card_width),
            height: Some(card_height),
        },
        gap,
        limits,
    )
}

/// Bring `layouts` in line with the items currently on the canvas.
///
/// Entries for keys not in `keys` are dropped, existing entries are
/// sanitised, and keys without an entry get a default grid slot based on
/// their position in `keys`. Empty keys are skipped.
pub fn reconcile(layouts: &mut LayoutMap, keys: &[ItemKey], canvas: Option<Size>, gap: f64, limits: &SizeLimits) {
    let live: HashSet<&ItemKey> = keys.iter().filter(|k| !k.is_empty()).collect();
    let before = layouts.len();
    layouts.retain(|key, _| live.contains(key));
    let removed = before - layouts.len();

    let mut placed = 0usize;
    for (index, key) in keys.iter().enumerate() {
        if key.is_empty() {
            continue;
        }
        match layouts.get_mut(key) {
            Some(existing) => {
                *existing = sanitize_layout(&RawLayout::from(*existing), gap, limits);
            }
            None => {
                layouts.insert(key.clone(), default_grid_layout(index, canvas, gap, limits));
                placed += 1;
            }
        }
    }

    if removed > 0 || placed > 0 {
        debug!(removed, placed, total = layouts.len(), "Reconciled layouts");
    }
}
