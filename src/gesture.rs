//! Gesture sessions - the state recorded when a drag, resize, pan or pinch
//! begins, and the math that turns later pointer positions into proposals.

use crate::clamp::sanitize_scale;
use crate::error::CanvasError;
use crate::host::CursorStyle;
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::input::event::PointerId;
use crate::types::{Point, Rectangle, ScreenRect};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Resize Directions
// ============================================================================

/// Which handle a resize was started from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

/// The edges a resize direction moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        Self::N,
        Self::S,
        Self::E,
        Self::W,
        Self::NE,
        Self::NW,
        Self::SE,
        Self::SW,
    ];

    pub fn edges(self) -> Edges {
        let (north, south, east, west) = match self {
            Self::N => (true, false, false, false),
            Self::S => (false, true, false, false),
            Self::E => (false, false, true, false),
            Self::W => (false, false, false, true),
            Self::NE => (true, false, true, false),
            Self::NW => (true, false, false, true),
            Self::SE => (false, true, true, false),
            Self::SW => (false, true, false, true),
        };
        Edges { north, south, east, west }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::NE => "ne",
            Self::NW => "nw",
            Self::SE => "se",
            Self::SW => "sw",
        }
    }

    /// Cursor shown for the whole document while resizing from this handle
    pub fn cursor(self) -> CursorStyle {
        CursorStyle::Resize(self)
    }

    /// Apply a world-unit displacement to `start`.
    ///
    /// East/south edges grow with the displacement. North/west edges move
    /// the origin by the displacement and shrink the size by the same
    /// amount so the opposite edge stays put.
    pub fn apply(self, start: Rectangle, dx: f64, dy: f64) -> Rectangle {
        let edges = self.edges();
        let mut next = start;

        if edges.east {
            next.width = start.width + dx;
        }
        if edges.west {
            next.width = start.width - dx;
            next.x = start.x + dx;
        }
        if edges.south {
            next.height = start.height + dy;
        }
        if edges.north {
            next.height = start.height - dy;
            next.y = start.y + dy;
        }

        next
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeDirection {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str() == s)
            .ok_or_else(|| CanvasError::UnknownResizeDirection(s.to_string()))
    }
}

// ============================================================================
// Item Gesture Session
// ============================================================================

/// What an item gesture does with the pointer displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeDirection),
}

/// One in-progress drag or resize of a single rectangle.
///
/// The container snapshot and scale are frozen at gesture start so a layout
/// shift mid-gesture cannot corrupt the displacement math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub pointer_id: PointerId,
    pub kind: GestureKind,
    pub start_screen_pos: Point,
    pub start_rect: Rectangle,
    pub container_snapshot: Option<ScreenRect>,
    pub scale: f64,
}

impl GestureSession {
    pub fn new(
        pointer_id: PointerId,
        kind: GestureKind,
        start_screen_pos: Point,
        start_rect: Rectangle,
        container_snapshot: Option<ScreenRect>,
        scale: f64,
    ) -> Self {
        Self {
            pointer_id,
            kind,
            start_screen_pos,
            start_rect,
            container_snapshot,
            scale: sanitize_scale(scale),
        }
    }

    #[inline]
    pub fn owns(&self, pointer_id: PointerId) -> bool {
        self.pointer_id == pointer_id
    }

    /// Pointer displacement since the start, in world units
    pub fn world_delta(&self, position: Point) -> Point {
        CoordinateConverter::delta_screen_to_world(position - self.start_screen_pos, self.scale)
    }

    /// Unclamped rectangle for the pointer at `position`
    pub fn propose(&self, position: Point) -> Rectangle {
        let delta = self.world_delta(position);
        match self.kind {
            GestureKind::Drag => self.start_rect.translated(delta.x, delta.y),
            GestureKind::Resize(direction) => direction.apply(self.start_rect, delta.x, delta.y),
        }
    }
}

// ============================================================================
// Viewport Sessions
// ============================================================================

/// An in-progress viewport pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSession {
    pub pointer_id: PointerId,
    pub start_screen_pos: Point,
    pub start_offset: Point,
}

impl PanSession {
    /// `start_offset + (position - start_screen_pos)`
    pub fn offset_at(&self, position: Point) -> Point {
        self.start_offset + (position - self.start_screen_pos)
    }
}

/// An in-progress two-finger pinch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    pub start_distance: f64,
    pub start_scale: f64,
    /// World point under the two-finger midpoint at pinch start
    pub world_anchor: Point,
}

impl PinchSession {
    /// Begin a pinch from two surface-relative touch positions.
    pub fn begin(first: Point, second: Point, offset: Point, scale: f64) -> Self {
        let scale = sanitize_scale(scale);
        let start_distance = non_zero_distance(first.distance(second));
        let midpoint = first.midpoint(second);
        let ctx = CoordinateContext::new(&offset, scale);

        Self {
            start_distance,
            start_scale: scale,
            world_anchor: CoordinateConverter::screen_to_world(midpoint, &ctx),
        }
    }

    /// Unclamped scale for the current two-finger distance
    pub fn scale_for(&self, distance: f64) -> f64 {
        let ratio = non_zero_distance(distance) / non_zero_distance(self.start_distance);
        sanitize_scale(self.start_scale) * ratio
    }
}

/// Coincident touches would divide by zero; treat them as one pixel apart.
#[inline]
fn non_zero_distance(distance: f64) -> f64 {
    if distance.is_finite() && distance > 0.0 { distance } else { 1.0 }
}
