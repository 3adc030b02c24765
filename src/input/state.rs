//! Item gesture state machine.
//!
//! Each item owns one of these. A single enum instead of separate
//! "is dragging" / "is resizing" flags makes impossible states
//! unrepresentable: an item cannot be dragged and resized at once.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging     (primary press on the item body)
//! Idle -> Resizing     (press on one of the eight resize handles)
//!
//! Dragging -> Idle     (pointer up/cancel for the owning pointer, or unmount)
//! Resizing -> Idle     (pointer up/cancel for the owning pointer, or unmount)
//! ```
//!
//! There is no direct edge between `Dragging` and `Resizing`.

use crate::gesture::{GestureKind, GestureSession, ResizeDirection};
use crate::input::event::PointerId;

/// Gesture state of a single item.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// No active gesture; the item shows its committed layout
    #[default]
    Idle,

    /// Moving the item
    Dragging(GestureSession),

    /// Resizing the item from a handle
    Resizing(GestureSession),
}

impl GestureState {
    /// Enter the state matching the session's kind. Only valid from `Idle`;
    /// returns `false` and leaves the state untouched otherwise.
    pub fn start(&mut self, session: GestureSession) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = match session.kind {
            GestureKind::Drag => Self::Dragging(session),
            GestureKind::Resize(_) => Self::Resizing(session),
        };
        true
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing(_))
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&GestureSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) | Self::Resizing(session) => Some(session),
        }
    }

    /// The active session if it belongs to `pointer`
    pub fn session_for(&self, pointer: PointerId) -> Option<&GestureSession> {
        self.session().filter(|session| session.owns(pointer))
    }

    pub fn pointer_id(&self) -> Option<PointerId> {
        self.session().map(|session| session.pointer_id)
    }

    /// Direction of the active resize
    pub fn resize_direction(&self) -> Option<ResizeDirection> {
        match self.session()?.kind {
            GestureKind::Resize(direction) => Some(direction),
            GestureKind::Drag => None,
        }
    }

    /// Leave the current state, returning the session that was active.
    pub fn take(&mut self) -> Option<GestureSession> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Dragging(session) | Self::Resizing(session) => Some(session),
        }
    }
}
