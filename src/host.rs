//! The platform seam.
//!
//! Controllers never touch a window system directly. Everything a gesture
//! acquires (pointer capture, pointer-scoped global listeners, the document
//! cursor and text-selection overrides, animation frames) and the one
//! measurement they need (the canvas surface rect) goes through
//! [`GestureHost`].

use crate::frame::FrameRequestId;
use crate::gesture::ResizeDirection;
use crate::input::event::PointerId;
use crate::types::ScreenRect;
use std::collections::{BTreeSet, VecDeque};

/// Cursor override for the document or the canvas surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    /// No override
    #[default]
    Default,
    /// Item drag with a mouse
    Move,
    /// Space held over the canvas
    Grab,
    /// Viewport pan in progress
    Grabbing,
    /// Item resize from a handle
    Resize(ResizeDirection),
}

impl CursorStyle {
    /// CSS cursor keyword
    pub fn css_name(&self) -> &'static str {
        match self {
            CursorStyle::Default => "",
            CursorStyle::Move => "move",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
            CursorStyle::Resize(dir) => match dir {
                ResizeDirection::N => "n-resize",
                ResizeDirection::S => "s-resize",
                ResizeDirection::E => "e-resize",
                ResizeDirection::W => "w-resize",
                ResizeDirection::NE => "ne-resize",
                ResizeDirection::NW => "nw-resize",
                ResizeDirection::SE => "se-resize",
                ResizeDirection::SW => "sw-resize",
            },
        }
    }
}

/// Platform services used by the controllers.
pub trait GestureHost {
    /// Route all further events of `pointer` to the gesture's element.
    fn capture_pointer(&mut self, pointer: PointerId);

    fn release_pointer(&mut self, pointer: PointerId);

    /// Start delivering document-level move/up/cancel events for `pointer`.
    fn attach_pointer_listeners(&mut self, pointer: PointerId);

    fn detach_pointer_listeners(&mut self, pointer: PointerId);

    /// Override the document cursor. `CursorStyle::Default` clears it.
    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Cursor of the canvas surface element only (pan affordance).
    fn set_surface_cursor(&mut self, cursor: CursorStyle);

    /// Enable or suppress text selection on the document body.
    fn set_text_selection(&mut self, enabled: bool);

    /// Ask for a callback before the next repaint.
    fn request_animation_frame(&mut self) -> FrameRequestId;

    fn cancel_animation_frame(&mut self, id: FrameRequestId);

    /// Current screen rect of the canvas surface, if it is mounted.
    fn surface_rect(&self) -> Option<ScreenRect>;
}

/// In-memory host for headless use and simulation.
///
/// Records every acquisition so callers can verify that gestures release
/// what they took, and queues animation frames until [`HeadlessHost::take_frames`].
#[derive(Debug, Default)]
pub struct HeadlessHost {
    surface: Option<ScreenRect>,
    captured: BTreeSet<PointerId>,
    listening: BTreeSet<PointerId>,
    cursor: CursorStyle,
    surface_cursor: CursorStyle,
    text_selection_enabled: bool,
    next_frame: u64,
    pending_frames: VecDeque<FrameRequestId>,
}

impl HeadlessHost {
    pub fn new(surface: Option<ScreenRect>) -> Self {
        Self {
            surface,
            text_selection_enabled: true,
            ..Default::default()
        }
    }

    pub fn set_surface(&mut self, surface: Option<ScreenRect>) {
        self.surface = surface;
    }

    pub fn is_captured(&self, pointer: PointerId) -> bool {
        self.captured.contains(&pointer)
    }

    pub fn is_listening(&self, pointer: PointerId) -> bool {
        self.listening.contains(&pointer)
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn surface_cursor(&self) -> CursorStyle {
        self.surface_cursor
    }

    pub fn text_selection_enabled(&self) -> bool {
        self.text_selection_enabled
    }

    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.len()
    }

    /// Nothing is captured or listened to.
    pub fn is_quiescent(&self) -> bool {
        self.captured.is_empty() && self.listening.is_empty()
    }

    /// Drain the frame callbacks that are due, in request order.
    pub fn take_frames(&mut self) -> Vec<FrameRequestId> {
        self.pending_frames.drain(..).collect()
    }
}

impl GestureHost for HeadlessHost {
    fn capture_pointer(&mut self, pointer: PointerId) {
        self.captured.insert(pointer);
    }

    fn release_pointer(&mut self, pointer: PointerId) {
        self.captured.remove(&pointer);
    }

    fn attach_pointer_listeners(&mut self, pointer: PointerId) {
        self.listening.insert(pointer);
    }

    fn detach_pointer_listeners(&mut self, pointer: PointerId) {
        self.listening.remove(&pointer);
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn set_surface_cursor(&mut self, cursor: CursorStyle) {
        self.surface_cursor = cursor;
    }

    fn set_text_selection(&mut self, enabled: bool) {
        self.text_selection_enabled = enabled;
    }

    fn request_animation_frame(&mut self) -> FrameRequestId {
        self.next_frame += 1;
        let id = FrameRequestId(self.next_frame);
        self.pending_frames.push_back(id);
        id
    }

    fn cancel_animation_frame(&mut self, id: FrameRequestId) {
        self.pending_frames.retain(|pending| *pending != id);
    }

    fn surface_rect(&self) -> Option<ScreenRect> {
        self.surface
    }
}
