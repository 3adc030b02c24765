//! Platform-neutral input events.
//!
//! Hosts translate their native pointer, wheel and key events into these
//! before handing them to the controllers. Positions are client pixels.

use crate::types::Point;

/// Identifier of a pointer stream (mouse, pen or a single touch contact).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// Kind of device behind a pointer stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Button that changed state for a pointer-down/up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseButton {
    /// Left button, pen tip, or touch contact
    #[default]
    Primary,
    /// Wheel button
    Middle,
    /// Right button
    Secondary,
    /// Back/forward or anything else, by DOM-style button index
    Other(u16),
}

impl MouseButton {
    /// Map a DOM-style `button` index.
    pub fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Modifier keys held during an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    /// Command on macOS, Windows key elsewhere
    pub platform: bool,
}

impl Modifiers {
    /// Control or Command: the platform zoom modifier.
    #[inline]
    pub fn zoom_modifier(&self) -> bool {
        self.control || self.platform
    }
}

/// A pointer down/move/up/cancel event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub pointer_type: PointerType,
    pub button: MouseButton,
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(pointer_id: PointerId, pointer_type: PointerType, position: Point) -> Self {
        Self {
            pointer_id,
            pointer_type,
            button: MouseButton::Primary,
            position,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[inline]
    pub fn is_touch(&self) -> bool {
        self.pointer_type == PointerType::Touch
    }

    #[inline]
    pub fn is_mouse(&self) -> bool {
        self.pointer_type == PointerType::Mouse
    }
}

/// Wheel scroll amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollDelta {
    Pixels(Point),
    Lines(Point),
}

impl ScrollDelta {
    /// Vertical delta in pixels, converting line deltas with `line_height`.
    pub fn pixel_y(&self, line_height: f64) -> f64 {
        match self {
            ScrollDelta::Pixels(delta) => delta.y,
            ScrollDelta::Lines(delta) => delta.y * line_height,
        }
    }
}

/// A wheel event over the canvas surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    pub delta: ScrollDelta,
    pub modifiers: Modifiers,
}

/// A key down/up event.
///
/// `key` is the produced character or named key (`" "`, `"+"`, `"f"`),
/// `code` the physical key (`"Space"`, `"NumpadAdd"`).
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    pub key: String,
    pub code: String,
    pub modifiers: Modifiers,
    /// Focus is inside an input, textarea, select or content-editable element
    pub in_editable: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            modifiers: Modifiers::default(),
            in_editable: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn in_editable(mut self, in_editable: bool) -> Self {
        self.in_editable = in_editable;
        self
    }
}

/// What the host should do with an event after a controller saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventDisposition {
    /// Not ours; let it continue to other handlers and default actions
    Ignored,
    /// Consumed: prevent the default action and stop propagation
    Handled,
}

impl EventDisposition {
    #[inline]
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}
