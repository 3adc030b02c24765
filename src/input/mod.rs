//! Input model for the canvas.
//!
//! This module defines the platform-neutral events the controllers consume
//! and the small pieces of input logic shared between them.
//!
//! ## Architecture
//!
//! Item gestures use an explicit state machine (`GestureState`) to track
//! the current interaction mode per item. The viewport keeps its own pan and
//! pinch sessions; both read coordinates through `coords`.
//!
//! ## Modules
//!
//! - `event` - Pointer, wheel and key events plus the handled/ignored result
//! - `state` - Per-item gesture state machine
//! - `keyboard` - Space and shortcut classification
//! - `coords` - Screen/world coordinate conversion

pub mod coords;
pub mod event;
pub mod keyboard;
mod state;

pub use event::{
    EventDisposition, KeyEvent, Modifiers, MouseButton, PointerEvent, PointerId, PointerType, ScrollDelta,
    WheelEvent,
};
pub use state::GestureState;
