//! Collection canvas layout engine.
//!
//! A headless engine for a free-form board: a pan/zoom viewport over an
//! unbounded world, and drag/resize gestures for the rectangles placed in
//! it. Hosts feed platform-neutral input events in and implement
//! [`GestureHost`] for the few platform services a gesture needs.

pub mod canvas;
pub mod clamp;
pub mod constants;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod host;
pub mod input;
pub mod layouts;
pub mod logging;
pub mod perf;
pub mod rectangle;
pub mod settings;
pub mod spatial_index;
pub mod types;
pub mod viewport;

pub use canvas::{CollectionCanvas, PointerTarget};
pub use clamp::{SizeLimits, clamp, clamp_with};
pub use error::{CanvasError, CanvasResult};
pub use gesture::ResizeDirection;
pub use host::{CursorStyle, GestureHost, HeadlessHost};
pub use rectangle::{RectangleConfig, RectangleController};
pub use settings::CanvasSettings;
pub use types::{ItemKey, Point, Rectangle, ScreenRect, Size};
pub use viewport::{Viewport, ViewportConfig, ViewportController};
