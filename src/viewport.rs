//! Viewport controller - pan and zoom for the whole canvas.
//!
//! Owns the single [`Viewport`] value. Item controllers only read the scale
//! per event; nothing else writes it.
//!
//! ## Inputs
//!
//! - Ctrl/Cmd + wheel zooms around the cursor
//! - Middle button, Space + primary, or primary on the background pans
//! - Two touch contacts pinch-zoom around their midpoint
//! - Browser zoom and page shortcuts are suppressed while the canvas is active

use crate::clamp::sanitize_scale;
use crate::constants::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, WHEEL_LINE_HEIGHT, WHEEL_ZOOM_SENSITIVITY};
use crate::gesture::{PanSession, PinchSession};
use crate::host::{CursorStyle, GestureHost};
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::input::keyboard::{is_space_key, is_zoom_or_browser_shortcut};
use crate::input::{EventDisposition, KeyEvent, MouseButton, PointerEvent, PointerId, WheelEvent};
use crate::layouts::layout_bounds;
use crate::types::{Point, Rectangle, ScreenRect};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// The viewport transform: `screen = world * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: Point::ORIGIN,
        }
    }
}

impl Viewport {
    /// Surface-relative position to world position
    pub fn screen_to_world(&self, local: Point) -> Point {
        CoordinateConverter::screen_to_world(local, &CoordinateContext::new(&self.offset, self.scale))
    }

    /// World position to surface-relative position
    pub fn world_to_screen(&self, world: Point) -> Point {
        CoordinateConverter::world_to_screen(world, &CoordinateContext::new(&self.offset, self.scale))
    }
}

/// Zoom bounds and wheel tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// `factor = exp(-delta_y * wheel_zoom_sensitivity)`
    pub wheel_zoom_sensitivity: f64,
    /// Pixels per line for line-based wheel deltas
    pub wheel_line_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            wheel_line_height: WHEEL_LINE_HEIGHT,
        }
    }
}

impl ViewportConfig {
    /// Usable `(min, max)` zoom bounds. Non-finite or non-positive bounds
    /// fall back to the defaults and reversed bounds are swapped.
    pub fn scale_bounds(&self) -> (f64, f64) {
        let usable = |scale: f64| scale.is_finite() && scale > 0.0;
        let (lo, hi) = match (usable(self.min_scale), usable(self.max_scale)) {
            (true, true) => (self.min_scale, self.max_scale),
            (true, false) => (self.min_scale, self.min_scale.max(MAX_SCALE)),
            (false, true) => (self.max_scale.min(MIN_SCALE), self.max_scale),
            (false, false) => (MIN_SCALE, MAX_SCALE),
        };
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }
}

/// What a pointer-down landed on, as far as the viewport cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// Empty canvas
    Background,
    /// An item body or one of its handles
    Item,
    /// Input, textarea, select or content-editable element
    Editable,
}

#[derive(Debug)]
pub struct ViewportController {
    viewport: Viewport,
    config: ViewportConfig,
    space_held: bool,
    pan: Option<PanSession>,
    /// Active touch contacts in client pixels, in the order they went down
    touches: Vec<(PointerId, Point)>,
    pinch: Option<PinchSession>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            viewport: Viewport::default(),
            config,
            space_held: false,
            pan: None,
            touches: Vec::new(),
            pinch: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale
    }

    pub fn offset(&self) -> Point {
        self.viewport.offset
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Replace the zoom bounds; the current scale is clamped into them.
    pub fn set_config(&mut self, config: ViewportConfig) {
        self.config = config;
        self.viewport.scale = self.clamp_scale(self.viewport.scale);
    }

    /// Set the scale directly. Clamped to the configured bounds.
    pub fn set_scale(&mut self, scale: f64) {
        self.viewport.scale = self.clamp_scale(scale);
    }

    /// Set the offset directly. Non-finite offsets are ignored.
    pub fn set_offset(&mut self, offset: Point) {
        if offset.is_finite() {
            self.viewport.offset = offset;
        }
    }

    /// Clamp into `[min_scale, max_scale]`; degenerate input becomes `1.0` first.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        let (min, max) = self.config.scale_bounds();
        sanitize_scale(scale).clamp(min, max)
    }

    pub fn is_space_held(&self) -> bool {
        self.space_held
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn active_touch_count(&self) -> usize {
        self.touches.len()
    }

    // ========================================================================
    // Wheel Zoom
    // ========================================================================

    /// Zoom around the cursor. Only Ctrl/Cmd + wheel zooms; plain wheel
    /// events are left for the host to scroll with.
    pub fn zoom_at_cursor(&mut self, wheel: &WheelEvent, surface: Option<ScreenRect>) -> EventDisposition {
        if !wheel.modifiers.zoom_modifier() {
            return EventDisposition::Ignored;
        }
        let Some(surface) = surface else {
            return EventDisposition::Ignored;
        };

        let delta_y = wheel.delta.pixel_y(self.config.wheel_line_height);
        if !delta_y.is_finite() {
            return EventDisposition::Handled;
        }
        let factor = (-delta_y * self.config.wheel_zoom_sensitivity).exp();
        self.zoom_around(surface.to_local(wheel.position), self.viewport.scale * factor);

        trace!(scale = self.viewport.scale, "Wheel zoom");
        EventDisposition::Handled
    }

    /// Set a new (clamped) scale keeping the world point under `local` fixed.
    pub fn zoom_around(&mut self, local: Point, scale: f64) {
        let world = self.viewport.screen_to_world(local);
        let next_scale = self.clamp_scale(scale);
        self.viewport.scale = next_scale;
        self.viewport.offset = CoordinateConverter::anchor_offset(local, world, next_scale);
    }

    // ========================================================================
    // Pointer Input
    // ========================================================================

    /// Capture-phase pointer-down. `Handled` means the viewport took the
    /// pointer and items must not see it.
    pub fn pointer_down<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        target: TargetKind,
        surface: Option<ScreenRect>,
        host: &mut H,
    ) -> EventDisposition {
        if event.is_touch() {
            return self.touch_down(event, surface, host);
        }

        if !matches!(event.button, MouseButton::Primary | MouseButton::Middle) {
            return EventDisposition::Ignored;
        }
        if target == TargetKind::Editable || self.pan.is_some() {
            return EventDisposition::Ignored;
        }

        let wants_pan = event.button == MouseButton::Middle
            || (event.button == MouseButton::Primary && (self.space_held || target == TargetKind::Background));
        if !wants_pan || surface.is_none() {
            return EventDisposition::Ignored;
        }

        self.pan = Some(PanSession {
            pointer_id: event.pointer_id,
            start_screen_pos: event.position,
            start_offset: self.viewport.offset,
        });
        host.capture_pointer(event.pointer_id);
        host.attach_pointer_listeners(event.pointer_id);
        host.set_surface_cursor(CursorStyle::Grabbing);

        debug!(pointer = event.pointer_id.0, button = ?event.button, "Pan started");
        EventDisposition::Handled
    }

    fn touch_down<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        surface: Option<ScreenRect>,
        host: &mut H,
    ) -> EventDisposition {
        if let Some(entry) = self.touches.iter_mut().find(|(id, _)| *id == event.pointer_id) {
            entry.1 = event.position;
        } else {
            self.touches.push((event.pointer_id, event.position));
        }

        // A pinch that could not start for lack of a surface starts on the
        // next touch-down instead
        if self.touches.len() < 2 || self.pinch.is_some() {
            return EventDisposition::Ignored;
        }
        let Some(surface) = surface else {
            return EventDisposition::Ignored;
        };

        // A second finger turns whatever the first one was doing into a pinch
        if self.pan.is_some() {
            self.end_pan(host);
            debug!("Pan cancelled by pinch");
        }
        let (first, second) = (self.touches[0].1, self.touches[1].1);
        self.pinch = Some(PinchSession::begin(
            surface.to_local(first),
            surface.to_local(second),
            self.viewport.offset,
            self.viewport.scale,
        ));

        debug!(scale = self.viewport.scale, "Pinch started");
        EventDisposition::Handled
    }

    /// Document-level pointer move.
    pub fn pointer_move(&mut self, event: &PointerEvent, surface: Option<ScreenRect>) -> EventDisposition {
        if event.is_touch() {
            let Some(entry) = self.touches.iter_mut().find(|(id, _)| *id == event.pointer_id) else {
                return EventDisposition::Ignored;
            };
            entry.1 = event.position;
            return self.update_pinch(surface);
        }

        let Some(pan) = self.pan.filter(|pan| pan.pointer_id == event.pointer_id) else {
            return EventDisposition::Ignored;
        };
        let next = pan.offset_at(event.position);
        if next.is_finite() {
            self.viewport.offset = next;
        }
        EventDisposition::Handled
    }

    fn update_pinch(&mut self, surface: Option<ScreenRect>) -> EventDisposition {
        let (Some(pinch), Some(surface)) = (self.pinch, surface) else {
            return EventDisposition::Ignored;
        };
        if self.touches.len() < 2 {
            return EventDisposition::Ignored;
        }

        let first = surface.to_local(self.touches[0].1);
        let second = surface.to_local(self.touches[1].1);
        let scale = self.clamp_scale(pinch.scale_for(first.distance(second)));
        let offset = CoordinateConverter::anchor_offset(first.midpoint(second), pinch.world_anchor, scale);

        if offset.is_finite() {
            self.viewport.scale = scale;
            self.viewport.offset = offset;
        }
        trace!(scale, "Pinch update");
        EventDisposition::Handled
    }

    pub fn pointer_up<H: GestureHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> EventDisposition {
        self.pointer_end(event, host, "up")
    }

    pub fn pointer_cancel<H: GestureHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> EventDisposition {
        self.pointer_end(event, host, "cancel")
    }

    fn pointer_end<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        host: &mut H,
        reason: &'static str,
    ) -> EventDisposition {
        if event.is_touch() {
            let before = self.touches.len();
            self.touches.retain(|(id, _)| *id != event.pointer_id);
            if self.touches.len() == before {
                return EventDisposition::Ignored;
            }
            // A lone remaining finger does not resume panning
            if self.touches.len() < 2 && self.pinch.take().is_some() {
                debug!(reason, scale = self.viewport.scale, "Pinch ended");
                return EventDisposition::Handled;
            }
            return EventDisposition::Ignored;
        }

        if !self.pan.is_some_and(|pan| pan.pointer_id == event.pointer_id) {
            return EventDisposition::Ignored;
        }
        self.end_pan(host);
        debug!(pointer = event.pointer_id.0, reason, offset = ?self.viewport.offset, "Pan ended");
        EventDisposition::Handled
    }

    fn end_pan<H: GestureHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(pan) = self.pan.take() {
            host.release_pointer(pan.pointer_id);
            host.detach_pointer_listeners(pan.pointer_id);
        }
        host.set_surface_cursor(self.idle_cursor());
    }

    fn idle_cursor(&self) -> CursorStyle {
        if self.space_held { CursorStyle::Grab } else { CursorStyle::Default }
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    pub fn key_down<H: GestureHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> EventDisposition {
        if is_zoom_or_browser_shortcut(event) {
            trace!(key = %event.key, "Suppressed browser shortcut");
            return EventDisposition::Handled;
        }
        if !is_space_key(event) || event.in_editable {
            return EventDisposition::Ignored;
        }

        if !self.space_held {
            self.space_held = true;
            if self.pan.is_none() {
                host.set_surface_cursor(CursorStyle::Grab);
            }
        }
        EventDisposition::Handled
    }

    pub fn key_up<H: GestureHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> EventDisposition {
        if !is_space_key(event) || !self.space_held {
            return EventDisposition::Ignored;
        }
        self.space_held = false;
        if self.pan.is_none() {
            host.set_surface_cursor(CursorStyle::Default);
        }
        EventDisposition::Handled
    }

    // ========================================================================
    // Recenter & Teardown
    // ========================================================================

    /// Center the bounding box of all finite layouts on the surface at the
    /// current scale. With nothing to show the offset returns to the origin.
    /// Without a measured surface nothing changes.
    pub fn recenter<'a>(&mut self, layouts: impl IntoIterator<Item = &'a Rectangle>, surface: Option<ScreenRect>) {
        let Some(surface) = surface else {
            warn!("Recenter skipped, surface not measured");
            return;
        };

        let offset = match layout_bounds(layouts) {
            None => Point::ORIGIN,
            Some(bounds) => CoordinateConverter::anchor_offset(surface.center(), bounds.center(), self.viewport.scale),
        };
        if offset.is_finite() {
            self.viewport.offset = offset;
        }
        debug!(offset = ?self.viewport.offset, "Viewport recentered");
    }

    /// The canvas view is going away: drop every session and override.
    pub fn deactivate<H: GestureHost + ?Sized>(&mut self, host: &mut H) {
        self.space_held = false;
        self.end_pan(host);
        self.touches.clear();
        self.pinch = None;
        host.set_surface_cursor(CursorStyle::Default);
    }
}
