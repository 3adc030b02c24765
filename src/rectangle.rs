//! Per-item drag and resize controller.
//!
//! Turns raw pointer input into a committed [`Rectangle`] for one item, with
//! a live (uncommitted) rectangle for visual feedback while the gesture runs.
//!
//! ## Performance Notes
//!
//! Pointer moves arrive far more often than frames are painted. Moves only
//! overwrite the pending proposal; the live rectangle is published at most
//! once per animation frame.
//!
//! ## Resource discipline
//!
//! A gesture acquires pointer capture, pointer-scoped document listeners and
//! the cursor/text-selection overrides. Every exit path (up, cancel, unmount)
//! goes through `end_session`, which releases all of them.

use crate::clamp::{SizeLimits, clamp_with, sanitize_scale};
use crate::frame::{FrameCoalescer, FrameRequestId};
use crate::gesture::{GestureKind, GestureSession, ResizeDirection};
use crate::host::{CursorStyle, GestureHost};
use crate::input::{GestureState, MouseButton, PointerEvent};
use crate::profile_scope;
use crate::types::{Rectangle, ScreenRect};
use tracing::{debug, trace, warn};

/// Per-item configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleConfig {
    /// Keep the item inside the canvas surface
    pub constrain_to_container: bool,
    pub limits: SizeLimits,
}

impl Default for RectangleConfig {
    fn default() -> Self {
        Self {
            constrain_to_container: true,
            limits: SizeLimits::default(),
        }
    }
}

/// Drag/resize controller for a single item.
#[derive(Debug)]
pub struct RectangleController {
    /// Authoritative value owned by the layout store
    layout: Rectangle,
    config: RectangleConfig,
    state: GestureState,
    /// Value published by the last animation frame of the current gesture
    live: Option<Rectangle>,
    pending: FrameCoalescer<Rectangle>,
}

impl RectangleController {
    pub fn new(layout: Rectangle, config: RectangleConfig) -> Self {
        Self {
            layout,
            config,
            state: GestureState::Idle,
            live: None,
            pending: FrameCoalescer::new(),
        }
    }

    /// What should be rendered: the live rectangle during a gesture,
    /// otherwise the committed layout.
    pub fn current_layout(&self) -> Rectangle {
        self.live.unwrap_or(self.layout)
    }

    pub fn committed_layout(&self) -> Rectangle {
        self.layout
    }

    pub fn live_layout(&self) -> Option<Rectangle> {
        self.live
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_resizing(&self) -> bool {
        self.state.is_resizing()
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn config(&self) -> &RectangleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RectangleConfig) {
        self.config = config;
    }

    /// Accept a new committed value from the layout store.
    ///
    /// While idle any stale live value is dropped. During a gesture the live
    /// value keeps winning until the gesture ends.
    pub fn set_layout(&mut self, layout: Rectangle) {
        self.layout = layout;
        if self.state.is_idle() {
            self.live = None;
        }
    }

    // ========================================================================
    // Gesture start
    // ========================================================================

    /// Start dragging the item. Mouse presses other than the primary button
    /// are ignored, as is any press while a gesture is already active.
    pub fn begin_drag<H: GestureHost + ?Sized>(&mut self, event: &PointerEvent, viewport_scale: f64, host: &mut H) -> bool {
        if event.is_mouse() && event.button != MouseButton::Primary {
            return false;
        }
        let cursor = if event.is_mouse() { CursorStyle::Move } else { CursorStyle::Default };
        self.begin(event, GestureKind::Drag, cursor, viewport_scale, host)
    }

    /// Start resizing the item from the handle at `direction`.
    pub fn begin_resize<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        direction: ResizeDirection,
        viewport_scale: f64,
        host: &mut H,
    ) -> bool {
        self.begin(event, GestureKind::Resize(direction), direction.cursor(), viewport_scale, host)
    }

    fn begin<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        kind: GestureKind,
        cursor: CursorStyle,
        viewport_scale: f64,
        host: &mut H,
    ) -> bool {
        if !self.state.is_idle() {
            trace!(pointer = event.pointer_id.0, "Gesture already active, ignoring press");
            return false;
        }

        let session = GestureSession::new(
            event.pointer_id,
            kind,
            event.position,
            self.layout,
            host.surface_rect(),
            viewport_scale,
        );
        if !self.state.start(session) {
            return false;
        }

        host.capture_pointer(event.pointer_id);
        host.attach_pointer_listeners(event.pointer_id);
        host.set_cursor(cursor);
        host.set_text_selection(false);

        self.pending.reset(host);
        self.live = Some(self.layout);

        debug!(
            pointer = event.pointer_id.0,
            kind = ?kind,
            scale = session.scale,
            "Item gesture started"
        );
        true
    }

    // ========================================================================
    // Gesture progress
    // ========================================================================

    /// Handle a document-level pointer move. Returns `true` when the move
    /// belonged to this item's gesture.
    pub fn pointer_move<H: GestureHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> bool {
        profile_scope!("rectangle_pointer_move");

        let Some(session) = self.state.session_for(event.pointer_id).copied() else {
            return false;
        };

        let proposed = session.propose(event.position);
        let clamped = self.clamp_against(proposed, session.container_snapshot, session.scale);
        trace!(?clamped, "Item gesture proposal");
        self.pending.schedule(clamped, host);
        true
    }

    /// Animation-frame callback. Returns `true` when the live value changed.
    pub fn on_animation_frame(&mut self, id: FrameRequestId) -> bool {
        match self.pending.on_frame(id) {
            Some(next) if self.state.session().is_some() => {
                let changed = self.live != Some(next);
                self.live = Some(next);
                changed
            }
            _ => false,
        }
    }

    // ========================================================================
    // Gesture end
    // ========================================================================

    /// Finish the gesture for the owning pointer and return the value to
    /// commit. The last proposal (or the untouched start) is clamped once
    /// more against the surface as measured now.
    pub fn pointer_up<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        viewport_scale: f64,
        host: &mut H,
    ) -> Option<Rectangle> {
        self.finish(event, viewport_scale, host, "up")
    }

    /// Cancellation keeps partial progress: it commits like `pointer_up`.
    pub fn pointer_cancel<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        viewport_scale: f64,
        host: &mut H,
    ) -> Option<Rectangle> {
        self.finish(event, viewport_scale, host, "cancel")
    }

    fn finish<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        viewport_scale: f64,
        host: &mut H,
        reason: &'static str,
    ) -> Option<Rectangle> {
        let session = *self.state.session_for(event.pointer_id)?;

        let last = self.pending.latest().unwrap_or(session.start_rect);
        let surface = host.surface_rect();
        if surface.is_none() && self.config.constrain_to_container {
            warn!(pointer = event.pointer_id.0, "Surface not measured at commit, skipping containment");
        }
        let committed = self.clamp_against(last, surface, viewport_scale);
        let stats = self.pending.stats();

        self.end_session(host);

        debug!(
            pointer = event.pointer_id.0,
            reason,
            ?committed,
            proposals = stats.proposals,
            frames = stats.flushes,
            "Item gesture committed"
        );
        Some(committed)
    }

    /// The item is going away: release everything without committing.
    pub fn unmount<H: GestureHost + ?Sized>(&mut self, host: &mut H) {
        if self.state.is_idle() {
            return;
        }
        debug!("Item unmounted mid-gesture, discarding live layout");
        self.end_session(host);
    }

    /// Single teardown path for every way a gesture can end.
    fn end_session<H: GestureHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.state.take() {
            host.release_pointer(session.pointer_id);
            host.detach_pointer_listeners(session.pointer_id);
        }
        self.pending.reset(host);
        host.set_cursor(CursorStyle::Default);
        host.set_text_selection(true);
        self.live = None;
    }

    fn clamp_against(&self, rect: Rectangle, container: Option<ScreenRect>, scale: f64) -> Rectangle {
        let container = container
            .filter(|_| self.config.constrain_to_container)
            .map(|surface| surface.size());
        clamp_with(rect, container, sanitize_scale(scale), &self.config.limits)
    }
}
