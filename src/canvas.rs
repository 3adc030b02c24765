//! The collection canvas: one viewport plus a rectangle controller per item.
//!
//! Raw input enters here. Pointer-downs go to the viewport first (capture
//! phase) and only reach an item when the viewport passes. Moves, ups and
//! cancels are offered to the viewport and every item; each filters by its
//! own pointer id, so concurrent gestures on different items never interact.
//!
//! Commits are applied to the layout map and spatial index, then reported
//! through the `on_layout_change` listener.

use crate::constants::SLOW_OPERATION_MS;
use crate::frame::FrameRequestId;
use crate::gesture::ResizeDirection;
use crate::host::GestureHost;
use crate::input::{EventDisposition, KeyEvent, PointerEvent, WheelEvent};
use crate::layouts::{self, LayoutMap};
use crate::perf::{ScopedTimer, measure_and_log};
use crate::rectangle::RectangleController;
use crate::settings::CanvasSettings;
use crate::spatial_index::SpatialIndex;
use crate::types::{ItemKey, Point, Rectangle, ScreenRect};
use crate::viewport::{TargetKind, Viewport, ViewportController};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Callback receiving every committed layout.
pub type LayoutListener = Box<dyn FnMut(&ItemKey, Rectangle)>;

/// What a pointer-down landed on, as resolved by the host's hit testing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas
    Background,
    /// An item's body (drag)
    ItemBody(ItemKey),
    /// One of an item's resize handles
    ResizeHandle(ItemKey, ResizeDirection),
    /// A form control or content-editable element
    Editable,
    /// Anything else inside the canvas (buttons, item chrome)
    Other,
}

impl PointerTarget {
    fn kind(&self) -> TargetKind {
        match self {
            PointerTarget::Background => TargetKind::Background,
            PointerTarget::Editable => TargetKind::Editable,
            PointerTarget::ItemBody(_) | PointerTarget::ResizeHandle(..) | PointerTarget::Other => TargetKind::Item,
        }
    }
}

pub struct CollectionCanvas {
    settings: CanvasSettings,
    viewport: ViewportController,
    layouts: LayoutMap,
    items: HashMap<ItemKey, RectangleController>,
    index: SpatialIndex,
    on_layout_change: Option<LayoutListener>,
}

impl fmt::Debug for CollectionCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionCanvas")
            .field("viewport", &self.viewport.viewport())
            .field("items", &self.layouts.len())
            .field("has_listener", &self.on_layout_change.is_some())
            .finish()
    }
}

impl Default for CollectionCanvas {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

fn usable_settings(settings: CanvasSettings) -> CanvasSettings {
    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            warn!(error = %e, "Rejected canvas settings, using defaults");
            CanvasSettings::default()
        }
    }
}

impl CollectionCanvas {
    /// Invalid settings are replaced by the defaults.
    pub fn new(settings: CanvasSettings) -> Self {
        let settings = usable_settings(settings);
        Self {
            viewport: ViewportController::new(settings.viewport_config()),
            settings,
            layouts: LayoutMap::new(),
            items: HashMap::new(),
            index: SpatialIndex::new(),
            on_layout_change: None,
        }
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// Apply new settings to the viewport and every item.
    pub fn set_settings(&mut self, settings: CanvasSettings) {
        let settings = usable_settings(settings);
        self.viewport.set_config(settings.viewport_config());
        let config = settings.rectangle_config();
        for controller in self.items.values_mut() {
            controller.set_config(config);
        }
        self.settings = settings;
    }

    pub fn set_on_layout_change(&mut self, listener: impl FnMut(&ItemKey, Rectangle) + 'static) {
        self.on_layout_change = Some(Box::new(listener));
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    pub fn viewport_controller(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn viewport_offset(&self) -> Point {
        self.viewport.offset()
    }

    pub fn set_viewport_scale(&mut self, scale: f64) {
        self.viewport.set_scale(scale);
    }

    pub fn set_viewport_offset(&mut self, offset: Point) {
        self.viewport.set_offset(offset);
    }

    pub fn recenter_viewport<H: GestureHost + ?Sized>(&mut self, host: &H) {
        self.viewport.recenter(self.layouts.values(), host.surface_rect());
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Add an item, or replace the committed layout of an existing one.
    /// Empty keys are rejected.
    pub fn insert_item(&mut self, key: ItemKey, layout: Rectangle) -> bool {
        if key.is_empty() {
            return false;
        }
        if self.items.contains_key(&key) {
            self.set_layout(&key, layout);
            return true;
        }

        self.index.insert(&key, &layout);
        self.items
            .insert(key.clone(), RectangleController::new(layout, self.settings.rectangle_config()));
        self.layouts.insert(key, layout);
        true
    }

    /// Remove an item. An active gesture on it is torn down without a commit.
    pub fn remove_item<H: GestureHost + ?Sized>(&mut self, key: &ItemKey, host: &mut H) -> Option<Rectangle> {
        if let Some(mut controller) = self.items.remove(key) {
            controller.unmount(host);
        }
        self.index.remove(key);
        self.layouts.remove(key)
    }

    /// Accept a committed layout from the store.
    pub fn set_layout(&mut self, key: &ItemKey, layout: Rectangle) {
        let Some(controller) = self.items.get_mut(key) else {
            return;
        };
        controller.set_layout(layout);
        self.index.update(key, &layout);
        self.layouts.insert(key.clone(), layout);
    }

    pub fn layouts(&self) -> &LayoutMap {
        &self.layouts
    }

    /// Live layout during a gesture, otherwise the committed one.
    pub fn current_layout(&self, key: &ItemKey) -> Option<Rectangle> {
        self.items.get(key).map(RectangleController::current_layout)
    }

    pub fn item(&self, key: &ItemKey) -> Option<&RectangleController> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bring the canvas in line with `keys`: drop items not listed, place
    /// listed items that have no layout yet on the default grid. Returns the
    /// keys that received a default layout.
    pub fn reconcile_items<H: GestureHost + ?Sized>(&mut self, keys: &[ItemKey], host: &mut H) -> Vec<ItemKey> {
        let canvas = host.surface_rect().map(|surface| surface.size());
        let limits = self.settings.size_limits();
        let gap = self.settings.grid_gap;

        let mut next = self.layouts.clone();
        measure_and_log("reconcile_items", SLOW_OPERATION_MS, || {
            layouts::reconcile(&mut next, keys, canvas, gap, &limits);
        });

        let stale: Vec<ItemKey> = self.layouts.keys().filter(|k| !next.contains_key(*k)).cloned().collect();
        for key in &stale {
            self.remove_item(key, host);
        }

        let mut placed = Vec::new();
        for (key, layout) in next {
            if self.items.contains_key(&key) {
                if self.layouts.get(&key) != Some(&layout) {
                    self.set_layout(&key, layout);
                }
            } else {
                self.insert_item(key.clone(), layout);
                placed.push(key);
            }
        }
        placed
    }

    /// Topmost item under a client-space point, by committed layout.
    pub fn hit_test(&self, client: Point, surface: Option<ScreenRect>) -> Option<ItemKey> {
        let _timer = ScopedTimer::with_default_threshold("hit_test");
        let surface = surface?;
        let world = self.viewport.viewport().screen_to_world(surface.to_local(client));
        self.index.topmost_at(world)
    }

    // ========================================================================
    // Pointer Input
    // ========================================================================

    pub fn pointer_down<H: GestureHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        target: &PointerTarget,
        host: &mut H,
    ) -> EventDisposition {
        let surface = host.surface_rect();
        if self.viewport.pointer_down(event, target.kind(), surface, host).is_handled() {
            return EventDisposition::Handled;
        }

        let scale = self.viewport.scale();
        let started = match target {
            PointerTarget::ItemBody(key) => self
                .items
                .get_mut(key)
                .is_some_and(|controller| controller.begin_drag(event, scale, host)),
            PointerTarget::ResizeHandle(key, direction) => self
                .items
                .get_mut(key)
                .is_some_and(|controller| controller.begin_resize(event, *direction, scale, host)),
            _ => false,
        };

        if started { EventDisposition::Handled } else { EventDisposition::Ignored }
    }

    pub fn pointer_move<H: GestureHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> EventDisposition {
        let mut handled = self.viewport.pointer_move(event, host.surface_rect()).is_handled();
        for controller in self.items.values_mut() {
            handled |= controller.pointer_move(event, host);
        }
        if handled { EventDisposition::Handled } else { EventDisposition::Ignored }
    }

    pub fn pointer_up<H: GestureHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> EventDisposition {
        let mut handled = self.viewport.pointer_up(event, host).is_handled();
        let scale = self.viewport.scale();
        let commits: Vec<(ItemKey, Rectangle)> = self
            .items
            .iter_mut()
            .filter_map(|(key, controller)| controller.pointer_up(event, scale, host).map(|r| (key.clone(), r)))
            .collect();
        handled |= !commits.is_empty();
        self.apply_commits(commits);
        if handled { EventDisposition::Handled } else { EventDisposition::Ignored }
    }

    pub fn pointer_cancel<H: GestureHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> EventDisposition {
        let mut handled = self.viewport.pointer_cancel(event, host).is_handled();
        let scale = self.viewport.scale();
        let commits: Vec<(ItemKey, Rectangle)> = self
            .items
            .iter_mut()
            .filter_map(|(key, controller)| controller.pointer_cancel(event, scale, host).map(|r| (key.clone(), r)))
            .collect();
        handled |= !commits.is_empty();
        self.apply_commits(commits);
        if handled { EventDisposition::Handled } else { EventDisposition::Ignored }
    }

    /// Animation-frame callback. Returns `true` when any live layout changed.
    pub fn on_animation_frame(&mut self, id: FrameRequestId) -> bool {
        let mut changed = false;
        for controller in self.items.values_mut() {
            changed |= controller.on_animation_frame(id);
        }
        changed
    }

    fn apply_commits(&mut self, commits: Vec<(ItemKey, Rectangle)>) {
        for (key, layout) in commits {
            debug!(item = %key, ?layout, "Layout committed");
            self.set_layout(&key, layout);
            if let Some(listener) = self.on_layout_change.as_mut() {
                listener(&key, layout);
            }
        }
    }

    // ========================================================================
    // Wheel & Keyboard
    // ========================================================================

    pub fn wheel<H: GestureHost + ?Sized>(&mut self, event: &WheelEvent, host: &H) -> EventDisposition {
        self.viewport.zoom_at_cursor(event, host.surface_rect())
    }

    pub fn key_down<H: GestureHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> EventDisposition {
        self.viewport.key_down(event, host)
    }

    pub fn key_up<H: GestureHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> EventDisposition {
        self.viewport.key_up(event, host)
    }

    /// The canvas view is going away: end every gesture without committing.
    pub fn deactivate<H: GestureHost + ?Sized>(&mut self, host: &mut H) {
        self.viewport.deactivate(host);
        for controller in self.items.values_mut() {
            controller.unmount(host);
        }
        debug!(items = self.items.len(), "Canvas deactivated");
    }
}
