//! Animation-frame coalescing.
//!
//! Pointer moves can arrive far faster than the display refreshes. Each move
//! only overwrites a single pending slot; the first move after a flush asks
//! the host for one frame, and that frame publishes whatever value is latest.

use crate::host::GestureHost;
use crate::perf::CoalescingStats;

/// Handle returned by [`GestureHost::request_animation_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// One-pending-value-per-frame slot.
#[derive(Debug)]
pub struct FrameCoalescer<T: Copy> {
    latest: Option<T>,
    request: Option<FrameRequestId>,
    stats: CoalescingStats,
}

impl<T: Copy> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            latest: None,
            request: None,
            stats: CoalescingStats::default(),
        }
    }
}

impl<T: Copy> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` as the latest proposal and make sure a frame is pending.
    pub fn schedule<H: GestureHost + ?Sized>(&mut self, value: T, host: &mut H) {
        self.latest = Some(value);
        self.stats.record_proposal();
        if self.request.is_none() {
            self.request = Some(host.request_animation_frame());
        }
    }

    /// Frame callback. Returns the value to publish when `id` is our frame.
    pub fn on_frame(&mut self, id: FrameRequestId) -> Option<T> {
        if self.request != Some(id) {
            return None;
        }
        self.request = None;
        self.stats.record_flush();
        self.latest
    }

    /// Latest proposal, flushed or not
    pub fn latest(&self) -> Option<T> {
        self.latest
    }

    pub fn is_pending(&self) -> bool {
        self.request.is_some()
    }

    pub fn stats(&self) -> CoalescingStats {
        self.stats
    }

    /// Cancel any pending frame and forget the proposal.
    pub fn reset<H: GestureHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.request.take() {
            host.cancel_animation_frame(id);
        }
        self.latest = None;
        self.stats = CoalescingStats::default();
    }
}
