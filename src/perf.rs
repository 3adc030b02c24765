//! Timing and coalescing counters for the gesture hot paths.
//!
//! Pointer moves arrive far faster than frames, so two things are worth
//! watching: how long a handler takes and how many proposals each published
//! frame swallowed. Fine-grained timing sits behind the `profiling` feature:
//!
//! ```ignore
//! fn pointer_move(&mut self, event: &PointerEvent) {
//!     profile_scope!("pointer_move");
//! }
//! ```

use crate::constants::SLOW_OPERATION_MS;
use std::time::{Duration, Instant};
use tracing::warn;

/// Threshold used by `profile_scope!` when none is given.
pub const PROFILING_THRESHOLD_MS: f64 = 1.0;

/// Time the rest of the enclosing block. Expands to nothing unless the
/// `profiling` feature is on.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        $crate::profile_scope!($name, $crate::perf::PROFILING_THRESHOLD_MS)
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

fn as_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

fn report_if_slow(operation: &str, elapsed_ms: f64, threshold_ms: f64) {
    if elapsed_ms > threshold_ms {
        warn!(operation, elapsed_ms, threshold_ms, "Slow canvas operation");
    }
}

/// Reports on drop when the guarded block ran past its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer at [`SLOW_OPERATION_MS`].
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, SLOW_OPERATION_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_ms(self.start.elapsed())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        report_if_slow(self.name, self.elapsed_ms(), self.threshold_ms);
    }
}

/// Run `f`, warning if it took longer than `threshold_ms`.
#[inline]
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> T {
    let start = Instant::now();
    let result = f();
    report_if_slow(name, as_ms(start.elapsed()), threshold_ms);
    result
}

/// Proposals received and frames flushed over one gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoalescingStats {
    pub proposals: u64,
    pub flushes: u64,
}

impl CoalescingStats {
    pub fn record_proposal(&mut self) {
        self.proposals += 1;
    }

    pub fn record_flush(&mut self) {
        self.flushes += 1;
    }

    /// 0 when nothing was flushed
    pub fn proposals_per_flush(&self) -> f64 {
        match self.flushes {
            0 => 0.0,
            n => self.proposals as f64 / n as f64,
        }
    }
}
