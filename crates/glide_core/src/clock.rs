//! Time sources for the scroll runtime.
//!
//! Timestamps are milliseconds as `f64`, measured from an arbitrary origin.
//! The [`VirtualClock`] is a controllable source for deterministic tests
//! and headless simulation: clones share the same time, so a test can keep
//! one handle while the runtime owns another.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

/// Duration of one animation frame at 60fps, in milliseconds
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// A monotonic millisecond clock
pub trait Clock: Send + Sync {
    /// Current time in milliseconds
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A virtual clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Arc<Mutex<f64>>,
}

impl VirtualClock {
    /// Create a clock positioned at 0ms
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock positioned at `ms`
    pub fn starting_at(ms: f64) -> Self {
        Self {
            now: Arc::new(Mutex::new(ms)),
        }
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, ms: f64) {
        let mut now = self.now.lock();
        if ms > *now {
            *now = ms;
        }
    }

    /// Advance by a relative amount. Negative amounts are ignored.
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            *self.now.lock() += ms;
        }
    }

    /// Step forward by one frame (at 60fps)
    pub fn step_frame(&self) {
        self.advance(FRAME_INTERVAL_MS);
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> f64 {
        *self.now.lock()
    }
}
