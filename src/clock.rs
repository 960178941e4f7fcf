//! Time source for cooldowns and bounded polling
//!
//! Every timer in the crate reads a [`Clock`] instead of calling
//! `Instant::now()` directly, so a test clock can drive simulated time.

use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since the clock's epoch
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
