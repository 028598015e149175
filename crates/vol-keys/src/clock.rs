//! `std` monotonic clock.

use core::time::Duration;
use std::time::Instant;

use crate::interface::Clock;

/// Time elapsed since the clock was created
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    boot: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.boot.elapsed()
    }
}
