//! Fixed-delay frame pacing.
//!
//! `tick` marks the start of a frame; `wait_remainder` sleeps for whatever is
//! left of the interval. A slow frame simply sleeps zero: lost time is never
//! made up by shortening later frames.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    tick_start: Instant,
}

impl FrameClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms as u64),
            tick_start: Instant::now(),
        }
    }

    /// Start a new frame with the given target interval.
    pub fn tick(&mut self, interval_ms: u32) {
        self.interval = Duration::from_millis(interval_ms as u64);
        self.tick_start = Instant::now();
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the current frame's interval is used up.
    pub fn remaining(&self) -> Duration {
        remaining_after(self.interval, self.tick_start.elapsed())
    }

    /// Sleep out the rest of the frame. Returns how long was requested.
    pub fn wait_remainder(&self) -> Duration {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        remaining
    }
}

/// Whole milliseconds since `start`.
pub fn elapsed_since(start: Instant) -> u64 {
    start.elapsed().as_millis().min(u64::MAX as u128) as u64
}

/// `max(0, interval - elapsed)`.
pub fn remaining_after(interval: Duration, elapsed: Duration) -> Duration {
    interval
        .checked_sub(elapsed)
        .unwrap_or_else(|| Duration::from_secs(0))
}
