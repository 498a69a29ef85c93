//! Frame timing.

use std::time::{Duration, Instant};

/// Measures real time between frames in whole milliseconds.
///
/// The sub-millisecond remainder is carried to the next frame so a
/// long-running loop does not drift behind the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
    carry: Duration,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            carry: Duration::ZERO,
        }
    }

    /// Milliseconds elapsed since the previous call (or `new`).
    ///
    /// A clock that went backwards counts as zero.
    pub fn elapsed_ms(&mut self, now: Instant) -> u32 {
        let total = now.saturating_duration_since(self.last) + self.carry;
        self.last = now;
        let ms = total.as_millis();
        self.carry = total - Duration::from_millis(ms as u64);
        u32::try_from(ms).unwrap_or(u32::MAX)
    }

    /// Drop time accumulated so far, e.g. after a restart.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
        self.carry = Duration::ZERO;
    }
}
