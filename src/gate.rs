//! Elapsed-time gate.
//!
//! A gate opens once at least `interval` has passed since the last accepted
//! tick. Checking it is O(1) and never waits, so callers may poll it at any
//! rate. Time going backwards keeps the gate closed.

use embassy_time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalGate {
    interval: Duration,
    last: Instant,
}

impl IntervalGate {
    /// Create a gate whose first opening is `interval` after `now`
    pub const fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    /// Check whether a tick at `now` is allowed
    pub fn is_open(&self, now: Instant) -> bool {
        now.checked_duration_since(self.last)
            .is_some_and(|elapsed| elapsed >= self.interval)
    }

    /// Record an accepted tick
    pub fn mark(&mut self, now: Instant) {
        self.last = now;
    }

    /// Check and, if open, record the tick in one call
    pub fn try_pass(&mut self, now: Instant) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.mark(now);
        true
    }

    /// Change the interval, restarting from `now`
    pub fn reset(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.last = now;
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub const fn last(&self) -> Instant {
        self.last
    }
}
