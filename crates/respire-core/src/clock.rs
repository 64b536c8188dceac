//! Injected monotonic time source.
//!
//! The engine and the stopwatch never call `Instant::now()` directly; they
//! read whatever [`Clock`] they were built with. Production code uses
//! [`SystemClock`], tests drive a [`ManualClock`] forward by hand so that
//! "wait 56 seconds" costs nothing.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A source of monotonic instants.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced clock for deterministic tests.
///
/// Clones share one offset, so a test can keep a handle while the engine
/// owns another and both observe the same advances.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move the clock forward by `delta`. The clock never moves backwards.
    pub fn advance(&self, delta: Duration) {
        self.offset.set(self.offset.get() + delta);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        let before = clock.now();
        clock.advance_secs(5);
        assert_eq!(clock.now() - before, Duration::from_secs(5));
    }

    #[test]
    fn clones_share_the_offset() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance_millis(250);
        assert_eq!(clock.now() - handle.now(), Duration::ZERO);
        assert_eq!(clock.now() - clock.origin, Duration::from_millis(250));
    }
}
