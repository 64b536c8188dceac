//! Relaxed-pause calibration stopwatch.
//!
//! A free-running elapsed counter with start / stop / reset / save. The
//! measurement protocol: exhale normally, start, wait for the first
//! distinct urge to breathe, stop. `save` rounds to whole seconds; that
//! number becomes the profile baseline.

use std::time::Instant;

use crate::clock::{Clock, SystemClock};

/// Stopwatch lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Idle,
    Running,
    Stopped,
}

/// Counts up from zero against an injected clock.
#[derive(Debug, Clone)]
pub struct CalibrationStopwatch<C: Clock = SystemClock> {
    clock: C,
    state: StopwatchState,
    started_at: Option<Instant>,
    frozen_secs: f64,
}

impl CalibrationStopwatch<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CalibrationStopwatch<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CalibrationStopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: StopwatchState::Idle,
            started_at: None,
            frozen_secs: 0.0,
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == StopwatchState::Running
    }

    /// Elapsed seconds: live while running, frozen once stopped, zero when
    /// idle.
    pub fn elapsed_secs(&self) -> f64 {
        match (self.state, self.started_at) {
            (StopwatchState::Running, Some(started)) => self
                .clock
                .now()
                .saturating_duration_since(started)
                .as_secs_f64(),
            (StopwatchState::Stopped, _) => self.frozen_secs,
            _ => 0.0,
        }
    }

    /// Display form of the current reading: tenths under a minute
    /// (`"12.4s"`), minute form above (`"1m 05s"`).
    pub fn display_time(&self) -> String {
        let elapsed = self.elapsed_secs();
        if elapsed < 60.0 {
            format!("{elapsed:.1}s")
        } else {
            crate::dates::format_seconds(elapsed)
        }
    }

    /// Zero the counter and start it. No-op while already running.
    pub fn start(&mut self) {
        if self.state == StopwatchState::Running {
            return;
        }
        self.state = StopwatchState::Running;
        self.frozen_secs = 0.0;
        self.started_at = Some(self.clock.now());
    }

    /// Freeze the counter at the current reading. No-op unless running.
    pub fn stop(&mut self) {
        if self.state != StopwatchState::Running {
            return;
        }
        self.frozen_secs = self.elapsed_secs();
        self.state = StopwatchState::Stopped;
        self.started_at = None;
    }

    /// Discard everything and return to idle.
    pub fn reset(&mut self) {
        self.state = StopwatchState::Idle;
        self.started_at = None;
        self.frozen_secs = 0.0;
    }

    /// Round the reading to whole seconds and reset. Returns `None` when
    /// the rounded value is zero (under half a second measured), in which
    /// case the stopwatch is left untouched.
    pub fn save(&mut self) -> Option<u32> {
        let seconds = self.elapsed_secs().round() as u32;
        if seconds == 0 {
            return None;
        }
        self.reset();
        Some(seconds)
    }
}
