//! Session engine: wall-clock advancement through a plan.
//!
//! The engine owns no threads and sets no timers. The frontend calls
//! [`SessionEngine::tick`] on every scheduling pass (the TUI poll loop) and
//! reacts to the events it returns. Because phase boundaries are computed
//! from the clock rather than from tick counts, a slow or paused caller
//! loses nothing but display smoothness.
//!
//! ## State transitions
//!
//! ```text
//! Idle ──begin()──▶ Running ──last hold ends──▶ Finished
//!   ▲                  │                           │
//!   └────cancel()──────┘        begin() ◀──────────┘
//! ```

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::plan::{Phase, SessionPlan};
use crate::clock::{Clock, SystemClock};
use crate::events::Event;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Finished,
}

/// Drives one [`SessionPlan`] forward in real time.
#[derive(Debug, Clone)]
pub struct SessionEngine<C: Clock = SystemClock> {
    plan: SessionPlan,
    clock: C,
    state: SessionState,
    phase_index: usize,
    phase_started_at: Option<Instant>,
}

impl SessionEngine<SystemClock> {
    pub fn new(plan: SessionPlan) -> Self {
        Self::with_clock(plan, SystemClock)
    }
}

impl<C: Clock> SessionEngine<C> {
    pub fn with_clock(plan: SessionPlan, clock: C) -> Self {
        Self {
            plan,
            clock,
            state: SessionState::Idle,
            phase_index: 0,
            phase_started_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    /// The active phase, or `None` unless running.
    pub fn current_phase(&self) -> Option<&Phase> {
        match self.state {
            SessionState::Running => self.plan.phase(self.phase_index),
            _ => None,
        }
    }

    /// Round shown to the user: the active phase's round while running,
    /// the final round once finished, 0 when idle.
    pub fn round(&self) -> u8 {
        match self.state {
            SessionState::Running => self.current_phase().map(|p| p.round).unwrap_or(0),
            SessionState::Finished => self.plan.rounds(),
            SessionState::Idle => 0,
        }
    }

    /// Progress through the active phase, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let Some(phase) = self.current_phase() else {
            return 0.0;
        };
        let total = phase.duration_ms();
        if total == 0 {
            return 1.0;
        }
        (self.elapsed_ms() as f64 / total as f64).min(1.0)
    }

    /// Seconds left in the active phase, floored at zero.
    pub fn remaining_secs(&self) -> f64 {
        let Some(phase) = self.current_phase() else {
            return 0.0;
        };
        phase.duration_ms().saturating_sub(self.elapsed_ms()) as f64 / 1000.0
    }

    fn elapsed_ms(&self) -> u64 {
        match self.phase_started_at {
            Some(started) => self
                .clock
                .now()
                .saturating_duration_since(started)
                .as_millis() as u64,
            None => 0,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a run from the first phase. Restarting after a finished run
    /// re-arms completion along with the rest of the timing state. No-op
    /// while already running.
    pub fn begin(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Finished => {
                self.state = SessionState::Running;
                self.phase_index = 0;
                self.phase_started_at = Some(self.clock.now());
                Some(Event::SessionStarted {
                    baseline_secs: self.plan.baseline_secs(),
                    phase_count: self.plan.len(),
                    total_secs: self.plan.total_secs(),
                    at: Utc::now(),
                })
            }
            SessionState::Running => None,
        }
    }

    /// Stop a run before the end. Back to idle; the completion event never
    /// fires for a cancelled run. No-op unless running.
    pub fn cancel(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                let phase_index = self.phase_index;
                self.state = SessionState::Idle;
                self.phase_index = 0;
                self.phase_started_at = None;
                Some(Event::SessionCancelled {
                    phase_index,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Advance against the clock. Call on every scheduling pass; crosses at
    /// most one phase boundary per call, so no phase is ever skipped. The
    /// completion event is returned by the tick that moves past the final
    /// hold and by no other.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        let phase = self.plan.phase(self.phase_index)?;
        if self.elapsed_ms() < phase.duration_ms() {
            return None;
        }
        let next = self.phase_index + 1;
        match self.plan.phase(next) {
            Some(entered) => {
                // Entering a phase restarts its clock at now, so a late
                // tick stretches the previous phase rather than eating
                // into this one.
                self.phase_index = next;
                self.phase_started_at = Some(self.clock.now());
                Some(Event::PhaseAdvanced {
                    phase_index: next,
                    round: entered.round,
                    kind: entered.kind,
                    duration_secs: entered.duration_secs,
                    at: Utc::now(),
                })
            }
            None => {
                self.state = SessionState::Finished;
                self.phase_started_at = None;
                Some(Event::SessionCompleted {
                    rounds: self.plan.rounds(),
                    total_secs: self.plan.total_secs(),
                    at: Utc::now(),
                })
            }
        }
    }
}
