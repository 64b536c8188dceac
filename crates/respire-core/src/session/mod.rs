//! Training session: plan generation and real-time advancement.

mod engine;
mod plan;

pub use engine::{SessionEngine, SessionState};
pub use plan::{
    BreathCue, Phase, PhaseKind, RoundSummary, SessionPlan, BREATHING_PATTERN, HOLD_ADJUSTMENTS,
    MIN_HOLD_SECS, ROUNDS,
};
