//! Events emitted by the session engine.
//!
//! Every state edge produces exactly one event. Frontends react to them;
//! the serialized form is what `respire` prints in JSON mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::PhaseKind;

/// Session lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A run started from the first phase.
    SessionStarted {
        baseline_secs: u32,
        phase_count: usize,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// The clock crossed into the next phase.
    PhaseAdvanced {
        phase_index: usize,
        round: u8,
        kind: PhaseKind,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The final hold ended. Emitted at most once per run.
    SessionCompleted {
        rounds: u8,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// The user stopped a run before the end.
    SessionCancelled { phase_index: usize, at: DateTime<Utc> },
}
