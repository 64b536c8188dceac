//! Session plan generation.
//!
//! A plan is the full, ordered phase sequence for one training session,
//! derived from nothing but the calibrated baseline. Generation is pure:
//! the same baseline always yields the same plan.

use serde::{Deserialize, Serialize};

/// Per-round hold adjustment in seconds relative to the baseline. One round
/// per entry, in session order.
pub const HOLD_ADJUSTMENTS: [i32; 5] = [-4, -2, 0, 2, 4];

/// Holds never shrink below this, whatever the baseline.
pub const MIN_HOLD_SECS: u32 = 5;

/// Paced breathing before every hold: two 4s-inhale / 6s-exhale cycles.
pub const BREATHING_PATTERN: [(BreathCue, u32); 4] = [
    (BreathCue::Inhale, 4),
    (BreathCue::Exhale, 6),
    (BreathCue::Inhale, 4),
    (BreathCue::Exhale, 6),
];

/// Rounds per session.
pub const ROUNDS: u8 = HOLD_ADJUSTMENTS.len() as u8;

/// Which way to breathe during a paced-breathing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathCue {
    Inhale,
    Exhale,
}

impl BreathCue {
    pub fn label(&self) -> &'static str {
        match self {
            BreathCue::Inhale => "Breathe in",
            BreathCue::Exhale => "Breathe out",
        }
    }
}

/// What the trainee is doing during a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Paced breathing. `cycle` is 1 or 2, counting the inhale/exhale
    /// pairs within the round.
    Breathe { cue: BreathCue, cycle: u8 },
    /// Breath hold for the round's computed duration.
    Hold,
}

/// One timed phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    /// Round this phase belongs to, 1-based.
    pub round: u8,
    pub duration_secs: u32,
}

impl Phase {
    pub fn duration_ms(&self) -> u64 {
        u64::from(self.duration_secs).saturating_mul(1000)
    }

    pub fn is_hold(&self) -> bool {
        matches!(self.kind, PhaseKind::Hold)
    }

    /// Instruction shown while this phase runs.
    pub fn label(&self) -> &'static str {
        match self.kind {
            PhaseKind::Breathe { cue, .. } => cue.label(),
            PhaseKind::Hold => "Hold",
        }
    }
}

/// Breathe/hold seconds for one round, for the pre-session overview table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u8,
    pub breathe_secs: u32,
    pub hold_secs: u32,
}

/// The ordered phase sequence for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlan {
    baseline_secs: u32,
    phases: Vec<Phase>,
}

impl SessionPlan {
    /// Build the plan for a baseline: for each round the fixed breathing
    /// pattern, then one hold of `max(MIN_HOLD_SECS, baseline + adjustment)`.
    ///
    /// A zero baseline clamps every hold to the floor; a baseline near
    /// `u32::MAX` saturates instead of wrapping. Refusing to train without
    /// a calibrated baseline is the caller's job, not the plan's.
    pub fn for_baseline(baseline_secs: u32) -> Self {
        let mut phases =
            Vec::with_capacity(HOLD_ADJUSTMENTS.len() * (BREATHING_PATTERN.len() + 1));
        for (index, adjustment) in HOLD_ADJUSTMENTS.iter().enumerate() {
            let round = index as u8 + 1;
            for (pair, (cue, secs)) in BREATHING_PATTERN.iter().enumerate() {
                phases.push(Phase {
                    kind: PhaseKind::Breathe {
                        cue: *cue,
                        cycle: pair as u8 / 2 + 1,
                    },
                    round,
                    duration_secs: *secs,
                });
            }
            phases.push(Phase {
                kind: PhaseKind::Hold,
                round,
                duration_secs: hold_secs(baseline_secs, *adjustment),
            });
        }
        Self {
            baseline_secs,
            phases,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn baseline_secs(&self) -> u32 {
        self.baseline_secs
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn rounds(&self) -> u8 {
        ROUNDS
    }

    /// Hold durations in round order.
    pub fn hold_durations(&self) -> Vec<u32> {
        self.phases
            .iter()
            .filter(|p| p.is_hold())
            .map(|p| p.duration_secs)
            .collect()
    }

    /// Total seconds from first inhale to the end of the last hold.
    pub fn total_secs(&self) -> u64 {
        self.phases
            .iter()
            .map(|p| u64::from(p.duration_secs))
            .sum()
    }

    /// Per-round breathe/hold totals.
    pub fn blueprint(&self) -> Vec<RoundSummary> {
        let breathe_secs: u32 = BREATHING_PATTERN.iter().map(|(_, s)| s).sum();
        self.hold_durations()
            .into_iter()
            .enumerate()
            .map(|(i, hold)| RoundSummary {
                round: i as u8 + 1,
                breathe_secs,
                hold_secs: hold,
            })
            .collect()
    }
}

fn hold_secs(baseline_secs: u32, adjustment: i32) -> u32 {
    let adjusted = i64::from(baseline_secs) + i64::from(adjustment);
    let floored = adjusted.max(i64::from(MIN_HOLD_SECS));
    // Baselines near u32::MAX saturate rather than wrap.
    u32::try_from(floored).unwrap_or(u32::MAX)
}
