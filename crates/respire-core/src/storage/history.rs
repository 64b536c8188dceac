//! Completed-session history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One finished training session, as recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSession {
    pub id: i64,
    pub baseline_secs: u32,
    pub rounds: u8,
    pub total_secs: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Append-only log of finished sessions. Cancelled runs are never recorded.
pub trait SessionLog {
    /// Record one finished session, returning its row id.
    fn record_completed(
        &mut self,
        baseline_secs: u32,
        rounds: u8,
        total_secs: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, StoreError>;

    /// Total number of recorded sessions.
    fn completed_count(&self) -> Result<u64, StoreError>;

    /// The most recent sessions, newest first.
    fn recent_completed(&self, limit: usize) -> Result<Vec<CompletedSession>, StoreError>;
}
