//! In-memory store for tests and ephemeral runs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::cell::KeyValueStore;
use super::history::{CompletedSession, SessionLog};
use crate::error::StoreError;

/// HashMap-backed [`KeyValueStore`] and [`SessionLog`]. Nothing survives
/// the process; use it wherever a test needs the real persistence paths
/// without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    sessions: Vec<CompletedSession>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.slots.remove(key);
        Ok(())
    }
}

impl SessionLog for MemoryStore {
    fn record_completed(
        &mut self,
        baseline_secs: u32,
        rounds: u8,
        total_secs: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let id = self.sessions.len() as i64 + 1;
        self.sessions.push(CompletedSession {
            id,
            baseline_secs,
            rounds,
            total_secs,
            started_at,
            completed_at,
        });
        Ok(id)
    }

    fn completed_count(&self) -> Result<u64, StoreError> {
        Ok(self.sessions.len() as u64)
    }

    fn recent_completed(&self, limit: usize) -> Result<Vec<CompletedSession>, StoreError> {
        Ok(self.sessions.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_store() {
        let mut store = MemoryStore::new();
        assert!(store.get("a").unwrap().is_none());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.delete("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn log_is_newest_first() {
        let mut store = MemoryStore::new();
        let now = Utc::now();
        store.record_completed(50, 5, 350, now, now).unwrap();
        store.record_completed(52, 5, 360, now, now).unwrap();
        let recent = store.recent_completed(5).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].baseline_secs, 52);
        assert_eq!(store.completed_count().unwrap(), 2);
    }
}
