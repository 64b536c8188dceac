//! Persisted trainer profile.
//!
//! Four durable values and the rules for changing them: the calibrated
//! baseline, when it was measured, the completed-session streak, and the
//! date of the last completed session. Values are rehydrated once at load
//! and written through on every change, so the in-memory copy is the
//! truth for the rest of the run.

use chrono::NaiveDate;
use serde::Serialize;

use crate::storage::{KeyValueStore, StoredCell};

const BASELINE_KEY: &str = "respire.relaxed_pause_secs";
const LAST_CALIBRATION_KEY: &str = "respire.last_calibration_date";
const STREAK_KEY: &str = "respire.streak";
const LAST_SESSION_KEY: &str = "respire.last_session_date";

/// Typed repository over the store's key-value slots.
pub struct Profile<S> {
    store: S,
    baseline_secs: Option<u32>,
    last_calibration: Option<NaiveDate>,
    streak: u32,
    last_session: Option<NaiveDate>,
}

impl<S: KeyValueStore> Profile<S> {
    fn baseline_cell() -> StoredCell<Option<u32>> {
        StoredCell::new(BASELINE_KEY, None)
    }

    fn last_calibration_cell() -> StoredCell<Option<NaiveDate>> {
        StoredCell::new(LAST_CALIBRATION_KEY, None)
    }

    fn streak_cell() -> StoredCell<u32> {
        StoredCell::new(STREAK_KEY, 0)
    }

    fn last_session_cell() -> StoredCell<Option<NaiveDate>> {
        StoredCell::new(LAST_SESSION_KEY, None)
    }

    /// Rehydrate the profile from the store. Absent or corrupt slots load
    /// as their defaults; nothing is written.
    pub fn load(store: S) -> Self {
        let baseline_secs = Self::baseline_cell().load(&store);
        let last_calibration = Self::last_calibration_cell().load(&store);
        let streak = Self::streak_cell().load(&store);
        let last_session = Self::last_session_cell().load(&store);
        Self {
            store,
            baseline_secs,
            last_calibration,
            streak,
            last_session,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn baseline_secs(&self) -> Option<u32> {
        self.baseline_secs
    }

    pub fn last_calibration(&self) -> Option<NaiveDate> {
        self.last_calibration
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_session(&self) -> Option<NaiveDate> {
        self.last_session
    }

    /// A session can only run once a baseline exists.
    pub fn is_calibrated(&self) -> bool {
        self.baseline_secs.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Plain-data view for serialization.
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            relaxed_pause_secs: self.baseline_secs,
            last_calibration_date: self.last_calibration,
            streak: self.streak,
            last_session_date: self.last_session,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record a calibration measurement: new baseline plus the date it was
    /// taken.
    pub fn save_calibration(&mut self, seconds: u32, on: NaiveDate) {
        self.baseline_secs = Some(seconds);
        self.last_calibration = Some(on);
        Self::baseline_cell().store(&mut self.store, &self.baseline_secs);
        Self::last_calibration_cell().store(&mut self.store, &self.last_calibration);
    }

    /// One finished session: streak up by one, session date refreshed.
    pub fn record_completion(&mut self, on: NaiveDate) {
        self.streak = self.streak.saturating_add(1);
        self.last_session = Some(on);
        Self::streak_cell().store(&mut self.store, &self.streak);
        Self::last_session_cell().store(&mut self.store, &self.last_session);
    }

    /// Forget the baseline and its measurement date. Their slots are
    /// deleted; streak and session date stay.
    pub fn clear_baseline(&mut self) {
        self.baseline_secs = None;
        self.last_calibration = None;
        Self::baseline_cell().store(&mut self.store, &None);
        Self::last_calibration_cell().store(&mut self.store, &None);
    }
}

/// Snapshot of the stored profile values.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshot {
    pub relaxed_pause_secs: Option<u32>,
    pub last_calibration_date: Option<NaiveDate>,
    pub streak: u32,
    pub last_session_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fresh_profile_is_uncalibrated() {
        let profile = Profile::load(MemoryStore::new());
        assert_eq!(profile.baseline_secs(), None);
        assert_eq!(profile.last_calibration(), None);
        assert_eq!(profile.streak(), 0);
        assert_eq!(profile.last_session(), None);
        assert!(!profile.is_calibrated());
    }

    #[test]
    fn calibration_writes_through() {
        let mut profile = Profile::load(MemoryStore::new());
        profile.save_calibration(60, date(2026, 8, 25));
        assert_eq!(profile.baseline_secs(), Some(60));
        assert!(profile.is_calibrated());

        // Visible to a later load of the same store.
        let store = std::mem::replace(profile.store_mut(), MemoryStore::new());
        let reloaded = Profile::load(store);
        assert_eq!(reloaded.baseline_secs(), Some(60));
        assert_eq!(reloaded.last_calibration(), Some(date(2026, 8, 25)));
    }

    #[test]
    fn completion_bumps_streak_and_date() {
        let mut profile = Profile::load(MemoryStore::new());
        profile.save_calibration(45, date(2026, 8, 24));
        profile.record_completion(date(2026, 8, 24));
        profile.record_completion(date(2026, 8, 25));
        assert_eq!(profile.streak(), 2);
        assert_eq!(profile.last_session(), Some(date(2026, 8, 25)));

        let store = std::mem::replace(profile.store_mut(), MemoryStore::new());
        let reloaded = Profile::load(store);
        assert_eq!(reloaded.streak(), 2);
        assert_eq!(reloaded.last_session(), Some(date(2026, 8, 25)));
    }

    #[test]
    fn recalibration_replaces_the_baseline() {
        let mut profile = Profile::load(MemoryStore::new());
        profile.save_calibration(45, date(2026, 8, 20));
        profile.save_calibration(52, date(2026, 8, 25));
        assert_eq!(profile.baseline_secs(), Some(52));
        assert_eq!(profile.last_calibration(), Some(date(2026, 8, 25)));
    }

    #[test]
    fn clear_baseline_deletes_the_slots() {
        let mut profile = Profile::load(MemoryStore::new());
        profile.save_calibration(60, date(2026, 8, 25));
        profile.record_completion(date(2026, 8, 25));
        profile.clear_baseline();
        assert!(!profile.is_calibrated());
        assert_eq!(profile.last_calibration(), None);
        // Streak survives a recalibration.
        assert_eq!(profile.streak(), 1);

        let store = profile.store();
        assert!(store.get("respire.relaxed_pause_secs").unwrap().is_none());
        assert!(store
            .get("respire.last_calibration_date")
            .unwrap()
            .is_none());
        assert_eq!(store.get("respire.streak").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn corrupt_slot_loads_as_default() {
        let mut store = MemoryStore::new();
        store.set("respire.relaxed_pause_secs", "sixty").unwrap();
        store.set("respire.streak", "5").unwrap();
        let profile = Profile::load(store);
        assert_eq!(profile.baseline_secs(), None);
        assert_eq!(profile.streak(), 5);
    }

    #[test]
    fn dates_are_stored_as_iso_strings() {
        let mut profile = Profile::load(MemoryStore::new());
        profile.save_calibration(60, date(2026, 8, 25));
        assert_eq!(
            profile
                .store()
                .get("respire.last_calibration_date")
                .unwrap()
                .as_deref(),
            Some("\"2026-08-25\"")
        );
    }
}
