//! SQLite-backed durable storage.
//!
//! One database file holds both the profile's key-value slots and the
//! completed-session history.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::cell::KeyValueStore;
use super::data_dir;
use super::history::{CompletedSession, SessionLog};
use crate::error::StoreError;

/// SQLite database holding the kv slots and session history.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at `~/.config/respire/respire.db`.
    ///
    /// Creates the file and schema on first use.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("respire.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                baseline_secs INTEGER NOT NULL,
                rounds        INTEGER NOT NULL,
                total_secs    INTEGER NOT NULL,
                started_at    TEXT NOT NULL,
                completed_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);",
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl SessionLog for SqliteStore {
    fn record_completed(
        &mut self,
        baseline_secs: u32,
        rounds: u8,
        total_secs: u64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO sessions (baseline_secs, rounds, total_secs, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                baseline_secs,
                rounds,
                total_secs,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn completed_count(&self) -> Result<u64, StoreError> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM sessions", [], |row| {
                    row.get::<_, u64>(0)
                })?;
        Ok(count)
    }

    fn recent_completed(&self, limit: usize) -> Result<Vec<CompletedSession>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, baseline_secs, rounds, total_secs, started_at, completed_at
             FROM sessions
             ORDER BY completed_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(CompletedSession {
                id: row.get(0)?,
                baseline_secs: row.get(1)?,
                rounds: row.get(2)?,
                total_secs: row.get(3)?,
                started_at: parse_timestamp(row.get::<_, String>(4)?, 4)?,
                completed_at: parse_timestamp(row.get::<_, String>(5)?, 5)?,
            })
        })?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?);
        }
        Ok(sessions)
    }
}

fn parse_timestamp(raw: String, column: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn kv_round_trip() {
        let mut store = SqliteStore::open_memory().unwrap();
        assert!(store.get("respire.streak").unwrap().is_none());
        store.set("respire.streak", "3").unwrap();
        assert_eq!(store.get("respire.streak").unwrap().unwrap(), "3");
        store.set("respire.streak", "4").unwrap();
        assert_eq!(store.get("respire.streak").unwrap().unwrap(), "4");
    }

    #[test]
    fn delete_removes_the_row() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.set("respire.relaxed_pause_secs", "60").unwrap();
        store.delete("respire.relaxed_pause_secs").unwrap();
        assert!(store.get("respire.relaxed_pause_secs").unwrap().is_none());
        // Deleting an absent key is fine.
        store.delete("respire.relaxed_pause_secs").unwrap();
    }

    #[test]
    fn record_and_count() {
        let mut store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.completed_count().unwrap(), 0);
        store
            .record_completed(60, 5, 400, at(0), at(400))
            .unwrap();
        store
            .record_completed(62, 5, 410, at(86_400), at(86_810))
            .unwrap();
        assert_eq!(store.completed_count().unwrap(), 2);
    }

    #[test]
    fn recent_is_newest_first() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.record_completed(58, 5, 390, at(0), at(390)).unwrap();
        store
            .record_completed(60, 5, 400, at(86_400), at(86_800))
            .unwrap();
        store
            .record_completed(62, 5, 410, at(172_800), at(173_210))
            .unwrap();

        let recent = store.recent_completed(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].baseline_secs, 62);
        assert_eq!(recent[1].baseline_secs, 60);
        assert_eq!(recent[0].completed_at, at(173_210));
        assert_eq!(recent[0].rounds, 5);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("respire.db");
        {
            let mut store = SqliteStore::open_at(&path).unwrap();
            store.set("respire.streak", "7").unwrap();
            store.record_completed(60, 5, 400, at(0), at(400)).unwrap();
        }
        let store = SqliteStore::open_at(&path).unwrap();
        assert_eq!(store.get("respire.streak").unwrap().unwrap(), "7");
        assert_eq!(store.completed_count().unwrap(), 1);
        assert_eq!(store.recent_completed(10).unwrap()[0].total_secs, 400);
    }
}
