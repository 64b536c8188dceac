//! JSON subcommands for scripts and status bars.

pub mod history;
pub mod plan;
pub mod status;

use respire_core::{Config, SqliteStore, StoreError};

/// Open the durable store, honoring a configured path override.
pub fn open_store(config: &Config) -> Result<SqliteStore, StoreError> {
    match &config.storage.database_path {
        Some(path) => SqliteStore::open_at(path),
        None => SqliteStore::open(),
    }
}
