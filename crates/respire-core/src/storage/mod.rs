//! Persistence: key-value slots, typed cells, and the session history.

mod cell;
mod history;
mod memory;
mod sqlite;

pub use cell::{KeyValueStore, StoredCell};
pub use history::{CompletedSession, SessionLog};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::io;
use std::path::PathBuf;

/// Returns `~/.config/respire[-dev]/` based on RESPIRE_ENV.
///
/// Set RESPIRE_ENV=dev to keep development data away from the real
/// profile.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RESPIRE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("respire-dev")
    } else {
        base_dir.join("respire")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
