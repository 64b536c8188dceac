//! Raw key-value storage and the typed cell bound to one slot.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// String-keyed storage of JSON-encoded text values.
///
/// [`SqliteStore`](super::SqliteStore) is the durable implementation;
/// [`MemoryStore`](super::MemoryStore) backs tests.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// A named slot holding one JSON-encoded value of a fixed type.
///
/// Reads fall back to the default when the slot is missing or fails to
/// decode; writes and deletes log failures instead of propagating them.
/// Persistence degrades to a warning, it never takes a session down.
///
/// Writing a value whose JSON form is exactly `null` (an `Option::None`)
/// deletes the slot instead of storing the literal, so an absent value and
/// a never-written value are indistinguishable on the next load.
pub struct StoredCell<T> {
    key: &'static str,
    default: T,
}

impl<T> StoredCell<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(key: &'static str, default: T) -> Self {
        Self { key, default }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Decode the stored value, or the default when absent or corrupt. A
    /// corrupt slot is left as stored; nothing is written back.
    pub fn load(&self, store: &impl KeyValueStore) -> T {
        match store.get(self.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(error) => {
                    log::warn!("discarding corrupt value for '{}': {error}", self.key);
                    self.default.clone()
                }
            },
            Ok(None) => self.default.clone(),
            Err(error) => {
                log::warn!("failed to read '{}': {error}", self.key);
                self.default.clone()
            }
        }
    }

    /// Encode and write through, or delete on the `null` sentinel.
    pub fn store(&self, store: &mut impl KeyValueStore, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                log::warn!("failed to encode value for '{}': {error}", self.key);
                return;
            }
        };
        let result = if raw == "null" {
            store.delete(self.key)
        } else {
            store.set(self.key, &raw)
        };
        if let Err(error) = result {
            log::warn!("failed to write '{}': {error}", self.key);
        }
    }
}
