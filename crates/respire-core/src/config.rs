//! TOML-based application configuration.
//!
//! Stores frontend preferences:
//! - TUI tick rate and glyph style
//! - Optional database path override
//!
//! Configuration is stored at `~/.config/respire/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::storage::data_dir;

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Poll interval of the TUI loop, in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Draw the breathing orb with unicode glyphs; turn off for plain
    /// ASCII terminals.
    #[serde(default = "default_true")]
    pub unicode: bool,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database file override. Defaults to `respire.db` in the data
    /// directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/respire/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

// Default functions
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_true() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            unicode: true,
        }
    }
}

impl UiConfig {
    /// Tick rate as a duration, clamped to a sane range so a bad value
    /// cannot busy-spin the loop or freeze the display.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.clamp(16, 1_000))
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::DataDir(e.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to
    /// disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("Using default config: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.ui.tick_rate_ms, 50);
        assert_eq!(parsed.ui.unicode, true);
        assert!(parsed.storage.database_path.is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.ui.tick_rate_ms, 50);
        assert_eq!(parsed.ui.unicode, true);

        let parsed: Config = toml::from_str("[ui]\nunicode = false\n").unwrap();
        assert_eq!(parsed.ui.tick_rate_ms, 50);
        assert_eq!(parsed.ui.unicode, false);
    }

    #[test]
    fn database_path_round_trips() {
        let cfg = Config {
            storage: StorageConfig {
                database_path: Some(PathBuf::from("/tmp/respire-test.db")),
            },
            ..Config::default()
        };
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            parsed.storage.database_path.as_deref(),
            Some(std::path::Path::new("/tmp/respire-test.db"))
        );
    }

    #[test]
    fn tick_rate_is_clamped() {
        let mut ui = UiConfig::default();
        assert_eq!(ui.tick_rate(), Duration::from_millis(50));
        ui.tick_rate_ms = 0;
        assert_eq!(ui.tick_rate(), Duration::from_millis(16));
        ui.tick_rate_ms = 100_000;
        assert_eq!(ui.tick_rate(), Duration::from_millis(1_000));
    }
}
