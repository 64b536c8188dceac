//! Error types for respire-core.
//!
//! Only setup-time failures are real errors (opening the database, resolving
//! the config path). Everything that can go wrong mid-session -- a failed
//! write, a corrupt stored value -- is logged and absorbed where it happens,
//! so a running session never dies to a storage hiccup.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for respire-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the durable key-value store and session history.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// Could not resolve or create the data directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while loading or saving the TOML configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to resolve the data directory
    #[error("Failed to resolve data directory: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
