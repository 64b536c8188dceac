//! # Respire Core Library
//!
//! This library provides the core business logic for respire, a terminal
//! breath-hold trainer. The frontends stay thin: every rule about
//! calibration, session pacing, and persistence lives here, so the TUI and
//! the JSON subcommands are both views over the same types.
//!
//! ## Architecture
//!
//! - **Session Engine**: A wall-clock state machine that requires the
//!   caller to periodically invoke `tick()` for phase advancement
//! - **Calibration**: A stopwatch that measures the relaxed pause, the
//!   baseline every session plan is derived from
//! - **Storage**: SQLite-backed key-value slots and session history,
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SessionPlan`]: The deterministic phase sequence for one session
//! - [`SessionEngine`]: Drives a plan forward against an injected [`Clock`]
//! - [`CalibrationStopwatch`]: Measures the relaxed pause
//! - [`Profile`]: The persisted baseline, streak, and session dates
//! - [`SqliteStore`]: Durable storage behind the [`KeyValueStore`] and
//!   [`SessionLog`] traits

pub mod calibration;
pub mod clock;
pub mod config;
pub mod dates;
pub mod error;
pub mod events;
pub mod profile;
pub mod session;
pub mod storage;

pub use calibration::{CalibrationStopwatch, StopwatchState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use profile::{Profile, ProfileSnapshot};
pub use session::{
    BreathCue, Phase, PhaseKind, RoundSummary, SessionEngine, SessionPlan, SessionState,
};
pub use storage::{
    CompletedSession, KeyValueStore, MemoryStore, SessionLog, SqliteStore, StoredCell,
};
