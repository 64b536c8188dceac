use chrono::NaiveDate;
use serde::Serialize;

use respire_core::{Config, Profile, SessionLog};

#[derive(Serialize)]
struct Status {
    calibrated: bool,
    relaxed_pause_secs: Option<u32>,
    last_calibration_date: Option<NaiveDate>,
    streak: u32,
    last_session_date: Option<NaiveDate>,
    sessions_recorded: u64,
}

/// Print the stored profile as JSON.
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(config)?;
    let profile = Profile::load(store);
    let snapshot = profile.snapshot();
    let status = Status {
        calibrated: profile.is_calibrated(),
        relaxed_pause_secs: snapshot.relaxed_pause_secs,
        last_calibration_date: snapshot.last_calibration_date,
        streak: snapshot.streak,
        last_session_date: snapshot.last_session_date,
        sessions_recorded: profile.store().completed_count()?,
    };
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
