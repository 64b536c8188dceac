use respire_core::{Config, SessionLog};

/// Print the most recent completed sessions as JSON, newest first.
pub fn run(config: &Config, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::open_store(config)?;
    let sessions = store.recent_completed(limit)?;
    println!("{}", serde_json::to_string_pretty(&sessions)?);
    Ok(())
}
