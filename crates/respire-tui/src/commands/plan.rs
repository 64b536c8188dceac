use serde::Serialize;

use respire_core::{Config, Phase, Profile, SessionPlan};

#[derive(Serialize)]
struct PlanOutput {
    baseline_secs: u32,
    rounds: u8,
    phase_count: usize,
    total_secs: u64,
    hold_secs: Vec<u32>,
    phases: Vec<Phase>,
}

/// Print the session plan for a baseline as JSON. Uses the stored baseline
/// unless one is passed explicitly.
pub fn run(config: &Config, baseline: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let baseline = match baseline {
        Some(secs) => secs,
        None => {
            let store = super::open_store(config)?;
            let profile = Profile::load(store);
            profile
                .baseline_secs()
                .ok_or("no stored baseline; calibrate first or pass --baseline")?
        }
    };
    let plan = SessionPlan::for_baseline(baseline);
    let output = PlanOutput {
        baseline_secs: plan.baseline_secs(),
        rounds: plan.rounds(),
        phase_count: plan.len(),
        total_secs: plan.total_secs(),
        hold_secs: plan.hold_durations(),
        phases: plan.phases().to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
