//! End-to-end flow over the public API: calibrate, train, persist.

use chrono::{NaiveDate, Utc};
use respire_core::{
    CalibrationStopwatch, Event, ManualClock, MemoryStore, Profile, SessionEngine, SessionLog,
    SessionPlan, SessionState,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Drive an engine to completion, returning how many completion events
/// were observed.
fn run_to_completion(engine: &mut SessionEngine<ManualClock>, clock: &ManualClock) -> usize {
    let mut completions = 0;
    for _ in 0..200 {
        clock.advance_secs(70);
        if let Some(Event::SessionCompleted { .. }) = engine.tick() {
            completions += 1;
        }
    }
    completions
}

#[test]
fn calibrate_then_train_twice() {
    let clock = ManualClock::new();
    let mut profile = Profile::load(MemoryStore::new());
    assert!(!profile.is_calibrated());

    // Measure the relaxed pause.
    let mut stopwatch = CalibrationStopwatch::with_clock(clock.clone());
    stopwatch.start();
    clock.advance_millis(59_700);
    stopwatch.stop();
    let measured = stopwatch.save().unwrap();
    assert_eq!(measured, 60);
    profile.save_calibration(measured, date(2026, 8, 25));
    assert!(profile.is_calibrated());

    // First session.
    let plan = SessionPlan::for_baseline(profile.baseline_secs().unwrap());
    assert_eq!(plan.hold_durations(), vec![56, 58, 60, 62, 64]);
    let mut engine = SessionEngine::with_clock(plan, clock.clone());
    let started = engine.begin();
    assert!(matches!(started, Some(Event::SessionStarted { .. })));
    assert_eq!(run_to_completion(&mut engine, &clock), 1);
    assert_eq!(engine.state(), SessionState::Finished);

    profile.record_completion(date(2026, 8, 25));
    profile
        .store_mut()
        .record_completed(60, 5, 400, Utc::now(), Utc::now())
        .unwrap();
    assert_eq!(profile.streak(), 1);

    // Second session the next day, restarting the same engine.
    assert!(engine.begin().is_some());
    assert_eq!(run_to_completion(&mut engine, &clock), 1);
    profile.record_completion(date(2026, 8, 26));
    profile
        .store_mut()
        .record_completed(60, 5, 400, Utc::now(), Utc::now())
        .unwrap();

    assert_eq!(profile.streak(), 2);
    assert_eq!(profile.last_session(), Some(date(2026, 8, 26)));
    assert_eq!(profile.store().completed_count().unwrap(), 2);
    let history = profile.store().recent_completed(10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, 2);
}

#[test]
fn cancelled_run_leaves_the_profile_alone() {
    let clock = ManualClock::new();
    let mut profile = Profile::load(MemoryStore::new());
    profile.save_calibration(45, date(2026, 8, 25));

    let plan = SessionPlan::for_baseline(45);
    let mut engine = SessionEngine::with_clock(plan, clock.clone());
    engine.begin();
    clock.advance_secs(25);
    engine.tick();
    let event = engine.cancel();
    assert!(matches!(event, Some(Event::SessionCancelled { .. })));

    // Nothing was recorded for the aborted run.
    assert_eq!(profile.streak(), 0);
    assert_eq!(profile.last_session(), None);
    assert_eq!(profile.store().completed_count().unwrap(), 0);

    // A later full run still records normally.
    engine.begin();
    assert_eq!(run_to_completion(&mut engine, &clock), 1);
    profile.record_completion(date(2026, 8, 25));
    assert_eq!(profile.streak(), 1);
}

#[test]
fn profile_survives_a_reload() {
    let mut profile = Profile::load(MemoryStore::new());
    profile.save_calibration(38, date(2026, 8, 24));
    profile.record_completion(date(2026, 8, 25));

    let store = std::mem::take(profile.store_mut());
    let reloaded = Profile::load(store);
    assert_eq!(reloaded.baseline_secs(), Some(38));
    assert_eq!(reloaded.last_calibration(), Some(date(2026, 8, 24)));
    assert_eq!(reloaded.streak(), 1);
    assert_eq!(reloaded.last_session(), Some(date(2026, 8, 25)));
}
