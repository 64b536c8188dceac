//! Application state and key routing.
//!
//! The TUI is three screens over one `App`: the sanctuary (home), the
//! calibration stopwatch, and the training session. All timing lives in
//! respire-core; this layer turns key presses into core calls and core
//! events into profile updates.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use respire_core::{
    dates, CalibrationStopwatch, Clock, Event, KeyValueStore, Profile, SessionEngine, SessionLog,
    SessionPlan, SessionState, SystemClock,
};

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Sanctuary,
    Calibration,
    Session,
}

pub struct App<S, C: Clock = SystemClock> {
    clock: C,
    profile: Profile<S>,
    stopwatch: CalibrationStopwatch<C>,
    engine: Option<SessionEngine<C>>,
    session_started_at: Option<DateTime<Utc>>,
    session_count: u64,
    view: View,
    notice: Option<String>,
    should_quit: bool,
}

impl<S: KeyValueStore + SessionLog> App<S> {
    pub fn new(profile: Profile<S>) -> Self {
        Self::with_clock(profile, SystemClock)
    }
}

impl<S, C> App<S, C>
where
    S: KeyValueStore + SessionLog,
    C: Clock + Clone,
{
    pub fn with_clock(profile: Profile<S>, clock: C) -> Self {
        let session_count = profile.store().completed_count().unwrap_or_else(|error| {
            log::warn!("failed to count recorded sessions: {error}");
            0
        });
        Self {
            stopwatch: CalibrationStopwatch::with_clock(clock.clone()),
            clock,
            profile,
            engine: None,
            session_started_at: None,
            session_count,
            view: View::Sanctuary,
            notice: None,
            should_quit: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn view(&self) -> View {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn profile(&self) -> &Profile<S> {
        &self.profile
    }

    pub fn stopwatch(&self) -> &CalibrationStopwatch<C> {
        &self.stopwatch
    }

    pub fn engine(&self) -> Option<&SessionEngine<C>> {
        self.engine.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Recorded sessions, as counted at startup plus this run's finishes.
    pub fn session_count(&self) -> u64 {
        self.session_count
    }

    // ── Event handling ───────────────────────────────────────────────

    /// Advance time-driven state. Called once per poll-loop pass.
    pub fn on_tick(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Some(event) = engine.tick() {
            self.apply_event(event);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.view {
            View::Sanctuary => self.on_sanctuary_key(key),
            View::Calibration => self.on_calibration_key(key),
            View::Session => self.on_session_key(key),
        }
    }

    fn on_sanctuary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => {
                self.notice = None;
                self.stopwatch.reset();
                self.view = View::Calibration;
            }
            KeyCode::Char('s') | KeyCode::Enter => self.open_session(),
            _ => {}
        }
    }

    /// Move to the session screen. Refused without a calibrated baseline;
    /// there is no plan to build from.
    fn open_session(&mut self) {
        let Some(baseline) = self.profile.baseline_secs() else {
            self.notice = Some("Calibrate your relaxed pause to begin.".to_string());
            return;
        };
        self.notice = None;
        let plan = SessionPlan::for_baseline(baseline);
        self.engine = Some(SessionEngine::with_clock(plan, self.clock.clone()));
        self.session_started_at = None;
        self.view = View::Session;
    }

    fn on_calibration_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') => {
                if self.stopwatch.is_running() {
                    self.stopwatch.stop();
                } else {
                    self.stopwatch.start();
                }
            }
            KeyCode::Char('r') => self.stopwatch.reset(),
            KeyCode::Enter => {
                if let Some(seconds) = self.stopwatch.save() {
                    self.profile.save_calibration(seconds, dates::today());
                    self.notice = Some(format!(
                        "Relaxed pause saved: {}",
                        dates::format_seconds(f64::from(seconds))
                    ));
                    self.view = View::Sanctuary;
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.stopwatch.reset();
                self.view = View::Sanctuary;
            }
            _ => {}
        }
    }

    fn on_session_key(&mut self, key: KeyEvent) {
        let Some(engine) = self.engine.as_mut() else {
            self.view = View::Sanctuary;
            return;
        };
        match engine.state() {
            SessionState::Idle => match key.code {
                KeyCode::Enter | KeyCode::Char('b') => {
                    self.session_started_at = Some(Utc::now());
                    if let Some(event) = engine.begin() {
                        self.apply_event(event);
                    }
                }
                KeyCode::Esc | KeyCode::Char('q') => self.close_session(),
                _ => {}
            },
            SessionState::Running => {
                if let KeyCode::Esc | KeyCode::Char('x') = key.code {
                    if let Some(event) = engine.cancel() {
                        self.apply_event(event);
                    }
                    self.close_session();
                }
            }
            SessionState::Finished => {
                if let KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') = key.code {
                    self.close_session();
                }
            }
        }
    }

    fn close_session(&mut self) {
        self.engine = None;
        self.session_started_at = None;
        self.view = View::Sanctuary;
    }

    fn apply_event(&mut self, event: Event) {
        match event {
            Event::SessionCompleted {
                rounds,
                total_secs,
                at,
            } => {
                log::info!("session completed: {rounds} rounds, {total_secs}s");
                self.profile.record_completion(dates::today());
                let baseline = self
                    .engine
                    .as_ref()
                    .map(|e| e.plan().baseline_secs())
                    .unwrap_or_default();
                let started_at = self.session_started_at.take().unwrap_or(at);
                match self.profile.store_mut().record_completed(
                    baseline, rounds, total_secs, started_at, at,
                ) {
                    Ok(_) => self.session_count += 1,
                    Err(error) => log::warn!("failed to record session history: {error}"),
                }
            }
            Event::PhaseAdvanced {
                phase_index, round, ..
            } => {
                log::debug!("entered phase {phase_index} (round {round})");
            }
            Event::SessionStarted { baseline_secs, .. } => {
                log::debug!("session started at baseline {baseline_secs}s");
            }
            Event::SessionCancelled { phase_index, .. } => {
                log::debug!("session cancelled at phase {phase_index}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use respire_core::{ManualClock, MemoryStore, StopwatchState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (App<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let app = App::with_clock(Profile::load(MemoryStore::new()), clock.clone());
        (app, clock)
    }

    fn calibrated_app(baseline: u32) -> (App<MemoryStore, ManualClock>, ManualClock) {
        let (mut app, clock) = app();
        app.profile
            .save_calibration(baseline, dates::today());
        (app, clock)
    }

    /// Walk a running session to its end through the public key/tick API.
    fn finish_session(app: &mut App<MemoryStore, ManualClock>, clock: &ManualClock) {
        for _ in 0..200 {
            clock.advance_secs(70);
            app.on_tick();
        }
    }

    #[test]
    fn session_requires_a_baseline() {
        let (mut app, _clock) = app();
        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(app.view(), View::Sanctuary);
        assert!(app.engine().is_none());
        assert!(app.notice().is_some());
    }

    #[test]
    fn calibration_saves_into_the_profile() {
        let (mut app, clock) = app();
        app.on_key(key(KeyCode::Char('c')));
        assert_eq!(app.view(), View::Calibration);

        app.on_key(key(KeyCode::Char(' ')));
        clock.advance_millis(42_300);
        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(app.stopwatch().state(), StopwatchState::Stopped);

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.view(), View::Sanctuary);
        assert_eq!(app.profile().baseline_secs(), Some(42));
        assert_eq!(app.profile().last_calibration(), Some(dates::today()));
        assert!(app.notice().unwrap().contains("42s"));
    }

    #[test]
    fn empty_calibration_cannot_be_saved() {
        let (mut app, _clock) = app();
        app.on_key(key(KeyCode::Char('c')));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.view(), View::Calibration);
        assert_eq!(app.profile().baseline_secs(), None);
    }

    #[test]
    fn escape_leaves_calibration_without_saving() {
        let (mut app, clock) = app();
        app.on_key(key(KeyCode::Char('c')));
        app.on_key(key(KeyCode::Char(' ')));
        clock.advance_secs(30);
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.view(), View::Sanctuary);
        assert_eq!(app.profile().baseline_secs(), None);
    }

    #[test]
    fn completed_session_updates_streak_and_history() {
        let (mut app, clock) = calibrated_app(60);
        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(app.view(), View::Session);
        assert_eq!(app.engine().unwrap().state(), SessionState::Idle);

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.engine().unwrap().state(), SessionState::Running);
        finish_session(&mut app, &clock);
        assert_eq!(app.engine().unwrap().state(), SessionState::Finished);

        assert_eq!(app.profile().streak(), 1);
        assert_eq!(app.profile().last_session(), Some(dates::today()));
        assert_eq!(app.session_count(), 1);
        assert_eq!(app.profile().store().completed_count().unwrap(), 1);
        let recorded = &app.profile().store().recent_completed(1).unwrap()[0];
        assert_eq!(recorded.baseline_secs, 60);
        assert_eq!(recorded.rounds, 5);
        assert_eq!(recorded.total_secs, 400);

        // Leaving the finished screen returns home.
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.view(), View::Sanctuary);
        assert!(app.engine().is_none());
    }

    #[test]
    fn two_sessions_reach_a_streak_of_two() {
        let (mut app, clock) = calibrated_app(45);
        for _ in 0..2 {
            app.on_key(key(KeyCode::Char('s')));
            app.on_key(key(KeyCode::Enter));
            finish_session(&mut app, &clock);
            app.on_key(key(KeyCode::Enter));
        }
        assert_eq!(app.profile().streak(), 2);
        assert_eq!(app.session_count(), 2);
        assert_eq!(app.profile().store().completed_count().unwrap(), 2);
    }

    #[test]
    fn startup_counts_existing_history() {
        let mut store = MemoryStore::new();
        let now = Utc::now();
        store.record_completed(60, 5, 400, now, now).unwrap();
        let app = App::with_clock(Profile::load(store), ManualClock::new());
        assert_eq!(app.session_count(), 1);
    }

    #[test]
    fn cancelling_records_nothing() {
        let (mut app, clock) = calibrated_app(60);
        app.on_key(key(KeyCode::Char('s')));
        app.on_key(key(KeyCode::Enter));
        clock.advance_secs(10);
        app.on_tick();

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.view(), View::Sanctuary);
        assert!(app.engine().is_none());
        assert_eq!(app.profile().streak(), 0);
        assert_eq!(app.profile().store().completed_count().unwrap(), 0);
    }

    #[test]
    fn blueprint_escape_backs_out_without_running() {
        let (mut app, _clock) = calibrated_app(60);
        app.on_key(key(KeyCode::Char('s')));
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.view(), View::Sanctuary);
        assert!(app.engine().is_none());
        assert_eq!(app.profile().streak(), 0);
    }

    #[test]
    fn quit_keys() {
        let (mut app, _clock) = app();
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());

        let (mut app, _clock) = self::app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn ticks_outside_a_session_are_harmless() {
        let (mut app, clock) = app();
        clock.advance_secs(500);
        app.on_tick();
        assert_eq!(app.view(), View::Sanctuary);
        assert_eq!(app.profile().streak(), 0);
    }
}
