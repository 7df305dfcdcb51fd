//! Session runner
//!
//! Owns one `GameState` and drives it from host timestamps: a fixed-step
//! accumulator feeds `tick`, a second timer advances the cosmetic animation
//! frame, and the finished summary is written to the score ledger once.
//! After `stop` (or `exit`) no timer fires again.

use crate::input::{Command, CommandLatch};
use crate::persistence::RecordStore;
use crate::platform;
use crate::records::{Record, ScoreLedger};
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GameKind, GameState, IntervalTimer, SessionStatus, SessionSummary, SessionView,
    TickClock, TickInput, tick,
};

pub struct SessionRunner<S: RecordStore> {
    state: GameState,
    settings: Settings,
    clock: TickClock,
    step: IntervalTimer,
    anim: IntervalTimer,
    anim_frame: u32,
    latch: CommandLatch,
    ledger: ScoreLedger<S>,
    last_rank: Option<usize>,
    running: bool,
}

impl<S: RecordStore> SessionRunner<S> {
    /// New session; uses the configured seed or draws a fresh one
    pub fn new(kind: GameKind, settings: Settings, store: S) -> Self {
        let seed = settings.seed.unwrap_or_else(platform::random_seed);
        Self::with_seed(kind, settings, store, seed)
    }

    pub fn with_seed(kind: GameKind, settings: Settings, store: S, seed: u64) -> Self {
        Self::with_state(GameState::new(kind, seed), settings, store)
    }

    /// Wrap an existing (not yet started) state
    pub fn with_state(state: GameState, settings: Settings, store: S) -> Self {
        let settings = settings.sanitized();
        let ledger = ScoreLedger::load(store, state.kind);
        log::info!(
            "{} runner ready (seed {}, tick {} ms)",
            state.kind.as_str(),
            state.seed,
            settings.tick_ms
        );
        Self {
            step: IntervalTimer::new(settings.tick_ms),
            anim: IntervalTimer::new(settings.anim_frame_ms),
            anim_frame: 0,
            clock: TickClock::new(),
            latch: CommandLatch::new(),
            ledger,
            last_rank: None,
            running: true,
            state,
            settings,
        }
    }

    /// Queue the start signal
    pub fn start(&mut self) {
        self.send(Command::Start);
    }

    /// Queue a command for the next tick (latest wins)
    pub fn send(&mut self, command: Command) {
        if self.running {
            self.latch.push(command);
        }
    }

    /// Queue a command by name; unknown names are ignored
    pub fn send_str(&mut self, command: &str) -> bool {
        self.running && self.latch.push_str(command)
    }

    /// Host frame callback with a wall-clock timestamp (ms)
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }
        let dt = self.clock.delta(now_ms);
        self.advance(dt)
    }

    /// Feed `dt_ms` of host time into the step and animation timers
    pub fn advance(&mut self, dt_ms: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        let dt_ms = dt_ms.clamp(0.0, self.settings.max_frame_delta_ms);

        if self.state.status == SessionStatus::Running {
            let frames = self.anim.advance(dt_ms, u32::MAX);
            self.anim_frame = self.anim_frame.wrapping_add(frames);
        }

        let steps = self.step.advance(dt_ms, self.settings.max_substeps);
        for _ in 0..steps {
            let input = TickInput {
                command: self.latch.take(),
            };
            let step_events = tick(&mut self.state, &input, self.settings.tick_ms);

            let summary = step_events.iter().find_map(|e| match e {
                GameEvent::Finished(summary) => Some(summary.clone()),
                _ => None,
            });
            events.extend(step_events);

            if let Some(summary) = summary {
                self.record(&summary);
                self.stop();
                break;
            }
        }
        events
    }

    fn record(&mut self, summary: &SessionSummary) {
        let record = Record::from_summary(summary, platform::today());
        self.last_rank = self.ledger.record(record);
        match self.last_rank {
            Some(rank) => log::info!("{} record #{}", summary.kind.as_str(), rank),
            None => log::info!("{} score {} did not make the list", summary.kind.as_str(), summary.final_score),
        }
    }

    /// Cancel every timer; later frames do nothing
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.step.cancel();
        self.anim.cancel();
        self.state.spawner.cancel();
        self.clock.reset();
        self.latch.clear();
        log::debug!("{} runner stopped", self.state.kind.as_str());
    }

    /// Leave without an outcome: no summary, no record
    pub fn exit(&mut self) {
        self.state.exit();
        self.stop();
    }

    pub fn view(&self) -> SessionView {
        let mut view = self.state.view();
        view.anim_frame = self.anim_frame;
        view
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.state.summary.as_ref()
    }

    /// Rank reached by the finished session, if it made the list
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn records(&self) -> &[Record] {
        self.ledger.records()
    }

    pub fn ledger(&self) -> &ScoreLedger<S> {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ScoreLedger<S> {
        &mut self.ledger
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_MS;
    use crate::persistence::MemoryRecordStore;
    use crate::sim::{Entity, EntityKind, Outcome, WinCondition};

    fn runner(kind: GameKind) -> SessionRunner<MemoryRecordStore> {
        SessionRunner::with_seed(kind, Settings::default(), MemoryRecordStore::new(), 7)
    }

    fn started(kind: GameKind) -> SessionRunner<MemoryRecordStore> {
        let mut r = runner(kind);
        r.start();
        let events = r.advance(TICK_MS);
        assert_eq!(events, vec![GameEvent::Started]);
        r
    }

    fn hazard_on_player(r: &mut SessionRunner<MemoryRecordStore>) {
        let id = r.state.next_entity_id();
        let pos = r.state.player.pos;
        r.state.entities.push(Entity {
            id,
            kind: EntityKind::Hazard,
            pos,
            size: 32.0,
            size_factor: 1.0,
        });
    }

    fn count_finished(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Finished(_)))
            .count()
    }

    #[test]
    fn test_ready_until_started() {
        let mut r = runner(GameKind::BallDodge);
        r.advance(1000.0);
        assert_eq!(r.state().status, SessionStatus::Ready);
        assert_eq!(r.view().anim_frame, 0);
        r.start();
        r.advance(TICK_MS);
        assert_eq!(r.state().status, SessionStatus::Running);
    }

    #[test]
    fn test_frame_uses_clock_deltas() {
        let mut r = started(GameKind::MeteorShower);
        assert!(r.frame(10_000.0).is_empty()); // first timestamp only primes the clock
        let before = r.state().elapsed_ms;
        r.frame(10_100.0);
        assert_eq!(r.state().elapsed_ms - before, 2.0 * TICK_MS);
    }

    #[test]
    fn test_large_frame_is_clamped_and_capped() {
        let mut r = started(GameKind::MeteorShower);
        let before = r.state().elapsed_ms;
        r.advance(10_000.0);
        let ran = (r.state().elapsed_ms - before) / TICK_MS;
        assert!(ran <= r.settings().max_substeps as f32);
        assert_eq!(ran, 5.0);
    }

    #[test]
    fn test_commands_are_edge_triggered() {
        let mut r = started(GameKind::MeteorShower);
        let x0 = r.state().player.pos.x;
        r.send(Command::Left);
        r.advance(3.0 * TICK_MS);
        let step = r.state().config.player_step;
        assert_eq!(r.state().player.pos.x, x0 - step);
        assert!(!r.send_str("sideways"));
    }

    #[test]
    fn test_anim_frame_advances_only_while_running() {
        let mut r = started(GameKind::MeteorShower);
        r.advance(150.0);
        r.advance(150.0);
        assert_eq!(r.view().anim_frame, 2);
        r.exit();
        r.advance(150.0);
        assert_eq!(r.view().anim_frame, 2);
    }

    #[test]
    fn test_loss_records_once_and_stops() {
        let mut r = started(GameKind::BallDodge);
        hazard_on_player(&mut r);
        let events = r.advance(TICK_MS);
        assert_eq!(count_finished(&events), 1);
        assert_eq!(r.state().status, SessionStatus::Lost);
        assert_eq!(r.summary().map(|s| s.outcome), Some(Outcome::Lose));
        assert!(!r.is_running());
        assert_eq!(r.last_rank(), Some(1));

        // Nothing more happens after the outcome
        let elapsed = r.state().elapsed_ms;
        for _ in 0..20 {
            assert!(r.advance(TICK_MS).is_empty());
        }
        assert_eq!(r.state().elapsed_ms, elapsed);

        let stored = r
            .ledger()
            .store()
            .fetch_records(GameKind::BallDodge)
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(r.records().len(), 1);
    }

    #[test]
    fn test_offline_store_does_not_break_the_session() {
        let mut store = MemoryRecordStore::new();
        store.set_failing(true);
        let mut r = SessionRunner::with_seed(GameKind::BallDodge, Settings::default(), store, 7);
        assert!(r.records().is_empty());

        r.start();
        assert_eq!(r.advance(TICK_MS), vec![GameEvent::Started]);
        r.advance(1000.0);
        hazard_on_player(&mut r);
        let events = r.advance(TICK_MS);

        assert_eq!(count_finished(&events), 1);
        assert_eq!(r.state().status, SessionStatus::Lost);
        assert!(!r.is_running());
        // Kept in memory even though the store rejected it
        assert_eq!(r.last_rank(), Some(1));
        assert_eq!(r.records().len(), 1);
        assert_eq!(r.records()[0].score, r.summary().map_or(0, |s| s.final_score));
        assert!(r.ledger().store().fetch_records(GameKind::BallDodge).is_err());
    }

    #[test]
    fn test_survival_win_is_recorded() {
        let mut r = started(GameKind::MeteorShower);
        r.state.config.win = WinCondition::SurviveFor { ms: 300.0 };
        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(r.advance(TICK_MS));
        }
        assert_eq!(count_finished(&events), 1);
        assert_eq!(r.state().status, SessionStatus::Won);
        let summary = r.summary().cloned().unwrap();
        assert_eq!(summary.outcome, Outcome::Win);
        assert!(summary.duration_ms >= 300.0);
        assert_eq!(r.records()[0].score, summary.final_score);
    }

    #[test]
    fn test_exit_writes_nothing() {
        let mut r = started(GameKind::BallDodge);
        r.advance(1000.0);
        r.exit();
        assert_eq!(r.state().status, SessionStatus::Exited);
        assert!(r.summary().is_none());
        assert!(r.records().is_empty());
        assert!(
            r.ledger()
                .store()
                .fetch_records(GameKind::BallDodge)
                .unwrap()
                .is_empty()
        );

        r.send(Command::Start);
        assert!(r.advance(TICK_MS).is_empty());
        assert!(r.frame(5_000.0).is_empty());
    }

    #[test]
    fn test_seeded_runs_replay_identically() {
        let play = || {
            let mut r = runner(GameKind::BallDodge);
            r.start();
            for i in 0..200 {
                if i % 7 == 0 {
                    r.send(Command::Right);
                }
                if i % 11 == 0 {
                    r.send(Command::Up);
                }
                r.advance(TICK_MS);
            }
            r.view()
        };
        assert_eq!(play(), play());
    }
}
