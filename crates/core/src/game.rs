//! Game controller - owns the active stage and runs the frame loop
//!
//! Each frame:
//!
//! 1. wait for the frame deadline and collect input (arrival order)
//! 2. append timer ticks that came due during the frame
//! 3. dispatch every event to the active stage, honoring the first
//!    transition code per event (Quit stops event processing)
//! 4. `update` the active stage
//! 5. present the scene if anything asked for a redraw
//!
//! The controller keeps at most one stage aside (the pre-pause stage), so
//! pausing never nests.

use anyhow::Result;

use crate::config::GameConfig;
use crate::entity::Playfield;
use crate::error::GameError;
use crate::rng::SpawnRng;
use crate::sprite::Assets;
use crate::stage::{LevelSetup, Redraw, Stage, StageContext};
use crate::store::{resolve_saved_level, LevelStore};
use crate::timer::{TimerQueue, TimerService};
use crate::types::{InputEvent, Transition};

/// Read-only view of the game handed to the presentation layer.
pub struct Scene<'a> {
    pub stage: &'a Stage,
    pub level: u32,
    pub field: Playfield,
    pub config: &'a GameConfig,
    pub assets: &'a Assets,
}

/// Frame pacing, input and presentation.
pub trait Platform {
    /// Block until the next frame is due, pushing the input that arrived in
    /// the meantime onto `events`. Returns the elapsed milliseconds.
    fn next_frame(&mut self, events: &mut Vec<InputEvent>) -> Result<u32>;

    fn present(&mut self, scene: &Scene<'_>) -> Result<()>;

    /// True when the platform lost what it last presented (for example on a
    /// terminal resize) and needs the scene again.
    fn take_invalidated(&mut self) -> bool {
        false
    }
}

/// Level after completing `level`, wrapping to 1 after the last one.
/// The flag is true when the game was finished.
pub fn advance_level(level: u32, level_count: u32) -> (u32, bool) {
    if level >= level_count {
        (1, true)
    } else {
        (level + 1, false)
    }
}

pub struct Game {
    config: GameConfig,
    assets: Assets,
    field: Playfield,
    level: u32,
    running: bool,
    stage: Stage,
    saved: Option<Stage>,
    timers: TimerQueue,
    rng: SpawnRng,
    redraw: bool,
}

impl Game {
    pub fn new(config: GameConfig, assets: Assets, field: Playfield, level: u32, seed: u64) -> Self {
        let mut game = Self {
            level: level.clamp(1, config.control.level_count.max(1)),
            config,
            assets,
            field,
            running: true,
            stage: Stage::startup(),
            saved: None,
            timers: TimerQueue::new(),
            rng: SpawnRng::new(seed),
            redraw: true,
        };
        game.set_stage(Stage::startup());
        game
    }

    /// Start from the level recorded in `store`.
    pub fn from_store(
        config: GameConfig,
        assets: Assets,
        field: Playfield,
        store: &impl LevelStore,
        seed: u64,
    ) -> Self {
        let level = resolve_saved_level(store.load_level(), config.control.level_count);
        log::info!("starting at level {}", level);
        Self::new(config, assets, field, level, seed)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn saved_stage(&self) -> Option<&Stage> {
        self.saved.as_ref()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn field(&self) -> Playfield {
        self.field
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            stage: &self.stage,
            level: self.level,
            field: self.field,
            config: &self.config,
            assets: &self.assets,
        }
    }

    /// Replace the active stage and run its entry action. Timers armed by
    /// the previous stage are cancelled.
    pub fn set_stage(&mut self, mut stage: Stage) {
        self.timers.disarm_all();
        let mut ctx = StageContext {
            timers: &mut self.timers,
            rng: &mut self.rng,
        };
        stage.enter(&mut ctx);
        log::debug!("stage {} -> {}", self.stage.kind().as_str(), stage.kind().as_str());
        self.stage = stage;
        self.redraw = true;
    }

    /// Hold the active stage aside and switch to `stage`. Its timers keep
    /// running; the held stage ignores ticks it cannot use.
    pub fn save_and_set_stage(&mut self, mut stage: Stage) -> Result<(), GameError> {
        if self.saved.is_some() {
            debug_assert!(false, "pause slot already occupied");
            return Err(GameError::StageSlotOccupied);
        }
        let mut ctx = StageContext {
            timers: &mut self.timers,
            rng: &mut self.rng,
        };
        stage.enter(&mut ctx);
        let previous = std::mem::replace(&mut self.stage, stage);
        log::debug!("stage {} held aside", previous.kind().as_str());
        self.saved = Some(previous);
        self.redraw = true;
        Ok(())
    }

    /// Bring back the held stage exactly as it was. The entry action is not
    /// repeated. Returns false when nothing was held.
    pub fn restore_stage(&mut self) -> bool {
        match self.saved.take() {
            Some(stage) => {
                log::debug!("stage {} restored", stage.kind().as_str());
                self.stage = stage;
                self.redraw = true;
                true
            }
            None => false,
        }
    }

    fn level_setup(&self) -> LevelSetup {
        LevelSetup::new(self.level, &self.config.control, &self.assets, self.field)
    }

    fn preparation(&self) -> Stage {
        Stage::preparation(self.level, self.config.control.preparation)
    }

    /// React to a transition code emitted by the active stage.
    pub fn apply_transition(&mut self, code: Transition) -> Result<(), GameError> {
        log::debug!(
            "transition {} from {}",
            code.as_str(),
            self.stage.kind().as_str()
        );
        match code {
            Transition::Quit => self.running = false,
            Transition::StartGame | Transition::Restart => self.set_stage(self.preparation()),
            Transition::Prepared => self.set_stage(Stage::level(self.level_setup())),
            Transition::Pause => self.save_and_set_stage(Stage::paused())?,
            Transition::Resume => {
                if !self.restore_stage() {
                    log::warn!("resume requested with no held stage, ignoring");
                }
            }
            Transition::NextLevel => {
                let (next, finished) = advance_level(self.level, self.config.control.level_count);
                self.level = next;
                if finished {
                    log::info!("all levels completed");
                    self.set_stage(Stage::game_end());
                } else {
                    self.set_stage(self.preparation());
                }
            }
            Transition::Reset => self.set_stage(Stage::startup()),
        }
        Ok(())
    }

    /// Run one frame's worth of logic over `events`. Due timer ticks are
    /// appended after the input.
    pub fn process_frame(
        &mut self,
        events: &mut Vec<InputEvent>,
        elapsed_ms: u32,
    ) -> Result<(), GameError> {
        // Ticks that fell due mid-frame still run after this frame's input.
        events.extend(
            self.timers
                .advance(elapsed_ms)
                .into_iter()
                .map(InputEvent::TimerTick),
        );

        for &event in events.iter() {
            let mut ctx = StageContext {
                timers: &mut self.timers,
                rng: &mut self.rng,
            };
            let Some(code) = self.stage.handle(event, &mut ctx) else {
                continue;
            };
            self.apply_transition(code)?;
            if code == Transition::Quit {
                break;
            }
        }

        let mut ctx = StageContext {
            timers: &mut self.timers,
            rng: &mut self.rng,
        };
        if self.stage.update(&mut ctx) == Redraw::Needed {
            self.redraw = true;
        }
        Ok(())
    }

    /// Consume the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Level to persist when the loop ends: a cleared level counts as
    /// completed.
    pub fn final_level(&self) -> u32 {
        match self.stage.as_level() {
            Some(level) if level.is_cleared() => {
                advance_level(self.level, self.config.control.level_count).0
            }
            _ => self.level,
        }
    }

    /// Run until a Quit transition, then persist progress exactly once.
    pub fn run(
        &mut self,
        platform: &mut impl Platform,
        store: &mut impl LevelStore,
    ) -> Result<(), GameError> {
        let mut events = Vec::with_capacity(16);
        while self.running {
            events.clear();
            let elapsed = platform
                .next_frame(&mut events)
                .map_err(GameError::Platform)?;
            self.process_frame(&mut events, elapsed)?;
            let invalidated = platform.take_invalidated();
            if self.take_redraw() || invalidated {
                platform
                    .present(&self.scene())
                    .map_err(GameError::Platform)?;
            }
        }
        self.shutdown(store)
    }

    pub fn shutdown(&mut self, store: &mut impl LevelStore) -> Result<(), GameError> {
        let level = self.final_level();
        log::info!("shutting down at level {}", level);
        store.save_level(level).map_err(GameError::Persist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_config;
    use crate::sprite::tests::assets;
    use crate::stage::StageKind;
    use crate::types::{Key, TimerId};

    fn game(level: u32) -> Game {
        Game::new(sample_config(), assets(), Playfield::new(40, 20), level, 42)
    }

    fn frame(game: &mut Game, events: &[InputEvent]) {
        let mut batch = events.to_vec();
        game.process_frame(&mut batch, 0).unwrap();
    }

    #[test]
    fn test_advance_level() {
        assert_eq!(advance_level(1, 3), (2, false));
        assert_eq!(advance_level(3, 3), (1, true));
        assert_eq!(advance_level(1, 1), (1, true));
    }

    #[test]
    fn test_starts_on_startup_with_redraw() {
        let mut g = game(1);
        assert_eq!(g.stage().kind(), StageKind::Startup);
        assert!(g.take_redraw());
        assert!(!g.take_redraw());
    }

    #[test]
    fn test_level_is_clamped_to_level_count() {
        assert_eq!(game(0).level(), 1);
        assert_eq!(game(99).level(), 3);
    }

    #[test]
    fn test_start_game_enters_preparation() {
        let mut g = game(2);
        frame(&mut g, &[InputEvent::KeyDown(Key::Enter)]);
        let Stage::LevelPreparation(prep) = g.stage() else {
            panic!("expected preparation");
        };
        assert_eq!(prep.level(), 2);
        assert_eq!(prep.countdown(), 3);
        assert!(g.timers().is_armed(TimerId::Countdown));
    }

    #[test]
    fn test_set_stage_cancels_previous_timers() {
        let mut g = game(1);
        frame(&mut g, &[InputEvent::KeyDown(Key::Enter)]);
        g.set_stage(Stage::startup());
        assert!(g.timers().is_empty());
    }

    #[test]
    fn test_pause_and_resume_restore_same_stage() {
        let mut g = game(1);
        g.apply_transition(Transition::Prepared).unwrap();
        frame(&mut g, &[InputEvent::TimerTick(TimerId::Spawn)]);
        frame(&mut g, &[InputEvent::KeyDown(Key::Left)]);
        let before = g.stage().as_level().unwrap().clone();

        frame(&mut g, &[InputEvent::KeyDown(Key::Space)]);
        assert_eq!(g.stage().kind(), StageKind::Paused);
        assert_eq!(g.saved_stage().map(Stage::kind), Some(StageKind::Level));

        g.apply_transition(Transition::Resume).unwrap();
        let after = g.stage().as_level().unwrap();
        assert!(g.saved_stage().is_none());
        assert_eq!(after.hazards(), before.hazards());
        assert_eq!(after.avatar(), before.avatar());
        assert_eq!(after.pumpkins_left(), before.pumpkins_left());
    }

    #[test]
    fn test_pause_keeps_spawn_timer_armed() {
        let mut g = game(1);
        g.apply_transition(Transition::Prepared).unwrap();
        g.apply_transition(Transition::Pause).unwrap();
        assert!(g.timers().is_armed(TimerId::Spawn));
    }

    #[test]
    fn test_second_pause_is_rejected() {
        let mut g = game(1);
        g.apply_transition(Transition::Prepared).unwrap();
        g.save_and_set_stage(Stage::paused()).unwrap();
        let second = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            g.save_and_set_stage(Stage::paused())
        }));
        match second {
            Ok(result) => assert!(matches!(result, Err(GameError::StageSlotOccupied))),
            // debug builds assert
            Err(_) => {}
        }
    }

    #[test]
    fn test_resume_without_saved_stage_is_ignored() {
        let mut g = game(1);
        g.apply_transition(Transition::Resume).unwrap();
        assert_eq!(g.stage().kind(), StageKind::Startup);
    }

    #[test]
    fn test_next_level_increments() {
        let mut g = game(1);
        g.apply_transition(Transition::NextLevel).unwrap();
        assert_eq!(g.level(), 2);
        assert_eq!(g.stage().kind(), StageKind::LevelPreparation);
    }

    #[test]
    fn test_next_level_after_last_goes_to_game_end() {
        let mut g = game(3);
        g.apply_transition(Transition::NextLevel).unwrap();
        assert_eq!(g.level(), 1);
        assert_eq!(g.stage().kind(), StageKind::GameEnd);

        frame(&mut g, &[InputEvent::MouseButtonDown]);
        assert_eq!(g.stage().kind(), StageKind::Startup);
    }

    #[test]
    fn test_restart_replays_same_level() {
        let mut g = game(2);
        g.apply_transition(Transition::Prepared).unwrap();
        g.apply_transition(Transition::Restart).unwrap();
        let Stage::LevelPreparation(prep) = g.stage() else {
            panic!("expected preparation");
        };
        assert_eq!(prep.level(), 2);
        assert_eq!(g.level(), 2);
    }

    #[test]
    fn test_quit_stops_processing_remaining_events() {
        let mut g = game(1);
        frame(
            &mut g,
            &[InputEvent::Quit, InputEvent::KeyDown(Key::Enter)],
        );
        assert!(!g.is_running());
        assert_eq!(g.stage().kind(), StageKind::Startup);
    }

    #[test]
    fn test_first_code_per_event_in_arrival_order() {
        let mut g = game(1);
        frame(
            &mut g,
            &[
                InputEvent::KeyDown(Key::Enter),
                InputEvent::KeyDown(Key::Enter),
            ],
        );
        // Second Enter reaches the preparation stage, which ignores it.
        assert_eq!(g.stage().kind(), StageKind::LevelPreparation);
    }

    #[test]
    fn test_final_level_counts_cleared_level() {
        let mut g = game(1);
        assert_eq!(g.final_level(), 1);
        g.apply_transition(Transition::Prepared).unwrap();
        assert_eq!(g.final_level(), 1);

        let mut s = *g.stage().as_level().unwrap().setup();
        s.pumpkin_amount = 0;
        g.set_stage(Stage::level(s));
        frame(&mut g, &[]);
        assert!(g.stage().as_level().unwrap().is_cleared());
        assert_eq!(g.final_level(), 2);
    }

    #[test]
    fn test_huge_pumpkin_amount_starts_level() {
        let mut cfg = sample_config();
        cfg.control.pumpkin_amount = 4_000_000_000;
        let mut g = Game::new(cfg, assets(), Playfield::new(40, 20), 1, 42);
        g.apply_transition(Transition::Prepared).unwrap();

        let level = g.stage().as_level().unwrap();
        assert!(level.hazards().is_empty());
        assert_eq!(level.pumpkins_left(), 4_000_000_000);
    }

    #[test]
    fn test_due_tick_runs_after_same_frame_input() {
        let mut g = game(1);
        g.apply_transition(Transition::Prepared).unwrap();

        // The spawn interval elapses in the same frame as the pause key.
        let mut batch = vec![InputEvent::KeyDown(Key::Space)];
        g.process_frame(&mut batch, 500).unwrap();
        assert_eq!(batch.last(), Some(&InputEvent::TimerTick(TimerId::Spawn)));
        assert_eq!(g.stage().kind(), StageKind::Paused);

        g.apply_transition(Transition::Resume).unwrap();
        let level = g.stage().as_level().unwrap();
        assert!(level.hazards().is_empty());
        assert_eq!(level.pumpkins_left(), 4);
    }
}
