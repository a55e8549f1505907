//! Stage state machine.
//!
//! A [`Stage`] is one phase of the game flow. Every stage runs the same three
//! hooks, dispatched by the controller:
//!
//! - `enter`: entry action (arm timers, request the first draw)
//! - `handle`: react to one input event, possibly returning a [`Transition`]
//! - `update`: per-frame step, returning whether the screen must be redrawn
//!
//! Quit handling is shared: a `Quit` event or Escape yields
//! [`Transition::Quit`] before any stage-specific handling runs.
//!
//! | Stage | Leaves on |
//! |-------|-----------|
//! | Startup | Enter → `StartGame` |
//! | LevelPreparation | countdown reaches zero → `Prepared` |
//! | Level | Space → `Pause`, click after clear → `NextLevel`, click after failure → `Restart` |
//! | Paused | any key → `Resume` |
//! | GameEnd | click → `Reset` |

pub use crate::level::{Level, LevelSetup, LevelStatus};

use crate::rng::SpawnRng;
use crate::timer::TimerService;
use crate::types::{InputEvent, Key, TimerId, Transition, COUNTDOWN_INTERVAL_MS};

/// Capabilities a stage may use while it runs.
pub struct StageContext<'a> {
    pub timers: &'a mut dyn TimerService,
    pub rng: &'a mut SpawnRng,
}

/// Result of a stage update, read once per frame by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Needed,
    NotNeeded,
}

impl Redraw {
    fn from_dirty(dirty: &mut bool) -> Self {
        if std::mem::take(dirty) {
            Redraw::Needed
        } else {
            Redraw::NotNeeded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Startup,
    LevelPreparation,
    Level,
    Paused,
    GameEnd,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Startup => "startup",
            StageKind::LevelPreparation => "levelPreparation",
            StageKind::Level => "level",
            StageKind::Paused => "paused",
            StageKind::GameEnd => "gameEnd",
        }
    }
}

/// Title screen.
#[derive(Debug, Clone, Default)]
pub struct Startup {
    dirty: bool,
}

/// Countdown shown before a level begins.
#[derive(Debug, Clone)]
pub struct LevelPreparation {
    level: u32,
    countdown: u32,
    dirty: bool,
}

impl LevelPreparation {
    pub fn new(level: u32, countdown: u32) -> Self {
        Self {
            level,
            countdown,
            dirty: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    fn handle(&mut self, event: InputEvent, ctx: &mut StageContext<'_>) -> Option<Transition> {
        if event != InputEvent::TimerTick(TimerId::Countdown) || self.countdown == 0 {
            return None;
        }
        self.countdown -= 1;
        self.dirty = true;
        if self.countdown == 0 {
            ctx.timers.disarm(TimerId::Countdown);
            return Some(Transition::Prepared);
        }
        None
    }
}

/// Overlay shown while a level is held aside.
#[derive(Debug, Clone, Default)]
pub struct Paused {
    dirty: bool,
}

/// Congratulations screen after the final level.
#[derive(Debug, Clone, Default)]
pub struct GameEnd {
    dirty: bool,
}

#[derive(Debug, Clone)]
pub enum Stage {
    Startup(Startup),
    LevelPreparation(LevelPreparation),
    Level(Level),
    Paused(Paused),
    GameEnd(GameEnd),
}

impl Stage {
    pub fn startup() -> Self {
        Stage::Startup(Startup::default())
    }

    pub fn preparation(level: u32, countdown: u32) -> Self {
        Stage::LevelPreparation(LevelPreparation::new(level, countdown))
    }

    pub fn level(setup: LevelSetup) -> Self {
        Stage::Level(Level::new(setup))
    }

    pub fn paused() -> Self {
        Stage::Paused(Paused::default())
    }

    pub fn game_end() -> Self {
        Stage::GameEnd(GameEnd::default())
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Startup(_) => StageKind::Startup,
            Stage::LevelPreparation(_) => StageKind::LevelPreparation,
            Stage::Level(_) => StageKind::Level,
            Stage::Paused(_) => StageKind::Paused,
            Stage::GameEnd(_) => StageKind::GameEnd,
        }
    }

    pub fn as_level(&self) -> Option<&Level> {
        match self {
            Stage::Level(level) => Some(level),
            _ => None,
        }
    }

    /// Entry action.
    pub fn enter(&mut self, ctx: &mut StageContext<'_>) {
        match self {
            Stage::Startup(s) => s.dirty = true,
            Stage::LevelPreparation(s) => {
                s.dirty = true;
                ctx.timers
                    .arm(TimerId::Countdown, COUNTDOWN_INTERVAL_MS, true);
            }
            Stage::Level(level) => level.enter(ctx),
            Stage::Paused(s) => s.dirty = true,
            Stage::GameEnd(s) => s.dirty = true,
        }
    }

    /// Handle one input event. The shared quit check runs first; when it
    /// yields a code the stage never sees the event.
    pub fn handle(&mut self, event: InputEvent, ctx: &mut StageContext<'_>) -> Option<Transition> {
        if let Some(code) = quit_check(event) {
            return Some(code);
        }
        match self {
            Stage::Startup(_) => {
                (event == InputEvent::KeyDown(Key::Enter)).then_some(Transition::StartGame)
            }
            Stage::LevelPreparation(s) => s.handle(event, ctx),
            Stage::Level(level) => level.handle(event),
            Stage::Paused(_) => event.is_key_down().then_some(Transition::Resume),
            Stage::GameEnd(_) => event.is_click().then_some(Transition::Reset),
        }
    }

    /// Per-frame step.
    pub fn update(&mut self, ctx: &mut StageContext<'_>) -> Redraw {
        match self {
            Stage::Startup(s) => Redraw::from_dirty(&mut s.dirty),
            Stage::LevelPreparation(s) => Redraw::from_dirty(&mut s.dirty),
            Stage::Level(level) => level.update(ctx),
            Stage::Paused(s) => Redraw::from_dirty(&mut s.dirty),
            Stage::GameEnd(s) => Redraw::from_dirty(&mut s.dirty),
        }
    }
}

fn quit_check(event: InputEvent) -> Option<Transition> {
    match event {
        InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => Some(Transition::Quit),
        _ => None,
    }
}
