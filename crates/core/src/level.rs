//! The Level stage: hazards fall toward the avatar until all of them have
//! passed (cleared) or one of them hits (failed).

use crate::config::ControlConfig;
use crate::entity::{Avatar, Hazard, Playfield};
use crate::sprite::Assets;
use crate::stage::{Redraw, StageContext};
use crate::types::{Direction, InputEvent, Key, TimerId, Transition};

/// Everything a level needs, fixed when the level is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSetup {
    pub level: u32,
    pub field: Playfield,
    pub pumpkin_amount: u32,
    pub interval_ms: u32,
    pub position_offset: f32,
    pub pumpkin_speed: f32,
    pub victim_speed: f32,
    pub pumpkin_size: (f32, f32),
    pub victim_size: (f32, f32),
}

impl LevelSetup {
    pub fn new(level: u32, control: &ControlConfig, assets: &Assets, field: Playfield) -> Self {
        Self {
            level,
            field,
            pumpkin_amount: control.pumpkin_amount,
            interval_ms: control.interval_ms,
            position_offset: control.position_offset,
            pumpkin_speed: control.pumpkin_speed_for(level),
            victim_speed: control.victim_speed_for(level),
            pumpkin_size: (assets.pumpkin.width() as f32, assets.pumpkin.height() as f32),
            victim_size: (assets.victim.width() as f32, assets.victim.height() as f32),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Playing,
    /// Every hazard spawned and passed; waiting for a click.
    Cleared,
    /// A hazard hit the avatar; waiting for a click.
    Failed,
}

#[derive(Debug, Clone)]
pub struct Level {
    setup: LevelSetup,
    avatar: Avatar,
    hazards: Vec<Hazard>,
    pumpkins_left: u32,
    spawn_pending: bool,
    status: LevelStatus,
}

impl Level {
    pub fn new(setup: LevelSetup) -> Self {
        Self {
            avatar: Avatar::new(setup.victim_size, setup.victim_speed, setup.field),
            hazards: Vec::new(),
            pumpkins_left: setup.pumpkin_amount,
            spawn_pending: false,
            status: LevelStatus::Playing,
            setup,
        }
    }

    pub fn setup(&self) -> &LevelSetup {
        &self.setup
    }

    pub fn number(&self) -> u32 {
        self.setup.level
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn pumpkins_left(&self) -> u32 {
        self.pumpkins_left
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn is_cleared(&self) -> bool {
        self.status == LevelStatus::Cleared
    }

    pub fn is_failed(&self) -> bool {
        self.status == LevelStatus::Failed
    }

    pub fn is_playing(&self) -> bool {
        self.status == LevelStatus::Playing
    }

    pub(crate) fn enter(&mut self, ctx: &mut StageContext<'_>) {
        ctx.timers.arm(TimerId::Spawn, self.setup.interval_ms, true);
    }

    pub(crate) fn handle(&mut self, event: InputEvent) -> Option<Transition> {
        match self.status {
            LevelStatus::Playing => match event {
                InputEvent::TimerTick(TimerId::Spawn) => {
                    self.spawn_pending = true;
                    None
                }
                InputEvent::KeyDown(Key::Left) => {
                    self.avatar.steer(Direction::Left);
                    None
                }
                InputEvent::KeyDown(Key::Right) => {
                    self.avatar.steer(Direction::Right);
                    None
                }
                InputEvent::KeyDown(Key::Space) => Some(Transition::Pause),
                _ => None,
            },
            LevelStatus::Cleared if event.is_click() => Some(Transition::NextLevel),
            LevelStatus::Failed if event.is_click() => Some(Transition::Restart),
            _ => None,
        }
    }

    /// One simulation step. Frozen once the level is cleared or failed.
    pub(crate) fn update(&mut self, ctx: &mut StageContext<'_>) -> Redraw {
        if !self.is_playing() {
            return Redraw::NotNeeded;
        }

        if std::mem::take(&mut self.spawn_pending) && self.pumpkins_left > 0 {
            self.spawn(ctx);
        }

        let field = self.setup.field;
        for hazard in &mut self.hazards {
            hazard.advance();
        }
        self.hazards.retain(|h| !h.is_gone(field));
        self.avatar.advance();

        if self.hazards.iter().any(|h| self.avatar.hits(h)) {
            self.status = LevelStatus::Failed;
            ctx.timers.disarm(TimerId::Spawn);
            log::info!("level {} failed", self.setup.level);
        } else if self.hazards.is_empty() && self.pumpkins_left == 0 {
            self.status = LevelStatus::Cleared;
            ctx.timers.disarm(TimerId::Spawn);
            log::info!("level {} cleared", self.setup.level);
        }

        Redraw::Needed
    }

    fn spawn(&mut self, ctx: &mut StageContext<'_>) {
        let center = ctx
            .rng
            .spawn_center(self.avatar.rect.center_x(), self.setup.position_offset);
        self.hazards.push(Hazard::spawn(
            center,
            self.setup.pumpkin_size,
            self.setup.pumpkin_speed,
            self.setup.field,
        ));
        self.pumpkins_left -= 1;
        if self.pumpkins_left == 0 {
            ctx.timers.disarm(TimerId::Spawn);
        }
    }
}
