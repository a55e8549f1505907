//! Core game logic module - stages, entities and the controller
//!
//! This crate contains the game rules, the stage state machine and the frame
//! loop. Terminal I/O stays outside: rendering, input polling and frame pacing
//! are reached through the [`Platform`] trait, saves through [`LevelStore`].
//!
//! - **Deterministic**: the hazard RNG is seeded, timers advance by the
//!   elapsed time handed in, so a run replays exactly
//! - **Testable**: every stage can be driven with plain `InputEvent`s
//!
//! # Module Structure
//!
//! - [`config`]: typed configuration parsed from the JSON document
//! - [`entity`]: falling hazards, the avatar and the playfield
//! - [`level`]: the Level stage (spawning, movement, collision, clear/fail)
//! - [`stage`]: the stage enum with shared quit handling
//! - [`game`]: controller owning the active stage, the pause slot and the loop
//! - [`timer`]: arm/disarm timer service delivering ticks as input events
//! - [`store`]: persisted level number
//! - [`sprite`]: text-art sprites used for drawing and collision shapes
//! - [`rng`]: seeded hazard placement
//!
//! # Game Flow
//!
//! ```text
//! Startup --Enter--> LevelPreparation(n) --countdown--> Level(n)
//!   Level --Space--> Paused --any key--> Level (same state)
//!   Level cleared --click--> LevelPreparation(n+1) | GameEnd (after last)
//!   Level failed  --click--> LevelPreparation(n)
//!   GameEnd --click--> Startup
//! ```
//!
//! Quit (or Escape) ends the loop from any stage; the level is saved once.
//!
//! # Example
//!
//! ```
//! use tui_squash_core::stage::{Stage, StageContext, StageKind};
//! use tui_squash_core::timer::TimerQueue;
//! use tui_squash_core::SpawnRng;
//! use tui_squash_types::{InputEvent, Key, Transition};
//!
//! let mut timers = TimerQueue::new();
//! let mut rng = SpawnRng::new(7);
//! let mut ctx = StageContext { timers: &mut timers, rng: &mut rng };
//!
//! let mut stage = Stage::startup();
//! stage.enter(&mut ctx);
//! assert_eq!(stage.kind(), StageKind::Startup);
//! assert_eq!(
//!     stage.handle(InputEvent::KeyDown(Key::Enter), &mut ctx),
//!     Some(Transition::StartGame)
//! );
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod level;
pub mod rng;
pub mod sprite;
pub mod stage;
pub mod store;
pub mod timer;

pub use tui_squash_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use entity::{Avatar, Hazard, Playfield};
pub use error::{AssetError, ConfigError, ConfigProblem, GameError};
pub use game::{advance_level, Game, Platform, Scene};
pub use level::{Level, LevelSetup, LevelStatus};
pub use rng::SpawnRng;
pub use sprite::{Assets, Sprite};
pub use stage::{Redraw, Stage, StageContext, StageKind};
pub use store::{resolve_saved_level, JsonLevelStore, LevelStore};
pub use timer::{TimerQueue, TimerService};
