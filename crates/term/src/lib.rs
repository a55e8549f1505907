//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the terminal. It avoids widget
//! toolkits and instead renders into a simple framebuffer that is diffed and
//! flushed to the terminal backend.
//!
//! - [`fb`]: styled cell framebuffer with clipped blitting of text art
//! - [`font`]: banner font and emphasis tiers
//! - [`view`]: scene to framebuffer, one layout per stage
//! - [`renderer`]: diffing crossterm writer
//! - [`platform`]: the core `Platform` for a real terminal

pub mod fb;
pub mod font;
pub mod platform;
pub mod renderer;
pub mod view;

pub use tui_squash_core as core;
pub use tui_squash_input as input;
pub use tui_squash_types as types;

pub use fb::{Cell, CellStyle, ClipRect, FrameBuffer, Rgb, TextArt};
pub use font::{BannerFont, Font, TextImage};
pub use platform::TerminalPlatform;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{FieldArea, StageView, Viewport};
