//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into
//! [`crate::types::InputEvent`]. Frame pacing and polling live in the
//! terminal crate; this one only translates.

pub mod map;

pub use tui_squash_types as types;

pub use map::{handle_key_event, handle_mouse_event, map_event, map_key, should_quit};
