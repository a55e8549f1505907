//! TUI Squash (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_squash::{core,input,term,types}`;
//! the implementation lives in dedicated crates under `crates/`.

pub use tui_squash_core as core;
pub use tui_squash_input as input;
pub use tui_squash_term as term;
pub use tui_squash_types as types;
