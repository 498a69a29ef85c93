//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`InputCommand`]s and keeps the board cursor
//! that keyboard players use to pick a cell.

pub mod cursor;
pub mod map;

pub use conduit_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit, InputCommand};
