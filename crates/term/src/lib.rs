//! Terminal front end for the pipe game.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit:
//! `game_view` paints a `GameSnapshot` into it, `renderer` flushes it to the
//! terminal, and `sound` turns game events into bell cues. `clock` measures
//! real frame time for the game tick.

pub mod clock;
pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sound;

pub use conduit_core as core;
pub use conduit_types as types;

pub use clock::FrameClock;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{pipe_glyph, AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sound::{cue_for, Cue, SoundConfig, SoundPlayer, VOLUME_STEP};
