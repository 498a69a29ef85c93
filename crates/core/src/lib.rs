//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the pipe rules, the water simulation and the session
//! state machine. It has **zero dependencies** on terminal I/O or storage,
//! making it:
//!
//! - **Deterministic**: Same seed produces the same entry row and pipe queue
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`pipes`]: pipe catalog, entry checks and exit resolution
//! - [`grid`]: 7x10 cell grid with placement validation and water marks
//! - [`flow`]: step-by-step water advance and flood detection
//! - [`game_state`]: countdown, flow ticking, scoring and game lifecycle
//! - [`rng`]: seeded LCG and the fixed-length pipe queue
//! - [`scoring`]: flow speed, per-segment points and end-of-run bonuses
//! - [`snapshot`]: owned copies of the game state for renderers
//!
//! # Game Rules
//!
//! - **Countdown**: 5 seconds to lay pipe before water leaves the entry
//! - **Flow**: one segment per interval; the interval shrinks as score grows
//! - **Flood**: water hits an empty cell, a closed side, or the grid edge
//! - **Win**: at least 10 segments before the flood
//! - **Discards**: 3 per run; keeping all of them earns a bonus
//!
//! # Example
//!
//! ```
//! use conduit_core::Game;
//! use conduit_core::types::{GameAction, GameStatus, START_DELAY_MS};
//!
//! let mut game = Game::new(12345);
//! assert_eq!(game.status(), GameStatus::Waiting);
//!
//! // Lay a pipe next to the entry, then let the countdown run out.
//! let entry = game.grid().entry();
//! game.apply_action(GameAction::Place { x: entry.x + 1, y: entry.y });
//! game.tick(START_DELAY_MS);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```
//!
//! # Timing
//!
//! Call [`Game::tick`](game_state::Game::tick) every frame with the elapsed
//! milliseconds. Owed flow ticks are processed in order within one call.

pub mod flow;
pub mod game_state;
pub mod grid;
pub mod pipes;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use conduit_types as types;

// Re-export commonly used types for convenience
pub use flow::{FloodCause, Flow};
pub use game_state::{Game, GameConfig};
pub use grid::{Cell, Grid, Pipe};
pub use pipes::{can_enter, connections, exit_directions, weighted_random_kind};
pub use rng::{PipeQueue, SimpleRng};
pub use scoring::{calculate_final_score, flow_interval_ms, FinalScore};
pub use snapshot::{CellSnapshot, GameSnapshot};
