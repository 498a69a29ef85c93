//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, leaderboard storage).
//!
//! # Grid Dimensions
//!
//! - **Width**: 7 columns (indexed 0-6)
//! - **Height**: 10 rows (indexed 0-9)
//! - **Entry**: a random row on the left edge, water travelling right
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame interval of the terminal loop (~60 FPS) |
//! | `START_DELAY_MS` | 5000 | Countdown before the first flow tick |
//! | `FLOW_INTERVAL_MS` | 1000 | Base time per water segment |
//! | `FLOW_SPEED_SCALE_MS` | 1 | Interval reduction per point scored |
//! | `MIN_FLOW_INTERVAL_MS` | 400 | Fastest the water ever gets |
//! | `PAR_TIME_MS` | 30000 | Finishing under par earns a speed bonus |
//!
//! # Examples
//!
//! ```
//! use conduit_types::{Direction, PipeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! assert_eq!(Direction::Top.offset(), (0, -1));
//!
//! assert_eq!(PipeKind::from_str("elbow_tl"), Some(PipeKind::ElbowTl));
//! assert_eq!(PipeKind::Cross.as_str(), "cross");
//!
//! assert_eq!(GRID_WIDTH, 7);
//! assert_eq!(GRID_HEIGHT, 10);
//! ```

/// Default grid width in cells (7 columns)
pub const GRID_WIDTH: u8 = 7;

/// Default grid height in cells (10 rows)
pub const GRID_HEIGHT: u8 = 10;

/// Largest grid side accepted by configuration
pub const MAX_GRID_DIM: u8 = 32;

/// Frame interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Countdown before water starts flowing (5 seconds)
pub const START_DELAY_MS: u32 = 5_000;

/// Base time between flow ticks (1 second per segment)
pub const FLOW_INTERVAL_MS: u32 = 1_000;

/// Milliseconds shaved off the flow interval per point of score
pub const FLOW_SPEED_SCALE_MS: u32 = 1;

/// Floor for the dynamic flow interval
pub const MIN_FLOW_INTERVAL_MS: u32 = 400;

/// Minimum number of segments for a run to count as a win
pub const MIN_LENGTH: u32 = 10;

/// Number of upcoming pipes shown in the queue
pub const QUEUE_SIZE: usize = 5;

/// Discards available per run
pub const MAX_DISCARDS: u32 = 3;

/// Flat points for every segment the water enters
pub const POINTS_PER_SEGMENT: u32 = 10;

/// Extra points for flowing through a cross pipe a second time
pub const CROSS_BONUS: u32 = 25;

/// Final-score bonus for a run without discards
pub const NO_DISCARD_BONUS: u32 = 200;

/// Final-score bonus per whole second under par
pub const SPEED_BONUS_PER_SECOND: u32 = 10;

/// Par duration for the speed bonus (30 seconds)
pub const PAR_TIME_MS: u32 = 30_000;

/// Pipe generation weights in catalog order (sum to 100).
pub const PIPE_WEIGHTS: [(PipeKind, u32); 11] = [
    (PipeKind::Horizontal, 20),
    (PipeKind::Vertical, 20),
    (PipeKind::ElbowTl, 8),
    (PipeKind::ElbowTr, 8),
    (PipeKind::ElbowBl, 8),
    (PipeKind::ElbowBr, 8),
    (PipeKind::Cross, 8),
    (PipeKind::TTop, 5),
    (PipeKind::TBottom, 5),
    (PipeKind::TLeft, 5),
    (PipeKind::TRight, 5),
];

/// A side of a cell, or the direction water is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// The facing side (Top ↔ Bottom, Left ↔ Right)
    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step `(dx, dy)`; y grows downwards.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Top => (0, -1),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        }
    }
}

/// The eleven pipe tiles a player can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeKind {
    Horizontal,
    Vertical,
    ElbowTl,
    ElbowTr,
    ElbowBl,
    ElbowBr,
    Cross,
    TTop,
    TBottom,
    TLeft,
    TRight,
}

impl PipeKind {
    /// Every kind, in catalog order.
    pub const ALL: [PipeKind; 11] = [
        PipeKind::Horizontal,
        PipeKind::Vertical,
        PipeKind::ElbowTl,
        PipeKind::ElbowTr,
        PipeKind::ElbowBl,
        PipeKind::ElbowBr,
        PipeKind::Cross,
        PipeKind::TTop,
        PipeKind::TBottom,
        PipeKind::TLeft,
        PipeKind::TRight,
    ];

    /// Parse pipe kind from its snake_case name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use conduit_types::PipeKind;
    ///
    /// assert_eq!(PipeKind::from_str("HORIZONTAL"), Some(PipeKind::Horizontal));
    /// assert_eq!(PipeKind::from_str("t_right"), Some(PipeKind::TRight));
    /// assert_eq!(PipeKind::from_str("spiral"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        PipeKind::ALL.into_iter().find(|k| k.as_str() == lower)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipeKind::Horizontal => "horizontal",
            PipeKind::Vertical => "vertical",
            PipeKind::ElbowTl => "elbow_tl",
            PipeKind::ElbowTr => "elbow_tr",
            PipeKind::ElbowBl => "elbow_bl",
            PipeKind::ElbowBr => "elbow_br",
            PipeKind::Cross => "cross",
            PipeKind::TTop => "t_top",
            PipeKind::TBottom => "t_bottom",
            PipeKind::TLeft => "t_left",
            PipeKind::TRight => "t_right",
        }
    }
}

/// What a grid cell currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Empty,
    Pipe,
    Entry,
    Flooded,
}

/// Session phase
///
/// - **Waiting**: countdown running, pipes may already be placed
/// - **Playing**: water is advancing
/// - **Flooded**: water spilled before reaching the minimum length
/// - **Won**: water spilled after reaching the minimum length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Waiting,
    Playing,
    Flooded,
    Won,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Flooded | GameStatus::Won)
    }

    pub fn accepts_input(self) -> bool {
        matches!(self, GameStatus::Waiting | GameStatus::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Playing => "playing",
            GameStatus::Flooded => "flooded",
            GameStatus::Won => "won",
        }
    }
}

/// Grid coordinates, `x` to the right and `y` downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Neighbouring position one step in `dir` (may be off-grid).
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Commands a front end can apply to a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Place the queue's front pipe at a cell
    Place { x: i8, y: i8 },
    /// Throw away the queue's front pipe
    Discard,
    /// Toggle pause (only while water flows)
    Pause,
    /// Start a fresh run
    Restart,
}

impl GameAction {
    /// Parse a parameterless action by name.
    ///
    /// ```
    /// use conduit_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("discard"), Some(GameAction::Discard));
    /// assert_eq!(GameAction::from_str("place"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "discard" => Some(GameAction::Discard),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Place { .. } => "place",
            GameAction::Discard => "discard",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Core-side event for fire-and-forget observers (sound cues, logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PipePlaced { x: i8, y: i8, kind: PipeKind },
    PipeDiscarded { kind: PipeKind },
    /// Countdown ran out and the first flow tick is pending.
    FlowStarted,
    WaterAdvanced { x: i8, y: i8, cross_bonus: bool },
    LevelComplete { score: u32 },
    LevelFailed { length: u32 },
}
