//! Owned, read-only views of a running game for renderers and observers.
//!
//! Nothing here borrows from `Game`: editing a snapshot never reaches back into
//! the simulation.

use crate::grid::Cell;
use crate::types::{CellState, Direction, GameStatus, PipeKind, Position, QUEUE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSnapshot {
    pub state: CellState,
    pub pipe: Option<PipeKind>,
    pub filled: bool,
    pub water_from: Option<Direction>,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            state: cell.state,
            pipe: cell.pipe.map(|p| p.kind),
            filled: cell.pipe.map_or(false, |p| p.is_filled()),
            water_from: cell.pipe.and_then(|p| p.water_from),
        }
    }
}

impl Default for CellSnapshot {
    fn default() -> Self {
        Self {
            state: CellState::Empty,
            pipe: None,
            filled: false,
            water_from: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub score: u32,
    pub length: u32,
    pub discards: u32,
    pub countdown_ms: u32,
    pub flow_interval_ms: u32,
    pub paused: bool,
    pub elapsed_ms: u32,
    pub queue: [PipeKind; QUEUE_SIZE],
    pub pipes_placed: u32,
    pub episode_id: u32,
    pub seed: u32,
    pub width: u8,
    pub height: u8,
    pub entry: Position,
    /// Row-major (y * width + x)
    pub cells: Vec<CellSnapshot>,
    pub path: Vec<Position>,
    /// Cell the water front currently occupies (the entry before the first tick)
    pub head: Position,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.status = GameStatus::Waiting;
        self.score = 0;
        self.length = 0;
        self.discards = 0;
        self.countdown_ms = 0;
        self.flow_interval_ms = 0;
        self.paused = false;
        self.elapsed_ms = 0;
        self.queue = [PipeKind::Horizontal; QUEUE_SIZE];
        self.pipes_placed = 0;
        self.episode_id = 0;
        self.seed = 0;
        self.width = 0;
        self.height = 0;
        self.entry = Position::default();
        self.cells.clear();
        self.path.clear();
        self.head = Position::default();
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<CellSnapshot> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Whether the current front pipe could be dropped right now
    pub fn playable(&self) -> bool {
        self.status.accepts_input() && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            status: GameStatus::Waiting,
            score: 0,
            length: 0,
            discards: 0,
            countdown_ms: 0,
            flow_interval_ms: 0,
            paused: false,
            elapsed_ms: 0,
            queue: [PipeKind::Horizontal; QUEUE_SIZE],
            pipes_placed: 0,
            episode_id: 0,
            seed: 0,
            width: 0,
            height: 0,
            entry: Position::default(),
            cells: Vec::new(),
            path: Vec::new(),
            head: Position::default(),
        };
        s.clear();
        s
    }
}
