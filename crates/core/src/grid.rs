//! Grid module - manages the pipe board
//!
//! The grid is a width x height array of cells (7x10 by default). Each cell is
//! empty, holds a pipe, is the water entry, or has been flooded.
//! Uses a flat vector in row-major order (y * width + x).
//! Coordinates: (x, y) where x grows to the right and y grows downwards.
//!
//! Exactly one cell is the entry. The entry position and direction survive
//! [`Grid::reset`]; all other cells are rebuilt empty.

use crate::pipes::connections;
use crate::types::{CellState, Direction, PipeKind, Position};

/// A placed pipe instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipe {
    pub kind: PipeKind,
    pub connections: &'static [Direction],
    /// 0 = dry, 1 = filled
    pub water_level: u8,
    /// Travel direction of the water that filled this pipe
    pub water_from: Option<Direction>,
}

impl Pipe {
    pub fn new(kind: PipeKind) -> Self {
        Self {
            kind,
            connections: connections(kind),
            water_level: 0,
            water_from: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.water_level > 0
    }
}

/// A single grid cell. `pipe` is `Some` iff `state == CellState::Pipe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub state: CellState,
    pub pipe: Option<Pipe>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        state: CellState::Empty,
        pipe: None,
    };

    const ENTRY: Cell = Cell {
        state: CellState::Entry,
        pipe: None,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The game grid using flat vector storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
    entry: Position,
    entry_direction: Direction,
}

impl Grid {
    /// Create an empty grid with the entry on the left edge at `entry_row`
    ///
    /// `entry_row` is clamped into the grid; water enters travelling right.
    pub fn new(width: u8, height: u8, entry_row: u8) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let row = entry_row.min(height - 1);
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
            entry: Position::new(0, row as i8),
            entry_direction: Direction::Right,
        };
        grid.mark_entry();
        grid
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    fn mark_entry(&mut self) {
        if let Some(idx) = self.index(self.entry.x, self.entry.y) {
            self.cells[idx] = Cell::ENTRY;
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn entry(&self) -> Position {
        self.entry
    }

    pub fn entry_direction(&self) -> Direction {
        self.entry_direction
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || y < 0 || x as i16 >= self.width as i16 || y as i16 >= self.height as i16
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Move the entry to a new cell and travel direction
    ///
    /// The old entry cell reverts to empty if it is still marked as entry.
    /// Returns false (no mutation) if the position is out of bounds.
    pub fn set_entry(&mut self, x: i8, y: i8, direction: Direction) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if let Some(old) = self.index(self.entry.x, self.entry.y) {
            if self.cells[old].state == CellState::Entry {
                self.cells[old] = Cell::EMPTY;
            }
        }
        self.entry = Position::new(x, y);
        self.entry_direction = direction;
        self.cells[idx] = Cell::ENTRY;
        true
    }

    /// Check if a pipe can go at (x, y): in bounds and empty
    pub fn is_valid_placement(&self, x: i8, y: i8) -> bool {
        matches!(self.cell(x, y), Some(cell) if cell.state == CellState::Empty)
    }

    /// Place a dry pipe; returns false without mutating on an invalid cell
    pub fn place_pipe(&mut self, x: i8, y: i8, kind: PipeKind) -> bool {
        if !self.is_valid_placement(x, y) {
            return false;
        }
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        self.cells[idx] = Cell {
            state: CellState::Pipe,
            pipe: Some(Pipe::new(kind)),
        };
        true
    }

    pub fn pipe_at(&self, x: i8, y: i8) -> Option<&Pipe> {
        self.cell(x, y).and_then(|cell| cell.pipe.as_ref())
    }

    /// Record water in the pipe at (x, y); no-op without a pipe
    pub fn set_water_level(&mut self, x: i8, y: i8, level: u8, from: Direction) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if let Some(pipe) = self.cells[idx].pipe.as_mut() {
            pipe.water_level = level;
            pipe.water_from = Some(from);
        }
    }

    /// Mark (x, y) as flooded; out-of-bounds positions are ignored
    pub fn set_flooded(&mut self, x: i8, y: i8) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx].state = CellState::Flooded;
        }
    }

    /// Rebuild every cell empty and re-mark the entry
    pub fn reset(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.mark_entry();
    }

    /// Number of cells currently holding a pipe
    pub fn pipe_count(&self) -> usize {
        self.cells.iter().filter(|c| c.pipe.is_some()).count()
    }
}
