//! Flow module - the water-advance simulator
//!
//! `Flow` does not own the grid; [`Flow::advance`] borrows it mutably for the
//! duration of one step, so the grid's water marks have exactly one writer.
//!
//! Once flooded, every further `advance` is a no-op returning false until
//! [`Flow::start`] is called again.

use std::collections::HashSet;

use crate::grid::Grid;
use crate::pipes::{can_enter, is_cross, resolve_exit};
use crate::types::{Direction, Position};

/// Why the water stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodCause {
    /// Next step leaves the grid (no cell is marked)
    Boundary,
    /// Next cell holds no pipe
    MissingPipe,
    /// Next pipe has no opening on the entry wall
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Flow {
    position: Position,
    direction: Direction,
    segments: u32,
    path: Vec<Position>,
    flooded: Option<FloodCause>,
    /// (cell, travel direction on entry) for every cross pipe traversal
    cross_visits: HashSet<(Position, Direction)>,
}

impl Flow {
    /// Create a flow positioned at the grid's entry
    pub fn new(grid: &Grid) -> Self {
        Self {
            position: grid.entry(),
            direction: grid.entry_direction(),
            segments: 0,
            path: Vec::new(),
            flooded: None,
            cross_visits: HashSet::new(),
        }
    }

    /// Reset all transient state back to the grid's entry
    pub fn start(&mut self, grid: &Grid) {
        self.position = grid.entry();
        self.direction = grid.entry_direction();
        self.segments = 0;
        self.path.clear();
        self.flooded = None;
        self.cross_visits.clear();
    }

    /// Advance water by one segment. Returns false if flooded.
    pub fn advance(&mut self, grid: &mut Grid) -> bool {
        if self.flooded.is_some() {
            return false;
        }

        let next = self.position.step(self.direction);

        if grid.is_out_of_bounds(next.x, next.y) {
            return self.flood(FloodCause::Boundary, next, grid);
        }

        let Some(kind) = grid.pipe_at(next.x, next.y).map(|p| p.kind) else {
            return self.flood(FloodCause::MissingPipe, next, grid);
        };

        if !can_enter(kind, self.direction) {
            return self.flood(FloodCause::Rejected, next, grid);
        }

        self.position = next;
        self.path.push(next);
        self.segments += 1;

        if is_cross(kind) {
            self.cross_visits.insert((next, self.direction));
        }

        grid.set_water_level(next.x, next.y, 1, self.direction);

        // can_enter held, so a two-or-more sided pipe always leaves an exit
        match resolve_exit(kind, self.direction) {
            Some(exit) => {
                self.direction = exit;
                true
            }
            None => self.flood(FloodCause::Rejected, next, grid),
        }
    }

    fn flood(&mut self, cause: FloodCause, at: Position, grid: &mut Grid) -> bool {
        if cause != FloodCause::Boundary {
            grid.set_flooded(at.x, at.y);
        }
        self.flooded = Some(cause);
        tracing::debug!(?cause, x = at.x, y = at.y, segments = self.segments, "water flooded");
        false
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Every cell the water entered, in order (revisits included)
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// How many times the water has entered `pos`
    pub fn visits(&self, pos: Position) -> usize {
        self.path.iter().filter(|&&p| p == pos).count()
    }

    pub fn is_flooded(&self) -> bool {
        self.flooded.is_some()
    }

    pub fn flood_cause(&self) -> Option<FloodCause> {
        self.flooded
    }

    pub fn cross_visits(&self) -> usize {
        self.cross_visits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellState, PipeKind};

    fn grid_with_entry_row(row: u8) -> Grid {
        Grid::new(7, 10, row)
    }

    #[test]
    fn test_no_adjacent_pipe_floods_immediately() {
        let mut grid = grid_with_entry_row(3);
        let mut flow = Flow::new(&grid);

        assert!(!flow.advance(&mut grid));
        assert!(flow.is_flooded());
        assert_eq!(flow.segments(), 0);
        assert_eq!(flow.flood_cause(), Some(FloodCause::MissingPipe));
        assert_eq!(grid.cell(1, 3).unwrap().state, CellState::Flooded);
    }

    #[test]
    fn test_straight_run_of_horizontals() {
        let mut grid = grid_with_entry_row(5);
        for x in 1..=4 {
            assert!(grid.place_pipe(x, 5, PipeKind::Horizontal));
        }
        let mut flow = Flow::new(&grid);

        for _ in 0..4 {
            assert!(flow.advance(&mut grid));
        }

        assert_eq!(flow.segments(), 4);
        assert!(!flow.is_flooded());
        assert_eq!(flow.position(), Position::new(4, 5));
        assert_eq!(flow.direction(), Direction::Right);
        let pipe = grid.pipe_at(4, 5).unwrap();
        assert_eq!(pipe.water_level, 1);
        assert_eq!(pipe.water_from, Some(Direction::Right));
    }

    #[test]
    fn test_rejecting_pipe_floods() {
        let mut grid = grid_with_entry_row(0);
        grid.place_pipe(1, 0, PipeKind::Vertical);
        let mut flow = Flow::new(&grid);

        assert!(!flow.advance(&mut grid));
        assert_eq!(flow.flood_cause(), Some(FloodCause::Rejected));
        assert_eq!(grid.cell(1, 0).unwrap().state, CellState::Flooded);
    }

    #[test]
    fn test_boundary_exit_marks_nothing() {
        let mut grid = grid_with_entry_row(0);
        grid.place_pipe(1, 0, PipeKind::ElbowTl);
        let mut flow = Flow::new(&grid);

        assert!(flow.advance(&mut grid));
        assert_eq!(flow.direction(), Direction::Top);
        assert!(!flow.advance(&mut grid));
        assert_eq!(flow.flood_cause(), Some(FloodCause::Boundary));
        assert!(grid
            .cells()
            .iter()
            .all(|c| c.state != CellState::Flooded));
    }

    #[test]
    fn test_flooded_flow_stays_flooded() {
        let mut grid = grid_with_entry_row(2);
        let mut flow = Flow::new(&grid);
        assert!(!flow.advance(&mut grid));

        grid.place_pipe(1, 2, PipeKind::Horizontal);
        assert!(!flow.advance(&mut grid));
        assert_eq!(flow.segments(), 0);
    }

    #[test]
    fn test_start_resets_transient_state() {
        let mut grid = grid_with_entry_row(1);
        grid.place_pipe(1, 1, PipeKind::Cross);
        let mut flow = Flow::new(&grid);
        assert!(flow.advance(&mut grid));
        assert!(!flow.advance(&mut grid));
        assert_eq!(flow.cross_visits(), 1);

        flow.start(&grid);
        flow.start(&grid);
        assert_eq!(flow.segments(), 0);
        assert!(flow.path().is_empty());
        assert!(!flow.is_flooded());
        assert_eq!(flow.cross_visits(), 0);
        assert_eq!(flow.position(), grid.entry());
        assert_eq!(flow.direction(), Direction::Right);
    }

    #[test]
    fn test_cross_loop_revisits_cross_cell() {
        // Entry at (0,1). The cross sends water up; a loop of elbows brings
        // it back into the cross from below.
        //
        //   y=0:  .  BR  BL
        //   y=1:  E  +   |
        //   y=2:  .  TR  TL
        let mut grid = grid_with_entry_row(1);
        grid.place_pipe(1, 1, PipeKind::Cross); // right -> exits top
        grid.place_pipe(1, 0, PipeKind::ElbowBr); // enters bottom, exits right
        grid.place_pipe(2, 0, PipeKind::ElbowBl); // enters left, exits bottom
        grid.place_pipe(2, 1, PipeKind::Vertical); // down
        grid.place_pipe(2, 2, PipeKind::ElbowTl); // enters top, exits left
        grid.place_pipe(1, 2, PipeKind::ElbowTr); // enters right, exits top
        let mut flow = Flow::new(&grid);

        for _ in 0..7 {
            assert!(flow.advance(&mut grid));
        }

        // Back in the cross travelling up; it keeps going up.
        assert_eq!(flow.position(), Position::new(1, 1));
        assert_eq!(flow.visits(Position::new(1, 1)), 2);
        assert_eq!(flow.direction(), Direction::Top);
        assert_eq!(flow.cross_visits(), 2);
    }

    #[test]
    fn test_path_is_read_only_view() {
        let mut grid = grid_with_entry_row(0);
        grid.place_pipe(1, 0, PipeKind::Horizontal);
        let mut flow = Flow::new(&grid);
        flow.advance(&mut grid);

        let mut copy = flow.path().to_vec();
        copy.push(Position::new(6, 6));
        assert_eq!(flow.path(), &[Position::new(1, 0)]);
    }
}
