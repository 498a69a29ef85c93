use conduit::core::{FloodCause, Flow, Grid};
use conduit::types::{CellState, Direction, PipeKind, Position};

fn straight_row(len: i8) -> Grid {
    let mut grid = Grid::new(7, 10, 4);
    for x in 1..=len {
        assert!(grid.place_pipe(x, 4, PipeKind::Horizontal));
    }
    grid
}

#[test]
fn water_runs_along_a_straight_row_and_floods_at_the_edge() {
    let mut grid = straight_row(6);
    let mut flow = Flow::new(&grid);

    for step in 1..=6 {
        assert!(flow.advance(&mut grid));
        assert_eq!(flow.position(), Position::new(step, 4));
        assert!(grid.pipe_at(step, 4).is_some_and(|p| p.is_filled()));
    }
    assert_eq!(flow.segments(), 6);

    assert!(!flow.advance(&mut grid));
    assert_eq!(flow.flood_cause(), Some(FloodCause::Boundary));
    // Nothing outside the grid to mark; the last pipe stays a pipe.
    assert_eq!(grid.cell(6, 4).map(|c| c.state), Some(CellState::Pipe));

    // Flooded flows stay put.
    assert!(!flow.advance(&mut grid));
    assert_eq!(flow.segments(), 6);
}

#[test]
fn gap_in_the_line_floods_the_empty_cell() {
    let mut grid = straight_row(2);
    let mut flow = Flow::new(&grid);
    assert!(flow.advance(&mut grid));
    assert!(flow.advance(&mut grid));
    assert!(!flow.advance(&mut grid));

    assert_eq!(flow.flood_cause(), Some(FloodCause::MissingPipe));
    assert_eq!(grid.cell(3, 4).map(|c| c.state), Some(CellState::Flooded));
    assert_eq!(flow.path(), &[Position::new(1, 4), Position::new(2, 4)]);
}

#[test]
fn closed_wall_rejects_water() {
    let mut grid = Grid::new(7, 10, 0);
    grid.place_pipe(1, 0, PipeKind::Vertical);
    let mut flow = Flow::new(&grid);

    assert!(!flow.advance(&mut grid));
    assert_eq!(flow.flood_cause(), Some(FloodCause::Rejected));
    assert_eq!(grid.cell(1, 0).map(|c| c.state), Some(CellState::Flooded));
    assert_eq!(flow.segments(), 0);
}

#[test]
fn elbows_turn_the_water() {
    let mut grid = Grid::new(7, 10, 2);
    grid.place_pipe(1, 2, PipeKind::ElbowBl);
    grid.place_pipe(1, 3, PipeKind::ElbowTr);
    grid.place_pipe(2, 3, PipeKind::Horizontal);
    let mut flow = Flow::new(&grid);

    assert!(flow.advance(&mut grid));
    assert_eq!(flow.direction(), Direction::Bottom);
    assert!(flow.advance(&mut grid));
    assert_eq!(flow.direction(), Direction::Right);
    assert!(flow.advance(&mut grid));
    assert_eq!(flow.position(), Position::new(2, 3));

    let from = grid.pipe_at(1, 3).and_then(|p| p.water_from);
    assert_eq!(from, Some(Direction::Bottom));
}

#[test]
fn restarting_a_flow_clears_its_path() {
    let mut grid = straight_row(3);
    let mut flow = Flow::new(&grid);
    while flow.advance(&mut grid) {}
    assert!(flow.is_flooded());

    grid.reset();
    flow.start(&grid);
    assert!(!flow.is_flooded());
    assert_eq!(flow.segments(), 0);
    assert!(flow.path().is_empty());
    assert_eq!(flow.position(), grid.entry());
}
