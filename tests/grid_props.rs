use proptest::prelude::*;

use conduit::core::{Flow, Game, Grid};
use conduit::types::{
    CellState, GameStatus, PipeKind, FLOW_INTERVAL_MS, MAX_DISCARDS, QUEUE_SIZE, START_DELAY_MS,
};

fn arb_kind() -> impl Strategy<Value = PipeKind> {
    (0..PipeKind::ALL.len()).prop_map(|i| PipeKind::ALL[i])
}

#[derive(Debug, Clone)]
enum Op {
    Place(i8, i8),
    Discard,
    Tick(u32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-2i8..10, -2i8..13).prop_map(|(x, y)| Op::Place(x, y)),
        1 => Just(Op::Discard),
        2 => (0u32..1_500).prop_map(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn prop_placement_only_lands_on_empty_cells(
        entry_row in 0u8..10,
        placements in prop::collection::vec((-2i8..10, -2i8..13, arb_kind()), 0..80),
    ) {
        let mut grid = Grid::new(7, 10, entry_row);
        for (x, y, kind) in placements {
            let was_valid = grid.is_valid_placement(x, y);
            let before = grid.cell(x, y).copied();
            let placed = grid.place_pipe(x, y, kind);
            prop_assert_eq!(placed, was_valid);
            if placed {
                prop_assert_eq!(grid.cell(x, y).map(|c| c.state), Some(CellState::Pipe));
                prop_assert_eq!(grid.pipe_at(x, y).map(|p| p.kind), Some(kind));
            } else {
                prop_assert_eq!(grid.cell(x, y).copied(), before);
            }
        }
        let entry = grid.entry();
        prop_assert_eq!(grid.cell(entry.x, entry.y).map(|c| c.state), Some(CellState::Entry));
    }

    #[test]
    fn prop_flow_path_stays_on_pipes(
        placements in prop::collection::vec((0i8..7, 0i8..10, arb_kind()), 0..70),
    ) {
        let mut grid = Grid::new(7, 10, 5);
        for (x, y, kind) in placements {
            grid.place_pipe(x, y, kind);
        }
        let mut flow = Flow::new(&grid);
        let mut steps = 0;
        while flow.advance(&mut grid) {
            steps += 1;
            // Crosses and tees can close a loop the water never leaves.
            if steps > 7 * 10 * 4 {
                break;
            }
        }
        prop_assert_eq!(flow.segments() as usize, flow.path().len());
        for pos in flow.path() {
            prop_assert!(grid.pipe_at(pos.x, pos.y).is_some());
        }
    }

    #[test]
    fn prop_game_counters_stay_in_range(
        seed in any::<u32>(),
        ops in prop::collection::vec(arb_op(), 0..60),
    ) {
        let mut game = Game::new(seed);
        let mut last_score = 0;
        for op in ops {
            match op {
                Op::Place(x, y) => { game.place_pipe(x, y); }
                Op::Discard => { game.discard(); }
                Op::Tick(ms) => { game.tick(ms); }
            }
            prop_assert_eq!(game.queue().len(), QUEUE_SIZE);
            prop_assert!(game.discards_remaining() <= MAX_DISCARDS);
            prop_assert!(game.score() >= last_score);
            prop_assert!(game.flow_interval_ms() <= FLOW_INTERVAL_MS);
            prop_assert_eq!(game.length() as usize, game.flow().path().len());
            last_score = game.score();
        }
        game.tick(START_DELAY_MS + FLOW_INTERVAL_MS);
        prop_assert!(game.status() != GameStatus::Waiting);
    }
}
