use conduit::core::{Game, GameConfig};
use conduit::types::{
    CellState, GameAction, GameEvent, GameStatus, FLOW_INTERVAL_MS, MAX_DISCARDS, QUEUE_SIZE,
    START_DELAY_MS,
};

#[test]
fn new_game_waits_with_full_queue_and_entry_on_left_edge() {
    let game = Game::new(42);
    assert_eq!(game.status(), GameStatus::Waiting);
    assert_eq!(game.countdown_ms(), START_DELAY_MS);
    assert_eq!(game.discards_remaining(), MAX_DISCARDS);
    assert_eq!(game.queue().len(), QUEUE_SIZE);
    assert!(game.current_pipe().is_some());

    let entry = game.grid().entry();
    assert_eq!(entry.x, 0);
    assert!(entry.y >= 0 && (entry.y as u8) < game.grid().height());
    assert_eq!(
        game.grid().cell(entry.x, entry.y).map(|c| c.state),
        Some(CellState::Entry)
    );
    assert_eq!(game.grid().pipe_count(), 0);
}

#[test]
fn same_seed_same_game() {
    let a = Game::new(777);
    let b = Game::new(777);
    assert_eq!(a.snapshot(), b.snapshot());

    let mut a = a;
    let mut b = b;
    for game in [&mut a, &mut b] {
        let entry = game.grid().entry();
        game.place_pipe(1, entry.y);
        game.discard();
        game.tick(START_DELAY_MS + 2 * FLOW_INTERVAL_MS);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn placing_consumes_queue_front_and_keeps_length() {
    let mut game = Game::new(9);
    let before = game.queue();
    let entry = game.grid().entry();

    assert!(game.place_pipe(1, entry.y));
    let after = game.queue();
    assert_eq!(after.len(), QUEUE_SIZE);
    assert_eq!(&after[..QUEUE_SIZE - 1], &before[1..]);
    assert_eq!(game.pipes_placed(), 1);
    assert_eq!(
        game.grid().pipe_at(1, entry.y).map(|p| p.kind),
        Some(before[0])
    );
}

#[test]
fn invalid_placements_change_nothing() {
    let mut game = Game::new(3);
    let entry = game.grid().entry();
    let before = game.snapshot();

    assert!(!game.place_pipe(entry.x, entry.y));
    assert!(!game.place_pipe(-1, 0));
    assert!(!game.place_pipe(0, 100));
    assert_eq!(game.snapshot(), before);

    assert!(game.place_pipe(3, 3));
    let occupied = game.snapshot();
    assert!(!game.place_pipe(3, 3));
    assert_eq!(game.snapshot(), occupied);
}

#[test]
fn discards_run_out() {
    let mut game = Game::new(5);
    for left in (0..MAX_DISCARDS).rev() {
        let front = game.queue()[1];
        assert!(game.discard());
        assert_eq!(game.discards_remaining(), left);
        assert_eq!(game.queue()[0], front);
    }
    let queue = game.queue();
    assert!(!game.discard());
    assert_eq!(game.queue(), queue);
    assert_eq!(game.discards_remaining(), 0);
}

#[test]
fn countdown_leftover_carries_into_flow() {
    let mut game = Game::new(1);
    assert!(!game.tick(START_DELAY_MS - 10));
    assert_eq!(game.status(), GameStatus::Waiting);
    assert_eq!(game.countdown_ms(), 10);

    assert!(!game.tick(25));
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.countdown_ms(), 0);
    assert_eq!(game.pending_flow_ms(), 15);
    assert_eq!(game.elapsed_ms(), 15);
}

#[test]
fn water_with_no_pipes_floods_on_first_step() {
    let mut game = Game::new(11);
    let entry = game.grid().entry();

    assert!(game.tick(START_DELAY_MS + FLOW_INTERVAL_MS));
    assert_eq!(game.status(), GameStatus::Flooded);
    assert_eq!(game.length(), 0);
    assert_eq!(game.score(), 0);
    assert_eq!(
        game.grid().cell(entry.x + 1, entry.y).map(|c| c.state),
        Some(CellState::Flooded)
    );

    let events = game.take_events();
    assert_eq!(events.first(), Some(&GameEvent::FlowStarted));
    assert_eq!(events.last(), Some(&GameEvent::LevelFailed { length: 0 }));
    assert!(game.take_events().is_empty());
}

#[test]
fn finished_game_ignores_input_and_time() {
    let mut game = Game::new(11);
    game.tick(START_DELAY_MS + FLOW_INTERVAL_MS);
    assert!(game.status().is_terminal());

    let snap = game.snapshot();
    assert!(!game.tick(10 * FLOW_INTERVAL_MS));
    assert!(!game.place_pipe(4, 4));
    assert!(!game.discard());
    assert!(!game.toggle_pause());
    assert_eq!(game.snapshot(), snap);
}

#[test]
fn pause_only_while_flowing() {
    let mut game = Game::new(2);
    assert!(!game.apply_action(GameAction::Pause));

    let entry = game.grid().entry();
    game.place_pipe(1, entry.y);
    game.tick(START_DELAY_MS);
    assert_eq!(game.status(), GameStatus::Playing);

    assert!(game.apply_action(GameAction::Pause));
    assert!(game.paused());
    assert!(!game.tick(5 * FLOW_INTERVAL_MS));
    assert_eq!(game.length(), 0);

    assert!(game.apply_action(GameAction::Pause));
    assert!(!game.paused());
}

#[test]
fn restart_resets_run_but_keeps_entry() {
    let mut game = Game::new(21);
    let entry = game.grid().entry();
    game.place_pipe(1, entry.y);
    game.discard();
    game.tick(START_DELAY_MS + 3 * FLOW_INTERVAL_MS);

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.episode_id(), 1);
    assert_eq!(game.status(), GameStatus::Waiting);
    assert_eq!(game.countdown_ms(), START_DELAY_MS);
    assert_eq!(game.score(), 0);
    assert_eq!(game.length(), 0);
    assert_eq!(game.discards_remaining(), MAX_DISCARDS);
    assert_eq!(game.pipes_placed(), 0);
    assert_eq!(game.grid().pipe_count(), 0);
    assert_eq!(game.grid().entry(), entry);
    assert!(game.take_events().is_empty());
}

#[test]
fn config_is_clamped_into_supported_sizes() {
    let game = Game::with_config(GameConfig {
        seed: 4,
        width: 0,
        height: 200,
    });
    assert_eq!(game.grid().width(), 2);
    assert_eq!(game.grid().height(), conduit::types::MAX_GRID_DIM);
}
