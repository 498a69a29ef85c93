//! Game state module - the session state machine
//!
//! Ties together the grid, the water flow, the pipe queue and scoring.
//! A run moves `Waiting -> Playing -> {Flooded, Won}`; only a restart leaves a
//! terminal status.
//!
//! Timing follows a time-accumulator model: the frame loop calls
//! [`Game::tick`] with the elapsed milliseconds, and every full flow interval
//! that has accumulated advances the water once. Large deltas are caught up
//! tick by tick rather than clamped.

use arrayvec::ArrayVec;

use crate::flow::Flow;
use crate::grid::Grid;
use crate::pipes::is_cross;
use crate::rng::{PipeQueue, SimpleRng};
use crate::scoring::{self, FinalScore};
use crate::snapshot::{CellSnapshot, GameSnapshot};
use crate::types::*;

/// Maximum number of undrained events kept between frames
pub const MAX_PENDING_EVENTS: usize = 64;

/// Construction parameters for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub width: u8,
    pub height: u8,
}

impl GameConfig {
    /// Clamp the grid into the supported size range
    pub fn normalized(self) -> Self {
        Self {
            seed: self.seed,
            width: self.width.clamp(2, MAX_GRID_DIM),
            height: self.height.clamp(1, MAX_GRID_DIM),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    flow: Flow,
    queue: PipeQueue,
    status: GameStatus,
    score: u32,
    length: u32,
    discards: u32,
    countdown_ms: u32,
    flow_accumulator_ms: u32,
    paused: bool,
    elapsed_ms: u32,
    pipes_placed: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    final_score: Option<FinalScore>,
    events: ArrayVec<GameEvent, MAX_PENDING_EVENTS>,
}

impl Game {
    /// Create a new game on the default 7x10 grid with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(GameConfig {
            seed,
            ..GameConfig::default()
        })
    }

    pub fn with_config(config: GameConfig) -> Self {
        let config = config.normalized();
        let mut rng = SimpleRng::new(config.seed);
        let entry_row = rng.next_range(config.height as u32) as u8;
        let grid = Grid::new(config.width, config.height, entry_row);
        let flow = Flow::new(&grid);
        let queue = PipeQueue::from_rng(rng);

        Self {
            config,
            grid,
            flow,
            queue,
            status: GameStatus::Waiting,
            score: 0,
            length: 0,
            discards: MAX_DISCARDS,
            countdown_ms: START_DELAY_MS,
            flow_accumulator_ms: 0,
            paused: false,
            elapsed_ms: 0,
            pipes_placed: 0,
            episode_id: 0,
            final_score: None,
            events: ArrayVec::new(),
        }
    }

    /// Reset the board, the flow and every counter; draws a fresh queue
    ///
    /// The entry cell stays where it is.
    pub fn start(&mut self) {
        self.grid.reset();
        self.flow.start(&self.grid);
        self.queue.refill();
        self.status = GameStatus::Waiting;
        self.score = 0;
        self.length = 0;
        self.discards = MAX_DISCARDS;
        self.countdown_ms = START_DELAY_MS;
        self.flow_accumulator_ms = 0;
        self.paused = false;
        self.elapsed_ms = 0;
        self.pipes_placed = 0;
        self.final_score = None;
        self.events.clear();
    }

    /// Start a new episode
    pub fn restart(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.start();
        tracing::info!(episode = self.episode_id, "game restarted");
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn discards_remaining(&self) -> u32 {
        self.discards
    }

    pub fn countdown_ms(&self) -> u32 {
        self.countdown_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn pipes_placed(&self) -> u32 {
        self.pipes_placed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Bonus breakdown of a won run
    pub fn final_score(&self) -> Option<FinalScore> {
        self.final_score
    }

    /// Copy of the upcoming pipes, front first
    pub fn queue(&self) -> [PipeKind; QUEUE_SIZE] {
        self.queue.pipes()
    }

    pub fn current_pipe(&self) -> Option<PipeKind> {
        self.queue.peek()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn queue_mut(&mut self) -> &mut PipeQueue {
        &mut self.queue
    }

    /// Current time per flow tick, derived from the score
    pub fn flow_interval_ms(&self) -> u32 {
        scoring::flow_interval_ms(self.score)
    }

    /// Whether the input layer may place a pipe at (x, y)
    pub fn can_place_at(&self, x: i8, y: i8) -> bool {
        self.grid.is_valid_placement(x, y)
    }

    /// Place the queue's front pipe at (x, y)
    pub fn place_pipe(&mut self, x: i8, y: i8) -> bool {
        if !self.status.accepts_input() {
            return false;
        }

        let Some(kind) = self.queue.peek() else {
            return false;
        };

        if !self.grid.place_pipe(x, y, kind) {
            return false;
        }

        self.queue.pop();
        self.pipes_placed += 1;
        self.push_event(GameEvent::PipePlaced { x, y, kind });
        tracing::debug!(x, y, kind = kind.as_str(), "pipe placed");
        true
    }

    /// Throw away the queue's front pipe, spending one discard
    pub fn discard(&mut self) -> bool {
        if !self.status.accepts_input() || self.discards == 0 || self.queue.is_empty() {
            return false;
        }

        let kind = self.queue.pop();
        self.discards -= 1;
        self.push_event(GameEvent::PipeDiscarded { kind });
        tracing::debug!(kind = kind.as_str(), remaining = self.discards, "pipe discarded");
        true
    }

    /// Flip the pause flag; only possible while water is flowing
    pub fn toggle_pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Main game tick - run the countdown and advance the water
    ///
    /// Returns true if at least one flow tick was processed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status.is_terminal() || self.paused {
            return false;
        }

        let mut remaining = elapsed_ms;

        if self.status == GameStatus::Waiting {
            if remaining < self.countdown_ms {
                self.countdown_ms -= remaining;
                return false;
            }
            // Leftover time flows straight into the first playing frame.
            remaining -= self.countdown_ms;
            self.countdown_ms = 0;
            self.status = GameStatus::Playing;
            self.push_event(GameEvent::FlowStarted);
            tracing::info!(seed = self.config.seed, "water started flowing");
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(remaining);
        self.flow_accumulator_ms = self.flow_accumulator_ms.saturating_add(remaining);

        let interval = self.flow_interval_ms();
        let mut ticked = false;
        while self.flow_accumulator_ms >= interval {
            self.flow_accumulator_ms -= interval;
            self.advance_water();
            ticked = true;

            if self.status != GameStatus::Playing {
                break;
            }
        }

        ticked
    }

    /// Time accumulated towards the next flow tick
    pub fn pending_flow_ms(&self) -> u32 {
        self.flow_accumulator_ms
    }

    fn advance_water(&mut self) {
        if !self.flow.advance(&mut self.grid) {
            self.end_game();
            return;
        }

        let pos = self.flow.position();
        let entered_cross = self
            .grid
            .pipe_at(pos.x, pos.y)
            .map_or(false, |pipe| is_cross(pipe.kind));
        let cross_bonus = entered_cross && self.flow.visits(pos) > 1;

        self.score = self.score.saturating_add(scoring::segment_points(cross_bonus));
        self.length = self.flow.segments();
        self.push_event(GameEvent::WaterAdvanced {
            x: pos.x,
            y: pos.y,
            cross_bonus,
        });
    }

    /// Check if the run has covered the minimum length
    pub fn is_win(&self) -> bool {
        scoring::is_win(self.length)
    }

    /// Score including end-of-run bonuses (does not mutate)
    pub fn calculate_final_score(&self) -> FinalScore {
        scoring::calculate_final_score(self.score, self.discards, self.elapsed_ms)
    }

    /// Resolve the run: `Won` with bonuses if long enough, else `Flooded`
    ///
    /// No-op once the game is already over.
    pub fn end_game(&mut self) {
        if self.status.is_terminal() {
            return;
        }

        if self.is_win() {
            let result = self.calculate_final_score();
            self.score = result.total;
            self.final_score = Some(result);
            self.status = GameStatus::Won;
            self.push_event(GameEvent::LevelComplete { score: self.score });
            tracing::info!(
                score = self.score,
                length = self.length,
                elapsed_ms = self.elapsed_ms,
                "level complete"
            );
        } else {
            self.status = GameStatus::Flooded;
            self.push_event(GameEvent::LevelFailed {
                length: self.length,
            });
            tracing::info!(score = self.score, length = self.length, "level flooded");
        }
        self.paused = false;
    }

    fn push_event(&mut self, event: GameEvent) {
        // Oldest events win if nobody drains the buffer.
        let _ = self.events.try_push(event);
    }

    /// Take all events queued since the last call.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, MAX_PENDING_EVENTS> {
        std::mem::take(&mut self.events)
    }

    /// Apply a front-end command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Place { x, y } => self.place_pipe(x, y),
            GameAction::Discard => self.discard(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.status = self.status;
        out.score = self.score;
        out.length = self.length;
        out.discards = self.discards;
        out.countdown_ms = self.countdown_ms;
        out.flow_interval_ms = self.flow_interval_ms();
        out.paused = self.paused;
        out.elapsed_ms = self.elapsed_ms;
        out.queue = self.queue.pipes();
        out.pipes_placed = self.pipes_placed;
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.entry = self.grid.entry();
        out.head = self.flow.position();

        out.cells.clear();
        out.cells
            .extend(self.grid.cells().iter().map(CellSnapshot::from));
        out.path.clear();
        out.path.extend_from_slice(self.flow.path());
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
