//! Terminal Conduit runner (default binary).
//!
//! Crossterm input, a framebuffer renderer and a frame loop that ticks the
//! game by the real time elapsed. Logs only go to a file (`--log-file`)
//! because the terminal is in raw mode.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use conduit::core::{Game, GameConfig, GameSnapshot};
use conduit::input::{handle_key_event, should_quit, Cursor, InputCommand};
use conduit::store::Leaderboard;
use conduit::term::{
    FrameBuffer, FrameClock, GameView, SoundConfig, SoundPlayer, TerminalRenderer, Viewport,
    VOLUME_STEP,
};
use conduit::types::{Direction, GameAction, GameStatus, FRAME_MS, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Parser)]
#[command(name = "conduit", version, about = "Lay pipe ahead of the water")]
struct Args {
    /// RNG seed for the entry row and pipe queue (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    #[arg(long, default_value_t = GRID_WIDTH)]
    width: u8,

    #[arg(long, default_value_t = GRID_HEIGHT)]
    height: u8,

    /// Name stored with leaderboard entries
    #[arg(long, default_value = "player")]
    name: String,

    /// Leaderboard slot the run is recorded under
    #[arg(long, default_value_t = 0)]
    level: u32,

    /// JSON file holding best scores; in-memory only when omitted
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    #[arg(long)]
    mute: bool,

    /// Bell volume, 0.0 to 1.0
    #[arg(long, default_value_t = 0.3)]
    volume: f32,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }

    let mut board = match args.leaderboard.as_deref() {
        Some(path) => Leaderboard::load(path)?,
        None => Leaderboard::in_memory(),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &args, &mut board);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, args: &Args, board: &mut Leaderboard) -> Result<()> {
    let config = GameConfig {
        seed: args.seed.unwrap_or_else(clock_seed),
        width: args.width,
        height: args.height,
    }
    .normalized();
    tracing::info!(seed = config.seed, width = config.width, height = config.height, "starting");

    let mut game = Game::with_config(config);
    let view = GameView::default();
    let entry = game.grid().entry();
    let mut cursor = Cursor::new(entry.step(Direction::Right), config.width, config.height);
    let mut sound = SoundPlayer::new(SoundConfig::new(!args.mute, args.volume));

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut recorded_episode: Option<u32> = None;

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();
    let mut clock = FrameClock::new(last_tick);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Some(cursor.position()), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(cmd) = handle_key_event(key) {
                        apply_command(&mut game, &mut cursor, sound.config_mut(), cmd);
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(pos) =
                        view.cell_at(snap.width, snap.height, viewport, mouse.column, mouse.row)
                    {
                        cursor.set(pos);
                        game.apply_action(GameAction::Place { x: pos.x, y: pos.y });
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= frame {
            last_tick = Instant::now();
            game.tick(clock.elapsed_ms(last_tick));
        }

        let events = game.take_events();
        sound.play_events(&events)?;

        if game.status() == GameStatus::Won && recorded_episode != Some(game.episode_id()) {
            recorded_episode = Some(game.episode_id());
            record_win(board, args, &game)?;
        }
    }
}

fn apply_command(
    game: &mut Game,
    cursor: &mut Cursor,
    sound: &mut SoundConfig,
    cmd: InputCommand,
) {
    let action = match cmd {
        InputCommand::MoveCursor(dir) => {
            cursor.step(dir);
            return;
        }
        InputCommand::Place => {
            let pos = cursor.position();
            GameAction::Place { x: pos.x, y: pos.y }
        }
        InputCommand::Discard => GameAction::Discard,
        InputCommand::Pause => GameAction::Pause,
        InputCommand::Restart => GameAction::Restart,
        InputCommand::ToggleSound => {
            let enabled = sound.toggle();
            tracing::debug!(enabled, "sound toggled");
            return;
        }
        InputCommand::VolumeUp | InputCommand::VolumeDown => {
            let delta = if cmd == InputCommand::VolumeUp {
                VOLUME_STEP
            } else {
                -VOLUME_STEP
            };
            sound.nudge_volume(delta);
            tracing::debug!(volume = sound.volume(), "volume changed");
            return;
        }
    };
    if !game.apply_action(action) {
        tracing::trace!(action = action.as_str(), "action rejected");
    }
}

fn record_win(board: &mut Leaderboard, args: &Args, game: &Game) -> Result<()> {
    let rank = board.record_score(args.level, &args.name, game.score(), game.pipes_placed());
    if rank.is_some() {
        board.save()?;
    }
    tracing::info!(
        level = args.level,
        score = game.score(),
        rank = rank.unwrap_or(0),
        "level complete"
    );
    Ok(())
}
