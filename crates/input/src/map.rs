//! Key mapping from terminal events to front-end commands.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Move the board cursor one cell
    MoveCursor(Direction),
    /// Place the front pipe under the cursor
    Place,
    Discard,
    Pause,
    Restart,
    /// Mute or unmute the bell
    ToggleSound,
    VolumeUp,
    VolumeDown,
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        // Cursor
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(InputCommand::MoveCursor(Direction::Left)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(InputCommand::MoveCursor(Direction::Right)),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(InputCommand::MoveCursor(Direction::Top)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(InputCommand::MoveCursor(Direction::Bottom)),

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputCommand::Place),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Backspace => {
            Some(InputCommand::Discard)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(InputCommand::Pause),

        // Sound
        KeyCode::Char('m') | KeyCode::Char('M') => Some(InputCommand::ToggleSound),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(InputCommand::VolumeUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(InputCommand::VolumeDown),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
