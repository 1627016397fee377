//! Key mapping from terminal events to game commands.
//!
//! Rotation keys are case sensitive: lowercase turns -90 degrees about the
//! named axis, uppercase turns +90.

use crate::types::{Axis, Command, Turn};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement in the horizontal plane
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::MoveForward),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::MoveBackward),

        // Rotation
        KeyCode::Char('x') => Some(Command::Rotate(Axis::X, Turn::Negative)),
        KeyCode::Char('X') => Some(Command::Rotate(Axis::X, Turn::Positive)),
        KeyCode::Char('y') => Some(Command::Rotate(Axis::Y, Turn::Negative)),
        KeyCode::Char('Y') => Some(Command::Rotate(Axis::Y, Turn::Positive)),
        KeyCode::Char('z') => Some(Command::Rotate(Axis::Z, Turn::Negative)),
        KeyCode::Char('Z') => Some(Command::Rotate(Axis::Z, Turn::Positive)),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDropOrSpawn),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),

        _ => None,
    }
}

/// Whether the event is a press or auto-repeat (terminals that report
/// key releases would otherwise apply every command twice).
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
