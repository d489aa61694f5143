//! Key mapping from terminal events to game intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game intents.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if should_quit(key) {
        return Some(Intent::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Intent::MoveRight),

        // Rotation
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => Some(Intent::RotateCw),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'z' | 'Z') => Some(Intent::RotateCcw),

        KeyCode::Char(' ') => Some(Intent::HardDrop),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c' | 'C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Restart is handled by the runner, not the engine.
pub fn should_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r' | 'R')) && !key.modifiers.contains(KeyModifiers::CONTROL)
}
