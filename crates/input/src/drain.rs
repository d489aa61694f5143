//! Per-tick event drain.
//!
//! All pending terminal events are consumed without waiting, but at most
//! [`MAX_INTENTS_PER_TICK`] intents are kept so a key storm cannot stall a
//! tick. Nothing here allocates.

use std::io;
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, should_restart};
use crate::types::{InputBatch, Intent, MAX_INTENTS_PER_TICK};

/// Everything read from the terminal during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolledInput {
    pub intents: ArrayVec<Intent, MAX_INTENTS_PER_TICK>,
    pub restart: bool,
    /// The terminal was resized; the next frame must be a full redraw
    pub resized: bool,
}

impl PolledInput {
    /// Record one key press. Returns false when the intent buffer is full.
    pub fn push_key(&mut self, key: KeyEvent) -> bool {
        if should_restart(key) {
            self.restart = true;
            return true;
        }
        match handle_key_event(key) {
            Some(intent) => self.intents.try_push(intent).is_ok(),
            None => true,
        }
    }

    pub fn quit(&self) -> bool {
        self.intents.contains(&Intent::Quit)
    }

    /// Collapse the intents into the batch the engine consumes
    pub fn batch(&self) -> InputBatch {
        InputBatch::from_intents(self.intents.iter().copied())
    }
}

/// Feed a sequence of key events through the same filter as [`poll_intents`].
pub fn collect_keys(keys: impl IntoIterator<Item = KeyEvent>) -> PolledInput {
    let mut input = PolledInput::default();
    for key in keys {
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if !input.push_key(key) {
            break;
        }
    }
    input
}

/// Drain pending terminal events without blocking.
pub fn poll_intents() -> io::Result<PolledInput> {
    let mut input = PolledInput::default();
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            // Terminals without release events report presses and auto-repeats alike.
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if !input.push_key(key) {
                    break;
                }
            }
            Event::Resize(_, _) => input.resized = true,
            _ => {}
        }
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_collect_keys_maps_and_batches() {
        let input = collect_keys([
            press(KeyCode::Left),
            press(KeyCode::Right),
            press(KeyCode::Up),
            press(KeyCode::Char(' ')),
        ]);
        assert_eq!(input.intents.len(), 4);
        let batch = input.batch();
        assert_eq!(batch.horizontal, Some(-1));
        assert_eq!(batch.rotation, Some(90));
        assert!(batch.hard_drop);
        assert!(!batch.quit);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        let input = collect_keys([release]);
        assert!(input.intents.is_empty());
    }

    #[test]
    fn test_intents_are_bounded_per_tick() {
        let input = collect_keys(std::iter::repeat(press(KeyCode::Left)).take(100));
        assert_eq!(input.intents.len(), MAX_INTENTS_PER_TICK);
    }

    #[test]
    fn test_restart_and_quit_flags() {
        let input = collect_keys([press(KeyCode::Char('r')), press(KeyCode::Char('q'))]);
        assert!(input.restart);
        assert!(input.quit());
        assert!(input.batch().quit);
    }
}
