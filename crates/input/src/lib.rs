//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s and drains the
//! pending events once per tick without blocking. The engine never sees key
//! codes; it only receives the collapsed [`crate::types::InputBatch`].

pub mod drain;
pub mod map;

pub use blockfall_types as types;

pub use drain::{collect_keys, poll_intents, PolledInput};
pub use map::{handle_key_event, should_quit, should_restart};
