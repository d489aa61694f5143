//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, terminals or I/O, making it:
//!
//! - **Deterministic**: the same seed (or scripted [`RandomSource`]) replays the same game
//! - **Testable**: every rule is reachable from plain values
//! - **Portable**: runs headless, in a terminal, or behind any other front end
//!
//! # Module Structure
//!
//! - [`geometry`]: exact quarter-turn offset rotation and free-angle hitbox rotation
//! - [`pieces`]: shape templates, the shape catalog and the active [`Piece`]
//! - [`board`]: grid of locked blocks with collision, lock, line detection and compaction
//! - [`scoring`]: line-clear points, level and the ticks-per-row speed curve
//! - [`rng`]: seedable random source for spawning
//! - [`config`]: [`GameConfig`] with defaults and environment overrides
//! - [`game_state`]: the engine ([`GameState`]) and its per-tick state machine
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at column `width / 2`, row 1, with a random shape and rotation
//! - Gravity is sub-row: a piece falls one row every `get_speed(level)` ticks
//! - Horizontal moves clamp at the walls; rotations have no wall kicks
//! - A piece locks the tick it can no longer fall (+10 points)
//! - Full rows clear with classic scoring; a level is 10 lines
//! - The game ends when a block is left on the top row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_types::Intent;
//!
//! let mut game = GameState::new(GameConfig::default().with_seed(12345)).unwrap();
//!
//! game.tick_intents([Intent::MoveRight, Intent::RotateCw]);
//! let report = game.tick_intents([Intent::HardDrop]);
//!
//! assert!(report.locked);
//! assert!(game.score() >= 10); // Locking awards points
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod geometry;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockOutcome};
pub use config::GameConfig;
pub use error::ConfigError;
pub use game_state::{GamePhase, GameState, TickReport};
pub use geometry::{rotate_offset, rotate_rect_hitbox, Point};
pub use pieces::{get_template, Piece, ShapeCatalog, ShapeTemplate};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{calculate_level, get_score, get_speed};
pub use snapshot::{ActiveSnapshot, GameSnapshot, LockedBlock};
