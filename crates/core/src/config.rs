//! Game configuration
//!
//! Every option is optional and falls back to the classic defaults. Values can
//! be read from environment variables (`BLOCKFALL_*`); unparsable values are
//! ignored with a warning, like the rest of the defaults.

use std::env;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::MAX_DIMENSION;
use crate::error::ConfigError;
use crate::pieces::ShapeCatalog;
use crate::types::{Rotation, BOARD_HEIGHT, BOARD_WIDTH, TICK_RATE_HZ};

pub const ENV_BOARD_WIDTH: &str = "BLOCKFALL_BOARD_WIDTH";
pub const ENV_BOARD_HEIGHT: &str = "BLOCKFALL_BOARD_HEIGHT";
pub const ENV_START_LEVEL: &str = "BLOCKFALL_START_LEVEL";
pub const ENV_TICK_RATE: &str = "BLOCKFALL_TICK_RATE";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u32,
    pub board_height: u32,
    pub starting_level: u32,
    pub tick_rate_hz: u32,
    /// RNG seed; `None` lets the runner pick one
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH as u32,
            board_height: BOARD_HEIGHT as u32,
            starting_level: 0,
            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key/value lookup (environment, test maps, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str, default: u32| -> u32 {
            match lookup(key) {
                Some(raw) => match raw.trim().parse() {
                    Ok(value) => value,
                    Err(_) => {
                        warn!("ignoring {}={:?}: not a non-negative integer", key, raw);
                        default
                    }
                },
                None => default,
            }
        };

        let seed = lookup(ENV_SEED).and_then(|raw| match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("ignoring {}={:?}: not a u32 seed", ENV_SEED, raw);
                None
            }
        });

        Self {
            board_width: parse(ENV_BOARD_WIDTH, defaults.board_width),
            board_height: parse(ENV_BOARD_HEIGHT, defaults.board_height),
            starting_level: parse(ENV_START_LEVEL, defaults.starting_level),
            tick_rate_hz: parse(ENV_TICK_RATE, defaults.tick_rate_hz),
            seed,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_board(mut self, width: u32, height: u32) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    pub fn with_starting_level(mut self, level: u32) -> Self {
        self.starting_level = level;
        self
    }

    /// Check the configuration against the catalog pieces will be drawn from.
    ///
    /// The board must be at least as wide as the widest rotated shape and tall
    /// enough to spawn a piece below the top row. Every shape must also lie
    /// inside the board in every rotation at the spawn point, since the spawn
    /// rotation is random.
    pub fn validate(&self, catalog: &ShapeCatalog) -> Result<(), ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyShapeCatalog);
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }

        let span = catalog.max_span() as u32;
        for (name, value) in [("width", self.board_width), ("height", self.board_height)] {
            if value == 0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
            if value > MAX_DIMENSION as u32 {
                return Err(ConfigError::BoardTooLarge {
                    name,
                    value,
                    max: MAX_DIMENSION as u32,
                });
            }
            // Height needs one extra row: row 0 is the game-over line.
            let required = if name == "height" { span + 1 } else { span };
            if value < required {
                return Err(ConfigError::BoardTooSmall {
                    name,
                    value,
                    required,
                });
            }
        }

        let (width, height) = (self.board_width as u8, self.board_height as u8);
        for template in catalog.templates() {
            for rotation in Rotation::ALL {
                if !template.fits_at_spawn(rotation, width, height) {
                    return Err(ConfigError::SpawnOutsideBoard {
                        shape: template.id,
                        degrees: rotation.degrees(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Duration of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }
}
