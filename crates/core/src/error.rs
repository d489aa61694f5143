//! Initialization errors.
//!
//! Gameplay never fails: blocked moves are rejected silently and game over is
//! a phase. Only a bad configuration is an error, and it surfaces before the
//! first tick.

use std::fmt;

use crate::types::ShapeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A board dimension is zero
    InvalidDimension { name: &'static str, value: u32 },
    /// The board cannot hold the widest (or tallest) shape of the catalog
    BoardTooSmall { name: &'static str, value: u32, required: u32 },
    /// A dimension exceeds what cell coordinates can address
    BoardTooLarge { name: &'static str, value: u32, max: u32 },
    /// A shape would spawn with cells outside the board in some rotation
    SpawnOutsideBoard { shape: ShapeId, degrees: i32 },
    /// Tick rate is zero
    InvalidTickRate(u32),
    /// No shapes to spawn from
    EmptyShapeCatalog,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimension { name, value } => {
                write!(f, "board {} must be positive, got {}", name, value)
            }
            ConfigError::BoardTooSmall {
                name,
                value,
                required,
            } => write!(
                f,
                "board {} {} cannot fit the shape catalog (needs at least {})",
                name, value, required
            ),
            ConfigError::BoardTooLarge { name, value, max } => {
                write!(f, "board {} {} exceeds the maximum of {}", name, value, max)
            }
            ConfigError::SpawnOutsideBoard { shape, degrees } => write!(
                f,
                "shape {} rotated {} degrees does not fit the board at the spawn point",
                shape.0, degrees
            ),
            ConfigError::InvalidTickRate(rate) => {
                write!(f, "tick rate must be positive, got {}", rate)
            }
            ConfigError::EmptyShapeCatalog => write!(f, "shape catalog is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ConfigError::InvalidDimension {
            name: "width",
            value: 0,
        };
        assert_eq!(err.to_string(), "board width must be positive, got 0");
        assert_eq!(
            ConfigError::EmptyShapeCatalog.to_string(),
            "shape catalog is empty"
        );
    }
}
