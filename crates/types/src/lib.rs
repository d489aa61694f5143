//! Shared types module - data structures and constants used by every crate
//!
//! All types here are plain data with no game logic, so they can be used by the
//! simulation core, the input mapping and the terminal view alike.
//!
//! # Board Dimensions
//!
//! Default playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 24 rows (indexed 0-23, row 0 is the top)
//! - **Spawn position**: column `width / 2`, row 1
//!
//! # Timing
//!
//! The engine is driven by a fixed tick (60 Hz by default). Fall speed is
//! measured in ticks per row:
//!
//! | Level | Ticks per row |
//! |-------|---------------|
//! | 0-8 | 48 - 5 * level |
//! | 9 | 6 |
//! | 10-18 | 5 - (level - 10) / 3 |
//! | 19-28 | 2 |
//! | 29+ | 1 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, InputBatch, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Rotation::Deg0.rotate_cw(), Rotation::Deg90);
//! assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
//!
//! let batch = InputBatch::from_intents([Intent::MoveLeft, Intent::MoveRight, Intent::RotateCw]);
//! assert_eq!(batch.horizontal, Some(-1));
//! assert_eq!(batch.rotation, Some(90));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 24);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (24 rows)
pub const BOARD_HEIGHT: u8 = 24;

/// Default fixed tick rate (frames per second)
pub const TICK_RATE_HZ: u32 = 60;

/// Row new pieces spawn on
pub const SPAWN_ROW: i8 = 1;

/// Points awarded every time a piece locks
pub const LOCK_BONUS: u32 = 10;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0; multiplied by (level + 1).
/// Clearing more than 4 lines at once scores like 4.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Maximum number of intents drained from the input source per tick
pub const MAX_INTENTS_PER_TICK: usize = 16;

/// Number of cells in every shape template
pub const CELLS_PER_PIECE: usize = 4;

/// Board-relative cell coordinate: (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub col: i8,
    pub row: i8,
}

impl CellPos {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }
}

impl From<(i8, i8)> for CellPos {
    fn from((col, row): (i8, i8)) -> Self {
        Self { col, row }
    }
}

/// Visual identity of a shape; index into the shape catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u8);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(ShapeId)`: Locked block carrying the identity of the piece it came from
pub type Cell = Option<ShapeId>;

/// The seven canonical tetrominoes, in standard catalog order.
///
/// The discriminant is the [`ShapeId`] used by the standard catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    O,
    I,
    T,
    J,
    L,
    Z,
    S,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::O,
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    pub fn id(self) -> ShapeId {
        ShapeId(self as u8)
    }

    pub fn from_id(id: ShapeId) -> Option<Self> {
        Self::ALL.get(id.index()).copied()
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(ShapeKind::O),
            "i" => Some(ShapeKind::I),
            "t" => Some(ShapeKind::T),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "z" => Some(ShapeKind::Z),
            "s" => Some(ShapeKind::S),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::O => "o",
            ShapeKind::I => "i",
            ShapeKind::T => "t",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::Z => "z",
            ShapeKind::S => "s",
        }
    }
}

/// Grid-aligned rotation in 90° steps.
///
/// Positive angles are clockwise on screen (rows grow downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Normalize any multiple of 90° into a rotation.
    ///
    /// Angles are taken modulo 360 (negative angles wrap). Angles that are not
    /// a multiple of 90 round down to the previous quarter turn.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) / 90 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Index in [0, 4): number of clockwise quarter turns.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Add a signed angle, wrapping modulo 360.
    pub fn add_degrees(self, delta: i32) -> Self {
        Self::from_degrees(self.degrees() + delta)
    }

    pub fn rotate_cw(self) -> Self {
        self.add_degrees(90)
    }

    pub fn rotate_ccw(self) -> Self {
        self.add_degrees(-90)
    }
}

/// Logical input intents consumed by the engine once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece to its landing position and lock it
    HardDrop,
    /// Stop the game
    Quit,
}

impl Intent {
    /// Parse intent from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("HARDDROP"), Some(Intent::HardDrop));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "harddrop" => Some(Intent::HardDrop),
            "quit" => Some(Intent::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::HardDrop => "hardDrop",
            Intent::Quit => "quit",
        }
    }
}

/// The intents honored for a single tick.
///
/// At most one horizontal move and at most one rotation survive batching;
/// the first of each kind wins and later ones are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputBatch {
    /// Column delta: -1 (left) or 1 (right)
    pub horizontal: Option<i8>,
    /// Rotation delta in degrees: 90 (clockwise) or -90
    pub rotation: Option<i32>,
    pub hard_drop: bool,
    pub quit: bool,
}

impl InputBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one intent into the batch, dropping it if its slot is taken.
    ///
    /// Returns false when the intent was dropped.
    pub fn push(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft | Intent::MoveRight => {
                if self.horizontal.is_some() {
                    return false;
                }
                self.horizontal = Some(if intent == Intent::MoveLeft { -1 } else { 1 });
            }
            Intent::RotateCw | Intent::RotateCcw => {
                if self.rotation.is_some() {
                    return false;
                }
                self.rotation = Some(if intent == Intent::RotateCw { 90 } else { -90 });
            }
            Intent::HardDrop => self.hard_drop = true,
            Intent::Quit => self.quit = true,
        }
        true
    }

    pub fn from_intents(intents: impl IntoIterator<Item = Intent>) -> Self {
        let mut batch = Self::new();
        for intent in intents {
            batch.push(intent);
        }
        batch
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_dimensions() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 24);
        assert_eq!(TICK_RATE_HZ, 60);
        assert_eq!(LOCK_BONUS, 10);
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::from_degrees(360), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(450), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-180), Rotation::Deg180);
        assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
        assert_eq!(Rotation::Deg0.rotate_ccw(), Rotation::Deg270);
        assert_eq!(Rotation::from_index(5), Rotation::Deg90);
    }

    #[test]
    fn test_shape_kind_ids() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.id(), ShapeId(i as u8));
            assert_eq!(ShapeKind::from_id(kind.id()), Some(*kind));
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(*kind));
        }
        assert_eq!(ShapeKind::from_id(ShapeId(7)), None);
    }

    #[test]
    fn test_intent_string_roundtrip() {
        for intent in [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::RotateCw,
            Intent::RotateCcw,
            Intent::HardDrop,
            Intent::Quit,
        ] {
            assert_eq!(Intent::from_str(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn test_batch_keeps_first_of_each_kind() {
        let batch = InputBatch::from_intents([
            Intent::MoveRight,
            Intent::RotateCcw,
            Intent::MoveLeft,
            Intent::RotateCw,
            Intent::HardDrop,
        ]);
        assert_eq!(batch.horizontal, Some(1));
        assert_eq!(batch.rotation, Some(-90));
        assert!(batch.hard_drop);
        assert!(!batch.quit);
    }

    #[test]
    fn test_batch_push_reports_dropped() {
        let mut batch = InputBatch::new();
        assert!(batch.is_empty());
        assert!(batch.push(Intent::MoveLeft));
        assert!(!batch.push(Intent::MoveLeft));
        assert!(batch.push(Intent::Quit));
        assert!(batch.quit);
        assert!(!batch.is_empty());
    }
}
