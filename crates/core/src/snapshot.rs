//! Snapshot module - read-only view of a game for renderers and observers
//!
//! [`GameSnapshot`] is filled by [`crate::GameState::snapshot_into`], which
//! reuses the block buffer across frames.

use serde::Serialize;

use crate::pieces::Piece;
use crate::types::{CellPos, Rotation, ShapeId, CELLS_PER_PIECE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LockedBlock {
    pub col: i8,
    pub row: i8,
    pub shape_id: ShapeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub shape_id: ShapeId,
    pub rotation: Rotation,
    pub x: i8,
    pub row: i8,
    pub cells: [CellPos; CELLS_PER_PIECE],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape_id: value.shape_id(),
            rotation: value.rotation,
            x: value.x,
            row: value.row,
            cells: value.occupied_cells(),
        }
    }
}

/// Read-only view of a game after a tick, for renderers and observers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Locked blocks in row-major order
    pub blocks: Vec<LockedBlock>,
    pub active: Option<ActiveSnapshot>,
    /// Landing cells of the active piece
    pub ghost: Option<[CellPos; CELLS_PER_PIECE]>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Lines cleared by the tick that produced this snapshot
    pub lines_cleared: u32,
    pub tick: u64,
    pub running: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Shape id at a board cell, if a block is locked there
    pub fn block_at(&self, col: i8, row: i8) -> Option<ShapeId> {
        self.blocks
            .iter()
            .find(|b| b.col == col && b.row == row)
            .map(|b| b.shape_id)
    }

    /// Rasterize locked blocks into rows of cells (None = empty)
    pub fn grid(&self) -> Vec<Vec<Option<ShapeId>>> {
        let mut grid = vec![vec![None; self.width as usize]; self.height as usize];
        for b in &self.blocks {
            if let Some(cell) = grid
                .get_mut(b.row as usize)
                .and_then(|row| row.get_mut(b.col as usize))
            {
                *cell = Some(b.shape_id);
            }
        }
        grid
    }

    pub fn playable(&self) -> bool {
        self.running && !self.game_over
    }
}
