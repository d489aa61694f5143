//! Board module - manages the grid of locked blocks
//!
//! The board is a W x H grid (10 x 24 by default) where each cell is empty or
//! holds the shape id of the piece that locked there. Storage is a flat
//! row-major vector, so membership tests are O(1) and two blocks can never
//! share a cell.
//! Coordinates: (col, row) where col ranges 0..W (left to right) and row ranges
//! 0..H (top to bottom). Rows above 0 are the spawn zone and never hold blocks.

use crate::pieces::Piece;
use crate::types::{Cell, CellPos, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

/// Largest width or height a board can have.
///
/// Coordinates are `i8` and piece offsets reach up to 2 cells past the pivot,
/// so probing a rotation or the row below a piece on the largest board must
/// still fit in an `i8`.
pub const MAX_DIMENSION: u8 = i8::MAX as u8 - 4;

/// Result of freezing a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockOutcome {
    /// Cells written to the board
    pub placed: u8,
    /// Cells that fell outside the board or onto an occupied cell
    pub spilled: u8,
}

impl LockOutcome {
    pub fn is_clean(&self) -> bool {
        self.spilled == 0
    }
}

/// The game board - flat row-major storage of `width * height` cells
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board. Dimensions are clamped to [1, MAX_DIMENSION].
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.clamp(1, MAX_DIMENSION);
        let height = height.clamp(1, MAX_DIMENSION);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: CellPos) -> Option<usize> {
        if self.is_out_of_bounds(pos) {
            return None;
        }
        Some(pos.row as usize * self.width as usize + pos.col as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at a position; None if out of bounds
    pub fn get(&self, pos: CellPos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set cell at a position; false if out of bounds
    pub fn set(&mut self, pos: CellPos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Is there a locked block at `pos`? Out-of-bounds positions never are.
    #[inline]
    pub fn has_cell(&self, pos: CellPos) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, pos: CellPos) -> bool {
        pos.col < 0 || pos.col >= self.width as i8 || pos.row < 0 || pos.row >= self.height as i8
    }

    /// Can the piece fall one more row?
    ///
    /// False when a locked block sits directly below any of its cells, or when
    /// its lowest cell is already on the floor. This is also the lock test.
    pub fn can_descend(&self, piece: &Piece) -> bool {
        let cells = piece.occupied_cells();
        if cells
            .iter()
            .any(|c| self.has_cell(CellPos::new(c.col, c.row.saturating_add(1))))
        {
            return false;
        }
        let lowest = cells.iter().map(|c| c.row).max().unwrap_or(0);
        (lowest as i16 + 1) < self.height as i16
    }

    /// Rows the piece can still fall before it rests
    pub fn drop_distance(&self, piece: &Piece) -> u8 {
        let mut ghost = *piece;
        let mut distance = 0;
        while distance < self.height && self.can_descend(&ghost) {
            ghost.drop_row();
            distance += 1;
        }
        distance
    }

    /// Cells the piece would occupy once dropped to its resting row
    pub fn landing_cells(&self, piece: &Piece) -> [CellPos; 4] {
        let mut ghost = *piece;
        for _ in 0..self.drop_distance(piece) {
            ghost.drop_row();
        }
        ghost.occupied_cells()
    }

    /// Freeze the piece's cells into the board with its shape id.
    ///
    /// Cells outside the board or on an occupied cell are not written and are
    /// counted as spilled.
    pub fn lock(&mut self, piece: &Piece) -> LockOutcome {
        let id = piece.shape_id();
        let mut outcome = LockOutcome::default();
        for pos in piece.occupied_cells() {
            match self.get(pos) {
                Some(None) => {
                    self.set(pos, Some(id));
                    outcome.placed += 1;
                }
                _ => outcome.spilled += 1,
            }
        }
        outcome
    }

    /// Number of locked blocks in a row
    pub fn row_count(&self, row: usize) -> usize {
        self.row(row)
            .map(|cells| cells.iter().filter(|c| c.is_some()).count())
            .unwrap_or(0)
    }

    fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = row * width;
        Some(&self.cells[start..start + width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|c| c.is_some()))
            .unwrap_or(false)
    }

    /// Indices of completely filled rows, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&row| self.is_row_full(row))
            .collect()
    }

    /// Remove the given rows and let everything above them fall.
    ///
    /// Each remaining block moves down by the number of removed rows below it;
    /// rows under the lowest removed row stay put. Out-of-range and duplicate
    /// rows are ignored. Returns the number of rows removed.
    pub fn clear_and_compact(&mut self, rows: &[usize]) -> usize {
        let height = self.height as usize;
        let width = self.width as usize;

        let mut remove = vec![false; height];
        for &row in rows {
            if row < height {
                remove[row] = true;
            }
        }
        let cleared = remove.iter().filter(|&&r| r).count();
        if cleared == 0 {
            return 0;
        }

        // Two-pointer pass from the bottom: kept rows slide down over removed ones.
        let mut write = height;
        for read in (0..height).rev() {
            if remove[read] {
                continue;
            }
            write -= 1;
            if write != read {
                let src = read * width;
                self.cells.copy_within(src..src + width, write * width);
            }
        }

        for cell in &mut self.cells[..write * width] {
            *cell = None;
        }

        cleared
    }

    /// Game-over predicate: any locked block on the top row
    pub fn is_top_out(&self) -> bool {
        self.row_count(0) > 0
    }

    /// Total number of locked blocks
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Locked blocks in row-major order
    pub fn blocks(&self) -> impl Iterator<Item = (CellPos, ShapeId)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|id| {
                let pos = CellPos::new((idx % width) as i8, (idx / width) as i8);
                (pos, id)
            })
        })
    }

    /// Get a reference to the internal cells (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
