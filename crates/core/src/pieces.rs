//! Pieces module - shape templates, the shape catalog and the active piece
//!
//! A [`Piece`] composes an immutable [`ShapeTemplate`] with mutable placement
//! state (column, row, sub-row gravity progress and rotation). Rotation is
//! grid locked and has no wall kicks.

use crate::board::Board;
use crate::error::ConfigError;
use crate::geometry::{rotate_offset, CellOffset};
use crate::types::{CellPos, Rotation, ShapeId, ShapeKind, CELLS_PER_PIECE, SPAWN_ROW};

/// Four cell offsets around the pivot (0, 0)
pub type PieceShape = [CellOffset; CELLS_PER_PIECE];

/// Immutable definition of one piece type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeTemplate {
    pub id: ShapeId,
    pub cells: PieceShape,
}

impl ShapeTemplate {
    pub const fn new(id: ShapeId, cells: PieceShape) -> Self {
        Self { id, cells }
    }

    /// Offsets for a rotation
    pub fn rotated(&self, rotation: Rotation) -> PieceShape {
        self.cells.map(|offset| rotate_offset(offset, rotation))
    }

    /// Inclusive (min_dx, max_dx) over the rotated cells
    pub fn column_extent(&self, rotation: Rotation) -> (i8, i8) {
        let shape = self.rotated(rotation);
        let min = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let max = shape.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
        (min, max)
    }

    /// Inclusive (min_dy, max_dy) over the rotated cells
    pub fn row_extent(&self, rotation: Rotation) -> (i8, i8) {
        let shape = self.rotated(rotation);
        let min = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let max = shape.iter().map(|&(_, dy)| dy).max().unwrap_or(0);
        (min, max)
    }

    /// Does this rotation lie inside a `width` x `height` board when placed
    /// at the spawn point? Cells above row 0 are allowed.
    pub fn fits_at_spawn(&self, rotation: Rotation, width: u8, height: u8) -> bool {
        let x = (width / 2) as i16;
        let (min_dx, max_dx) = self.column_extent(rotation);
        let (_, max_dy) = self.row_extent(rotation);
        x + min_dx as i16 >= 0
            && x + (max_dx as i16) < width as i16
            && SPAWN_ROW as i16 + (max_dy as i16) < height as i16
    }

    /// Widest column span over all four rotations
    pub fn max_span(&self) -> u8 {
        Rotation::ALL
            .iter()
            .map(|&r| {
                let (min, max) = self.column_extent(r);
                (max - min + 1) as u8
            })
            .max()
            .unwrap_or(1)
    }
}

/// Get the standard template for a tetromino kind
pub fn get_template(kind: ShapeKind) -> ShapeTemplate {
    let cells = match kind {
        // ##
        // ##
        ShapeKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        // vertical bar, pivot second from top
        ShapeKind::I => [(0, -1), (0, 0), (0, 1), (0, 2)],
        ShapeKind::T => [(0, -1), (0, 0), (1, 0), (0, 1)],
        // foot to the right at the top
        ShapeKind::J => [(0, 0), (1, 0), (0, 1), (0, 2)],
        // foot to the right at the bottom
        ShapeKind::L => [(1, 0), (0, 0), (0, -1), (0, -2)],
        ShapeKind::Z => [(1, -1), (1, 0), (0, 0), (0, 1)],
        ShapeKind::S => [(-1, -1), (-1, 0), (0, 0), (0, 1)],
    };
    ShapeTemplate::new(kind.id(), cells)
}

/// Non-empty ordered set of templates pieces are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    templates: Vec<ShapeTemplate>,
}

impl ShapeCatalog {
    pub fn new(templates: Vec<ShapeTemplate>) -> Result<Self, ConfigError> {
        if templates.is_empty() {
            return Err(ConfigError::EmptyShapeCatalog);
        }
        Ok(Self { templates })
    }

    /// The seven tetrominoes, ids 0..6 in [`ShapeKind::ALL`] order
    pub fn standard() -> Self {
        Self {
            templates: ShapeKind::ALL.iter().map(|&k| get_template(k)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShapeTemplate> {
        self.templates.get(index)
    }

    pub fn templates(&self) -> &[ShapeTemplate] {
        &self.templates
    }

    /// Widest column span any template reaches in any rotation
    pub fn max_span(&self) -> u8 {
        self.templates.iter().map(|t| t.max_span()).max().unwrap_or(1)
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The active falling piece
///
/// Its vertical position is `row + progress / speed`: the integral `row` decides
/// which cells are occupied, `progress` counts gravity ticks toward the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub template: ShapeTemplate,
    pub rotation: Rotation,
    pub x: i8,
    pub row: i8,
    progress: u32,
    speed: u32,
}

impl Piece {
    /// Create a piece at (x, row). `speed` is ticks per row and is clamped to at least 1.
    pub fn new(template: ShapeTemplate, rotation: Rotation, x: i8, row: i8, speed: u32) -> Self {
        Self {
            template,
            rotation,
            x,
            row,
            progress: 0,
            speed: speed.max(1),
        }
    }

    /// Create a piece at the spawn point of a board: column `width / 2`, row 1
    pub fn spawn(template: ShapeTemplate, rotation: Rotation, board_width: u8, speed: u32) -> Self {
        Self::new(template, rotation, (board_width / 2) as i8, SPAWN_ROW, speed)
    }

    pub fn shape_id(&self) -> ShapeId {
        self.template.id
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Fractional vertical position
    pub fn y(&self) -> f64 {
        self.row as f64 + self.progress as f64 / self.speed as f64
    }

    /// Absolute cells at an arbitrary placement of this piece
    fn cells_at(&self, x: i8, row: i8, rotation: Rotation) -> [CellPos; CELLS_PER_PIECE] {
        self.template
            .rotated(rotation)
            .map(|(dx, dy)| CellPos::new(x.saturating_add(dx), row.saturating_add(dy)))
    }

    /// The four absolute cells the piece currently occupies
    pub fn occupied_cells(&self) -> [CellPos; CELLS_PER_PIECE] {
        self.cells_at(self.x, self.row, self.rotation)
    }

    /// Shift by `dx` columns, clamping to the board edges instead of refusing.
    ///
    /// When the shifted piece would stick out, `dx` is reduced so it touches the
    /// violated edge (the left edge wins if both are violated). A move that
    /// would overlap a locked block is rolled back. Returns true if `x` changed.
    pub fn try_move(&mut self, dx: i8, board: &Board) -> bool {
        let dx = clamp_shift(self.occupied_cells(), dx, board.width());
        if dx == 0 {
            return false;
        }

        let candidate = self.cells_at(self.x.saturating_add(dx), self.row, self.rotation);
        if candidate.iter().any(|&c| board.has_cell(c)) {
            return false;
        }

        self.x = self.x.saturating_add(dx);
        true
    }

    /// Rotate by `delta_degrees` (a multiple of 90) in place, without kicks.
    ///
    /// Rejected, leaving the piece untouched, when any rotated cell would hit a
    /// locked block, leave the board columns, or sink below the floor. Cells
    /// above row 0 are allowed. Returns true if the rotation was applied.
    pub fn try_rotate(&mut self, delta_degrees: i32, board: &Board) -> bool {
        let rotation = self.rotation.add_degrees(delta_degrees);
        let width = board.width() as i8;
        let height = board.height() as i8;
        let blocked = self.cells_at(self.x, self.row, rotation).iter().any(|&c| {
            c.col < 0 || c.col >= width || c.row >= height || board.has_cell(c)
        });
        if blocked {
            return false;
        }

        self.rotation = rotation;
        true
    }

    /// Advance gravity by one tick (1 / speed of a row).
    ///
    /// Returns true when the accumulated progress completed a row.
    pub fn apply_gravity(&mut self) -> bool {
        self.progress += 1;
        if self.progress >= self.speed {
            self.progress -= self.speed;
            self.row += 1;
            return true;
        }
        false
    }

    /// Move down exactly one row, keeping the sub-row progress
    pub fn drop_row(&mut self) {
        self.row += 1;
    }
}

/// Reduce a horizontal shift so that every cell stays inside [0, width).
pub(crate) fn clamp_shift(cells: [CellPos; CELLS_PER_PIECE], dx: i8, width: u8) -> i8 {
    let min_col = cells.iter().map(|c| c.col).min().unwrap_or(0);
    let max_col = cells.iter().map(|c| c.col).max().unwrap_or(0);

    // Legal shifts are [lo, hi]; lo > hi only when the piece is wider than the board.
    let lo = min_col.saturating_neg();
    let hi = (width as i8).saturating_sub(1).saturating_sub(max_col);

    if dx < lo {
        lo
    } else if dx > hi {
        hi.max(lo)
    } else {
        dx
    }
}
