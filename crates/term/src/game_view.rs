//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellPos, ShapeId, ShapeKind};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';
const GHOST: char = '░';
const EMPTY: char = '·';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Draws the playfield, the active piece with its landing preview and a
/// status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered playfield in terminal cells
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.width as u16 * self.cell_w + 2,
            snap.height as u16 * self.cell_h + 2,
        )
    }

    /// Top-left corner of the border, centered in the viewport
    pub fn frame_origin(&self, snap: &GameSnapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Terminal position of the top-left character of a board cell
    pub fn cell_origin(&self, snap: &GameSnapshot, viewport: Viewport, col: u16, row: u16) -> (u16, u16) {
        let (x, y) = self.frame_origin(snap, viewport);
        (x + 1 + col * self.cell_w, y + 1 + row * self.cell_h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers keep one framebuffer across frames; nothing here allocates
    /// unless the viewport grew.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let (start_x, start_y) = self.frame_origin(snap, viewport);

        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG),
        );

        let empty = CellStyle::plain(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        for row in 0..snap.height as u16 {
            for col in 0..snap.width as u16 {
                self.fill_cell(fb, snap, viewport, col, row, EMPTY, empty);
            }
        }

        for block in &snap.blocks {
            self.draw_block(fb, snap, viewport, block.col, block.row, block.shape_id, false);
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::plain(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            for CellPos { col, row } in ghost {
                if let Some((col, row)) = on_board(snap, col, row) {
                    self.fill_cell(fb, snap, viewport, col, row, GHOST, style);
                }
            }
        }

        if let Some(active) = snap.active {
            for CellPos { col, row } in active.cells {
                self.draw_block(fb, snap, viewport, col, row, active.shape_id, true);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        col: i8,
        row: i8,
        shape_id: ShapeId,
        bold: bool,
    ) {
        // Cells above the top row are not drawn.
        let Some((col, row)) = on_board(snap, col, row) else {
            return;
        };
        let mut style = CellStyle::plain(shape_color(shape_id), PLAYFIELD_BG);
        if bold {
            style = style.bold();
        }
        self.fill_cell(fb, snap, viewport, col, row, BLOCK, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let (x, y) = self.cell_origin(snap, viewport, col, row);
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) {
        if x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let help = value.dim();

        let mut y = y;
        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, number, value);
            y += 3;
        }

        for line in ["←/→ move", "↑/↓ rotate", "space drop", "r restart", "q quit"] {
            fb.put_str(x, y, line, help);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, x: u16, y: u16, frame_w: u16, frame_h: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(
            x.saturating_add(frame_w.saturating_sub(text_w) / 2),
            y.saturating_add(frame_h / 2),
            text,
            style,
        );
    }
}

fn on_board(snap: &GameSnapshot, col: i8, row: i8) -> Option<(u16, u16)> {
    let inside = col >= 0 && row >= 0 && (col as u8) < snap.width && (row as u8) < snap.height;
    inside.then_some((col as u16, row as u16))
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

/// Color per shape; ids outside the standard set are gray.
pub fn shape_color(id: ShapeId) -> Rgb {
    match ShapeKind::from_id(id) {
        Some(ShapeKind::O) => Rgb::new(240, 220, 80),
        Some(ShapeKind::I) => Rgb::new(80, 220, 220),
        Some(ShapeKind::T) => Rgb::new(200, 120, 220),
        Some(ShapeKind::J) => Rgb::new(80, 120, 220),
        Some(ShapeKind::L) => Rgb::new(255, 165, 0),
        Some(ShapeKind::Z) => Rgb::new(220, 80, 80),
        Some(ShapeKind::S) => Rgb::new(100, 220, 120),
        None => Rgb::new(160, 160, 160),
    }
}
