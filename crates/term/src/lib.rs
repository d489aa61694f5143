//! Terminal front end for the engine.
//!
//! [`GameView`] turns a [`core::GameSnapshot`] into a [`FrameBuffer`] of
//! styled characters (pure, unit-testable), and [`TerminalRenderer`] flushes
//! frame buffers to the terminal, redrawing only the runs that changed.
//!
//! Board cells are drawn two columns wide to compensate for the usual
//! terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
