//! Scoring module - classic line-clear points and the NES-style speed curve
//!
//! All functions are pure. Speed is expressed in ticks per row (larger is
//! slower) and never drops below 1.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows at once on `level`.
///
/// 1 -> 40, 2 -> 100, 3 -> 300, 4 or more -> 1200, times (level + 1).
pub fn get_score(lines: u32, level: u32) -> u32 {
    let band = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[band].saturating_mul(level.saturating_add(1))
}

/// Ticks a piece needs to fall one row on `level`
pub fn get_speed(level: u32) -> u32 {
    match level {
        0..=8 => 48 - 5 * level,
        9 => 6,
        10..=18 => 5 - (level - 10) / 3,
        19..=28 => 2,
        _ => 1,
    }
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Lines credited up front when a game starts on `level`
pub fn starting_lines(level: u32) -> u32 {
    level.saturating_mul(LINES_PER_LEVEL)
}
