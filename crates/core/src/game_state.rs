//! Game state module - the engine that owns and advances a game
//!
//! This module ties together the board, the active piece, the RNG and scoring.
//! [`GameState::tick`] is the only mutator during play and runs one fixed step:
//!
//! 1. apply the batched horizontal move, then the rotation
//! 2. hard drop, if requested (at most `height` rows)
//! 3. gravity, while the piece can still fall
//! 4. lock when it cannot, award the lock bonus and spawn the next piece
//! 5. clear full rows, update lines, level and score
//! 6. enter game over when a block sits on the top row

use log::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::pieces::{Piece, ShapeCatalog};
use crate::rng::{draw_spawn, RandomSource, SimpleRng};
use crate::scoring::{calculate_level, get_score, get_speed, starting_lines};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, LockedBlock};
use crate::types::{CellPos, InputBatch, Intent, CELLS_PER_PIECE, LOCK_BONUS};

/// Engine phase. Between ticks a running game is always `Falling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Spawning,
    Falling,
    Locking,
    LineClearing,
    GameOver,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The horizontal move changed the column
    pub moved: bool,
    /// The rotation was applied
    pub rotated: bool,
    /// Rows covered by a hard drop
    pub hard_drop_rows: u8,
    /// The active piece locked and a new one spawned
    pub locked: bool,
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub level_up: bool,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    config: GameConfig,
    catalog: ShapeCatalog,
    board: Board,
    active: Piece,
    rng: R,
    phase: GamePhase,
    score: u32,
    level: u32,
    lines: u32,
    /// Lines removed by the most recent tick
    last_clear: u32,
    ticks: u64,
    pieces: u32,
    /// A lock wrote cells outside the board or over other blocks
    spilled: bool,
    quit: bool,
}

impl GameState<SimpleRng> {
    /// Create a new game with the standard catalog, seeded from the config
    /// (seed 1 when none is set).
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = SimpleRng::new(config.seed.unwrap_or(1));
        Self::with_rng(config, ShapeCatalog::standard(), rng)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game with an explicit catalog and random source
    pub fn with_rng(config: GameConfig, catalog: ShapeCatalog, rng: R) -> Result<Self, ConfigError> {
        config.validate(&catalog)?;
        let board = Board::new(config.board_width as u8, config.board_height as u8);
        Ok(Self::assemble(config, catalog, board, rng))
    }

    /// Resume play on an existing board. The board's dimensions replace the
    /// ones in `config`.
    pub fn with_board(
        config: GameConfig,
        catalog: ShapeCatalog,
        board: Board,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let config = config.with_board(board.width() as u32, board.height() as u32);
        config.validate(&catalog)?;
        Ok(Self::assemble(config, catalog, board, rng))
    }

    fn assemble(config: GameConfig, catalog: ShapeCatalog, board: Board, mut rng: R) -> Self {
        let lines = starting_lines(config.starting_level);
        let level = calculate_level(lines);
        let active = Self::draw_piece(&mut rng, &catalog, board.width(), level);

        info!(
            "new game: {}x{} board, level {}, {} shapes",
            board.width(),
            board.height(),
            level,
            catalog.len()
        );

        Self {
            config,
            catalog,
            board,
            active,
            rng,
            phase: GamePhase::Falling,
            score: 0,
            level,
            lines,
            last_clear: 0,
            ticks: 0,
            pieces: 1,
            spilled: false,
            quit: false,
        }
    }

    /// Random shape and rotation at the spawn point, falling at the level's speed
    fn draw_piece(rng: &mut R, catalog: &ShapeCatalog, width: u8, level: u32) -> Piece {
        let (index, rotation) = draw_spawn(rng, catalog.len());
        let templates = catalog.templates();
        let template = templates[index % templates.len()];
        Piece::spawn(template, rotation, width, get_speed(level))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece; None once the game is over
    pub fn active(&self) -> Option<&Piece> {
        match self.phase {
            GamePhase::GameOver => None,
            _ => Some(&self.active),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lines_cleared_last_tick(&self) -> u32 {
        self.last_clear
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Pieces spawned so far, including the active one
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// True until the game ends or a quit is requested
    pub fn is_running(&self) -> bool {
        !self.game_over() && !self.quit
    }

    /// Current fall speed in ticks per row
    pub fn speed(&self) -> u32 {
        get_speed(self.level)
    }

    /// Where the active piece would come to rest
    pub fn ghost_cells(&self) -> Option<[CellPos; CELLS_PER_PIECE]> {
        self.active().map(|piece| self.board.landing_cells(piece))
    }

    /// Collapse intents into a batch and run one tick
    pub fn tick_intents(&mut self, intents: impl IntoIterator<Item = Intent>) -> TickReport {
        self.tick(&InputBatch::from_intents(intents))
    }

    /// Advance the game by one fixed step
    pub fn tick(&mut self, input: &InputBatch) -> TickReport {
        let mut report = TickReport::default();
        if !self.is_running() {
            return report;
        }

        self.last_clear = 0;
        if input.quit {
            info!("quit requested at tick {} (score {})", self.ticks, self.score);
            self.quit = true;
            return report;
        }
        self.ticks += 1;

        if let Some(dx) = input.horizontal {
            report.moved = self.active.try_move(dx, &self.board);
        }
        if let Some(delta) = input.rotation {
            report.rotated = self.active.try_rotate(delta, &self.board);
        }

        if input.hard_drop {
            report.hard_drop_rows = self.hard_drop();
        }

        if self.board.can_descend(&self.active) {
            self.active.apply_gravity();
        }

        if !self.board.can_descend(&self.active) {
            self.lock_active();
            report.locked = true;
            report.score_delta += LOCK_BONUS;
        }

        let level_before = self.level;
        let (cleared, points) = self.clear_lines();
        report.lines_cleared = cleared;
        report.score_delta += points;
        report.level_up = self.level > level_before;

        if self.spilled || self.board.is_top_out() {
            self.phase = GamePhase::GameOver;
            report.game_over = true;
            info!(
                "game over at tick {}: score {}, level {}, lines {}",
                self.ticks, self.score, self.level, self.lines
            );
        } else {
            self.phase = GamePhase::Falling;
        }

        report
    }

    /// Drop the active piece row by row until it rests; returns rows covered
    fn hard_drop(&mut self) -> u8 {
        let mut rows = 0;
        while rows < self.board.height() && self.board.can_descend(&self.active) {
            self.active.drop_row();
            rows += 1;
        }
        rows
    }

    /// Freeze the active piece, award the lock bonus and spawn the next piece
    fn lock_active(&mut self) {
        self.phase = GamePhase::Locking;
        let outcome = self.board.lock(&self.active);
        if !outcome.is_clean() {
            warn!(
                "piece {:?} locked with {} cell(s) outside the playfield",
                self.active.shape_id(),
                outcome.spilled
            );
            self.spilled = true;
        }
        self.score = self.score.saturating_add(LOCK_BONUS);
        debug!(
            "locked {:?} at ({}, {}) rotation {}",
            self.active.shape_id(),
            self.active.x,
            self.active.row,
            self.active.rotation.degrees()
        );

        self.phase = GamePhase::Spawning;
        self.active = Self::draw_piece(&mut self.rng, &self.catalog, self.board.width(), self.level);
        self.pieces = self.pieces.wrapping_add(1);
    }

    /// Remove full rows and score them at the updated level
    fn clear_lines(&mut self) -> (u32, u32) {
        let rows = self.board.full_rows();
        if rows.is_empty() {
            return (0, 0);
        }

        self.phase = GamePhase::LineClearing;
        let cleared = self.board.clear_and_compact(&rows) as u32;
        self.lines = self.lines.saturating_add(cleared);

        let previous_level = self.level;
        self.level = calculate_level(self.lines);
        let points = get_score(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.last_clear = cleared;

        debug!("cleared rows {:?} for {} points", rows, points);
        if self.level != previous_level {
            info!("level {} reached (speed {})", self.level, get_speed(self.level));
        }

        (cleared, points)
    }

    /// Start a new game with the same configuration; the RNG keeps running.
    pub fn restart(&mut self) {
        let lines = starting_lines(self.config.starting_level);
        self.board.clear();
        self.lines = lines;
        self.level = calculate_level(lines);
        self.score = 0;
        self.last_clear = 0;
        self.ticks = 0;
        self.spilled = false;
        self.quit = false;
        self.active = Self::draw_piece(&mut self.rng, &self.catalog, self.board.width(), self.level);
        self.pieces = 1;
        self.phase = GamePhase::Falling;
        info!("game restarted at level {}", self.level);
    }

    /// Write the current state into an existing snapshot, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();

        out.blocks.clear();
        out.blocks.extend(self.board.blocks().map(|(pos, shape_id)| LockedBlock {
            col: pos.col,
            row: pos.row,
            shape_id,
        }));

        out.active = self.active().map(|piece| ActiveSnapshot::from(*piece));
        out.ghost = self.ghost_cells();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.lines_cleared = self.last_clear;
        out.tick = self.ticks;
        out.running = self.is_running();
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{get_template, ShapeTemplate};
    use crate::types::{Rotation, ShapeId, ShapeKind};
    use std::collections::VecDeque;

    /// Replays fixed values, then zeros
    struct Script(VecDeque<u32>);

    impl RandomSource for Script {
        fn next_range(&mut self, max: u32) -> u32 {
            self.0.pop_front().unwrap_or(0) % max
        }
    }

    /// Every spawn is (shape index, quarter turns)
    fn script(spawns: &[(u32, u32)]) -> Script {
        Script(spawns.iter().flat_map(|&(s, r)| [s, r]).collect())
    }

    fn o_only() -> ShapeCatalog {
        ShapeCatalog::new(vec![get_template(ShapeKind::O)]).unwrap()
    }

    fn game(catalog: ShapeCatalog, spawns: &[(u32, u32)]) -> GameState<Script> {
        GameState::with_rng(GameConfig::default(), catalog, script(spawns)).unwrap()
    }

    fn idle() -> InputBatch {
        InputBatch::new()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default().with_seed(12345)).unwrap();
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.phase(), GamePhase::Falling);
        assert!(state.is_running());
        assert!(state.active().is_some());
        assert_eq!(state.board().block_count(), 0);
        assert_eq!(state.pieces(), 1);
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let err = GameState::new(GameConfig::default().with_board(0, 24)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDimension { .. }));

        let err = GameState::new(GameConfig::default().with_board(10, 4)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BoardTooSmall {
                name: "height",
                value: 4,
                required: 5
            }
        );
    }

    #[test]
    fn test_spawn_uses_scripted_shape_and_rotation() {
        let state = game(ShapeCatalog::standard(), &[(2, 1)]);
        let piece = state.active().unwrap();
        assert_eq!(piece.shape_id(), ShapeKind::T.id());
        assert_eq!(piece.rotation, Rotation::Deg90);
        assert_eq!((piece.x, piece.row), (5, 1));
        assert_eq!(piece.speed(), 48);
    }

    #[test]
    fn test_starting_level_seeds_lines_and_speed() {
        let config = GameConfig::default().with_starting_level(9);
        let state = GameState::with_rng(config, o_only(), script(&[])).unwrap();
        assert_eq!(state.level(), 9);
        assert_eq!(state.lines(), 90);
        assert_eq!(state.active().unwrap().speed(), 6);
    }

    #[test]
    fn test_gravity_moves_one_row_per_speed_ticks() {
        let mut state = game(o_only(), &[]);
        for _ in 0..47 {
            state.tick(&idle());
        }
        assert_eq!(state.active().unwrap().row, 1);
        state.tick(&idle());
        assert_eq!(state.active().unwrap().row, 2);
    }

    #[test]
    fn test_piece_locks_on_floor_and_awards_bonus() {
        let mut state = game(o_only(), &[]);
        // O piece at row 1 covers rows 1..=2; the floor is row 23.
        let report = state.tick_intents([Intent::HardDrop]);
        assert_eq!(report.hard_drop_rows, 21);
        assert!(report.locked);
        assert_eq!(report.score_delta, LOCK_BONUS);
        assert_eq!(state.score(), LOCK_BONUS);
        assert_eq!(state.board().block_count(), 4);
        assert!(state.board().has_cell(CellPos::new(5, 23)));
        assert!(state.board().has_cell(CellPos::new(6, 22)));
        assert_eq!(state.pieces(), 2);
        assert_eq!(state.active().unwrap().row, 1);
    }

    #[test]
    fn test_move_and_rotate_are_applied_in_order() {
        let mut state = game(ShapeCatalog::standard(), &[(1, 0)]);
        // I piece vertical at column 5.
        let report = state.tick_intents([Intent::RotateCw, Intent::MoveLeft, Intent::MoveRight]);
        assert!(report.moved);
        assert!(report.rotated);
        let piece = state.active().unwrap();
        assert_eq!(piece.x, 4);
        assert_eq!(piece.rotation, Rotation::Deg90);
    }

    #[test]
    fn test_single_line_clear_scores_at_new_level() {
        let mut board = Board::default();
        for col in 0..8 {
            board.set(CellPos::new(col, 23), Some(ShapeId(1)));
        }
        // O piece dropped at columns 8..=9 completes row 23.
        let config = GameConfig::default().with_starting_level(0);
        let mut state = GameState::with_board(config, o_only(), board, script(&[])).unwrap();
        for _ in 0..3 {
            state.tick_intents([Intent::MoveRight]);
        }
        assert_eq!(state.active().unwrap().x, 8);

        let report = state.tick_intents([Intent::HardDrop]);
        assert_eq!(report.lines_cleared, 1);
        assert_eq!(report.score_delta, LOCK_BONUS + 40);
        assert_eq!(state.lines(), 1);
        assert_eq!(state.lines_cleared_last_tick(), 1);
        // Upper half of the O fell into row 23.
        assert_eq!(state.board().block_count(), 2);
        assert!(state.board().has_cell(CellPos::new(8, 23)));

        state.tick(&idle());
        assert_eq!(state.lines_cleared_last_tick(), 0);
    }

    #[test]
    fn test_level_up_uses_recomputed_level() {
        let mut board = Board::default();
        for col in 0..8 {
            board.set(CellPos::new(col, 23), Some(ShapeId(1)));
            board.set(CellPos::new(col, 22), Some(ShapeId(1)));
        }
        let config = GameConfig::default();
        let mut state = GameState::with_board(config, o_only(), board, script(&[])).unwrap();
        // 8 lines already, clearing 2 reaches level 1.
        state.lines = 8;
        for _ in 0..3 {
            state.tick_intents([Intent::MoveRight]);
        }
        let report = state.tick_intents([Intent::HardDrop]);
        assert_eq!(report.lines_cleared, 2);
        assert!(report.level_up);
        assert_eq!(state.level(), 1);
        assert_eq!(report.score_delta, LOCK_BONUS + 200);
    }

    #[test]
    fn test_game_over_when_top_row_occupied() {
        let mut state = game(o_only(), &[]);
        let mut ticks = 0;
        while state.is_running() && ticks < 100 {
            state.tick_intents([Intent::HardDrop]);
            ticks += 1;
        }
        // The twelfth O spawns into the stack and cannot lock cleanly.
        assert!(state.game_over());
        assert_eq!(ticks, 12);
        assert!(state.active().is_none());

        // Further ticks are no-ops.
        let score = state.score();
        let report = state.tick_intents([Intent::HardDrop]);
        assert_eq!(report, TickReport::default());
        assert_eq!(state.score(), score);
    }

    #[test]
    fn test_lock_on_top_row_ends_game() {
        let mut board = Board::default();
        // Column 5 rows 2..24 filled, column 6 left open so no row is full.
        for row in 2..24 {
            board.set(CellPos::new(5, row), Some(ShapeId(1)));
        }
        let tall = ShapeTemplate::new(ShapeId(0), [(0, -1), (0, 0), (1, 0), (1, -1)]);
        let catalog = ShapeCatalog::new(vec![tall]).unwrap();
        let mut state = GameState::with_board(GameConfig::default(), catalog, board, script(&[])).unwrap();
        assert!(state.active().is_some());
        let report = state.tick(&idle());
        assert!(report.locked);
        assert!(report.game_over);
    }

    #[test]
    fn test_quit_stops_without_game_over() {
        let mut state = game(o_only(), &[]);
        state.tick_intents([Intent::Quit, Intent::HardDrop]);
        assert!(state.quit_requested());
        assert!(!state.game_over());
        assert!(!state.is_running());
        assert_eq!(state.board().block_count(), 0);
        assert_eq!(state.ticks(), 0);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = game(o_only(), &[]);
        state.tick_intents([Intent::HardDrop]);
        state.tick_intents([Intent::Quit]);
        state.restart();
        assert!(state.is_running());
        assert_eq!(state.score(), 0);
        assert_eq!(state.board().block_count(), 0);
        assert_eq!(state.ticks(), 0);
        assert_eq!(state.pieces(), 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = game(o_only(), &[]);
        state.tick_intents([Intent::HardDrop]);
        let snap = state.snapshot();
        assert_eq!(snap.width, 10);
        assert_eq!(snap.height, 24);
        assert_eq!(snap.blocks.len(), 4);
        assert_eq!(snap.score, LOCK_BONUS);
        assert!(snap.running);
        assert!(!snap.game_over);
        let active = snap.active.unwrap();
        assert_eq!(active.shape_id, ShapeId(0));
        assert_eq!(snap.ghost.unwrap()[0], CellPos::new(5, 20));
    }
}
