//! Snapshot tests - the read-only view handed to renderers

use blockfall::core::{GameConfig, GameSnapshot, GameState};
use blockfall::types::Intent;

fn game() -> GameState {
    GameState::new(GameConfig::default().with_seed(31337)).unwrap()
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut state = game();
    state.tick_intents([Intent::HardDrop]);
    let value = serde_json::to_value(state.snapshot()).unwrap();

    assert_eq!(value["width"], 10);
    assert_eq!(value["height"], 24);
    assert_eq!(value["score"], 10);
    assert_eq!(value["running"], true);
    assert_eq!(value["game_over"], false);

    let blocks = value["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 4);
    for block in blocks {
        assert!(block["col"].is_i64());
        assert!(block["row"].is_i64());
        assert!(block["shape_id"].as_u64().unwrap() < 7);
    }

    assert_eq!(value["active"]["cells"].as_array().unwrap().len(), 4);
    assert_eq!(value["ghost"].as_array().unwrap().len(), 4);
}

#[test]
fn test_snapshot_matches_active_piece() {
    let state = game();
    let snap = state.snapshot();
    let piece = state.active().unwrap();
    let active = snap.active.unwrap();

    assert_eq!(active.shape_id, piece.shape_id());
    assert_eq!(active.rotation, piece.rotation);
    assert_eq!(active.cells, piece.occupied_cells());
    assert_eq!(snap.ghost, state.ghost_cells());
    assert!(snap.playable());
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let mut state = game();
    for _ in 0..3 {
        state.tick_intents([Intent::HardDrop]);
    }
    let mut snap = GameSnapshot::default();
    state.snapshot_into(&mut snap);
    assert_eq!(snap.blocks.len(), state.board().block_count());

    state.restart();
    state.snapshot_into(&mut snap);
    assert!(snap.blocks.is_empty());
    assert_eq!(snap.score, 0);
    assert_eq!(snap, state.snapshot());
}

#[test]
fn test_grid_and_block_lookup_agree() {
    let mut state = game();
    state.tick_intents([Intent::HardDrop]);
    let snap = state.snapshot();
    let grid = snap.grid();

    assert_eq!(grid.len(), 24);
    for (row, cells) in grid.iter().enumerate() {
        assert_eq!(cells.len(), 10);
        for (col, cell) in cells.iter().enumerate() {
            assert_eq!(*cell, snap.block_at(col as i8, row as i8));
        }
    }
}

#[test]
fn test_game_over_snapshot_has_no_active_piece() {
    let mut state = game();
    while state.is_running() {
        state.tick_intents([Intent::HardDrop]);
    }
    let snap = state.snapshot();
    assert!(snap.game_over);
    assert!(!snap.running);
    assert!(!snap.playable());
    assert_eq!(snap.active, None);
    assert_eq!(snap.ghost, None);

    let value = serde_json::to_value(&snap).unwrap();
    assert!(value["active"].is_null());
}

#[test]
fn test_quit_snapshot_is_not_game_over() {
    let mut state = game();
    state.tick_intents([Intent::Quit]);
    let snap = state.snapshot();
    assert!(!snap.running);
    assert!(!snap.game_over);
    assert!(snap.active.is_some());
}
