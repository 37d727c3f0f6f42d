//! Tests for layer operations (new, delete, swap, select, resize)

use pretty_assertions::assert_eq;
use tilemap_engine_edit::{Size, TileGrid, TileMapError};

use super::{create_test_state, numbered_state, rows};

// ============================================================================
// New Layer Tests
// ============================================================================

#[test]
fn test_new_layer_inserts_at_current() {
    let mut state = numbered_state(2, 1, 2);
    state.select_layer(1).unwrap();
    state.new_layer();

    assert_eq!(state.get_grid().layer_count(), 3);
    assert_eq!(state.get_current_layer(), 1);
    assert_eq!(rows(&state, 0), vec![vec![1, 2]]);
    assert_eq!(rows(&state, 1), vec![vec![0, 0]]);
    assert_eq!(rows(&state, 2), vec![vec![3, 4]]);
}

#[test]
fn test_new_layer_at_front() {
    let mut state = numbered_state(1, 1, 1);
    state.new_layer();
    assert_eq!(rows(&state, 0), vec![vec![0]]);
    assert_eq!(rows(&state, 1), vec![vec![1]]);
}

// ============================================================================
// Delete Layer Tests
// ============================================================================

#[test]
fn test_delete_current_layer() {
    let mut state = numbered_state(1, 1, 3);
    state.select_layer(1).unwrap();
    state.delete_layers(&[]).unwrap();

    assert_eq!(state.get_grid().layer_count(), 2);
    assert_eq!(rows(&state, 0), vec![vec![1]]);
    assert_eq!(rows(&state, 1), vec![vec![3]]);
    assert_eq!(state.get_current_layer(), 1);
}

#[test]
fn test_delete_several_layers() {
    let mut state = numbered_state(1, 1, 4);
    state.delete_layers(&[3, 0, 3]).unwrap();
    assert_eq!(state.get_grid().layer_count(), 2);
    assert_eq!(rows(&state, 0), vec![vec![2]]);
    assert_eq!(rows(&state, 1), vec![vec![3]]);
}

#[test]
fn test_delete_clamps_current_layer() {
    let mut state = numbered_state(1, 1, 3);
    state.select_layer(2).unwrap();
    state.delete_layers(&[2]).unwrap();
    assert_eq!(state.get_current_layer(), 1);
}

#[test]
fn test_delete_all_layers_leaves_empty_layer() {
    let mut state = numbered_state(2, 2, 2);
    state.delete_layers(&[0, 1]).unwrap();
    assert_eq!(state.get_grid().layer_count(), 1);
    assert_eq!(state.get_current_layer(), 0);
    assert_eq!(rows(&state, 0), vec![vec![0, 0], vec![0, 0]]);
}

#[test]
fn test_repeated_delete_never_drops_last_layer() {
    let mut state = numbered_state(2, 1, 3);
    for _ in 0..5 {
        state.delete_layers(&[]).unwrap();
        assert!(state.get_grid().layer_count() >= 1);
    }
    assert_eq!(state.get_grid().layer_count(), 1);
    assert_eq!(rows(&state, 0), vec![vec![0, 0]]);
}

#[test]
fn test_delete_invalid_layers_still_removes_valid_ones() {
    let mut state = numbered_state(1, 1, 3);
    let err = state.delete_layers(&[1, 7, 9]).unwrap_err();

    let TileMapError::InvalidLayerIndices { layers, layer_count } = err else {
        panic!("expected invalid layer indices, got {err}");
    };
    assert_eq!(layers, vec![7, 9]);
    assert_eq!(layer_count, 3);
    assert_eq!(state.get_grid().layer_count(), 2);
    assert_eq!(rows(&state, 1), vec![vec![3]]);
}

// ============================================================================
// Swap / Select Tests
// ============================================================================

#[test]
fn test_swap_layers() {
    let mut state = numbered_state(1, 1, 3);
    state.swap_layers(0, 2).unwrap();
    assert_eq!(rows(&state, 0), vec![vec![3]]);
    assert_eq!(rows(&state, 2), vec![vec![1]]);

    state.swap_layers(1, 1).unwrap();
    assert_eq!(rows(&state, 1), vec![vec![2]]);
}

#[test]
fn test_swap_invalid_layer() {
    let mut state = numbered_state(1, 1, 2);
    let err = state.swap_layers(0, 2).unwrap_err();
    assert!(matches!(err, TileMapError::InvalidLayerIndex { layer: 2, layer_count: 2 }));
    assert_eq!(rows(&state, 0), vec![vec![1]]);
}

#[test]
fn test_select_invalid_layer() {
    let mut state = create_test_state(1, 1, 2);
    state.select_layer(1).unwrap();
    assert!(matches!(state.select_layer(2), Err(TileMapError::InvalidLayerIndex { layer: 2, .. })));
    assert_eq!(state.get_current_layer(), 1);
}

#[test]
fn test_set_grid_clamps_current_layer() {
    let mut state = create_test_state(2, 2, 3);
    state.select_layer(2).unwrap();
    state.set_grid(TileGrid::new((2, 2), 2).unwrap());
    assert_eq!(state.get_current_layer(), 1);

    state.paint(9, (0, 0));
    assert_eq!(state.tiles_at((0, 0)), vec![(1, 9)]);
}

// ============================================================================
// Resize Tests
// ============================================================================

#[test]
fn test_resize_keeps_top_left() {
    let mut state = numbered_state(3, 2, 2);
    state.resize((2, 3)).unwrap();

    assert_eq!(state.get_grid().size(), Size::new(2, 3));
    assert_eq!(rows(&state, 0), vec![vec![1, 2], vec![4, 5], vec![0, 0]]);
    assert_eq!(rows(&state, 1), vec![vec![7, 8], vec![10, 11], vec![0, 0]]);
}

#[test]
fn test_resize_rejects_empty_size() {
    let mut state = numbered_state(2, 2, 1);
    assert!(matches!(state.resize((0, 4)), Err(TileMapError::InvalidSize { .. })));
    assert_eq!(state.get_grid().size(), Size::new(2, 2));
}
