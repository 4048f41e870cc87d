//! Grid merge, row clearing and collision tests

use blockfall::core::pieces::spawn_shape;
use blockfall::core::{is_collision, is_out_of_bounds, Grid, MergeError, Tetromino};
use blockfall::types::{PieceKind, GRID_HEIGHT, GRID_WIDTH};

fn fill_row(grid: &mut Grid, y: i8) {
    for x in 0..GRID_WIDTH as i8 {
        grid.set(x, y, true);
    }
}

#[test]
fn test_clear_with_no_full_rows_is_identity() {
    let mut grid = Grid::new();
    grid.set(0, 19, true);
    grid.set(9, 10, true);

    let (cleared, count) = grid.clear_completed_rows();
    assert_eq!(count, 0);
    assert_eq!(cleared, grid);
}

#[test]
fn test_clear_keeps_incomplete_rows_in_order() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19);
    grid.set(2, 18, true);
    fill_row(&mut grid, 17);
    grid.set(7, 16, true);

    let (cleared, count) = grid.clear_completed_rows();
    assert_eq!(count, 2);

    // Two zeroed rows on top, then the survivors in their original order.
    assert!(cleared.rows()[0].iter().all(|&c| c == 0));
    assert!(cleared.rows()[1].iter().all(|&c| c == 0));
    assert!(cleared.is_occupied(7, 18));
    assert!(cleared.is_occupied(2, 19));
    assert_eq!(cleared.occupied_count(), 2);
}

#[test]
fn test_merge_writes_piece_cells() {
    let piece = Tetromino::spawn(PieceKind::T).translated(0, 10);
    let merged = Grid::new().merge(&piece).unwrap();

    assert_eq!(merged.occupied_count(), 4);
    for (x, y) in piece.cells() {
        assert!(merged.is_occupied(x, y));
    }
}

#[test]
fn test_merge_rejects_overlap() {
    let piece = Tetromino::spawn(PieceKind::O).translated(0, 10);
    let (x, y) = piece.cells().next().unwrap();
    let mut grid = Grid::new();
    grid.set(x, y, true);

    assert_eq!(
        grid.merge(&piece),
        Err(MergeError::Overlap { row: y, col: x })
    );
}

#[test]
fn test_merge_rejects_cells_above_grid() {
    let piece = Tetromino::spawn(PieceKind::O);
    assert!(matches!(
        Grid::new().merge(&piece),
        Err(MergeError::OutOfGrid { .. })
    ));
}

#[test]
fn test_collision_ignores_rows_above_grid() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 0);
    let shape = spawn_shape(PieceKind::O);

    assert!(!is_collision(4, -2, &shape, &grid));
    assert!(is_collision(4, -1, &shape, &grid));
}

#[test]
fn test_out_of_bounds_edges() {
    let shape = spawn_shape(PieceKind::I);
    // Row 1 of the I matrix is the occupied one.
    assert!(!is_out_of_bounds(0, -1, &shape));
    assert!(!is_out_of_bounds(6, 0, &shape));
    assert!(is_out_of_bounds(-1, 0, &shape));
    assert!(is_out_of_bounds(7, 0, &shape));
    assert!(!is_out_of_bounds(0, GRID_HEIGHT as i8 - 2, &shape));
    assert!(is_out_of_bounds(0, GRID_HEIGHT as i8 - 1, &shape));
}
