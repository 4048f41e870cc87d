//! Grid module - the settled cells of the playfield
//!
//! The grid is a 10x20 array of occupancy values (0 = empty, 1 = occupied).
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the grid (y < 0) are a spawn buffer and are never stored.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;

/// One grid row.
pub type Row = [u8; WIDTH];

/// Why a piece could not be merged into the grid.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum MergeError {
    #[error("cell at row {row}, column {col} is already occupied")]
    Overlap { row: i8, col: i8 },
    #[error("cell at row {row}, column {col} lies outside the grid")]
    OutOfGrid { row: i8, col: i8 },
}

/// The settled cells - 10 columns x 20 rows, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Grid {
    rows: [Row; HEIGHT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            rows: [[0; WIDTH]; HEIGHT],
        }
    }

    /// Build a grid from explicit rows. Any non-zero value is stored as 1.
    pub fn from_rows(rows: [Row; HEIGHT]) -> Self {
        let mut grid = Self { rows };
        for cell in grid.rows.iter_mut().flatten() {
            *cell = u8::from(*cell != 0);
        }
        grid
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize, x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<u8> {
        Self::index(x, y).map(|(row, col)| self.rows[row][col])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, occupied: bool) -> bool {
        match Self::index(x, y) {
            Some((row, col)) => {
                self.rows[row][col] = u8::from(occupied);
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(v) if v != 0)
    }

    pub fn rows(&self) -> &[Row; HEIGHT] {
        &self.rows
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows.get(y).is_some_and(row_full)
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&c| c != 0).count()
    }

    /// Write the piece's occupied cells into a copy of the grid.
    ///
    /// Cells are overwritten, never summed: landing on an occupied cell, or
    /// on a cell outside the grid (including the spawn buffer), is rejected.
    pub fn merge(&self, piece: &Tetromino) -> Result<Grid, MergeError> {
        let mut merged = *self;
        for (col, row) in piece.cells() {
            let Some((r, c)) = Self::index(col, row) else {
                return Err(MergeError::OutOfGrid { row, col });
            };
            if merged.rows[r][c] != 0 {
                return Err(MergeError::Overlap { row, col });
            }
            merged.rows[r][c] = 1;
        }
        Ok(merged)
    }

    /// Remove every full row and prepend the same number of empty rows.
    ///
    /// Returns the new grid and the number of rows removed. Rows that are
    /// kept stay in their original relative order.
    pub fn clear_completed_rows(&self) -> (Grid, u32) {
        let kept: ArrayVec<Row, HEIGHT> = self
            .rows
            .iter()
            .filter(|row| !row_full(row))
            .copied()
            .collect();

        let cleared = HEIGHT - kept.len();
        if cleared == 0 {
            return (*self, 0);
        }

        let mut rows = [[0; WIDTH]; HEIGHT];
        rows[cleared..].copy_from_slice(&kept);
        (Grid { rows }, cleared as u32)
    }
}

fn row_full(row: &Row) -> bool {
    row.iter().all(|&cell| cell == 1)
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some((0, 0)));
        assert_eq!(Grid::index(9, 19), Some((19, 9)));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
        assert_eq!(Grid::index(0, -1), None);
    }

    #[test]
    fn test_from_rows_normalises_values() {
        let mut rows = [[0u8; WIDTH]; HEIGHT];
        rows[3][4] = 7;
        let grid = Grid::from_rows(rows);
        assert_eq!(grid.get(4, 3), Some(1));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_merge_writes_cells() {
        let piece = Tetromino::spawn(PieceKind::O).translated(0, 20);
        let merged = Grid::new().merge(&piece).unwrap();
        assert_eq!(merged.occupied_count(), 4);
        assert!(merged.is_occupied(4, 18));
        assert!(merged.is_occupied(5, 19));
    }

    #[test]
    fn test_merge_rejects_overlap() {
        let mut grid = Grid::new();
        grid.set(4, 19, true);
        let piece = Tetromino::spawn(PieceKind::O).translated(0, 20);
        assert_eq!(
            grid.merge(&piece),
            Err(MergeError::Overlap { row: 19, col: 4 })
        );
        // Nothing is summed through.
        assert!(grid.rows().iter().flatten().all(|&c| c <= 1));
    }

    #[test]
    fn test_merge_rejects_spawn_buffer() {
        let piece = Tetromino::spawn(PieceKind::T);
        assert!(matches!(
            Grid::new().merge(&piece),
            Err(MergeError::OutOfGrid { .. })
        ));
    }

    #[test]
    fn test_clear_two_rows_keeps_order() {
        let mut grid = Grid::new();
        for x in 0..10 {
            grid.set(x, 19, true);
            grid.set(x, 17, true);
        }
        grid.set(0, 18, true);
        grid.set(3, 16, true);

        let (cleared, count) = grid.clear_completed_rows();
        assert_eq!(count, 2);
        assert_eq!(cleared.rows()[0], [0; WIDTH]);
        assert_eq!(cleared.rows()[1], [0; WIDTH]);
        assert!(cleared.is_occupied(0, 19));
        assert!(cleared.is_occupied(3, 18));
        assert_eq!(cleared.occupied_count(), 2);
    }

    #[test]
    fn test_clear_without_full_rows_is_identity() {
        let mut grid = Grid::new();
        grid.set(2, 19, true);
        let (same, count) = grid.clear_completed_rows();
        assert_eq!(count, 0);
        assert_eq!(same, grid);
    }
}
