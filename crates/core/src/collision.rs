//! Collision module - placement predicates for a shape at an anchor
//!
//! Rows above the grid (negative `y`) are always in bounds and never collide
//! with settled cells, which gives pieces unlimited spawn headroom.

use crate::grid::Grid;
use crate::pieces::Shape;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// True if any occupied cell of `shape` anchored at `(x, y)` leaves the grid
/// sideways or through the floor, or lands on a settled cell.
pub fn is_collision(x: i8, y: i8, shape: &Shape, grid: &Grid) -> bool {
    shape.offsets().any(|(dx, dy)| {
        let (col, row) = (x + dx, y + dy);
        outside(col, row) || (row >= 0 && grid.is_occupied(col, row))
    })
}

/// True if any occupied cell of `shape` anchored at `(x, y)` lies left or
/// right of the grid or below its floor.
pub fn is_out_of_bounds(x: i8, y: i8, shape: &Shape) -> bool {
    shape
        .offsets()
        .any(|(dx, dy)| outside(x + dx, y + dy))
}

/// Neither colliding nor out of bounds.
pub fn is_legal(x: i8, y: i8, shape: &Shape, grid: &Grid) -> bool {
    !is_collision(x, y, shape, grid) && !is_out_of_bounds(x, y, shape)
}

#[inline(always)]
fn outside(col: i8, row: i8) -> bool {
    col < 0 || col >= GRID_WIDTH as i8 || row >= GRID_HEIGHT as i8
}
