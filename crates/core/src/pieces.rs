//! Pieces module - tetromino shape matrices and clockwise rotation with wall kicks
//!
//! Shapes are square 0/1 matrices (2x2 for O, 4x4 for I, 3x3 otherwise).
//! Rotating the matrix inside its bounding box reproduces the SRS rotation
//! states, so the SRS clockwise kick tables apply unchanged (with `y` flipped
//! to grow downward).
//! Reference: https://tetris.wiki/SRS

use crate::collision::is_legal;
use crate::grid::Grid;
use crate::types::{Orientation, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Largest shape matrix edge.
pub const MAX_SHAPE: usize = 4;

/// Square occupancy mask of a piece in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    size: u8,
    cells: [[u8; MAX_SHAPE]; MAX_SHAPE],
}

impl Shape {
    /// Build an `size` x `size` shape from the top-left corner of `cells`.
    ///
    /// Cells outside the `size` x `size` square are ignored.
    pub fn new(size: u8, cells: [[u8; MAX_SHAPE]; MAX_SHAPE]) -> Self {
        let size = size.min(MAX_SHAPE as u8);
        let mut shape = Self {
            size,
            cells: [[0; MAX_SHAPE]; MAX_SHAPE],
        };
        for row in 0..size as usize {
            for col in 0..size as usize {
                shape.cells[row][col] = u8::from(cells[row][col] != 0);
            }
        }
        shape
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell value at `(row, col)`; 0 outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < self.size as usize && col < self.size as usize {
            self.cells[row][col]
        } else {
            0
        }
    }

    /// `(dx, dy)` offsets of occupied cells, row-major.
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |row| {
            (0..n)
                .filter(move |&col| self.cells[row][col] != 0)
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Index of the lowest row holding an occupied cell.
    pub fn lowest_row(&self) -> Option<u8> {
        (0..self.size)
            .rev()
            .find(|&row| self.cells[row as usize].iter().any(|&c| c != 0))
    }
}

/// Spawn-orientation matrix for a piece kind.
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::O => Shape::new(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::T => Shape::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::S => Shape::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::Z => Shape::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::J => Shape::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::L => Shape::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    }
}

/// Rotate a shape 90° clockwise: transpose, then reverse each row.
pub fn rotate_matrix(shape: &Shape) -> Shape {
    let n = shape.size as usize;
    let mut cells = [[0; MAX_SHAPE]; MAX_SHAPE];
    for (row, out) in cells.iter_mut().enumerate().take(n) {
        for (col, cell) in out.iter_mut().enumerate().take(n) {
            *cell = shape.cells[col][row];
        }
        out[..n].reverse();
    }
    Shape {
        size: shape.size,
        cells,
    }
}

/// Kick offsets for one clockwise transition, tried in order after the
/// in-place rotation fails.
pub type KickList = [(i8, i8); 4];

/// JLSTZ clockwise kicks, indexed by the orientation rotated from.
static JLSTZ_KICKS: [KickList; 4] = [
    // 0->1 (N->E)
    [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->2 (E->S)
    [(1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->3 (S->W)
    [(1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->0 (W->N)
    [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I clockwise kicks (different from JLSTZ)
static I_KICKS: [KickList; 4] = [
    // 0->1 (N->E)
    [(-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 1->2 (E->S)
    [(-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->3 (S->W)
    [(2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->0 (W->N)
    [(1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Wall-kick candidates for rotating `kind` clockwise out of `from`.
///
/// O never kicks: its matrix is identical in every orientation.
pub fn kicks(kind: PieceKind, from: Orientation) -> &'static [(i8, i8)] {
    let index = from.index() as usize;
    match kind {
        PieceKind::O => &[],
        PieceKind::I => &I_KICKS[index],
        _ => &JLSTZ_KICKS[index],
    }
}

/// A piece: kind, orientation, current matrix and top-left anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tetromino {
    pub kind: PieceKind,
    pub orientation: Orientation,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece at its spawn position: horizontally centred, with its
    /// lowest occupied row just above the grid.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = spawn_shape(kind);
        let lowest = shape.lowest_row().unwrap_or(0) as i8;
        Self {
            kind,
            orientation: Orientation::North,
            shape,
            x: (GRID_WIDTH as i8 - shape.size as i8) / 2,
            y: -(lowest + 1),
        }
    }

    /// The same kind back at spawn orientation and position.
    pub fn reset(&self) -> Self {
        Self::spawn(self.kind)
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute `(x, y)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .offsets()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn colour(&self) -> &'static str {
        self.kind.colour()
    }

    pub fn is_legal(&self, grid: &Grid) -> bool {
        is_legal(self.x, self.y, &self.shape, grid)
    }

    /// Cannot move down one more row.
    pub fn is_settled(&self, grid: &Grid) -> bool {
        !self.translated(0, 1).is_legal(grid)
    }

    /// Any occupied cell is still above the visible grid.
    pub fn is_above_grid(&self) -> bool {
        self.cells().any(|(_, y)| y < 0)
    }

    /// Lowest legal position straight below this one.
    ///
    /// Bounded by the distance to the floor, since the floor check rejects
    /// every step past it.
    pub fn dropped(&self, grid: &Grid) -> Self {
        let max_steps = (GRID_HEIGHT as i16 - self.y as i16).max(0) as usize + MAX_SHAPE;
        let mut piece = *self;
        for _ in 0..max_steps {
            if piece.is_settled(grid) {
                break;
            }
            piece = piece.translated(0, 1);
        }
        piece
    }
}

/// Rotate clockwise, trying wall kicks in listed order when the in-place
/// rotation is illegal. Returns `None` if every candidate is illegal.
pub fn rotate_tetromino(piece: &Tetromino, grid: &Grid) -> Option<Tetromino> {
    let rotated = Tetromino {
        orientation: piece.orientation.rotate_cw(),
        shape: rotate_matrix(&piece.shape),
        ..*piece
    };

    if rotated.is_legal(grid) {
        return Some(rotated);
    }

    kicks(piece.kind, piece.orientation)
        .iter()
        .map(|&(dx, dy)| rotated.translated(dx, dy))
        .find(|candidate| candidate.is_legal(grid))
}
