//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain values with no I/O, making them usable in any context
//! (core reducer, input classification, terminal view, JSON adapter).
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - Rows above the grid (negative `y`) form an unlimited spawn buffer
//!
//! # Tick Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 800ms |
//! | 2 | 650ms |
//! | 3 | 500ms |
//! | 4 | 400ms |
//! | 5 | 320ms |
//! | 6 | 250ms |
//! | 7 | 200ms |
//! | 8 | 160ms |
//! | 9+ | 120ms floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, Orientation, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Orientation::North.rotate_cw(), Orientation::East);
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//! assert_eq!((GRID_WIDTH, GRID_HEIGHT), (10, 20));
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Points awarded per cleared row.
pub const ROW_SCORE: u32 = 100;

/// Score needed to advance one level.
pub const LEVEL_SCORE_STEP: u32 = 1000;

/// Tick intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8
pub const TICK_INTERVALS_MS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Tick interval used for every level past the table.
pub const TICK_INTERVAL_FLOOR_MS: u32 = 120;

/// LCG multiplier.
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;

/// LCG increment.
pub const LCG_INCREMENT: u64 = 12_345;

/// LCG modulus (2^31).
pub const LCG_MODULUS: u64 = 0x8000_0000;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in draw-index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Kind for a draw index; indices past the end clamp to the last kind.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Display colour as a CSS hex string.
    pub fn colour(&self) -> &'static str {
        match self {
            PieceKind::I => "#00f0f0",
            PieceKind::O => "#f0f000",
            PieceKind::T => "#a000f0",
            PieceKind::S => "#00f000",
            PieceKind::Z => "#f00000",
            PieceKind::J => "#0000f0",
            PieceKind::L => "#f0a000",
        }
    }
}

/// Orientation of a piece, clockwise from spawn.
///
/// - **North**: Spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
///
/// The cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Orientation;
    ///
    /// assert_eq!(Orientation::North.rotate_cw(), Orientation::East);
    /// assert_eq!(Orientation::West.rotate_cw(), Orientation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Quarter turns from spawn (0-3).
    pub fn index(&self) -> u8 {
        match self {
            Orientation::North => 0,
            Orientation::East => 1,
            Orientation::South => 2,
            Orientation::West => 3,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::East => "east",
            Orientation::South => "south",
            Orientation::West => "west",
        }
    }
}

/// Direction of a single-cell translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// `(dx, dy)` offset; `y` grows downward.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// One value drawn from the piece LCG.
///
/// Events that may introduce a new piece (tick, hard drop, hold) carry a draw;
/// the reducer turns it into a [`PieceKind`] only when it actually spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Draw(u32);

impl Draw {
    /// Wrap a raw LCG output. Values are reduced modulo [`LCG_MODULUS`].
    pub fn new(value: u32) -> Self {
        Self((value as u64 % LCG_MODULUS) as u32)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Map to `[0, 1]` by dividing by `m - 1`.
    pub fn scaled(&self) -> f64 {
        self.0 as f64 / (LCG_MODULUS - 1) as f64
    }

    /// Piece selected by `floor(scaled * 7)`, clamped to the last kind.
    ///
    /// ```
    /// use blockfall_types::{Draw, PieceKind, LCG_MODULUS};
    ///
    /// assert_eq!(Draw::new(0).piece_kind(), PieceKind::I);
    /// assert_eq!(Draw::new((LCG_MODULUS - 1) as u32).piece_kind(), PieceKind::L);
    /// ```
    pub fn piece_kind(&self) -> PieceKind {
        let index = (self.scaled() * PieceKind::ALL.len() as f64).floor() as usize;
        PieceKind::from_index(index)
    }
}

/// A discrete event applied by the game reducer.
///
/// Built once at the ingestion boundary; the reducer never re-derives an
/// event's category from its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// Gravity step; the draw is consumed if the piece settles.
    Tick(Draw),
    /// Translate the active piece one cell.
    Move(Direction),
    /// Rotate the active piece 90° clockwise with wall kicks.
    Rotate,
    /// Drop to the lowest legal row and settle immediately.
    HardDrop(Draw),
    /// Hold the active piece, or swap with the held one.
    Hold(Draw),
    /// Toggle pause.
    Pause,
    /// Start a new game, keeping the high score.
    Restart,
}

impl GameEvent {
    /// Short name, used in logs and the wire protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Tick(_) => "tick",
            GameEvent::Move(Direction::Left) => "moveLeft",
            GameEvent::Move(Direction::Right) => "moveRight",
            GameEvent::Move(Direction::Down) => "moveDown",
            GameEvent::Rotate => "rotate",
            GameEvent::HardDrop(_) => "hardDrop",
            GameEvent::Hold(_) => "hold",
            GameEvent::Pause => "pause",
            GameEvent::Restart => "restart",
        }
    }
}
