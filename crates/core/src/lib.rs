//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and the state reducer. It has
//! **no dependencies** on rendering, input devices, timers, or networking:
//!
//! - **Deterministic**: the same seed and the same event sequence produce the same game
//! - **Immutable**: every transition takes `&GameState` and returns a new `GameState`
//! - **Total**: illegal moves are rejected by returning the prior state, never by erroring
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 occupancy grid, overlap-checked merge and row clearing
//! - [`collision`]: collision and bounds predicates for a shape at a position
//! - [`pieces`]: shape matrices, matrix rotation, wall-kick tables, [`Tetromino`]
//! - [`rng`]: seeded linear-congruential piece stream
//! - [`scoring`]: score per row, level thresholds and tick cadence
//! - [`game_state`]: the [`GameState`] reducer
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, RngStream};
//! use blockfall_types::{Direction, GameEvent};
//!
//! let mut rng = RngStream::new(12345);
//! let state = GameState::new(12345);
//!
//! let state = state.apply(GameEvent::Move(Direction::Left));
//! let state = state.apply(GameEvent::Rotate);
//! let state = state.apply(GameEvent::HardDrop(rng.next_draw()));
//!
//! assert!(!state.ended());
//! assert_eq!(state.score(), 0);
//! ```
//!
//! # Timing
//!
//! The core never owns a timer. The driver reads [`GameState::level`], asks
//! [`scoring::tick_interval`] for the cadence and re-arms its own timer.

pub mod collision;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{is_collision, is_legal, is_out_of_bounds};
pub use game_state::GameState;
pub use grid::{Grid, MergeError, Row};
pub use pieces::{kicks, rotate_matrix, rotate_tetromino, Shape, Tetromino};
pub use rng::RngStream;
pub use scoring::{level_for_score, score_delta, tick_interval, tick_interval_ms};
