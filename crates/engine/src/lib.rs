//! Session driver: owns the RNG stream and the current game state, and
//! drives the reducer from raw front-end input.
//!
//! The core never schedules anything. [`TickSchedule`] closes the loop: after
//! each event the driver asks it whether the tick timer needs re-arming.

pub mod schedule;
pub mod session;

pub use schedule::TickSchedule;
pub use session::{Session, SessionConfig};

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;
