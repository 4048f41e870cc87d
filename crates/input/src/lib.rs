//! Input module - from raw front-end events to [`GameEvent`]s.
//!
//! This crate sits at the ingestion boundary. Front-ends describe what
//! happened in terms of [`RawInput`] (a timer draw, a key, a draw+key pair, a
//! button click); the [`classifier`] decides whether that input applies to the
//! current state and builds the tagged [`GameEvent`] exactly once. The
//! [`map`] module translates `crossterm` key events for the terminal front-end.
//!
//! [`GameEvent`]: crate::types::GameEvent

pub mod classifier;
pub mod map;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use classifier::{
    classify, is_hard_drop, is_hold, is_movement, is_pause, is_restart, is_tick, Control, Key,
    RawInput,
};
pub use map::{key_from_event, should_quit, InputCommand};
