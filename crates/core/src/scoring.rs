//! Scoring module - row score, level thresholds and tick cadence
//!
//! Each cleared row is worth a flat 100 points; the level is the score in
//! thousands. The tick interval shrinks with the level down to a floor.

use std::time::Duration;

use crate::types::{LEVEL_SCORE_STEP, ROW_SCORE, TICK_INTERVALS_MS, TICK_INTERVAL_FLOOR_MS};

/// Points for clearing `rows` rows at once.
pub fn score_delta(rows: u32) -> u32 {
    ROW_SCORE.saturating_mul(rows)
}

/// Level reached at `score`.
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP
}

/// Get tick interval for a level (in milliseconds)
/// Returns interval based on level, clamped at the floor
pub fn tick_interval_ms(level: u32) -> u32 {
    TICK_INTERVALS_MS
        .get(level as usize)
        .copied()
        .unwrap_or(TICK_INTERVAL_FLOOR_MS)
}

pub fn tick_interval(level: u32) -> Duration {
    Duration::from_millis(tick_interval_ms(level) as u64)
}
