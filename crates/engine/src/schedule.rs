//! Tick cadence tracking.

use std::time::Duration;

use crate::core::GameState;

/// Remembers the interval the tick timer was last armed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    level: u32,
    interval: Duration,
}

impl TickSchedule {
    /// Armed for `state`'s current level.
    pub fn new(state: &GameState) -> Self {
        Self {
            level: state.level(),
            interval: state.tick_interval(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the new interval when the timer must be re-armed: the level
    /// changed, or the game was just restarted.
    pub fn rearm(&mut self, state: &GameState) -> Option<Duration> {
        if state.level() == self.level && !state.just_restarted() {
            return None;
        }

        self.level = state.level();
        self.interval = state.tick_interval();
        tracing::debug!(
            level = self.level,
            interval_ms = self.interval.as_millis() as u64,
            "tick timer re-armed"
        );
        Some(self.interval)
    }
}
