//! Single-game session.
//!
//! A [`Session`] owns the draw stream and the current [`GameState`]. Front-ends
//! feed it [`RawInput`]; it classifies once, applies the resulting event and
//! keeps the draw stream positioned at the state's seed, so that a rejected or
//! ignored input never consumes a draw.

use crate::core::{GameState, RngStream};
use crate::input::{classify, Control, Key, RawInput};
use crate::types::Draw;

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 1 }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    rng: RngStream,
    state: GameState,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let state = GameState::new(config.seed);
        tracing::debug!(seed = config.seed, "session started");
        Self {
            rng: RngStream::new(state.seed()),
            state,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The draw the next tick, hard drop or hold would receive.
    pub fn peek_draw(&self) -> Draw {
        let mut rng = self.rng;
        rng.next_draw()
    }

    /// Classify and apply one raw input.
    ///
    /// Returns the new state, or `None` when the input does not apply to the
    /// current state.
    pub fn ingest(&mut self, raw: RawInput) -> Option<&GameState> {
        let Some(event) = classify(raw, &self.state) else {
            tracing::trace!(?raw, "input rejected");
            return None;
        };

        let was_ended = self.state.ended();
        self.state = self.state.apply(event);
        self.rng = RngStream::new(self.state.seed());

        tracing::debug!(
            event = event.as_str(),
            score = self.state.score(),
            level = self.state.level(),
            "event applied"
        );
        if self.state.ended() && !was_ended {
            tracing::debug!(score = self.state.score(), "game ended");
        }

        Some(&self.state)
    }

    /// Gravity tick with the next draw.
    pub fn tick(&mut self) -> Option<&GameState> {
        let draw = self.peek_draw();
        self.ingest(RawInput::Draw(draw))
    }

    /// Key press; hard drop and hold receive the next draw.
    pub fn press(&mut self, key: Key) -> Option<&GameState> {
        let raw = if key.needs_draw() {
            RawInput::DrawKey(self.peek_draw(), key)
        } else {
            RawInput::Key(key)
        };
        self.ingest(raw)
    }

    pub fn click(&mut self, control: Control) -> Option<&GameState> {
        self.ingest(RawInput::Click(control))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
