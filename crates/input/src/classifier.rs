//! Input classifier.
//!
//! Movement, rotation, hard drop and hold only apply to a running game;
//! pause and restart clicks are always accepted, so a paused or finished game
//! can be resumed or restarted. Ticks always pass: the reducer ignores them
//! when they do not apply.

use crate::core::GameState;
use crate::types::{Direction, Draw, GameEvent};

/// Game keys a front-end can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Down,
    Rotate,
    HardDrop,
    Hold,
}

impl Key {
    /// Parse a browser `KeyboardEvent.code`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_input::Key;
    ///
    /// assert_eq!(Key::from_code("ArrowLeft"), Some(Key::Left));
    /// assert_eq!(Key::from_code("Space"), Some(Key::HardDrop));
    /// assert_eq!(Key::from_code("KeyQ"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "ArrowDown" | "KeyS" => Some(Key::Down),
            "ArrowUp" | "KeyW" => Some(Key::Rotate),
            "Space" => Some(Key::HardDrop),
            "KeyC" | "ShiftLeft" | "ShiftRight" => Some(Key::Hold),
            _ => None,
        }
    }

    /// Whether the key arrives paired with a draw (it may spawn a piece).
    pub fn needs_draw(&self) -> bool {
        matches!(self, Key::HardDrop | Key::Hold)
    }
}

/// UI controls whose clicks are accepted in every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Pause,
    Restart,
}

impl Control {
    /// Resolve a UI element id.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "pause" => Some(Control::Pause),
            "restart" => Some(Control::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Pause => "pause",
            Control::Restart => "restart",
        }
    }
}

/// One event as delivered by a front-end, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// Timer tick carrying its draw.
    Draw(Draw),
    /// Plain key press.
    Key(Key),
    /// Key press paired with a draw (hard drop, hold).
    DrawKey(Draw, Key),
    /// Click on a pause/restart control.
    Click(Control),
}

pub fn is_tick(raw: &RawInput) -> bool {
    matches!(raw, RawInput::Draw(_))
}

/// Left/right/down/rotate on a running game.
pub fn is_movement(raw: &RawInput, state: &GameState) -> bool {
    state.is_running()
        && matches!(
            raw,
            RawInput::Key(Key::Left | Key::Right | Key::Down | Key::Rotate)
        )
}

pub fn is_hard_drop(raw: &RawInput, state: &GameState) -> bool {
    state.is_running() && matches!(raw, RawInput::DrawKey(_, Key::HardDrop))
}

pub fn is_hold(raw: &RawInput, state: &GameState) -> bool {
    state.is_running() && matches!(raw, RawInput::DrawKey(_, Key::Hold))
}

pub fn is_pause(raw: &RawInput) -> bool {
    matches!(raw, RawInput::Click(Control::Pause))
}

pub fn is_restart(raw: &RawInput) -> bool {
    matches!(raw, RawInput::Click(Control::Restart))
}

/// Build the event for `raw`, or `None` if it does not apply to `state`.
pub fn classify(raw: RawInput, state: &GameState) -> Option<GameEvent> {
    if is_tick(&raw) || is_pause(&raw) || is_restart(&raw) {
        return match raw {
            RawInput::Draw(draw) => Some(GameEvent::Tick(draw)),
            RawInput::Click(Control::Pause) => Some(GameEvent::Pause),
            RawInput::Click(Control::Restart) => Some(GameEvent::Restart),
            _ => None,
        };
    }

    if is_movement(&raw, state) {
        return match raw {
            RawInput::Key(Key::Left) => Some(GameEvent::Move(Direction::Left)),
            RawInput::Key(Key::Right) => Some(GameEvent::Move(Direction::Right)),
            RawInput::Key(Key::Down) => Some(GameEvent::Move(Direction::Down)),
            RawInput::Key(Key::Rotate) => Some(GameEvent::Rotate),
            _ => None,
        };
    }

    match raw {
        RawInput::DrawKey(draw, _) if is_hard_drop(&raw, state) => Some(GameEvent::HardDrop(draw)),
        RawInput::DrawKey(draw, _) if is_hold(&raw, state) => Some(GameEvent::Hold(draw)),
        _ => None,
    }
}
