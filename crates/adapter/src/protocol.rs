//! Protocol module - line-delimited JSON messages
//!
//! Client -> server lines carry a key press or a control click. Server ->
//! client lines carry the full game state or an error.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Grid, Tetromino};
use crate::input::{Control, Key};
use crate::types::{Orientation, PieceKind};

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum InboundWire {
    Key { key: String },
    Click { control: String },
}

/// A parsed client line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    Key(Key),
    Click(Control),
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid message: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unknown key code {0:?}")]
    UnknownKey(String),
    #[error("unknown control {0:?}")]
    UnknownControl(String),
}

impl ProtocolError {
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::InvalidJson(_) => "invalid_json",
            ProtocolError::UnknownKey(_) => "unknown_key",
            ProtocolError::UnknownControl(_) => "unknown_control",
        }
    }
}

/// Parse one inbound line.
pub fn parse_inbound(line: &str) -> Result<Inbound, ProtocolError> {
    match serde_json::from_str::<InboundWire>(line)? {
        InboundWire::Key { key } => Key::from_code(&key)
            .map(Inbound::Key)
            .ok_or(ProtocolError::UnknownKey(key)),
        InboundWire::Click { control } => Control::from_id(&control)
            .map(Inbound::Click)
            .ok_or(ProtocolError::UnknownControl(control)),
    }
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateType {
    #[serde(rename = "state")]
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

/// A piece as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
    pub colour: String,
    /// Absolute `[x, y]` of each occupied cell; `y < 0` is above the grid.
    pub cells: Vec<[i8; 2]>,
}

impl From<&Tetromino> for PieceView {
    fn from(piece: &Tetromino) -> Self {
        Self {
            kind: piece.kind,
            orientation: piece.orientation,
            x: piece.x,
            y: piece.y,
            colour: piece.colour().to_string(),
            cells: piece.cells().map(|(x, y)| [x, y]).collect(),
        }
    }
}

/// Full game state, sent after every processed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    #[serde(rename = "type")]
    pub msg_type: StateType,
    /// Increments with every state sent; gaps mean intermediate states were
    /// coalesced.
    pub seq: u64,
    pub grid: Grid,
    pub active: PieceView,
    pub ghost_y: i8,
    pub next: PieceView,
    pub held: Option<PieceView>,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub rows_cleared: u32,
    pub paused: bool,
    pub ended: bool,
    pub tick_interval_ms: u64,
}

impl StateMessage {
    pub fn from_state(seq: u64, state: &GameState) -> Self {
        Self {
            msg_type: StateType::State,
            seq,
            grid: *state.grid(),
            active: PieceView::from(&state.active()),
            ghost_y: state.ghost_y(),
            next: PieceView::from(&state.next()),
            held: state.held().as_ref().map(PieceView::from),
            score: state.score(),
            level: state.level(),
            high_score: state.high_score(),
            rows_cleared: state.rows_cleared(),
            paused: state.paused(),
            ended: state.ended(),
            tick_interval_ms: state.tick_interval().as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub code: String,
    pub message: String,
}

impl From<&ProtocolError> for ErrorMessage {
    fn from(err: &ProtocolError) -> Self {
        Self {
            msg_type: ErrorType::Error,
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}
