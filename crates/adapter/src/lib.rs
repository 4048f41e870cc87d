//! JSON adapter - play blockfall over a TCP socket
//!
//! The adapter speaks a **line-delimited JSON protocol**: one JSON object per
//! line in each direction.
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **key**: a key press, named by its browser `KeyboardEvent.code`
//! - **click**: a click on the `pause` or `restart` control
//!
//! ## Server → Client
//!
//! - **state**: full game state, sent on connect and after every event that
//!   changed it (client input or a timer tick)
//! - **error**: the previous line could not be understood
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_HOST`: Bind address (default: "127.0.0.1")
//! - `BLOCKFALL_PORT`: Port number (default: 7777)
//! - `BLOCKFALL_SEED`: Piece stream seed (default: 1)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Server -> Client: {"type":"state","seq":0,"grid":[[0,0,...],...],"active":{...},...}
//! Client -> Server: {"type":"key","key":"ArrowLeft"}
//! Server -> Client: {"type":"state","seq":1,...}
//! Client -> Server: {"type":"click","control":"pause"}
//! Server -> Client: {"type":"state","seq":2,...,"paused":true,...}
//! Client -> Server: {"type":"jump"}
//! Server -> Client: {"type":"error","code":"invalid_json","message":"..."}
//! ```
//!
//! # Implementation
//!
//! - Uses **tokio** for async networking
//! - Multiple clients can connect; all of them drive and observe the same game
//! - A single game-loop task owns the session, so ticks and input never race

pub mod protocol;
pub mod server;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub use protocol::{
    parse_inbound, ErrorMessage, Inbound, PieceView, ProtocolError, StateMessage,
};
pub use server::{run_server, ServerConfig};
