//! Terminal front-end for blockfall.
//!
//! [`view`] turns a [`GameState`](blockfall_core::GameState) into plain text
//! lines; [`renderer`] owns the terminal (raw mode, alternate screen) and
//! redraws those lines. Keeping the view pure lets it be tested without a tty.

pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use renderer::{encode_lines_into, TerminalRenderer};
pub use view::render_lines;
