//! Text rendering of a game state.
//!
//! Each grid cell is two characters wide. The side panel shows the next and
//! held pieces, the counters and the game status.

use crate::core::{GameState, Tetromino};
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

const EMPTY: &str = " .";
const SETTLED: &str = "[]";
const ACTIVE: &str = "<>";
const GHOST: &str = "::";

#[derive(Clone, Copy, PartialEq, Eq)]
enum CellView {
    Empty,
    Settled,
    Active,
    Ghost,
}

impl CellView {
    fn as_str(self) -> &'static str {
        match self {
            CellView::Empty => EMPTY,
            CellView::Settled => SETTLED,
            CellView::Active => ACTIVE,
            CellView::Ghost => GHOST,
        }
    }
}

/// Render `state` as terminal lines: a bordered grid with a side panel.
pub fn render_lines(state: &GameState) -> Vec<String> {
    let width = GRID_WIDTH as usize;
    let height = GRID_HEIGHT as usize;

    let mut cells = vec![[CellView::Empty; GRID_WIDTH as usize]; height];
    for (y, row) in state.grid().rows().iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v != 0 {
                cells[y][x] = CellView::Settled;
            }
        }
    }

    let active = state.active();
    if !state.ended() {
        let ghost = active.dropped(state.grid());
        paint(&mut cells, &ghost, CellView::Ghost);
    }
    paint(&mut cells, &active, CellView::Active);

    let panel = side_panel(state);
    let mut lines = Vec::with_capacity(height + 2);

    let edge = format!("+{}+", "-".repeat(width * 2));
    lines.push(with_panel(&edge, panel.first()));
    for (y, row) in cells.iter().enumerate() {
        let mut line = String::with_capacity(width * 2 + 2);
        line.push('|');
        for cell in row {
            line.push_str(cell.as_str());
        }
        line.push('|');
        lines.push(with_panel(&line, panel.get(y + 1)));
    }
    lines.push(edge);
    lines
}

fn paint(cells: &mut [[CellView; GRID_WIDTH as usize]], piece: &Tetromino, view: CellView) {
    for (x, y) in piece.cells() {
        if x < 0 || y < 0 || x >= GRID_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
            continue;
        }
        let cell = &mut cells[y as usize][x as usize];
        // The ghost never hides settled cells or the piece itself.
        if view != CellView::Ghost || *cell == CellView::Empty {
            *cell = view;
        }
    }
}

fn with_panel(board: &str, panel: Option<&String>) -> String {
    match panel {
        Some(text) if !text.is_empty() => format!("{board}  {text}"),
        _ => board.to_string(),
    }
}

fn side_panel(state: &GameState) -> Vec<String> {
    let mut panel = Vec::with_capacity(16);

    panel.push("NEXT".to_string());
    panel.extend(preview(Some(state.next())));
    panel.push(String::new());
    panel.push("HOLD".to_string());
    panel.extend(preview(state.held()));
    panel.push(String::new());
    panel.push(format!("SCORE  {}", state.score()));
    panel.push(format!("LEVEL  {}", state.level()));
    panel.push(format!("HIGH   {}", state.high_score()));
    panel.push(format!("LINES  {}", state.rows_cleared()));
    panel.push(String::new());

    if state.ended() {
        panel.push("GAME OVER".to_string());
        panel.push("r: restart".to_string());
    } else if state.paused() {
        panel.push("PAUSED".to_string());
        panel.push("p: resume".to_string());
    }

    panel
}

/// Two-line preview of a piece in spawn orientation.
fn preview(piece: Option<Tetromino>) -> [String; 2] {
    let mut out = [String::new(), String::new()];
    let Some(piece) = piece else {
        return out;
    };

    let shape = piece.shape;
    let size = shape.size() as usize;
    let rows: Vec<usize> = (0..size)
        .filter(|&row| (0..size).any(|col| shape.get(row, col) != 0))
        .take(2)
        .collect();

    for (line, &row) in out.iter_mut().zip(rows.iter()) {
        for col in 0..size {
            line.push_str(if shape.get(row, col) != 0 { SETTLED } else { "  " });
        }
        let trimmed = line.trim_end().len();
        line.truncate(trimmed);
    }
    out
}
