//! Game state module - the event reducer
//!
//! This module ties together the grid, pieces, rotation and scoring. A
//! [`GameState`] is an immutable snapshot: [`GameState::apply`] consumes one
//! [`GameEvent`] and returns the next snapshot, leaving the input untouched.
//! Every transition is total; illegal moves yield an unchanged copy.

use std::time::Duration;

use crate::pieces::{rotate_tetromino, Tetromino};
use crate::rng::RngStream;
use crate::scoring::{level_for_score, score_delta, tick_interval};
use crate::types::{Direction, Draw, GameEvent};
use crate::Grid;

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    grid: Grid,
    active: Tetromino,
    next: Tetromino,
    held: Option<Tetromino>,
    level: u32,
    score: u32,
    high_score: u32,
    rows_cleared: u32,
    ended: bool,
    paused: bool,
    /// Set by restart, cleared by the next running tick.
    just_restarted: bool,
    /// Last draw value fed to the state; restart rebuilds its pieces from here.
    seed: u32,
}

impl GameState {
    /// Create a new game, drawing the active and next pieces from the LCG
    /// chain starting at `seed`.
    pub fn new(seed: u32) -> Self {
        let mut rng = RngStream::new(seed);
        let active = Tetromino::spawn(rng.next_draw().piece_kind());
        let next = Tetromino::spawn(rng.next_draw().piece_kind());

        Self {
            grid: Grid::new(),
            active,
            next,
            held: None,
            level: 0,
            score: 0,
            high_score: 0,
            rows_cleared: 0,
            ended: false,
            paused: false,
            just_restarted: false,
            seed: rng.seed(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn next(&self) -> Tetromino {
        self.next
    }

    pub fn held(&self) -> Option<Tetromino> {
        self.held
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn just_restarted(&self) -> bool {
        self.just_restarted
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Neither paused nor ended.
    pub fn is_running(&self) -> bool {
        !self.paused && !self.ended
    }

    /// Row the active piece would land on (for ghost rendering).
    pub fn ghost_y(&self) -> i8 {
        self.active.dropped(&self.grid).y
    }

    /// Tick cadence for the current level.
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.level)
    }

    /// Replace the settled cells (fixtures and puzzle setups).
    pub fn with_grid(&self, grid: Grid) -> Self {
        Self {
            grid,
            ..self.clone()
        }
    }

    /// Replace the active piece (fixtures and puzzle setups).
    pub fn with_active(&self, active: Tetromino) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }

    /// Replace the queued next piece.
    pub fn with_next(&self, next: Tetromino) -> Self {
        Self {
            next,
            ..self.clone()
        }
    }

    /// Replace score and high score; the level follows the score.
    pub fn with_score(&self, score: u32, high_score: u32) -> Self {
        Self {
            score,
            level: level_for_score(score),
            high_score,
            ..self.clone()
        }
    }

    /// Apply one event and return the resulting state.
    pub fn apply(&self, event: GameEvent) -> GameState {
        match event {
            GameEvent::Tick(draw) => self.tick(draw),
            GameEvent::Move(direction) => self.try_move(direction),
            GameEvent::Rotate => self.rotate(),
            GameEvent::HardDrop(draw) => self.hard_drop(draw),
            GameEvent::Hold(draw) => self.hold(draw),
            GameEvent::Pause => self.toggle_pause(),
            GameEvent::Restart => self.restart(),
        }
    }

    /// Gravity step.
    ///
    /// Settling is evaluated first and applies even while paused: a piece
    /// that cannot fall ends the game if part of it is still above the grid,
    /// otherwise it is merged, full rows are cleared and scored, and the next
    /// piece takes its place while `draw` supplies a new next piece. A piece
    /// that can still fall moves down one row, unless the game is paused.
    /// An ended game ignores ticks.
    pub fn tick(&self, draw: Draw) -> GameState {
        if self.ended {
            return self.clone();
        }

        if !self.active.is_settled(&self.grid) {
            if self.paused {
                return self.clone();
            }
            let mut next = self.with_active(self.active.translated(0, 1));
            next.just_restarted = false;
            next.seed = draw.value();
            return next;
        }

        let mut next = self.clone();
        next.seed = draw.value();

        if self.active.is_above_grid() {
            next.ended = true;
            return next;
        }

        // The settle check keeps the active piece off settled cells, so a
        // rejected merge means the state was built inconsistently.
        let Ok(merged) = self.grid.merge(&self.active) else {
            next.ended = true;
            return next;
        };

        let (grid, rows) = merged.clear_completed_rows();
        next.grid = grid;
        next.rows_cleared = self.rows_cleared.saturating_add(rows);
        next.score = self.score.saturating_add(score_delta(rows));
        next.level = level_for_score(next.score);
        next.high_score = self.high_score.max(next.score);
        next.active = self.next;
        next.next = Tetromino::spawn(draw.piece_kind());
        next
    }

    /// Translate the active piece one cell; rejected moves change nothing.
    pub fn try_move(&self, direction: Direction) -> GameState {
        if !self.is_running() {
            return self.clone();
        }

        let (dx, dy) = direction.delta();
        let moved = self.active.translated(dx, dy);
        if moved.is_legal(&self.grid) {
            self.with_active(moved)
        } else {
            self.clone()
        }
    }

    /// Rotate clockwise with wall kicks; a rotation with no legal placement
    /// is silently dropped.
    pub fn rotate(&self) -> GameState {
        if !self.is_running() {
            return self.clone();
        }

        match rotate_tetromino(&self.active, &self.grid) {
            Some(rotated) => self.with_active(rotated),
            None => self.clone(),
        }
    }

    /// Drop to the lowest legal row, then settle via [`GameState::tick`].
    pub fn hard_drop(&self, draw: Draw) -> GameState {
        if !self.is_running() {
            return self.clone();
        }

        self.with_active(self.active.dropped(&self.grid)).tick(draw)
    }

    /// Hold the active piece.
    ///
    /// With nothing held, the active piece is set aside and the next piece
    /// comes in, with `draw` refilling the queue. Otherwise the active and
    /// held pieces swap. Both pieces return to spawn. There is no per-piece
    /// hold limit.
    pub fn hold(&self, draw: Draw) -> GameState {
        if !self.is_running() {
            return self.clone();
        }

        let mut next = self.clone();
        next.seed = draw.value();
        next.held = Some(self.active.reset());

        match self.held {
            Some(held) => {
                next.active = held.reset();
            }
            None => {
                next.active = self.next;
                next.next = Tetromino::spawn(draw.piece_kind());
            }
        }

        next
    }

    pub fn toggle_pause(&self) -> GameState {
        Self {
            paused: !self.paused,
            ..self.clone()
        }
    }

    /// Start over from this state's seed, carrying the high score.
    pub fn restart(&self) -> GameState {
        let mut fresh = Self::new(self.seed);
        fresh.high_score = self.high_score.max(self.score);
        fresh.just_restarted = true;
        fresh
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Orientation, PieceKind, GRID_WIDTH};

    fn draw() -> Draw {
        Draw::new(0)
    }

    fn with_piece(kind: PieceKind) -> GameState {
        let state = GameState::new(12345);
        state.with_active(Tetromino::spawn(kind))
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.ended);
        assert!(!state.paused);
        assert!(!state.just_restarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.high_score, 0);
        assert!(state.held.is_none());
        assert_eq!(state.grid, Grid::new());
        assert_eq!(state.active.orientation, Orientation::North);
    }

    #[test]
    fn test_new_is_deterministic() {
        assert_eq!(GameState::new(99), GameState::new(99));
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let state = GameState::new(12345);
        let before = state.clone();
        let _ = state.apply(GameEvent::Tick(draw()));
        assert_eq!(state, before);
    }

    #[test]
    fn test_tick_moves_down() {
        let state = GameState::new(12345);
        let next = state.tick(draw());
        assert_eq!(next.active.y, state.active.y + 1);
        assert_eq!(next.active.x, state.active.x);
    }

    #[test]
    fn test_tick_clears_just_restarted() {
        let state = GameState::new(12345).restart();
        assert!(state.just_restarted);
        assert!(!state.tick(draw()).just_restarted);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = with_piece(PieceKind::O);
        for _ in 0..10 {
            state = state.try_move(Direction::Left);
        }
        assert_eq!(state.active.x, 0);
        let blocked = state.try_move(Direction::Left);
        assert_eq!(blocked.active, state.active);
    }

    #[test]
    fn test_moves_ignored_while_paused() {
        let state = with_piece(PieceKind::T).toggle_pause();
        assert_eq!(state.try_move(Direction::Right).active, state.active);
        assert_eq!(state.rotate().active, state.active);
        // A piece that can still fall stays put while paused.
        assert_eq!(state.tick(draw()), state);
    }

    #[test]
    fn test_paused_tick_still_settles_grounded_piece() {
        let state = with_piece(PieceKind::O);
        let queued = state.next;
        let grounded = state.with_active(state.active.dropped(&state.grid));
        let paused = grounded.apply(GameEvent::Pause);

        let next = paused.apply(GameEvent::Tick(Draw::new(5)));
        assert!(next.paused);
        assert_eq!(next.grid.occupied_count(), 4);
        assert_eq!(next.active, queued);
        assert_eq!(next.next.kind, Draw::new(5).piece_kind());
    }

    #[test]
    fn test_paused_tick_ends_game_above_grid() {
        let mut grid = Grid::new();
        for y in 0..20 {
            grid.set(4, y, true);
        }
        let state = with_piece(PieceKind::O).with_grid(grid).toggle_pause();
        let ended = state.tick(draw());
        assert!(ended.ended);
        assert_eq!(ended.grid, grid);
    }

    #[test]
    fn test_settling_tick_keeps_just_restarted() {
        let state = GameState::new(12345).restart();
        let grounded = state.with_active(state.active.dropped(&state.grid));
        assert!(grounded.tick(draw()).just_restarted);
    }

    #[test]
    fn test_settle_merges_and_spawns_next() {
        let state = with_piece(PieceKind::O);
        let landed = state.with_active(state.active.dropped(&state.grid));
        let queued = state.next;

        let next = landed.tick(Draw::new(5));
        assert_eq!(next.grid.occupied_count(), 4);
        assert_eq!(next.active, queued);
        assert_eq!(next.next.kind, Draw::new(5).piece_kind());
        assert_eq!(next.score, 0);
    }

    #[test]
    fn test_settle_above_grid_ends_game() {
        let mut grid = Grid::new();
        for y in 0..20 {
            grid.set(4, y, true);
        }
        let state = with_piece(PieceKind::O).with_grid(grid);
        let ended = state.tick(draw());
        assert!(ended.ended);
        assert_eq!(ended.grid, grid);

        // Terminal: nothing else moves.
        assert_eq!(ended.tick(draw()), ended);
        assert_eq!(ended.hard_drop(draw()), ended);
    }

    #[test]
    fn test_clear_scores_and_levels() {
        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH as i8 {
            if x != 4 && x != 5 {
                grid.set(x, 18, true);
                grid.set(x, 19, true);
            }
        }
        let state = with_piece(PieceKind::O).with_grid(grid).with_score(900, 950);

        let next = state.hard_drop(draw());
        assert_eq!(next.score, 1100);
        assert_eq!(next.level, 1);
        assert_eq!(next.high_score, 1100);
        assert_eq!(next.rows_cleared, 2);
        assert_eq!(next.grid, Grid::new());
    }

    #[test]
    fn test_hold_then_swap() {
        let state = with_piece(PieceKind::T).with_next(Tetromino::spawn(PieceKind::S));

        let first = state.hold(Draw::new(0));
        assert_eq!(first.held.map(|p| p.kind), Some(PieceKind::T));
        assert_eq!(first.active.kind, PieceKind::S);
        assert_eq!(first.next.kind, PieceKind::I);

        let moved = first.try_move(Direction::Down).try_move(Direction::Down);
        let second = moved.hold(Draw::new(0));
        assert_eq!(second.active, Tetromino::spawn(PieceKind::T));
        assert_eq!(second.held, Some(Tetromino::spawn(PieceKind::S)));
        assert_eq!(second.next, first.next);
    }

    #[test]
    fn test_pause_toggles_and_keeps_board() {
        let state = GameState::new(3);
        let paused = state.apply(GameEvent::Pause);
        assert!(paused.paused);
        assert_eq!(paused.grid, state.grid);
        assert!(!paused.apply(GameEvent::Pause).paused);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let state = GameState::new(3).with_score(1500, 800);
        let fresh = state.restart();
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.level, 0);
        assert_eq!(fresh.high_score, 1500);
        assert!(fresh.just_restarted);

        let state = GameState::new(3).with_score(300, 800);
        assert_eq!(state.restart().high_score, 800);
    }

    #[test]
    fn test_restart_allowed_after_end() {
        let state = GameState {
            ended: true,
            ..GameState::new(3)
        };
        let fresh = state.apply(GameEvent::Restart);
        assert!(!fresh.ended);
    }

    #[test]
    fn test_ghost_y() {
        let state = with_piece(PieceKind::I);
        assert_eq!(state.ghost_y(), 18);
    }

    #[test]
    fn test_tick_interval_follows_level() {
        let state = GameState::new(3).with_score(2000, 2000);
        assert_eq!(state.tick_interval(), Duration::from_millis(650));
    }
}
