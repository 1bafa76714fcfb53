//! Game state module - the engine
//!
//! Owns the board, the active piece, the score and the game-over flag, and is
//! the only thing that mutates them. Every operation is a finite synchronous
//! state transition; callers observe the result through [`GameState::snapshot`].

use tracing::{debug, info};

use crate::board::Board;
use crate::collision::collides;
use crate::rng::{ShapeSource, UniformPicker};
use crate::shapes::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, Position, ShapeKind, FILLED, LINE_CLEAR_POINTS};

/// Currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    /// Current (possibly rotated) matrix
    pub shape: Shape,
    /// Board offset of the matrix's top-left cell
    pub pos: Position,
}

impl ActivePiece {
    /// Fresh piece at the spawn anchor
    pub fn spawn(kind: ShapeKind) -> Self {
        let shape = Shape::template(kind);
        Self {
            kind,
            shape,
            pos: shape.spawn_position(),
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        collides(board, &self.shape, self.pos)
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .map(move |(dx, dy)| (self.pos.x + dx, self.pos.y + dy))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformPicker> {
    board: Board,
    active: Option<ActivePiece>,
    source: S,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    game_over: bool,
}

impl GameState<UniformPicker> {
    /// Game with a reproducible uniform piece sequence
    pub fn seeded(seed: u64) -> Self {
        Self::new(UniformPicker::seeded(seed))
    }
}

impl Default for GameState<UniformPicker> {
    fn default() -> Self {
        Self::new(UniformPicker::from_entropy())
    }
}

impl<S: ShapeSource> GameState<S> {
    /// Start a game on an empty board
    pub fn new(source: S) -> Self {
        Self::with_board(Board::new(), source)
    }

    /// Start a game on a prepared board (puzzles, replays, tests).
    ///
    /// The first piece spawns immediately and may end the game at once.
    pub fn with_board(board: Board, source: S) -> Self {
        let mut state = Self {
            board,
            active: None,
            source,
            last_event: None,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            game_over: false,
        };
        state.spawn_piece();
        state
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.cells);

        if let Some(active) = &self.active {
            // Overlay only; the board itself is untouched.
            for (x, y) in active.cells() {
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(cell) = out
                    .cells
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    *cell = FILLED;
                }
            }
        }

        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Draw the next kind and place it at the spawn anchor.
    ///
    /// Returns false (and sets game over) if the new piece collides where it
    /// spawned. The colliding piece stays active so the final frame shows it.
    fn spawn_piece(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.source.next_shape());
        self.active = Some(piece);

        if piece.collides(&self.board) {
            self.game_over = true;
            info!(
                kind = piece.kind.as_str(),
                score = self.score,
                lines = self.lines,
                "spawn blocked, game over"
            );
            return false;
        }

        debug!(kind = piece.kind.as_str(), x = piece.pos.x, "spawned piece");
        true
    }

    /// Shift the active piece by (dx, dy) if the target is inside the board
    /// and free. Never locks.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.pos.offset(dx, dy);
        if collides(&self.board, &active.shape, candidate) {
            return false;
        }

        self.active = Some(ActivePiece {
            pos: candidate,
            ..active
        });
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotate 90° clockwise around the same anchor; rejected (no kicks) if
    /// the rotated matrix would collide.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.shape.rotated();
        if collides(&self.board, &rotated, active.pos) {
            return false;
        }

        self.active = Some(ActivePiece {
            shape: rotated,
            ..active
        });
        true
    }

    /// Move down one row, or lock in place if blocked.
    ///
    /// Returns true whenever the state changed (moved or locked).
    pub fn move_down(&mut self) -> bool {
        if self.game_over || self.active.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }

        self.lock_piece();
        true
    }

    /// Timer-driven gravity step
    pub fn tick(&mut self) -> bool {
        self.move_down()
    }

    /// Lock the active piece at its current position, clear full rows and
    /// spawn the next piece.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let locked = self.board.lock_shape(&active.shape, active.pos);
        debug_assert!(locked, "active piece must be placeable when it locks");
        self.pieces_locked += 1;

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;
        let score_delta = lines_cleared * LINE_CLEAR_POINTS;
        self.score += score_delta;
        self.lines += lines_cleared;

        if lines_cleared > 0 {
            debug!(
                rows = ?cleared_rows.as_slice(),
                score = self.score,
                "cleared rows"
            );
        }

        self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared,
            score_delta,
            game_over: self.game_over,
        });
    }

    /// Fresh game: empty board, zero score, new piece. Allowed at any time.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.last_event = None;
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.game_over = false;
        info!("game restarted");
        self.spawn_piece();
    }

    /// Apply a game action. Returns true if the state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedShapes;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn game_of(kind: ShapeKind) -> GameState<ScriptedShapes> {
        GameState::new(ScriptedShapes::repeat(kind))
    }

    #[test]
    fn test_new_game_state() {
        let state = game_of(ShapeKind::T);

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.pieces_locked, 0);
        assert_eq!(state.board.filled_count(), 0);
        let active = state.active.unwrap();
        assert_eq!(active.kind, ShapeKind::T);
        assert_eq!(active.pos, Position::new(4, 0));
    }

    #[test]
    fn test_try_move() {
        let mut state = game_of(ShapeKind::T);
        let initial_x = state.active.unwrap().pos.x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().pos.x, initial_x + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().pos.x, initial_x);

        // Can't move up past the top
        assert!(!state.try_move(0, -1));
    }

    #[test]
    fn test_right_wall() {
        let mut state = game_of(ShapeKind::I);
        let mut moved = 0;
        for _ in 0..10 {
            if state.move_right() {
                moved += 1;
            }
        }
        // I spawns at x=3 with width 4, so x can reach 6
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().pos.x, 6);
    }

    #[test]
    fn test_move_down_locks_at_floor() {
        let mut state = game_of(ShapeKind::O);

        for _ in 0..18 {
            assert!(state.move_down());
        }
        assert_eq!(state.active.unwrap().pos.y, 18);
        assert_eq!(state.pieces_locked, 0);

        assert!(state.move_down());
        assert_eq!(state.pieces_locked, 1);
        assert_eq!(state.board.filled_count(), 4);
        assert!(state.board.is_occupied(4, 19));
        assert!(state.board.is_occupied(5, 18));
        assert_eq!(state.active.unwrap().pos, Position::new(4, 0));

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 0);
        assert_eq!(ev.score_delta, 0);
        assert!(!ev.game_over);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut state = game_of(ShapeKind::I);
        // Bottom row filled except columns 3..7, which the I piece covers.
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..7).contains(&x) {
                state.board_mut().set(x, 19, FILLED);
            }
        }

        while state.pieces_locked == 0 {
            state.move_down();
        }

        assert_eq!(state.score, 100);
        assert_eq!(state.lines, 1);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.take_last_event().unwrap().score_delta, 100);
    }

    #[test]
    fn test_rotate_rejected_at_wall() {
        let mut state = game_of(ShapeKind::I);
        assert!(state.rotate());
        let vertical = state.active.unwrap();
        assert_eq!((vertical.shape.width(), vertical.shape.height()), (1, 4));

        while state.move_right() {}
        assert_eq!(state.active.unwrap().pos.x, BOARD_WIDTH as i8 - 1);

        // Horizontal again would stick out on the right: no kick, no change.
        assert!(!state.rotate());
        let expected = ActivePiece {
            pos: Position::new(BOARD_WIDTH as i8 - 1, 0),
            ..vertical
        };
        assert_eq!(state.active.unwrap(), expected);
    }

    #[test]
    fn test_active_piece_replaced_only_on_lock() {
        let mut state = GameState::new(ScriptedShapes::new([ShapeKind::I, ShapeKind::O]));
        assert_eq!(state.source.drawn(), 1);

        state.move_left();
        state.rotate();
        state.move_right();
        assert_eq!(state.active.unwrap().kind, ShapeKind::I);
        assert_eq!(state.source.drawn(), 1);

        while state.pieces_locked == 0 {
            state.move_down();
        }
        assert_eq!(state.active.unwrap().kind, ShapeKind::O);
        assert_eq!(state.source.drawn(), 2);
    }

    #[test]
    fn test_game_over_blocks_input() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 0, FILLED);
            board.set(x, 1, FILLED);
        }
        let mut state = GameState::with_board(board, ScriptedShapes::repeat(ShapeKind::O));
        assert!(state.game_over);
        assert!(state.active.is_some());

        let before = state.snapshot();
        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.rotate());
        assert!(!state.move_down());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = game_of(ShapeKind::O);
        state.score = 500;
        state.lines = 5;
        state.game_over = true;
        state.board_mut().set(0, 19, FILLED);

        assert!(state.apply_action(GameAction::Restart));

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.board.filled_count(), 0);
        assert!(!state.active.unwrap().collides(&state.board));
    }

    #[test]
    fn test_snapshot_overlays_without_persisting() {
        let state = game_of(ShapeKind::O);
        let snap = state.snapshot();

        assert_eq!(snap.filled_count(), 4);
        assert_eq!(snap.cells[0][4], FILLED);
        assert_eq!(snap.cells[1][5], FILLED);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(snap.cells.len(), BOARD_HEIGHT as usize);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = game_of(ShapeKind::T);
        let x = state.active.unwrap().pos.x;

        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active.unwrap().pos.x, x - 1);
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active.unwrap().pos.x, x);
        assert!(state.apply_action(GameAction::MoveDown));
        assert_eq!(state.active.unwrap().pos.y, 1);
        assert!(state.apply_action(GameAction::Rotate));
        assert_eq!(state.active.unwrap().shape.height(), 3);
    }
}
