//! Synchronous session - a game plus its gravity timer.
//!
//! Suited to hosts that already run a frame loop: call [`Session::advance`]
//! once per frame with the elapsed time and [`Session::apply`] for each input.

use crate::core::{GameSnapshot, GameState, ShapeSource};
use crate::timer::DropTimer;
use crate::types::GameAction;

#[derive(Debug, Clone)]
pub struct Session<S> {
    game: GameState<S>,
    timer: DropTimer,
}

impl<S: ShapeSource> Session<S> {
    pub fn new(game: GameState<S>, drop_interval_ms: u32) -> Self {
        Self {
            game,
            timer: DropTimer::new(drop_interval_ms),
        }
    }

    pub fn game(&self) -> &GameState<S> {
        &self.game
    }

    pub fn timer(&self) -> &DropTimer {
        &self.timer
    }

    /// Let `elapsed_ms` pass, applying every gravity step that falls due.
    ///
    /// The timer stands still while the game is over. Returns true if any
    /// step changed the state.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if self.game.game_over() {
            self.timer.reset();
            return false;
        }

        let due = self.timer.advance(elapsed_ms);
        let mut changed = false;
        for _ in 0..due {
            if self.game.game_over() {
                self.timer.reset();
                break;
            }
            changed |= self.game.tick();
        }
        changed
    }

    /// Apply one input action. Restart also restarts the gravity countdown.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.game.apply_action(action);
        if action == GameAction::Restart {
            self.timer.reset();
        }
        changed
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }
}
