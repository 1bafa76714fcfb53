//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds all the game rules and state. It performs no I/O and never
//! waits, which makes it:
//!
//! - **Deterministic**: the same shape sequence produces the same game
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: drive it from a terminal, a GUI, a server or a test
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of cell markers with line clearing
//! - [`shapes`]: the seven shape templates and matrix rotation
//! - [`collision`]: shape-vs-board collision tests
//! - [`rng`]: shape sources (seeded uniform, scripted, closures)
//! - [`game_state`]: the engine - movement, rotation, locking, scoring, game over
//! - [`snapshot`]: render-ready view of a game
//!
//! # Game Rules
//!
//! - A new piece spawns horizontally centered on the top row
//! - Left/right/rotate are rejected if the result would leave the board or
//!   overlap locked cells; rotation never kicks
//! - A blocked downward move locks the piece where it is, clears every full row
//!   at once (100 points per row) and spawns the next piece
//! - If a new piece collides where it spawns the game is over and all input
//!   except restart is ignored
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, ScriptedShapes};
//! use blockfall_core::types::{GameAction, ShapeKind};
//!
//! let mut game = GameState::new(ScriptedShapes::repeat(ShapeKind::O));
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//! while game.pieces_locked() == 0 {
//!     game.apply_action(GameAction::MoveDown);
//! }
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.score, 0);
//! assert!(!snap.game_over);
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, overlaps_locked};
pub use game_state::{ActivePiece, GameState};
pub use rng::{ScriptedShapes, ShapeSource, UniformPicker};
pub use shapes::{Shape, CATALOG};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
