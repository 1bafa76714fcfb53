//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Independent of
//! any renderer; a host polls events and forwards the mapped actions.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
