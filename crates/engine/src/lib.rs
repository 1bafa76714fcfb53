//! Drivers around the core engine.
//!
//! The engine itself never owns a clock. This crate supplies the pieces a host
//! needs to run a game in time:
//!
//! - [`config`]: drop interval, seed and queue sizes, from defaults or the environment
//! - [`timer`]: deterministic gravity accumulator
//! - [`session`]: synchronous game + timer for frame-loop hosts
//! - [`runtime`]: tokio task that owns a game and serializes every operation

pub mod config;
pub mod runtime;
pub mod session;
pub mod timer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::EngineConfig;
pub use runtime::{spawn_session, SessionCommand, SessionHandle};
pub use session::Session;
pub use timer::DropTimer;
