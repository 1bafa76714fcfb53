//! Engine configuration.
//!
//! Defaults match the reference cadence (one row per second). Every knob can
//! be overridden through environment variables:
//!
//! - `BLOCKFALL_DROP_MS`: gravity interval in milliseconds (default 1000)
//! - `BLOCKFALL_SEED`: fixed seed for the piece sequence (default: random)
//! - `BLOCKFALL_COMMAND_BUFFER`: async session command queue size (default 32)

use std::time::Duration;

use anyhow::{ensure, Result};
use tracing::warn;

use crate::core::UniformPicker;
use crate::types::DEFAULT_DROP_INTERVAL_MS;

pub const ENV_DROP_MS: &str = "BLOCKFALL_DROP_MS";
pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_COMMAND_BUFFER: &str = "BLOCKFALL_COMMAND_BUFFER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Gravity interval in milliseconds
    pub drop_interval_ms: u32,
    /// Piece sequence seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Max queued commands for an async session
    pub command_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            seed: None,
            command_buffer: 32,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let drop_interval_ms =
            parse_or(&lookup, ENV_DROP_MS).unwrap_or(defaults.drop_interval_ms);
        let seed = parse_or(&lookup, ENV_SEED);
        let command_buffer =
            parse_or(&lookup, ENV_COMMAND_BUFFER).unwrap_or(defaults.command_buffer);

        Self {
            drop_interval_ms,
            seed,
            command_buffer,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.drop_interval_ms > 0, "drop interval must be positive");
        ensure!(self.command_buffer > 0, "command buffer must hold at least one command");
        Ok(())
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms as u64)
    }

    /// Shape source honoring the configured seed
    pub fn shape_source(&self) -> UniformPicker {
        match self.seed {
            Some(seed) => UniformPicker::seeded(seed),
            None => UniformPicker::from_entropy(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = raw, "ignoring unparsable setting");
            None
        }
    }
}
