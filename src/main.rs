//! Headless terminal host (default binary).
//!
//! Reads keys with crossterm, drives a [`Session`] on a fixed frame cadence and
//! writes every new snapshot to stdout as one JSON line. Drawing the cells is
//! left to whatever consumes that stream.
//!
//! Environment: see [`blockfall::engine::config`] for engine settings, plus
//! `BLOCKFALL_LOG` (`error`..`trace`, default `warn`) for stderr logging.

use std::io::{self, IsTerminal, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{GameSnapshot, GameState};
use blockfall::engine::{EngineConfig, Session};
use blockfall::input::{map_key, should_quit};

const FRAME_MS: u64 = 16;
const ENV_LOG: &str = "BLOCKFALL_LOG";

fn main() -> Result<()> {
    init_logging();

    let config = EngineConfig::from_env();
    config.validate().context("invalid engine configuration")?;

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let result = run(&config);

    // Always try to restore terminal state.
    let _ = terminal::disable_raw_mode();
    result
}

fn init_logging() {
    let level = std::env::var(ENV_LOG)
        .ok()
        .and_then(|s| Level::from_str(s.trim()).ok())
        .unwrap_or(Level::WARN);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn run(config: &EngineConfig) -> Result<()> {
    let game = GameState::new(config.shape_source());
    let mut session = Session::new(game, config.drop_interval_ms);
    info!(
        drop_ms = config.drop_interval_ms,
        seed = ?config.seed,
        "session started"
    );

    let stdout = io::stdout();
    let eol = line_ending(stdout.is_terminal());
    let mut out = stdout.lock();
    let mut last = session.snapshot();
    emit(&mut out, &last, eol)?;

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Terminal auto-repeat arrives as Repeat; only presses count.
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        break;
                    }
                    if let Some(action) = map_key(key) {
                        session.apply(action);
                    }
                }
            }
        }

        let now = Instant::now();
        let elapsed = now - last_frame;
        if elapsed >= frame {
            last_frame = now;
            session.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        let snap = session.snapshot();
        if snap != last {
            emit(&mut out, &snap, eol)?;
            last = snap;
        }
    }

    info!(score = last.score, lines = last.lines, "session ended");
    Ok(())
}

/// Raw mode turns off output post-processing, so a terminal needs an explicit
/// carriage return. Pipes get plain JSON lines.
fn line_ending(is_terminal: bool) -> &'static [u8] {
    if is_terminal {
        &b"\r\n"[..]
    } else {
        &b"\n"[..]
    }
}

fn emit(out: &mut impl Write, snap: &GameSnapshot, eol: &[u8]) -> Result<()> {
    serde_json::to_writer(&mut *out, snap)?;
    out.write_all(eol)?;
    out.flush()?;
    Ok(())
}
