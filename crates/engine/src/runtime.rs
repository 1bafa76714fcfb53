//! Async session runtime.
//!
//! One tokio task owns the [`GameState`], so at most one engine operation runs
//! at a time no matter how many threads hold a [`SessionHandle`]. Gravity comes
//! from a `tokio::time::interval` that is disabled while the game is over and
//! dies with the task. Each change is published as a fresh [`GameSnapshot`].

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState, ShapeSource};
use crate::types::GameAction;

/// Command delivered to the session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Action(GameAction),
    Shutdown,
}

/// Client side of a running session.
///
/// Dropping the handle closes the command channel, which stops the task.
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<GameSnapshot>,
}

impl SessionHandle {
    pub async fn send(&self, action: GameAction) -> Result<()> {
        self.commands
            .send(SessionCommand::Action(action))
            .await
            .map_err(|_| anyhow!("session task has stopped"))
    }

    /// Latest published snapshot
    pub fn latest(&self) -> GameSnapshot {
        *self.snapshots.borrow()
    }

    /// New receiver for snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the session and return its final snapshot.
    pub async fn shutdown(self) -> Result<GameSnapshot> {
        // The task may already be gone; the join below still reports its result.
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        Ok(self.task.await?)
    }
}

/// Spawn a session task on the current tokio runtime.
pub fn spawn_session<S>(config: &EngineConfig, game: GameState<S>) -> SessionHandle
where
    S: ShapeSource + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(config.command_buffer.max(1));
    let (snap_tx, snap_rx) = watch::channel(game.snapshot());
    let period = config.drop_interval().max(time::Duration::from_millis(1));

    let task = tokio::spawn(run_session(game, period, cmd_rx, snap_tx));

    SessionHandle {
        commands: cmd_tx,
        snapshots: snap_rx,
        task,
    }
}

async fn run_session<S: ShapeSource>(
    mut game: GameState<S>,
    period: time::Duration,
    mut commands: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<GameSnapshot>,
) -> GameSnapshot {
    let mut drops = time::interval_at(Instant::now() + period, period);
    drops.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let changed = tokio::select! {
            _ = drops.tick(), if !game.game_over() => game.tick(),
            cmd = commands.recv() => match cmd {
                Some(SessionCommand::Action(action)) => {
                    let changed = game.apply_action(action);
                    if action == GameAction::Restart {
                        drops.reset();
                    }
                    changed
                }
                Some(SessionCommand::Shutdown) | None => break,
            },
        };

        if changed {
            snapshots.send_replace(game.snapshot());
        }
    }

    debug!(score = game.score(), "session stopped");
    game.snapshot()
}
