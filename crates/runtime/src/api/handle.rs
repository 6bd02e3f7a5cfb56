//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting moves, reading state, or streaming events from specific topics.
//! The reentrancy guard is checked here, before anything is sent, so a move
//! submitted while another resolves never reaches the controller's queue.
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use stone_core::{GameSnapshot, GameState, Move, Position};

use super::errors::{Result, RuntimeError};
use super::outcome::MoveOutcome;
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, Phase, PhaseGuard};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    guard: PhaseGuard,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus, guard: PhaseGuard) -> Self {
        Self {
            command_tx,
            event_bus,
            guard,
        }
    }

    /// Submit a move and wait for it to resolve.
    ///
    /// Returns [`MoveOutcome::Dropped`] at once when another resolution is in
    /// flight and [`MoveOutcome::Rejected`] after game over. Otherwise waits
    /// until the move, its cascade turn, and the settle loop have all been
    /// played out.
    pub async fn submit(&self, mv: Move) -> Result<MoveOutcome> {
        // Nothing may await or fail between claiming the guard and sending.
        let permit = self
            .command_tx
            .reserve()
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        if let Err(phase) = self.guard.try_begin() {
            let outcome = match phase {
                Phase::Terminal => MoveOutcome::Rejected,
                Phase::Idle | Phase::Resolving => MoveOutcome::Dropped,
            };
            debug!(%mv, outcome = outcome.as_str(), "move not accepted");
            return Ok(outcome);
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        permit.send(Command::Resolve { mv, reply: reply_tx });

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Waits until the opening board has settled and input is accepted.
    pub async fn ready(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Ready { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Current phase of the reentrancy guard.
    pub fn phase(&self) -> Phase {
        self.guard.phase()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Board` - One snapshot per resolution step
    /// - `Topic::Move` - Outcome of every resolved move
    /// - `Topic::GameOver` - The terminal notification
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stone_runtime::Topic;
    ///
    /// let mut board_rx = handle.subscribe(Topic::Board);
    /// while let Ok(event) = board_rx.recv().await {
    ///     // Redraw from the snapshot
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Renderer projection of the current state.
    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Damage a trigger at `position` would deal right now.
    pub async fn preview_damage(&self, position: Position) -> Result<Option<Vec<i32>>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Preview {
                position,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn handle_over(capacity: usize) -> (RuntimeHandle, mpsc::Receiver<Command>) {
        let (command_tx, command_rx) = mpsc::channel(capacity);
        let handle = RuntimeHandle::new(
            command_tx,
            EventBus::with_capacity(4),
            PhaseGuard::new(Phase::Idle),
        );
        (handle, command_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_submit_on_full_queue_keeps_input_open() {
        let (handle, _command_rx) = handle_over(1);
        let (ready_tx, _ready_rx) = oneshot::channel();
        handle
            .command_tx
            .send(Command::Ready { reply: ready_tx })
            .await
            .unwrap();

        let waited = tokio::time::timeout(
            Duration::from_millis(10),
            handle.submit(Move::rotate_row(0, 1)),
        )
        .await;

        assert!(waited.is_err());
        assert_eq!(handle.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn closed_controller_leaves_guard_idle() {
        let (handle, command_rx) = handle_over(1);
        drop(command_rx);

        let result = handle.submit(Move::rotate_row(0, 1)).await;

        assert!(matches!(result, Err(RuntimeError::CommandChannelClosed)));
        assert_eq!(handle.phase(), Phase::Idle);
    }
}
