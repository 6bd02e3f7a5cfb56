//! Move controller that owns the authoritative [`stone_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives
//! [`stone_core::Resolution`] frame by frame, sleeps for each frame's pacing,
//! and publishes every frame to the EventBus. One resolution runs to
//! completion before the next command is looked at.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

use stone_core::{
    CombatRules, Frame, FrameKind, GameConfig, GameEnv, GameSnapshot, GameState, Move, Position,
    Resolution, ResolutionSummary, RngOracle, preview_damage,
};

use super::guard::PhaseGuard;
use crate::api::MoveOutcome;
use crate::events::{BoardEvent, Event, EventBus, GameOverEvent, MoveEvent};
use crate::runtime::Pacing;
use crate::utils::hash::short_digest;

/// Commands that can be sent to the move controller
pub enum Command {
    /// Resolve a move. The submitter has already claimed the guard.
    Resolve {
        mv: Move,
        reply: oneshot::Sender<MoveOutcome>,
    },
    /// Replies once the opening settle is done.
    Ready { reply: oneshot::Sender<()> },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    Snapshot { reply: oneshot::Sender<GameSnapshot> },
    Preview {
        position: Position,
        reply: oneshot::Sender<Option<Vec<i32>>>,
    },
}

/// Background task that resolves moves.
///
/// # Design Note
///
/// The controller is the only owner of the state. Handles never touch it;
/// they read copies through commands and learn about steps from events.
pub struct MoveController {
    state: GameState,
    config: GameConfig,
    rules: CombatRules,
    rng: Arc<dyn RngOracle>,
    pacing: Pacing,
    guard: PhaseGuard,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl MoveController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: GameState,
        config: GameConfig,
        rules: CombatRules,
        rng: Arc<dyn RngOracle>,
        pacing: Pacing,
        guard: PhaseGuard,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            seed = state.seed,
            board_size = state.board.size(),
            enemies = state.enemies.len(),
            hp = state.player.hp,
            "move controller initialized"
        );

        Self {
            state,
            config,
            rules,
            rng,
            pacing,
            guard,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Settles the opening board before the first command is read, so input
    /// stays locked until the board is at rest.
    pub async fn run(mut self) {
        let summary = self.play(Resolution::settle(self.state.clone())).await;
        info!(turns = summary.settle_turns, "opening board settled");
        self.guard.release(self.state.is_game_over());

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        info!("move controller stopped");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Resolve { mv, reply } => {
                let outcome = self.resolve(mv).await;
                if reply.send(outcome).is_err() {
                    debug!("Resolve reply channel closed (caller dropped)");
                }
            }
            Command::Ready { reply } => {
                if reply.send(()).is_err() {
                    debug!("Ready reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(GameSnapshot::capture(&self.state)).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Preview { position, reply } => {
                let damage = preview_damage(&self.state, position, &self.rules);
                if reply.send(damage).is_err() {
                    debug!("Preview reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Resolves one move and releases the guard before replying.
    async fn resolve(&mut self, mv: Move) -> MoveOutcome {
        if self.state.is_game_over() {
            self.guard.release(true);
            return MoveOutcome::Rejected;
        }

        let summary = self.play(Resolution::for_move(self.state.clone(), mv)).await;
        let outcome = MoveOutcome::from_summary(&summary);
        debug!(
            %mv,
            outcome = outcome.as_str(),
            hp = self.state.player.hp,
            xp = self.state.player.xp,
            enemies = self.state.enemies.len(),
            settle_turns = summary.settle_turns,
            "move resolved"
        );

        self.event_bus
            .publish(Event::Move(MoveEvent { mv, outcome }));
        self.guard.release(self.state.is_game_over());
        outcome
    }

    /// Plays every frame of `resolution`, then adopts its final state.
    async fn play(&mut self, mut resolution: Resolution) -> ResolutionSummary {
        let env = GameEnv::new(self.rng.as_ref(), &self.rules, &self.config);

        while let Some(frame) = resolution.advance(&env) {
            let Frame { kind, pace, state } = frame;
            let event = BoardEvent::new(kind, pace, GameSnapshot::capture(&state));
            trace!(
                frame = kind.as_str(),
                pace = ?pace,
                digest = %short_digest(&event.digest),
                "resolution step"
            );
            self.event_bus.publish(Event::Board(event));

            if let FrameKind::GameOver { xp } = kind {
                info!(xp, "game over");
                self.event_bus
                    .publish(Event::GameOver(GameOverEvent { xp }));
            }

            let delay = self.pacing.delay(pace);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        let (state, summary) = resolution.into_parts();
        if !summary.settled {
            warn!(
                turns = summary.settle_turns,
                limit = self.config.max_settle_turns,
                "board did not settle; accepting partial cascade"
            );
        }
        self.state = state;
        summary
    }
}
