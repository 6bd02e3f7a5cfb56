//! High-level runtime orchestrator.
//!
//! The runtime owns the move controller, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use stone_core::{CombatRules, GameConfig, GameEnv, GameOver, GameState, Pace, PcgRng, RngOracle};

use crate::api::{MoveOutcome, MoveProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, MoveController, Phase, PhaseGuard};

/// How long each kind of frame stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Hold after any step that visibly changed the board.
    pub impact: Duration,
    /// Short pause after stones spawn above the board.
    pub spawn: Duration,
}

impl Pacing {
    pub const DEFAULT_IMPACT: Duration = Duration::from_millis(500);
    pub const DEFAULT_SPAWN: Duration = Duration::from_millis(1);

    /// No delays at all; for tests and headless play.
    pub const fn none() -> Self {
        Self {
            impact: Duration::ZERO,
            spawn: Duration::ZERO,
        }
    }

    pub fn delay(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Instant => Duration::ZERO,
            Pace::Spawn => self.spawn,
            Pace::Impact => self.impact,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            impact: Self::DEFAULT_IMPACT,
            spawn: Self::DEFAULT_SPAWN,
        }
    }
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub rules: CombatRules,
    pub pacing: Pacing,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            rules: CombatRules::default(),
            pacing: Pacing::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Tally of a [`Runtime::run`] session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub committed: usize,
    pub rolled_back: usize,
    pub dropped: usize,
    pub game_over: Option<GameOver>,
}

/// Main runtime that orchestrates one game
///
/// Design: Runtime owns the controller task and coordinates input.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    controller_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Feed moves from `provider` until it runs dry or the game ends.
    pub async fn run(&self, provider: &dyn MoveProvider) -> Result<RunSummary> {
        self.handle.ready().await?;
        let mut summary = RunSummary::default();

        loop {
            let state = self.handle.query_state().await?;
            if state.is_game_over() {
                break;
            }
            let Some(mv) = provider.next_move(&state).await? else {
                debug!("move provider exhausted");
                break;
            };

            match self.handle.submit(mv).await? {
                MoveOutcome::Committed { game_over } => {
                    summary.committed += 1;
                    if game_over.is_some() {
                        summary.game_over = game_over;
                        break;
                    }
                }
                MoveOutcome::RolledBack => summary.rolled_back += 1,
                MoveOutcome::Dropped => summary.dropped += 1,
                MoveOutcome::Rejected => break,
            }
        }

        Ok(summary)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the controller to finish, which happens once every handle
    /// clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.controller_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!("runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    rng: Option<Arc<dyn RngOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state instead of rolling a new game
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Replace the default [`PcgRng`]
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Arc::new(rng));
        self
    }

    /// Build the runtime and start the move controller
    ///
    /// The controller settles the opening board before it accepts moves;
    /// await [`RuntimeHandle::ready`] to know when that has happened.
    pub async fn build(self) -> Result<Runtime> {
        let RuntimeConfig {
            game_config,
            rules,
            pacing,
            event_buffer_size,
            command_buffer_size,
        } = self.config;

        game_config.validate()?;
        rules.validate_for(&game_config)?;

        let rng: Arc<dyn RngOracle> = self.rng.unwrap_or_else(|| Arc::new(PcgRng));
        let initial_state = match self.state {
            Some(state) => state,
            None => {
                let env = GameEnv::new(rng.as_ref(), &rules, &game_config);
                GameState::new_game(&game_config, &env)
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(command_buffer_size);
        let event_bus = EventBus::with_capacity(event_buffer_size);
        let guard = PhaseGuard::new(Phase::Resolving);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), guard.clone());

        let controller = MoveController::new(
            initial_state,
            game_config,
            rules,
            rng,
            pacing,
            guard,
            command_rx,
            event_bus,
        );

        let controller_handle = tokio::spawn(async move {
            controller.run().await;
        });

        Ok(Runtime {
            handle,
            controller_handle,
        })
    }
}
