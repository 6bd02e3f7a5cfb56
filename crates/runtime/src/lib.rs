//! Runtime orchestration for the rotating-stones puzzle.
//!
//! This crate wires the pure engine in `stone-core` to an async move
//! controller. Consumers embed [`Runtime`] to submit moves, subscribe to
//! frame-by-frame board events, and read state through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and pacing configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps the move controller and its guard internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod utils;
mod workers;

pub use api::{MoveOutcome, MoveProvider, Result, RuntimeError, RuntimeHandle, ScriptedMoveProvider};
pub use events::{BoardEvent, Event, EventBus, GameOverEvent, MoveEvent, Topic};
pub use runtime::{Pacing, RunSummary, Runtime, RuntimeBuilder, RuntimeConfig};
pub use utils::hash::{hash_game_state, short_digest};
pub use workers::Phase;
