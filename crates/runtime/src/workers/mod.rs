//! Worker tasks that back the runtime orchestration.
//!
//! The move controller owns the game state and resolves moves one at a
//! time; the phase guard is shared with every handle.

mod controller;
mod guard;

pub use controller::{Command, MoveController};
pub use guard::{Phase, PhaseGuard};
