//! Asynchronous abstraction for sourcing player moves.
//!
//! Runtime users plug in [`MoveProvider`] implementations so the controller
//! can run with human input, scripted fixtures, or automated players.
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use stone_core::{GameState, Move};

use super::errors::Result;

/// Trait for providing moves based on the current game state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed moves
/// - Testing fixtures
#[async_trait]
pub trait MoveProvider: Send + Sync {
    /// Next move to submit, or `None` when the provider has nothing more.
    ///
    /// `state` is the settled state the move will be applied to.
    async fn next_move(&self, state: &GameState) -> Result<Option<Move>>;
}

/// Replays a fixed list of moves in order.
pub struct ScriptedMoveProvider {
    moves: Mutex<VecDeque<Move>>,
}

impl ScriptedMoveProvider {
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: Mutex::new(moves.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.moves.lock().await.len()
    }
}

#[async_trait]
impl MoveProvider for ScriptedMoveProvider {
    async fn next_move(&self, _state: &GameState) -> Result<Option<Move>> {
        Ok(self.moves.lock().await.pop_front())
    }
}
