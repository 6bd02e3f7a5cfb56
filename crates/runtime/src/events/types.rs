//! Event types for different topics.

use serde::{Deserialize, Serialize};
use stone_core::{FrameKind, GameSnapshot, Move, Pace};

use crate::api::MoveOutcome;

/// One step of a resolution, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEvent {
    /// Step that produced this frame.
    pub frame: FrameKind,
    /// How long the controller holds this frame before the next step.
    pub pace: Pace,
    pub snapshot: GameSnapshot,
    /// SHA-256 of the snapshot; equal digests render identically.
    pub digest: [u8; 32],
}

impl BoardEvent {
    pub fn new(frame: FrameKind, pace: Pace, snapshot: GameSnapshot) -> Self {
        let digest = snapshot.digest();
        Self {
            frame,
            pace,
            snapshot,
            digest,
        }
    }
}

/// A move finished resolving (dropped and rejected moves are not published).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    #[serde(rename = "move")]
    pub mv: Move,
    pub outcome: MoveOutcome,
}

/// Player hp reached zero. Published exactly once per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverEvent {
    pub xp: u32,
}
