//! What became of a submitted move.
use serde::{Deserialize, Serialize};

use stone_core::{GameOver, ResolutionSummary, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The move caused a match; its cost was charged and the board settled.
    Committed { game_over: Option<GameOver> },
    /// The move caused no match and was undone.
    RolledBack,
    /// Another move was still resolving; this one was discarded, not queued.
    Dropped,
    /// The game is over; no further moves are accepted.
    Rejected,
}

impl MoveOutcome {
    pub(crate) fn from_summary(summary: &ResolutionSummary) -> Self {
        match summary.verdict {
            Some(Verdict::Committed) => MoveOutcome::Committed {
                game_over: summary.game_over,
            },
            Some(Verdict::RolledBack) | None => MoveOutcome::RolledBack,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, MoveOutcome::Committed { .. })
    }

    pub fn game_over(&self) -> Option<GameOver> {
        match self {
            MoveOutcome::Committed { game_over } => *game_over,
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveOutcome::Committed { .. } => "committed",
            MoveOutcome::RolledBack => "rolled_back",
            MoveOutcome::Dropped => "dropped",
            MoveOutcome::Rejected => "rejected",
        }
    }
}
