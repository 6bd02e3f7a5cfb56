//! Reentrancy guard shared by the handle and the move controller.
//!
//! The handle flips `Idle -> Resolving` before a move is sent; only the
//! controller moves the guard back out of `Resolving`. At most one move is
//! therefore ever in flight, and anything submitted meanwhile is dropped.
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Controller phase as seen by move submitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    /// Waiting for a move.
    Idle = 0,
    /// A move, or the opening settle, is being resolved.
    Resolving = 1,
    /// The game is over; moves are rejected for good.
    Terminal = 2,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Phase::Idle,
            1 => Phase::Resolving,
            _ => Phase::Terminal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhaseGuard {
    phase: Arc<AtomicU8>,
}

impl PhaseGuard {
    pub fn new(initial: Phase) -> Self {
        Self {
            phase: Arc::new(AtomicU8::new(initial as u8)),
        }
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Claims the guard for one resolution.
    ///
    /// Fails with the current phase unless the guard was `Idle`.
    pub fn try_begin(&self) -> Result<(), Phase> {
        self.phase
            .compare_exchange(
                Phase::Idle as u8,
                Phase::Resolving as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(Phase::from_u8)
    }

    /// Ends a resolution. `Terminal` is sticky.
    pub fn release(&self, game_over: bool) {
        if game_over {
            self.phase.store(Phase::Terminal as u8, Ordering::Release);
        } else {
            // Only Resolving goes back to Idle.
            let _ = self.phase.compare_exchange(
                Phase::Resolving as u8,
                Phase::Idle as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
    }
}
