//! Hashing utilities for snapshot logging.

use stone_core::{GameSnapshot, GameState};

/// Hex of the first 8 bytes of a snapshot digest, for compact logging.
pub fn short_digest(digest: &[u8; 32]) -> String {
    hex::encode(&digest[..8])
}

/// Compact fingerprint of what `state` would render as.
pub fn hash_game_state(state: &GameState) -> String {
    short_digest(&GameSnapshot::capture(state).digest())
}
