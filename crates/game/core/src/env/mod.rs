//! Read-only collaborators the transforms consult.
//!
//! The [`GameEnv`] aggregate bundles the randomness oracle, the combat rules,
//! and the game configuration so pure transforms can reach everything they
//! need without hard coupling to concrete implementations.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::combat::CombatRules;
use crate::config::GameConfig;

/// Aggregates the read-only inputs of every state transform.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    rng: &'a dyn RngOracle,
    rules: &'a CombatRules,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle, rules: &'a CombatRules, config: &'a GameConfig) -> Self {
        Self { rng, rules, config }
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn rules(&self) -> &'a CombatRules {
        self.rules
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("rules", self.rules)
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
