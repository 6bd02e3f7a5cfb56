use crate::error::ConfigError;

/// How a triggered stone turns into damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatMode {
    /// Level-indexed skill table with area damage and effectiveness.
    #[default]
    Skills,
    /// Flat `POWER_BASE^(level-1)` damage against the front enemy only.
    Flat,
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length N of the toroidal board.
    pub board_size: u32,
    /// Number of enemies queued at game start.
    pub enemy_count: u32,
    /// Enemy `i` starts with `enemy_hp_base + i * enemy_hp_growth + roll` hp,
    /// where `roll` is uniform in `[0, enemy_hp_spread)`.
    pub enemy_hp_base: i32,
    pub enemy_hp_growth: i32,
    pub enemy_hp_spread: u32,
    /// Player hp at game start.
    pub player_hp: i32,
    /// Hp charged for every move that caused a match.
    pub move_cost: i32,
    /// Upper bound on cascade turns spent settling the board after one move.
    pub max_settle_turns: usize,
    /// Base seed; every random roll in the game is derived from it.
    pub seed: u64,
    pub combat: CombatMode,
}

impl GameConfig {
    // ===== fixed rules =====
    /// Length of a matching run.
    pub const RUN_LENGTH: usize = 3;
    /// Base of the stone power curve, `POWER_BASE^(level-1)`.
    pub const POWER_BASE: u64 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_SIZE: u32 = 7;
    pub const DEFAULT_ENEMY_COUNT: u32 = 50;
    pub const DEFAULT_PLAYER_HP: i32 = 50;
    pub const DEFAULT_MOVE_COST: i32 = 1;
    pub const DEFAULT_MAX_SETTLE_TURNS: usize = 256;

    pub fn new() -> Self {
        Self {
            board_size: Self::DEFAULT_BOARD_SIZE,
            enemy_count: Self::DEFAULT_ENEMY_COUNT,
            enemy_hp_base: 1,
            enemy_hp_growth: 1,
            enemy_hp_spread: 5,
            player_hp: Self::DEFAULT_PLAYER_HP,
            move_cost: Self::DEFAULT_MOVE_COST,
            max_settle_turns: Self::DEFAULT_MAX_SETTLE_TURNS,
            seed: 0,
            combat: CombatMode::Skills,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.board_size as usize) < Self::RUN_LENGTH {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
                minimum: Self::RUN_LENGTH as u32,
            });
        }
        if self.enemy_hp_spread == 0 {
            return Err(ConfigError::EmptyHpSpread);
        }
        if self.move_cost < 0 {
            return Err(ConfigError::NegativeMoveCost(self.move_cost));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_rules() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 7);
        assert_eq!(config.enemy_count, 50);
        assert_eq!(config.player_hp, 50);
        assert_eq!(config.move_cost, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_board_smaller_than_a_run() {
        let config = GameConfig {
            board_size: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardTooSmall { size: 2, minimum: 3 })
        ));
    }

    #[test]
    fn rejects_zero_hp_spread() {
        let config = GameConfig {
            enemy_hp_spread: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyHpSpread));
    }
}
