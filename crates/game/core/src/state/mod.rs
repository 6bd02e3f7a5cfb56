//! Authoritative game state representation.
//!
//! [`GameState`] is treated as an immutable value: every transform in the
//! crate takes a state by reference and returns a new one. The turn protocol
//! relies on structural equality between states to decide whether a move
//! changed anything.
pub mod types;

pub use types::{Board, Enemy, Player, Position, Stone, StoneId};

use strum::{EnumCount, IntoEnumIterator};

use crate::combat::{EnemyKind, StoneKind};
use crate::config::GameConfig;
use crate::env::{GameEnv, compute_seed};

/// Seed context for the kind of a freshly spawned stone.
pub const SPAWN_KIND_CONTEXT: u32 = 0;
/// Seed context for an enemy's kind.
pub const ENEMY_KIND_CONTEXT: u32 = 1;
/// Seed context for an enemy's hp roll.
pub const ENEMY_HP_CONTEXT: u32 = 2;

/// Canonical snapshot of the puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed every random roll derives from. Set once, never modified.
    pub seed: u64,

    /// Sequential stone id allocator (monotonically increasing, never reused).
    next_stone_id: u64,

    pub board: Board,
    /// Ordered queue; earlier entries are nearer and are hit first.
    pub enemies: Vec<Enemy>,
    pub player: Player,
}

impl GameState {
    /// Assembles a state from explicit parts.
    ///
    /// The id allocator resumes after the highest id on the board.
    pub fn new(seed: u64, board: Board, enemies: Vec<Enemy>, player: Player) -> Self {
        let next_stone_id = board.max_id().map_or(0, |id| id.0 + 1);
        Self {
            seed,
            next_stone_id,
            board,
            enemies,
            player,
        }
    }

    /// Opening state: empty board, rolled enemy queue, fresh player.
    ///
    /// The board is filled by running turns-to-stability on the result.
    pub fn new_game(config: &GameConfig, env: &GameEnv<'_>) -> Self {
        let enemies = (0..config.enemy_count)
            .map(|index| roll_enemy(config, env, index))
            .collect();

        Self::new(
            config.seed,
            Board::new(config.board_size),
            enemies,
            Player::new(config.player_hp),
        )
    }

    /// Next id the allocator will hand out.
    pub fn next_stone_id(&self) -> StoneId {
        StoneId(self.next_stone_id)
    }

    /// Allocates a new unique [`StoneId`].
    pub fn allocate_stone_id(&mut self) -> StoneId {
        let id = StoneId(self.next_stone_id);
        self.next_stone_id += 1;
        id
    }

    /// Creates a level-1 stone with a fresh id and a rolled kind.
    pub fn spawn_stone(&mut self, env: &GameEnv<'_>) -> Stone {
        let id = self.allocate_stone_id();
        let seed = compute_seed(self.seed, id.0, SPAWN_KIND_CONTEXT);
        let roll = env.rng().range(seed, 0, StoneKind::COUNT as u32 - 1);
        let kind = StoneKind::iter().nth(roll as usize).unwrap_or_default();
        Stone::new(id, kind)
    }

    /// True when no visible cell is empty or ghosted.
    pub fn is_stable(&self) -> bool {
        self.board.is_full()
    }

    pub fn is_game_over(&self) -> bool {
        self.player.is_defeated()
    }
}

fn roll_enemy(config: &GameConfig, env: &GameEnv<'_>, index: u32) -> Enemy {
    let rng = env.rng();
    let kind_roll = rng.range(
        compute_seed(config.seed, u64::from(index), ENEMY_KIND_CONTEXT),
        0,
        EnemyKind::COUNT as u32 - 1,
    );
    let hp_roll = rng.range(
        compute_seed(config.seed, u64::from(index), ENEMY_HP_CONTEXT),
        0,
        config.enemy_hp_spread.saturating_sub(1),
    );
    let kind = EnemyKind::iter().nth(kind_roll as usize).unwrap_or_default();
    let hp = config.enemy_hp_base + index as i32 * config.enemy_hp_growth + hp_roll as i32;
    Enemy::new(kind, hp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatRules;
    use crate::env::PcgRng;

    #[test]
    fn new_game_rolls_enemies_in_hp_bands() {
        let config = GameConfig::default().with_seed(7);
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let state = GameState::new_game(&config, &env);

        assert_eq!(state.enemies.len(), 50);
        for (index, enemy) in state.enemies.iter().enumerate() {
            let low = 1 + index as i32;
            assert!((low..low + 5).contains(&enemy.hp), "enemy {index} hp {}", enemy.hp);
        }
        assert_eq!(state.player, Player { hp: 50, xp: 0 });
        assert!(state.board.is_empty());
    }

    #[test]
    fn new_game_is_deterministic_per_seed() {
        let config = GameConfig::default().with_seed(11);
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        assert_eq!(
            GameState::new_game(&config, &env),
            GameState::new_game(&config, &env)
        );
    }

    #[test]
    fn allocator_resumes_after_highest_board_id() {
        let board = Board::from_stones(
            3,
            [
                (Position::new(0, 0), Stone::new(StoneId(4), StoneKind::Arrows)),
                (Position::new(1, 0), Stone::new(StoneId(9), StoneKind::Arrows)),
            ],
        );
        let mut state = GameState::new(0, board, Vec::new(), Player::new(10));
        assert_eq!(state.allocate_stone_id(), StoneId(10));
        assert_eq!(state.allocate_stone_id(), StoneId(11));
    }
}
