//! Damage calculation and application.

use crate::state::{Enemy, GameState, Position};

use super::skill::{CombatRules, ResolvedSkill};

/// Damage each queue entry would take from `skill`.
///
/// The first `area` entries take `damage`, doubled for the effective kind;
/// every later entry takes zero. The vector has one entry per enemy, so a
/// skill reaching past the end of the queue simply hits everyone.
pub fn damage_vector(enemies: &[Enemy], skill: &ResolvedSkill) -> Vec<i32> {
    enemies
        .iter()
        .enumerate()
        .map(|(index, enemy)| {
            if index >= skill.area {
                0
            } else if skill.effective == Some(enemy.kind) {
                skill.damage.saturating_mul(2)
            } else {
                skill.damage
            }
        })
        .collect()
}

/// Damage a trigger at `position` would deal, without dealing it.
///
/// Returns `None` when there is no live in-bounds stone at `position`.
pub fn preview_damage(state: &GameState, position: Position, rules: &CombatRules) -> Option<Vec<i32>> {
    let skill = triggerable_skill(state, position, rules)?;
    Some(damage_vector(&state.enemies, &skill))
}

/// Consumes the stone at `position` against the enemy queue.
///
/// # Behavior
///
/// ```text
/// hp[i]    -= damage_vector[i]
/// stone     = ghost
/// enemies   = enemies where hp > 0
/// player.hp += kills
/// player.xp += kills
/// ```
///
/// An empty, ghosted or out-of-range position leaves the state unchanged.
/// No cascade turn is run here.
pub fn trigger(state: &GameState, position: Position, rules: &CombatRules) -> GameState {
    let Some(skill) = triggerable_skill(state, position, rules) else {
        return state.clone();
    };

    let mut next = state.clone();
    if let Some(stone) = state.board.get(position) {
        next.board.insert(position, stone.ghosted());
    }

    let damage = damage_vector(&next.enemies, &skill);
    for (enemy, amount) in next.enemies.iter_mut().zip(damage) {
        enemy.hp = enemy.hp.saturating_sub(amount);
    }

    let queued = next.enemies.len();
    next.enemies.retain(|enemy| !enemy.is_dead());
    let kills = (queued - next.enemies.len()) as u32;

    next.player.hp = next.player.hp.saturating_add(kills as i32);
    next.player.xp = next.player.xp.saturating_add(kills);
    next
}

fn triggerable_skill(state: &GameState, position: Position, rules: &CombatRules) -> Option<ResolvedSkill> {
    if !state.board.grid().contains(position) {
        return None;
    }
    let stone = state.board.live(position)?;
    rules.skill_for(stone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{EnemyKind, StoneKind};
    use crate::state::{Board, Player, Stone, StoneId};

    fn state_with(stone: Stone, enemies: Vec<Enemy>) -> GameState {
        let board = Board::from_stones(3, [(Position::new(1, 1), stone)]);
        GameState::new(0, board, enemies, Player::new(10))
    }

    #[test]
    fn area_limits_reach_and_effective_doubles() {
        let skill = ResolvedSkill {
            damage: 2,
            area: 2,
            effective: Some(EnemyKind::Leech),
        };
        let enemies = [
            Enemy::new(EnemyKind::Skeleton, 5),
            Enemy::new(EnemyKind::Leech, 5),
            Enemy::new(EnemyKind::Leech, 5),
        ];
        assert_eq!(damage_vector(&enemies, &skill), vec![2, 4, 0]);
    }

    #[test]
    fn area_past_the_queue_is_harmless() {
        let skill = ResolvedSkill {
            damage: 16,
            area: 16,
            effective: None,
        };
        let enemies = [Enemy::new(EnemyKind::Werhog, 3)];
        assert_eq!(damage_vector(&enemies, &skill), vec![16]);
        assert!(damage_vector(&[], &skill).is_empty());
    }

    #[test]
    fn kill_removes_enemy_and_rewards_player() {
        let stone = Stone::new(StoneId(0), StoneKind::FireBall);
        let state = state_with(
            stone,
            vec![
                Enemy::new(EnemyKind::Leech, 1),
                Enemy::new(EnemyKind::Werhog, 9),
            ],
        );

        let next = trigger(&state, Position::new(1, 1), &CombatRules::default());

        assert_eq!(next.enemies, vec![Enemy::new(EnemyKind::Werhog, 9)]);
        assert_eq!(next.player, Player { hp: 11, xp: 1 });
        assert_eq!(next.board.get(Position::new(1, 1)), Some(&stone.ghosted()));
    }

    #[test]
    fn flat_rules_hit_only_the_front_enemy() {
        let stone = Stone::new(StoneId(0), StoneKind::Arrows).with_level(3);
        let state = state_with(
            stone,
            vec![
                Enemy::new(EnemyKind::Skeleton, 40),
                Enemy::new(EnemyKind::Skeleton, 40),
            ],
        );

        let next = trigger(&state, Position::new(1, 1), &CombatRules::flat());

        assert_eq!(next.enemies[0].hp, 24);
        assert_eq!(next.enemies[1].hp, 40);
    }

    #[test]
    fn flat_rules_double_on_palette_match() {
        let stone = Stone::new(StoneId(0), StoneKind::FireBall).with_level(2);
        let state = state_with(stone, vec![Enemy::new(EnemyKind::Skeleton, 40)]);
        let next = trigger(&state, Position::new(1, 1), &CombatRules::flat());
        assert_eq!(next.enemies[0].hp, 32);
    }

    #[test]
    fn empty_ghosted_or_out_of_range_is_a_no_op() {
        let stone = Stone::new(StoneId(0), StoneKind::FireBall);
        let state = state_with(stone, vec![Enemy::new(EnemyKind::Leech, 1)]);
        let rules = CombatRules::default();

        assert_eq!(trigger(&state, Position::new(0, 0), &rules), state);
        assert_eq!(trigger(&state, Position::new(1, -2), &rules), state);

        let ghosted = trigger(&state, Position::new(1, 1), &rules);
        assert_eq!(trigger(&ghosted, Position::new(1, 1), &rules), ghosted);
    }

    #[test]
    fn preview_matches_trigger_without_applying() {
        let stone = Stone::new(StoneId(0), StoneKind::IceStorm).with_level(2);
        let enemies = vec![
            Enemy::new(EnemyKind::Leech, 9),
            Enemy::new(EnemyKind::Skeleton, 9),
        ];
        let state = state_with(stone, enemies);
        let rules = CombatRules::default();

        assert_eq!(preview_damage(&state, Position::new(1, 1), &rules), Some(vec![2, 1]));
        assert_eq!(preview_damage(&state, Position::new(2, 2), &rules), None);
    }
}
