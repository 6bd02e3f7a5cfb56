//! Fill, fall and match-and-merge: the pipeline that resolves the board.
//!
//! Each step is a pure `GameState -> GameState` transform. One cascade turn
//! is [`CascadeStep::TURN`]: fill, fall, match-and-merge, fall. Repeating
//! turns until no visible cell is empty settles the board.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::engine::Resolution;
use crate::env::GameEnv;
use crate::error::CascadeError;
use crate::state::{Board, GameState, Position};

/// One stage of a cascade turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CascadeStep {
    Fill,
    Fall,
    MatchAndMerge,
}

impl CascadeStep {
    /// The stages of one turn, in order.
    pub const TURN: [CascadeStep; 4] = [
        CascadeStep::Fill,
        CascadeStep::Fall,
        CascadeStep::MatchAndMerge,
        CascadeStep::Fall,
    ];

    pub fn apply(self, state: &GameState, env: &GameEnv<'_>) -> GameState {
        match self {
            CascadeStep::Fill => fill(state, env),
            CascadeStep::Fall => fall(state),
            CascadeStep::MatchAndMerge => match_and_merge(state),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CascadeStep::Fill => "fill",
            CascadeStep::Fall => "fall",
            CascadeStep::MatchAndMerge => "match_and_merge",
        }
    }
}

/// Spawns a fresh stone one board-height above every empty visible cell.
///
/// Ghosted cells count as empty; the ghost itself stays until the next fall.
pub fn fill(state: &GameState, env: &GameEnv<'_>) -> GameState {
    let grid = state.board.grid();
    let mut next = state.clone();
    for position in grid.empty_positions(&state.board) {
        let stone = next.spawn_stone(env);
        next.board.insert(position.shifted(-grid.size()), stone);
    }
    next
}

/// Gravity over the extended columns.
///
/// Live stones in rows `[-N, N)` keep their relative order and are packed
/// against row N-1. Ghosts and anything outside the extended range vanish.
pub fn fall(state: &GameState) -> GameState {
    let grid = state.board.grid();
    let size = grid.size();
    let mut stones = BTreeMap::new();

    for column in grid.extended_columns() {
        let stack: Vec<_> = column
            .iter()
            .filter_map(|position| state.board.live(*position).map(|stone| (*position, *stone)))
            .collect();
        let height = stack.len() as i32;
        for (offset, (from, stone)) in stack.into_iter().enumerate() {
            let row = size + offset as i32 - height;
            stones.insert(Position::new(from.column, row), stone);
        }
    }

    let mut next = state.clone();
    next.board = Board::from_stones(size as u32, stones);
    next
}

/// Every run whose three stones match under [`crate::Stone::matches`].
pub fn matching_runs(board: &Board) -> Vec<[Position; GameConfig::RUN_LENGTH]> {
    board
        .grid()
        .runs()
        .into_iter()
        .filter(|run| {
            let [first, rest @ ..] = run.map(|position| board.get(position));
            match first {
                Some(first) => rest
                    .iter()
                    .all(|stone| stone.is_some_and(|stone| first.matches(stone))),
                None => false,
            }
        })
        .collect()
}

/// Ghosts the ends of every matching run and promotes its middle.
///
/// All runs are judged against the board before the pass and applied in one
/// simultaneous update. Promotions are written after ghosts, so a cell that
/// is the end of one run and the middle of another ends up promoted, not
/// ghosted. Merges never chain within a pass.
pub fn match_and_merge(state: &GameState) -> GameState {
    let board = &state.board;
    let runs = matching_runs(board);
    let mut next = state.clone();

    for [first, _, last] in &runs {
        for end in [first, last] {
            if let Some(stone) = board.get(*end) {
                next.board.insert(*end, stone.ghosted());
            }
        }
    }
    for [_, middle, _] in &runs {
        if let Some(stone) = board.get(*middle) {
            next.board.insert(*middle, stone.promoted());
        }
    }
    next
}

/// One cascade turn without pacing.
pub fn turn(state: &GameState, env: &GameEnv<'_>) -> GameState {
    CascadeStep::TURN
        .iter()
        .fold(state.clone(), |current, step| step.apply(&current, env))
}

/// Runs whole turns until no visible cell is empty.
///
/// Gives up after `max_settle_turns` and returns the partial state inside
/// the error.
pub fn turns_to_stability(state: &GameState, env: &GameEnv<'_>) -> Result<GameState, CascadeError> {
    let (settled, summary) = Resolution::settle(state.clone()).run_to_end(env);
    if summary.settled {
        Ok(settled)
    } else {
        Err(CascadeError::Unsettled {
            turns: summary.settle_turns,
            state: Box::new(settled),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::combat::{CombatRules, StoneKind};
    use crate::env::{PcgRng, RngOracle};
    use crate::state::{Player, Stone, StoneId};

    /// Always rolls the same value, so every spawn has the same kind.
    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    /// A full board where no two stones share a level.
    fn distinct_board(size: u32) -> Board {
        let grid = crate::grid::Grid::new(size);
        Board::from_stones(
            size,
            grid.positions().enumerate().map(|(i, position)| {
                let id = StoneId(i as u64);
                (position, Stone::new(id, StoneKind::FireBall).with_level(i as u32 + 2))
            }),
        )
    }

    fn state_of(board: Board) -> GameState {
        GameState::new(0, board, Vec::new(), Player::new(10))
    }

    #[test]
    fn fill_spawns_one_board_above_each_gap() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);

        let mut board = distinct_board(7);
        board.remove(Position::new(3, 4));
        let ghost = board.get(Position::new(5, 6)).map(Stone::ghosted);
        if let Some(ghost) = ghost {
            board.insert(Position::new(5, 6), ghost);
        }
        let state = state_of(board);

        let filled = fill(&state, &env);

        let spawned_a = filled.board.get(Position::new(3, -3)).unwrap();
        let spawned_b = filled.board.get(Position::new(5, -1)).unwrap();
        assert_eq!(spawned_a.level, 1);
        assert_eq!(spawned_a.id, StoneId(49));
        assert_eq!(spawned_b.id, StoneId(50));
        assert!(filled.board.get(Position::new(5, 6)).unwrap().ghost);
        assert_eq!(filled.next_stone_id(), StoneId(51));
    }

    #[test]
    fn fall_compacts_and_drops_ghosts() {
        let a = Stone::new(StoneId(1), StoneKind::FireBall);
        let b = Stone::new(StoneId(2), StoneKind::Arrows);
        let c = Stone::new(StoneId(3), StoneKind::IceStorm);
        let board = Board::from_stones(
            3,
            [
                (Position::new(0, -2), a),
                (Position::new(0, 0), b.ghosted()),
                (Position::new(0, 1), c),
            ],
        );

        let fallen = fall(&state_of(board));

        assert_eq!(fallen.board.len(), 2);
        assert_eq!(fallen.board.get(Position::new(0, 1)), Some(&a));
        assert_eq!(fallen.board.get(Position::new(0, 2)), Some(&c));
    }

    #[test]
    fn fall_conserves_live_ids_per_column() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let mut board = distinct_board(7);
        for row in [1, 4] {
            board.remove(Position::new(2, row));
        }
        let filled = fill(&state_of(board), &env);

        let ids = |state: &GameState, column: i32| -> BTreeSet<StoneId> {
            state
                .board
                .iter()
                .filter(|(position, stone)| position.column == column && !stone.ghost)
                .map(|(_, stone)| stone.id)
                .collect()
        };

        let fallen = fall(&filled);
        for column in 0..7 {
            assert_eq!(ids(&filled, column), ids(&fallen, column));
        }
        assert!(fallen.is_stable());
    }

    #[test]
    fn horizontal_run_merges_into_the_middle() {
        let mut board = distinct_board(7);
        for (column, id) in [(0, 100), (1, 101), (2, 102)] {
            board.insert(
                Position::new(column, 0),
                Stone::new(StoneId(id), StoneKind::Arrows).with_level(5),
            );
        }

        let merged = match_and_merge(&state_of(board));

        let left = merged.board.get(Position::new(0, 0)).unwrap();
        let middle = merged.board.get(Position::new(1, 0)).unwrap();
        let right = merged.board.get(Position::new(2, 0)).unwrap();
        assert!(left.ghost && right.ghost);
        assert!(!middle.ghost);
        assert_eq!(middle.level, 6);
        assert_eq!(middle.kind, StoneKind::Arrows);
        assert_eq!(middle.id, StoneId(101));
    }

    #[test]
    fn same_kind_different_levels_do_not_merge() {
        let board = distinct_board(7);
        assert!(matching_runs(&board).is_empty());
        let state = state_of(board);
        assert_eq!(match_and_merge(&state), state);
    }

    #[test]
    fn run_of_four_promotes_both_inner_stones() {
        let mut board = distinct_board(7);
        for column in 0..4 {
            board.insert(
                Position::new(column, 3),
                Stone::new(StoneId(200 + column as u64), StoneKind::IceStorm),
            );
        }
        assert_eq!(matching_runs(&board).len(), 2);

        let merged = match_and_merge(&state_of(board));
        let at = |column| *merged.board.get(Position::new(column, 3)).unwrap();

        assert!(at(0).ghost);
        assert!(!at(1).ghost && at(1).level == 2);
        assert!(!at(2).ghost && at(2).level == 2);
        assert!(at(3).ghost);
    }

    #[test]
    fn merge_wins_over_ghost_on_crossing_runs() {
        let mut board = distinct_board(7);
        let cells = [(0, 1), (1, 1), (2, 1), (2, 0), (2, 2)];
        for (i, (column, row)) in cells.into_iter().enumerate() {
            board.insert(
                Position::new(column, row),
                Stone::new(StoneId(300 + i as u64), StoneKind::BattleAxe),
            );
        }

        let merged = match_and_merge(&state_of(board));
        let at = |column, row| *merged.board.get(Position::new(column, row)).unwrap();

        // (2, 1) ends the horizontal run and is the middle of the vertical one.
        assert!(!at(2, 1).ghost);
        assert_eq!(at(2, 1).level, 2);
        assert_eq!(at(1, 1).level, 2);
        assert!(at(0, 1).ghost);
        assert!(at(2, 0).ghost && at(2, 2).ghost);
    }

    #[test]
    fn stability_fills_an_empty_board_and_is_idempotent() {
        let config = GameConfig::default().with_seed(5);
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let state = GameState::new_game(&config, &env);

        let settled = turns_to_stability(&state, &env).unwrap();
        assert!(settled.is_stable());
        assert!(settled.board.iter().all(|(position, stone)| {
            settled.board.grid().contains(*position) && !stone.ghost
        }));
        assert_eq!(settled.board.len(), 49);

        let again = turns_to_stability(&settled, &env).unwrap();
        assert_eq!(again, settled);
    }

    #[test]
    fn unsettled_cascade_reports_partial_state() {
        let config = GameConfig {
            max_settle_turns: 0,
            ..GameConfig::default()
        };
        let rules = CombatRules::default();
        let rng = FixedRng(0);
        let env = GameEnv::new(&rng, &rules, &config);
        let state = state_of(Board::new(7));

        match turns_to_stability(&state, &env) {
            Err(CascadeError::Unsettled { turns, state: partial }) => {
                assert_eq!(turns, 0);
                assert_eq!(*partial, state);
            }
            Ok(_) => panic!("expected the cut-off to trigger"),
        }
    }
}
