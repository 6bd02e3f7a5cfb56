//! Move resolution as a resumable step machine.
//!
//! A [`Resolution`] owns the state while one move is resolved. Each call to
//! [`Resolution::advance`] performs exactly one pure step and yields a
//! [`Frame`] carrying the resulting state and how long a renderer should
//! hold it. The runtime sleeps between frames; tests and offline callers
//! drain the machine with [`Resolution::run_to_end`].
//!
//! ```text
//! Move -> Turn(fill, fall, match_and_merge, fall) -> Judge
//!   Judge: unchanged by the turn -> Rollback -> Done
//!          changed              -> MoveCost -> [GameOver] -> Settle
//!   Settle: Turn ... until stable or max_settle_turns -> Done
//! ```

use crate::action::Move;
use crate::cascade::CascadeStep;
use crate::env::GameEnv;
use crate::state::GameState;

/// How long a frame should stay on screen before the next step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pace {
    /// Nothing visible happened; continue immediately.
    Instant,
    /// Stones were spawned above the board.
    Spawn,
    /// The board visibly changed.
    Impact,
}

impl Pace {
    fn impact_if(changed: bool) -> Self {
        if changed { Pace::Impact } else { Pace::Instant }
    }
}

/// What produced a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrameKind {
    Move,
    Step(CascadeStep),
    Rollback,
    MoveCost,
    GameOver { xp: u32 },
}

impl FrameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameKind::Move => "move",
            FrameKind::Step(step) => step.as_str(),
            FrameKind::Rollback => "rollback",
            FrameKind::MoveCost => "move_cost",
            FrameKind::GameOver { .. } => "game_over",
        }
    }
}

/// One published step of a resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub kind: FrameKind,
    pub pace: Pace,
    pub state: GameState,
}

/// Whether a move survived its cascade turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// The turn produced a match; the move cost was charged.
    Committed,
    /// The turn changed nothing; the state was restored to before the move.
    RolledBack,
}

/// Terminal notification carrying the final xp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOver {
    pub xp: u32,
}

/// Outcome of a finished resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionSummary {
    /// `None` for a settle-only resolution.
    pub verdict: Option<Verdict>,
    pub game_over: Option<GameOver>,
    /// Whole cascade turns spent settling after the verdict.
    pub settle_turns: usize,
    /// False when settling stopped at `max_settle_turns` with gaps left.
    pub settled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Move(Move),
    Turn { index: usize, settling: bool },
    Judge,
    Charged,
    Settle,
    Done,
}

/// Resolution of one move, or of a settle-only pass, one step at a time.
#[derive(Clone, Debug)]
pub struct Resolution {
    stage: Stage,
    before: GameState,
    after_move: GameState,
    current: GameState,
    summary: ResolutionSummary,
}

impl Resolution {
    /// Resolves `mv` against `state`: move, one turn, verdict, settle.
    pub fn for_move(state: GameState, mv: Move) -> Self {
        Self::starting_at(state, Stage::Move(mv))
    }

    /// Runs turns-to-stability only; used for the opening board.
    pub fn settle(state: GameState) -> Self {
        Self::starting_at(state, Stage::Settle)
    }

    fn starting_at(state: GameState, stage: Stage) -> Self {
        Self {
            stage,
            before: state.clone(),
            after_move: state.clone(),
            current: state,
            summary: ResolutionSummary::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.current
    }

    pub fn summary(&self) -> &ResolutionSummary {
        &self.summary
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    pub fn into_parts(self) -> (GameState, ResolutionSummary) {
        (self.current, self.summary)
    }

    /// Performs the next step. Returns `None` once the resolution is done.
    pub fn advance(&mut self, env: &GameEnv<'_>) -> Option<Frame> {
        loop {
            match self.stage {
                Stage::Move(mv) => {
                    let next = mv.apply(&self.current, env.rules());
                    let pace = Pace::impact_if(next != self.current);
                    self.current = next;
                    self.after_move = self.current.clone();
                    self.stage = Stage::Turn {
                        index: 0,
                        settling: false,
                    };
                    return Some(self.frame(FrameKind::Move, pace));
                }
                Stage::Turn { index, settling } => {
                    let step = CascadeStep::TURN[index];
                    let next = step.apply(&self.current, env);
                    let pace = match step {
                        CascadeStep::Fill => Pace::Spawn,
                        _ => Pace::impact_if(next != self.current),
                    };
                    self.current = next;
                    self.stage = if index + 1 < CascadeStep::TURN.len() {
                        Stage::Turn {
                            index: index + 1,
                            settling,
                        }
                    } else if settling {
                        self.summary.settle_turns += 1;
                        Stage::Settle
                    } else {
                        Stage::Judge
                    };
                    return Some(self.frame(FrameKind::Step(step), pace));
                }
                Stage::Judge => {
                    if self.current == self.after_move {
                        let pace = Pace::impact_if(self.current != self.before);
                        self.current = self.before.clone();
                        self.summary.verdict = Some(Verdict::RolledBack);
                        self.summary.settled = self.current.is_stable();
                        self.stage = Stage::Done;
                        return Some(self.frame(FrameKind::Rollback, pace));
                    }
                    let player = &mut self.current.player;
                    player.hp = player.hp.saturating_sub(env.config().move_cost);
                    self.summary.verdict = Some(Verdict::Committed);
                    self.stage = Stage::Charged;
                    return Some(self.frame(FrameKind::MoveCost, Pace::Instant));
                }
                Stage::Charged => {
                    self.stage = Stage::Settle;
                    if self.current.is_game_over() {
                        let xp = self.current.player.xp;
                        self.summary.game_over = Some(GameOver { xp });
                        return Some(self.frame(FrameKind::GameOver { xp }, Pace::Instant));
                    }
                }
                Stage::Settle => {
                    if self.current.is_stable() {
                        self.summary.settled = true;
                        self.stage = Stage::Done;
                    } else if self.summary.settle_turns >= env.config().max_settle_turns {
                        self.stage = Stage::Done;
                    } else {
                        self.stage = Stage::Turn {
                            index: 0,
                            settling: true,
                        };
                    }
                }
                Stage::Done => return None,
            }
        }
    }

    /// Drains every remaining step and returns the final state.
    pub fn run_to_end(mut self, env: &GameEnv<'_>) -> (GameState, ResolutionSummary) {
        while self.advance(env).is_some() {}
        self.into_parts()
    }

    fn frame(&self, kind: FrameKind, pace: Pace) -> Frame {
        Frame {
            kind,
            pace,
            state: self.current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatRules, EnemyKind, StoneKind};
    use crate::config::GameConfig;
    use crate::env::PcgRng;
    use crate::grid::Grid;
    use crate::state::{Board, Enemy, Player, Position, Stone, StoneId};

    const N: i32 = 7;

    /// Full board where every stone has a distinct level, so nothing matches.
    fn inert_state(hp: i32) -> GameState {
        let grid = Grid::new(N as u32);
        let board = Board::from_stones(
            N as u32,
            grid.positions().map(|position| {
                let level = (position.column * N + position.row + 2) as u32;
                let id = StoneId((position.column * N + position.row) as u64);
                (position, Stone::new(id, StoneKind::FireBall).with_level(level))
            }),
        );
        GameState::new(
            3,
            board,
            vec![Enemy::new(EnemyKind::Werhog, 100), Enemy::new(EnemyKind::Leech, 100)],
            Player::new(hp),
        )
    }

    fn drain(resolution: &mut Resolution, env: &GameEnv<'_>) -> Vec<Frame> {
        std::iter::from_fn(|| resolution.advance(env)).collect()
    }

    #[test]
    fn ineffective_rotation_rolls_back() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let before = inert_state(10);

        let mut resolution = Resolution::for_move(before.clone(), Move::rotate_row(0, 1));
        let frames = drain(&mut resolution, &env);
        let (after, summary) = resolution.into_parts();

        assert_eq!(after, before);
        assert_eq!(summary.verdict, Some(Verdict::RolledBack));
        assert_eq!(summary.game_over, None);

        let kinds: Vec<_> = frames.iter().map(|frame| frame.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FrameKind::Move,
                FrameKind::Step(CascadeStep::Fill),
                FrameKind::Step(CascadeStep::Fall),
                FrameKind::Step(CascadeStep::MatchAndMerge),
                FrameKind::Step(CascadeStep::Fall),
                FrameKind::Rollback,
            ]
        );
        let paces: Vec<_> = frames.iter().map(|frame| frame.pace).collect();
        assert_eq!(
            paces,
            vec![
                Pace::Impact,
                Pace::Spawn,
                Pace::Instant,
                Pace::Instant,
                Pace::Instant,
                Pace::Impact,
            ]
        );
    }

    #[test]
    fn no_op_move_commits_when_the_turn_fills_a_gap() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let mut before = inert_state(10);
        before.board.remove(Position::new(3, 3));

        let (_, summary) =
            Resolution::for_move(before, Move::trigger(Position::new(3, 3))).run_to_end(&env);
        assert_eq!(summary.verdict, Some(Verdict::Committed));
    }

    #[test]
    fn effective_trigger_costs_exactly_one_hp() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let before = inert_state(10);

        let (after, summary) =
            Resolution::for_move(before, Move::trigger(Position::new(0, 0))).run_to_end(&env);

        assert_eq!(summary.verdict, Some(Verdict::Committed));
        assert!(summary.settled);
        assert!(after.is_stable());
        assert_eq!(after.player, Player { hp: 9, xp: 0 });
        assert_eq!(after.enemies[0].hp, 98);
        assert_eq!(after.enemies[1].hp, 98);
    }

    #[test]
    fn rotation_into_a_run_commits_and_promotes_the_middle() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let mut before = inert_state(10);
        for (column, id) in [(5, 100), (6, 101), (0, 102)] {
            before.board.insert(
                Position::new(column, 0),
                Stone::new(StoneId(id), StoneKind::IceStorm),
            );
        }

        let (after, summary) =
            Resolution::for_move(before, Move::rotate_row(0, 2)).run_to_end(&env);

        assert_eq!(summary.verdict, Some(Verdict::Committed));
        assert!(summary.settled);
        assert!(after.is_stable());
        assert_eq!(after.player, Player { hp: 9, xp: 0 });
        // Enemies are untouched: a rotation never triggers.
        assert_eq!(after.enemies[0].hp, 100);

        let middle = StoneId(101);
        assert_eq!(after.board.find(middle), Some(Position::new(1, 0)));
        let promoted = after.board.get(Position::new(1, 0)).unwrap();
        assert_eq!((promoted.kind, promoted.level), (StoneKind::IceStorm, 2));
        assert_eq!(after.board.find(StoneId(100)), None);
        assert_eq!(after.board.find(StoneId(102)), None);
    }

    #[test]
    fn last_hp_reports_game_over_once() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let before = inert_state(1);

        let mut resolution = Resolution::for_move(before, Move::trigger(Position::new(2, 5)));
        let frames = drain(&mut resolution, &env);
        let (after, summary) = resolution.into_parts();

        let game_overs: Vec<_> = frames
            .iter()
            .filter(|frame| matches!(frame.kind, FrameKind::GameOver { .. }))
            .collect();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(game_overs[0].kind, FrameKind::GameOver { xp: 0 });
        assert_eq!(summary.game_over, Some(GameOver { xp: 0 }));
        assert!(after.is_game_over());
        assert!(after.is_stable());
    }

    #[test]
    fn settle_on_stable_board_yields_nothing() {
        let config = GameConfig::default();
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let state = inert_state(10);

        let mut resolution = Resolution::settle(state.clone());
        assert!(resolution.advance(&env).is_none());
        assert!(resolution.is_done());
        assert_eq!(resolution.state(), &state);
        assert_eq!(
            *resolution.summary(),
            ResolutionSummary {
                verdict: None,
                game_over: None,
                settle_turns: 0,
                settled: true,
            }
        );
    }

    #[test]
    fn opening_settle_counts_turns() {
        let config = GameConfig::default().with_seed(21);
        let rules = CombatRules::default();
        let env = GameEnv::new(&PcgRng, &rules, &config);
        let state = GameState::new_game(&config, &env);

        let mut resolution = Resolution::settle(state);
        let frames = drain(&mut resolution, &env);
        let summary = *resolution.summary();

        assert!(summary.settled);
        assert!(summary.settle_turns >= 1);
        assert_eq!(frames.len(), summary.settle_turns * CascadeStep::TURN.len());
        assert_eq!(frames[0].kind, FrameKind::Step(CascadeStep::Fill));
        assert_eq!(frames[0].pace, Pace::Spawn);
        assert!(frames.last().is_some_and(|frame| frame.state.is_stable()));
    }
}
