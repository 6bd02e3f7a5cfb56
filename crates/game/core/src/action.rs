//! Player input: toroidal rotations and stone triggers.
//!
//! Every move is a pure transform. A rotation that leaves the board as it
//! was, or a trigger on an empty cell, simply returns an equal state; the
//! turn protocol in [`crate::engine`] turns that into a rollback.

use std::fmt;

use crate::combat::{CombatRules, trigger};
use crate::state::{GameState, Position};

/// One player move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Move {
    /// Shift every stone of `row` by `amount` columns, wrapping around.
    RotateRow { row: i32, amount: i32 },
    /// Shift every stone of `column` by `amount` rows, wrapping around.
    RotateColumn { column: i32, amount: i32 },
    /// Consume the stone at `position` against the enemy queue.
    Trigger { position: Position },
}

impl Move {
    pub fn rotate_row(row: i32, amount: i32) -> Self {
        Self::RotateRow { row, amount }
    }

    pub fn rotate_column(column: i32, amount: i32) -> Self {
        Self::RotateColumn { column, amount }
    }

    pub fn trigger(position: Position) -> Self {
        Self::Trigger { position }
    }

    pub fn apply(&self, state: &GameState, rules: &CombatRules) -> GameState {
        match *self {
            Move::RotateRow { row, amount } => rotate_row(state, row, amount),
            Move::RotateColumn { column, amount } => rotate_column(state, column, amount),
            Move::Trigger { position } => trigger(state, position, rules),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::RotateRow { .. } => "rotate_row",
            Move::RotateColumn { .. } => "rotate_column",
            Move::Trigger { .. } => "trigger",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::RotateRow { row, amount } => write!(f, "rotate row {row} by {amount}"),
            Move::RotateColumn { column, amount } => {
                write!(f, "rotate column {column} by {amount}")
            }
            Move::Trigger { position } => write!(f, "trigger {position}"),
        }
    }
}

/// Rotates `row` so the stone at column `c` moves to `c + amount` (mod N).
///
/// Both the row index and the amount may be any integer.
pub fn rotate_row(state: &GameState, row: i32, amount: i32) -> GameState {
    let grid = state.board.grid();
    let row = grid.normalize(row);
    rotate_line(state, amount, |index| Position::new(index, row))
}

/// Rotates `column` so the stone at row `r` moves to `r + amount` (mod N).
pub fn rotate_column(state: &GameState, column: i32, amount: i32) -> GameState {
    let grid = state.board.grid();
    let column = grid.normalize(column);
    rotate_line(state, amount, |index| Position::new(column, index))
}

fn rotate_line(state: &GameState, amount: i32, at: impl Fn(i32) -> Position) -> GameState {
    let grid = state.board.grid();
    let mut next = state.clone();
    for index in 0..grid.size() {
        let source = at(grid.normalize(index - amount));
        match state.board.get(source) {
            Some(stone) => {
                next.board.insert(at(index), *stone);
            }
            None => {
                next.board.remove(at(index));
            }
        }
    }
    next
}
