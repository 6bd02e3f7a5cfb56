//! Coordinate math over an N×N toroidal board.
//!
//! Columns are always in `[0, N)`. Rows leave that range while stones spawn
//! above the board and fall into it, so the geometry also exposes an
//! extended row range `[-N, N)` per column.

use crate::config::GameConfig;
use crate::state::{Board, Position};

/// Board geometry for a fixed side length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: u32) -> Self {
        Self { size: size as i32 }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Wraps an index into `[0, N)` with true modulo, so `-1` maps to `N-1`.
    pub fn normalize(&self, index: i32) -> i32 {
        index.rem_euclid(self.size)
    }

    /// True when the position lies in the visible N×N region.
    pub fn contains(&self, position: Position) -> bool {
        (0..self.size).contains(&position.column) && (0..self.size).contains(&position.row)
    }

    /// The N columns, each the in-bounds positions from row 0 to row N-1.
    pub fn columns(&self) -> Vec<Vec<Position>> {
        self.columns_over(0)
    }

    /// The N columns over rows `[-N, N)`, giving fall room to stack spawns.
    pub fn extended_columns(&self) -> Vec<Vec<Position>> {
        self.columns_over(-self.size)
    }

    fn columns_over(&self, first_row: i32) -> Vec<Vec<Position>> {
        (0..self.size)
            .map(|column| {
                (first_row..self.size)
                    .map(|row| Position::new(column, row))
                    .collect()
            })
            .collect()
    }

    /// Every in-bounds position, column by column.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |column| (0..self.size).map(move |row| Position::new(column, row)))
    }

    /// In-bounds positions holding no stone or a ghosted one.
    pub fn empty_positions(&self, board: &Board) -> Vec<Position> {
        self.positions()
            .filter(|position| board.get(*position).is_none_or(|stone| stone.ghost))
            .collect()
    }

    /// Every contiguous horizontal and vertical window of `RUN_LENGTH`
    /// in-bounds positions. Windows do not wrap around the torus.
    pub fn runs(&self) -> Vec<[Position; GameConfig::RUN_LENGTH]> {
        let span = GameConfig::RUN_LENGTH as i32;
        let mut runs = Vec::new();
        for start in 0..=(self.size - span) {
            for lane in 0..self.size {
                runs.push(core::array::from_fn(|i| Position::new(start + i as i32, lane)));
                runs.push(core::array::from_fn(|i| Position::new(lane, start + i as i32)));
            }
        }
        runs
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_BOARD_SIZE)
    }
}
