use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::grid::Grid;

use super::common::{Position, StoneId};
use super::stone::Stone;

/// Mapping from position to stone for an N×N board.
///
/// Keys are unique. Positions outside the visible region are legal while
/// spawned stones wait to fall in.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    grid: Grid,
    stones: BTreeMap<Position, Stone>,
}

impl Board {
    /// An empty board with side length `size`.
    pub fn new(size: u32) -> Self {
        Self::with_grid(Grid::new(size))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            stones: BTreeMap::new(),
        }
    }

    /// Builds a board from explicit placements; later entries win on a shared key.
    pub fn from_stones(size: u32, stones: impl IntoIterator<Item = (Position, Stone)>) -> Self {
        Self {
            grid: Grid::new(size),
            stones: stones.into_iter().collect(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    pub fn get(&self, position: Position) -> Option<&Stone> {
        self.stones.get(&position)
    }

    /// Returns the stone only if it is present and not ghosted.
    pub fn live(&self, position: Position) -> Option<&Stone> {
        self.get(position).filter(|stone| !stone.ghost)
    }

    pub fn insert(&mut self, position: Position, stone: Stone) -> Option<Stone> {
        self.stones.insert(position, stone)
    }

    pub fn remove(&mut self, position: Position) -> Option<Stone> {
        self.stones.remove(&position)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Position, Stone> {
        self.stones.iter()
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Position of the stone with the given id, if it is on the board.
    pub fn find(&self, id: StoneId) -> Option<Position> {
        self.stones
            .iter()
            .find_map(|(position, stone)| (stone.id == id).then_some(*position))
    }

    /// Highest id on the board.
    pub fn max_id(&self) -> Option<StoneId> {
        self.stones.values().map(|stone| stone.id).max()
    }

    /// True when every visible cell holds a live stone.
    pub fn is_full(&self) -> bool {
        self.grid.empty_positions(self).is_empty()
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = (&'a Position, &'a Stone);
    type IntoIter = btree_map::Iter<'a, Position, Stone>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
