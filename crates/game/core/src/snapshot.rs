//! Read-only projection of [`GameState`] for renderers.
//!
//! A renderer reconciles frames by [`StoneId`], so every cell carries its
//! stone's id next to the position it is drawn at. Stones waiting above the
//! board and ghosts fading out are included; renderers decide how to draw
//! them.

use crate::combat::{EnemyKind, StoneKind};
use crate::state::{Enemy, GameState, StoneId};

/// One drawn stone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub id: StoneId,
    pub column: i32,
    pub row: i32,
    pub kind: StoneKind,
    pub level: u32,
    /// Label shown on the stone.
    pub power: u64,
    pub ghost: bool,
}

/// Immutable frame handed to the renderer after every published step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board_size: u32,
    /// Sorted by position, column-major.
    pub cells: Vec<CellView>,
    /// Queue order, nearest first.
    pub enemies: Vec<Enemy>,
    pub hp: i32,
    pub xp: u32,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let cells = state
            .board
            .iter()
            .map(|(position, stone)| CellView {
                id: stone.id,
                column: position.column,
                row: position.row,
                kind: stone.kind,
                level: stone.level,
                power: stone.power(),
                ghost: stone.ghost,
            })
            .collect();

        Self {
            board_size: state.board.size() as u32,
            cells,
            enemies: state.enemies.clone(),
            hp: state.player.hp,
            xp: state.player.xp,
        }
    }

    /// Cells inside the visible N×N region.
    pub fn visible_cells(&self) -> impl Iterator<Item = &CellView> {
        let size = self.board_size as i32;
        self.cells
            .iter()
            .filter(move |cell| (0..size).contains(&cell.column) && (0..size).contains(&cell.row))
    }

    pub fn cell(&self, id: StoneId) -> Option<&CellView> {
        self.cells.iter().find(|cell| cell.id == id)
    }

    /// Kinds of the queued enemies, nearest first.
    pub fn enemy_kinds(&self) -> impl Iterator<Item = EnemyKind> + '_ {
        self.enemies.iter().map(|enemy| enemy.kind)
    }

    /// SHA-256 over the bincode encoding of this snapshot.
    ///
    /// Two snapshots share a digest exactly when they would render the same.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self::capture(state)
    }
}
