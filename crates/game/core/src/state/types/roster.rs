use crate::combat::EnemyKind;

/// A passive enemy: hit points keyed by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: i32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, hp: i32) -> Self {
        Self { kind, hp }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// The player's two counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    /// May drop to zero or below; that ends the game.
    pub hp: i32,
    pub xp: u32,
}

impl Player {
    pub fn new(hp: i32) -> Self {
        Self { hp, xp: 0 }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}
