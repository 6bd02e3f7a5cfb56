use crate::combat::StoneKind;
use crate::config::GameConfig;

use super::common::StoneId;

/// A placed piece: the unit of matching and combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stone {
    pub id: StoneId,
    pub kind: StoneKind,
    /// Starts at 1 and grows by one per merge.
    pub level: u32,
    /// Logically removed; kept for one frame so the renderer can fade it out.
    pub ghost: bool,
}

impl Stone {
    /// A fresh level-1 stone.
    pub fn new(id: StoneId, kind: StoneKind) -> Self {
        Self {
            id,
            kind,
            level: 1,
            ghost: false,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Two live stones match when kind and level agree; ids are ignored.
    pub fn matches(&self, other: &Stone) -> bool {
        !self.ghost && !other.ghost && self.kind == other.kind && self.level == other.level
    }

    /// This stone flagged as removed.
    pub fn ghosted(&self) -> Self {
        Self {
            ghost: true,
            ..*self
        }
    }

    /// This stone one level higher.
    pub fn promoted(&self) -> Self {
        Self {
            level: self.level.saturating_add(1),
            ..*self
        }
    }

    /// Label drawn on the stone: `POWER_BASE^(level-1)`.
    pub fn power(&self) -> u64 {
        GameConfig::POWER_BASE.saturating_pow(self.level.saturating_sub(1))
    }
}
