//! Stone and enemy kinds and the tables that turn them into damage.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::config::{CombatMode, GameConfig};
use crate::error::ConfigError;
use crate::state::Stone;

/// Skill carried by a stone.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum StoneKind {
    #[default]
    FireBall,
    IceStorm,
    BattleAxe,
    Arrows,
}

impl StoneKind {
    /// Position in the shared stone/enemy palette.
    pub fn palette_index(self) -> usize {
        self as usize
    }
}

/// Enemy type tag.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EnemyKind {
    #[default]
    Skeleton,
    Leech,
    Werhog,
    TentacleVine,
}

impl EnemyKind {
    /// The enemy sharing a palette slot with the stone kind.
    ///
    /// Flat rules treat the pair as the same tag.
    pub fn sharing_palette(stone: StoneKind) -> Self {
        Self::iter()
            .nth(stone.palette_index())
            .unwrap_or_default()
    }
}

/// Damage and reach of one skill level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillLevel {
    pub damage: i32,
    /// Number of queue entries hit, counted from the front.
    pub area: u32,
}

impl SkillLevel {
    pub const fn new(damage: i32, area: u32) -> Self {
        Self { damage, area }
    }
}

/// Level-indexed definition of one stone kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    /// Entry `level - 1` applies to a stone of that level.
    pub levels: Vec<SkillLevel>,
    /// Enemy kind that takes double damage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effective: Option<EnemyKind>,
}

impl Skill {
    pub fn new(levels: Vec<SkillLevel>, effective: Option<EnemyKind>) -> Self {
        Self { levels, effective }
    }

    /// Definition for `level`; levels past the table reuse the last entry.
    pub fn level(&self, level: u32) -> Option<&SkillLevel> {
        let index = (level.max(1) - 1) as usize;
        self.levels.get(index).or_else(|| self.levels.last())
    }
}

/// Skill definitions for every stone kind.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SkillTable {
    skills: BTreeMap<StoneKind, Skill>,
}

impl SkillTable {
    /// Builds a table, rejecting a kind listed twice.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (StoneKind, Skill)>,
    ) -> Result<Self, ConfigError> {
        let mut skills = BTreeMap::new();
        for (kind, skill) in entries {
            if skills.insert(kind, skill).is_some() {
                return Err(ConfigError::DuplicateSkill(kind));
            }
        }
        Ok(Self { skills })
    }

    /// The classic four-skill table.
    pub fn standard() -> Self {
        use SkillLevel as L;
        let skills = BTreeMap::from([
            (
                StoneKind::FireBall,
                Skill::new(
                    vec![L::new(1, 1), L::new(2, 2), L::new(4, 4), L::new(16, 16)],
                    Some(EnemyKind::Skeleton),
                ),
            ),
            (
                StoneKind::IceStorm,
                Skill::new(
                    vec![L::new(1, 1), L::new(1, 4), L::new(2, 8), L::new(16, 16)],
                    Some(EnemyKind::Leech),
                ),
            ),
            (
                StoneKind::BattleAxe,
                Skill::new(
                    vec![L::new(1, 1), L::new(4, 1), L::new(8, 2), L::new(32, 8)],
                    Some(EnemyKind::TentacleVine),
                ),
            ),
            (
                StoneKind::Arrows,
                Skill::new(
                    vec![L::new(1, 1), L::new(2, 2), L::new(4, 4), L::new(16, 16)],
                    Some(EnemyKind::Werhog),
                ),
            ),
        ]);
        Self { skills }
    }

    pub fn get(&self, kind: StoneKind) -> Option<&Skill> {
        self.skills.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StoneKind, &Skill)> {
        self.skills.iter().map(|(kind, skill)| (*kind, skill))
    }

    /// Every stone kind must be present with at least one level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in StoneKind::iter() {
            let skill = self.get(kind).ok_or(ConfigError::MissingSkill(kind))?;
            if skill.levels.is_empty() {
                return Err(ConfigError::EmptySkill(kind));
            }
        }
        Ok(())
    }
}

/// A stone's skill resolved for its current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedSkill {
    pub damage: i32,
    pub area: usize,
    pub effective: Option<EnemyKind>,
}

/// Combat configuration: the full skill table or the flat power rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatRules {
    Skills(SkillTable),
    /// `base^(level-1)` damage against the front enemy, doubled when the
    /// enemy shares the stone's palette slot.
    Flat { base: u64 },
}

impl CombatRules {
    pub fn flat() -> Self {
        Self::Flat {
            base: GameConfig::POWER_BASE,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Skills(table) => table.validate(),
            Self::Flat { base: 0 } => Err(ConfigError::ZeroPowerBase),
            Self::Flat { .. } => Ok(()),
        }
    }

    pub fn mode(&self) -> CombatMode {
        match self {
            Self::Skills(_) => CombatMode::Skills,
            Self::Flat { .. } => CombatMode::Flat,
        }
    }

    /// Validates the rules and checks they are the ones `config` selects.
    pub fn validate_for(&self, config: &GameConfig) -> Result<(), ConfigError> {
        if self.mode() != config.combat {
            return Err(ConfigError::CombatModeMismatch {
                configured: config.combat,
                rules: self.mode(),
            });
        }
        self.validate()
    }

    /// Resolves what triggering `stone` would do.
    ///
    /// Returns `None` only for a skill table missing the stone's kind.
    pub fn skill_for(&self, stone: &Stone) -> Option<ResolvedSkill> {
        match self {
            Self::Skills(table) => {
                let skill = table.get(stone.kind)?;
                let level = skill.level(stone.level)?;
                Some(ResolvedSkill {
                    damage: level.damage,
                    area: level.area as usize,
                    effective: skill.effective,
                })
            }
            Self::Flat { base } => {
                let power = base.saturating_pow(stone.level.saturating_sub(1));
                Some(ResolvedSkill {
                    damage: i32::try_from(power).unwrap_or(i32::MAX),
                    area: 1,
                    effective: Some(EnemyKind::sharing_palette(stone.kind)),
                })
            }
        }
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self::Skills(SkillTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StoneId;

    #[test]
    fn standard_table_is_complete() {
        assert!(SkillTable::standard().validate().is_ok());
    }

    #[test]
    fn missing_kind_is_a_config_error() {
        let table = SkillTable::from_entries([(
            StoneKind::FireBall,
            Skill::new(vec![SkillLevel::new(1, 1)], None),
        )])
        .unwrap();
        assert_eq!(
            table.validate(),
            Err(ConfigError::MissingSkill(StoneKind::IceStorm))
        );
    }

    #[test]
    fn duplicate_kind_is_a_config_error() {
        let skill = Skill::new(vec![SkillLevel::new(1, 1)], None);
        let result = SkillTable::from_entries([
            (StoneKind::Arrows, skill.clone()),
            (StoneKind::Arrows, skill),
        ]);
        assert_eq!(result, Err(ConfigError::DuplicateSkill(StoneKind::Arrows)));
    }

    #[test]
    fn skill_levels_index_from_one_and_clamp() {
        let rules = CombatRules::default();
        let axe = Stone::new(StoneId(0), StoneKind::BattleAxe);

        let level_two = rules.skill_for(&axe.with_level(2)).unwrap();
        assert_eq!((level_two.damage, level_two.area), (4, 1));
        assert_eq!(level_two.effective, Some(EnemyKind::TentacleVine));

        let beyond = rules.skill_for(&axe.with_level(9)).unwrap();
        assert_eq!((beyond.damage, beyond.area), (32, 8));
    }

    #[test]
    fn flat_power_is_four_to_level_minus_one() {
        let rules = CombatRules::flat();
        let stone = Stone::new(StoneId(0), StoneKind::IceStorm);
        assert_eq!(rules.skill_for(&stone).unwrap().damage, 1);
        assert_eq!(rules.skill_for(&stone.with_level(3)).unwrap().damage, 16);
        assert_eq!(
            rules.skill_for(&stone).unwrap().effective,
            Some(EnemyKind::Leech)
        );
    }

    #[test]
    fn rules_must_match_the_configured_mode() {
        let flat_config = GameConfig {
            combat: CombatMode::Flat,
            ..GameConfig::default()
        };
        assert_eq!(CombatRules::flat().validate_for(&flat_config), Ok(()));
        assert_eq!(
            CombatRules::default().validate_for(&flat_config),
            Err(ConfigError::CombatModeMismatch {
                configured: CombatMode::Flat,
                rules: CombatMode::Skills,
            })
        );
        assert!(CombatRules::flat().validate_for(&GameConfig::default()).is_err());
    }

    #[test]
    fn kinds_render_as_kebab_case() {
        assert_eq!(StoneKind::FireBall.as_ref(), "fire-ball");
        assert_eq!(EnemyKind::TentacleVine.to_string(), "tentacle-vine");
        assert_eq!("ice-storm".parse::<StoneKind>(), Ok(StoneKind::IceStorm));
    }
}
