//! Skill table loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stone_core::{EnemyKind, Skill, SkillLevel, SkillTable, StoneKind};

use crate::loaders::{LoadResult, read_file};

/// One stone kind's skill as written in RON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub kind: StoneKind,
    pub levels: Vec<SkillLevel>,
    #[serde(default)]
    pub effective: Option<EnemyKind>,
}

/// Skill table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillEntry>,
}

impl SkillCatalog {
    /// Builds and validates the table; every stone kind must be present once.
    pub fn into_table(self) -> LoadResult<SkillTable> {
        let table = SkillTable::from_entries(
            self.skills
                .into_iter()
                .map(|entry| (entry.kind, Skill::new(entry.levels, entry.effective))),
        )?;
        table.validate()?;
        Ok(table)
    }
}

/// Loader for skill tables from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<SkillTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid skill table {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<SkillTable> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill table RON: {}", e))?;
        catalog.into_table()
    }
}
