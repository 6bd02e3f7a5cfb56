//! Content factory for building game configuration from data files.

use std::path::{Path, PathBuf};

use stone_core::{CombatMode, CombatRules, GameConfig, SkillTable};

use crate::loaders::{ConfigLoader, LoadResult, SkillLoader};

/// Environment variable that overrides the bundled data directory.
pub const DATA_DIR_ENV: &str = "CONTENT_DATA_DIR";

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── skills.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data set shipped with this crate, unless `CONTENT_DATA_DIR` is set.
    pub fn bundled() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) => Self::new(dir),
            Err(_) => Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data")),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the skill table from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillTable> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Combat rules for `config`: the skill table, or the flat power rule.
    ///
    /// `skills.ron` is only read in [`CombatMode::Skills`].
    pub fn load_rules(&self, config: &GameConfig) -> LoadResult<CombatRules> {
        let rules = match config.combat {
            CombatMode::Skills => CombatRules::Skills(self.load_skills()?),
            CombatMode::Flat => CombatRules::flat(),
        };
        rules.validate_for(config)?;
        Ok(rules)
    }

    /// Loads `config.toml` and the rules it selects.
    pub fn load_all(&self) -> LoadResult<(GameConfig, CombatRules)> {
        let config = self.load_config()?;
        let rules = self.load_rules(&config)?;
        Ok((config, rules))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
