//! Content factory for loading everything a runtime needs from one directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, SpellBook};

use crate::loaders::{ConfigLoader, LoadResult, RegionRoster, RosterLoader, SpellLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── spells.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tunables from `combat.toml`, falling back to defaults when
    /// the file does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the spell book from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellBook> {
        SpellLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load the actor roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<RegionRoster>> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
