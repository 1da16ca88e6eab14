//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;

        if config.bolt_speed == 0 {
            anyhow::bail!("bolt_speed must be positive");
        }
        if !(0.0..=1.0).contains(&config.magical_fraction) {
            anyhow::bail!(
                "magical_fraction must be within 0.0..=1.0, got {}",
                config.magical_fraction
            );
        }

        if !(1.0..=99.0).contains(&config.engage_block_floor) {
            anyhow::bail!(
                "engage_block_floor must be within 1.0..=99.0, got {}",
                config.engage_block_floor
            );
        }
        if !(0.0..=CombatConfig::DEFAULT_MAX_ABSORB).contains(&config.max_absorb) {
            anyhow::bail!(
                "max_absorb must be within 0.0..={}, got {}",
                CombatConfig::DEFAULT_MAX_ABSORB,
                config.max_absorb
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
bolt_speed = 100
spell_interrupt_duration = 3000
"#,
        )
        .unwrap();

        assert_eq!(config.bolt_speed, 100);
        assert_eq!(config.spell_interrupt_duration, 3000);
        assert_eq!(config.visibility_radius, CombatConfig::DEFAULT_VISIBILITY_RADIUS);
        assert_eq!(config.engage_block_floor, 85.0);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(ConfigLoader::parse("bolt_speed = 0").is_err());
        assert!(ConfigLoader::parse("magical_fraction = 1.5").is_err());
        assert!(ConfigLoader::parse("bolt_speed = \"fast\"").is_err());
    }

    #[test]
    fn rejects_out_of_range_block_floor_and_absorb() {
        let err = ConfigLoader::parse("engage_block_floor = 150.0").unwrap_err();
        assert!(err.to_string().contains("engage_block_floor"));
        assert!(ConfigLoader::parse("engage_block_floor = 0.5").is_err());

        let err = ConfigLoader::parse("max_absorb = 1.5").unwrap_err();
        assert!(err.to_string().contains("max_absorb"));
        assert!(ConfigLoader::parse("max_absorb = -0.1").is_err());

        let config = ConfigLoader::parse("engage_block_floor = 99.0\nmax_absorb = 0.85").unwrap();
        assert_eq!(config.engage_block_floor, 99.0);
        assert_eq!(config.max_absorb, 0.85);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/combat.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/combat.toml"));
    }
}
