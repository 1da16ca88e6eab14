//! Spell book loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::{Spell, SpellBook};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell book structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<Spell>,
}

/// Loader for spell books from RON files.
pub struct SpellLoader;

impl SpellLoader {
    pub fn load(path: &Path) -> LoadResult<SpellBook> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a spell catalog. Duplicate ids are rejected.
    pub fn parse(content: &str) -> LoadResult<SpellBook> {
        let catalog: SpellCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for spell in &catalog.spells {
            if !seen.insert(spell.id) {
                anyhow::bail!("duplicate spell id {}", spell.id);
            }
        }

        Ok(catalog.spells.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{DamageType, EffectId, SpellId, SpellKind};

    #[test]
    fn parses_catalog() {
        let book = SpellLoader::parse(
            r#"(
    spells: [
        (
            id: SpellId(1),
            name: "Fire Bolt",
            kind: Bolt,
            damage: 90,
            damage_type: Heat,
            power_cost: 15,
            effect: EffectId(5),
        ),
        (id: SpellId(2), name: "Cold Snap", damage: 40, damage_type: Cold),
    ],
)"#,
        )
        .unwrap();

        assert_eq!(book.len(), 2);
        let fire = book.get(SpellId(1)).unwrap();
        assert_eq!(fire.kind, SpellKind::Bolt);
        assert_eq!(fire.damage_type, DamageType::Heat);
        assert_eq!(fire.effect, EffectId(5));
        assert_eq!(book.get(SpellId(2)).unwrap().power_cost, 0);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = SpellLoader::parse(
            r#"(spells: [
        (id: SpellId(1), name: "a", damage: 1),
        (id: SpellId(1), name: "b", damage: 2),
    ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate spell id"));
    }
}
