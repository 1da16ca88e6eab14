//! Actor roster loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::{ActorState, RegionId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Actors that start in one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRoster {
    pub id: RegionId,
    /// Region seed; the runtime seed is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub actors: Vec<ActorState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterFile {
    regions: Vec<RegionRoster>,
}

/// Loader for per-region actor rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RegionRoster>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a roster. Every actor is tagged with its region, and ids must be
    /// unique across the whole world.
    pub fn parse(content: &str) -> LoadResult<Vec<RegionRoster>> {
        let mut roster: RosterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut regions = BTreeSet::new();
        let mut actors = BTreeSet::new();
        for region in &mut roster.regions {
            if !regions.insert(region.id) {
                anyhow::bail!("{} is listed twice", region.id);
            }
            for actor in &mut region.actors {
                if !actors.insert(actor.id) {
                    anyhow::bail!("actor {} appears more than once", actor.id);
                }
                actor.region = region.id;
            }
        }

        Ok(roster.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use combat_core::{ActorKind, EntityId, HitLocation, OffHand, Position};
    use tempfile::NamedTempFile;

    const ROSTER: &str = r#"(
    regions: [
        (
            id: RegionId(1),
            seed: Some(99),
            actors: [
                (
                    id: EntityId(1),
                    name: "Ysolde",
                    kind: Player,
                    level: 50,
                    attributes: (dexterity: 60),
                ),
                (
                    id: EntityId(2),
                    name: "Hakon",
                    kind: Player,
                    position: (x: 0, y: 900, z: 0),
                    equipment: (
                        off_hand: Some(Shield),
                        armor: (Some((armor_factor: 40.0, absorb: 19)), None, None, None, None, None),
                    ),
                ),
            ],
        ),
        (id: RegionId(2)),
    ],
)"#;

    #[test]
    fn loads_and_tags_regions() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ROSTER.as_bytes()).unwrap();

        let regions = RosterLoader::load(file.path()).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].seed, Some(99));
        assert!(regions[1].actors.is_empty());

        let caster = &regions[0].actors[0];
        assert_eq!(caster.kind, ActorKind::Player);
        assert_eq!(caster.attributes.dexterity, 60);
        assert_eq!(caster.region, RegionId(1));
        assert!(caster.is_alive());

        let blocker = &regions[0].actors[1];
        assert_eq!(blocker.position, Position::new(0, 900, 0));
        assert_eq!(blocker.equipment.off_hand, Some(OffHand::Shield));
        assert_eq!(blocker.armor_factor(HitLocation::Torso), 40.0);
        assert_eq!(blocker.id, EntityId(2));
    }

    #[test]
    fn rejects_duplicate_actor_ids() {
        let err = RosterLoader::parse(
            r#"(regions: [
        (id: RegionId(1), actors: [(id: EntityId(5), name: "a")]),
        (id: RegionId(2), actors: [(id: EntityId(5), name: "b")]),
    ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
