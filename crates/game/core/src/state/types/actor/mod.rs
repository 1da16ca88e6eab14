//! Actor-related state types.
//!
//! This module contains everything the combat core reads from an actor:
//! - ActorState: main actor structure
//! - Equipment: off-hand item, stance and armor by hit location
//! - Effects: standing effects such as an engage commitment

pub mod effects;
pub mod equipment;

pub use effects::{ActiveEffect, EffectKind, EffectList};
pub use equipment::{ArmorPiece, Equipment, HitLocation, OffHand, WeaponStance};

use super::{EntityId, Heading, Position, RegionId, ResourceMeter, Tick};
use crate::combat::{AttackResult, AttackType, DamageType, Resistances};

/// Whether an actor is driven by a connected player or by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActorKind {
    Player,
    #[default]
    Npc,
}

/// World presence of an actor object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectState {
    Inactive,
    #[default]
    Active,
    Deleted,
}

/// Core attributes consulted by combat math.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub dexterity: u16,
}

impl Default for Attributes {
    fn default() -> Self {
        Self { dexterity: 50 }
    }
}

/// The last attack an actor executed, as remembered for defensive bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastAttack {
    pub result: AttackResult,
    /// Defense bonus of the executed style; `None` when no style was used.
    pub style_defense_bonus: Option<i32>,
}

impl LastAttack {
    /// Defense bonus that applies to incoming attacks, if the last attack was a styled hit.
    pub fn defense_bonus(&self) -> i32 {
        match (self.result, self.style_defense_bonus) {
            (AttackResult::HitStyle, Some(bonus)) => bonus,
            _ => 0,
        }
    }
}

/// Running cast-interrupt timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterruptTimer {
    pub until: Tick,
    pub attack_type: AttackType,
    pub attacker: EntityId,
}

/// Complete actor state as seen by the combat core.
///
/// Gameplay systems at large own and mutate this record; the combat core only
/// reads it, except for resources, effects and the attack bookkeeping fields
/// written when an impact is applied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub kind: ActorKind,
    pub region: RegionId,
    pub position: Position,
    pub heading: Heading,
    pub object_state: ObjectState,
    pub level: u8,
    pub attributes: Attributes,
    /// Modified shield specialization level.
    pub shield_spec: u8,
    /// Chance in percent that an offensive spell lands a critical.
    pub spell_crit_chance: u8,
    /// Global combat output scalar for players (1.0 = unpenalized).
    pub effectiveness: f64,

    pub health: ResourceMeter,
    pub power: ResourceMeter,
    pub endurance: ResourceMeter,

    pub resists: Resistances,
    pub equipment: Equipment,
    pub effects: EffectList,

    /// True while the actor is actively fighting.
    pub attack_state: bool,
    pub last_attack: Option<LastAttack>,
    pub last_attacked_by_enemy: Option<Tick>,
    pub interrupt: Option<InterruptTimer>,
}

impl Default for ActorState {
    fn default() -> Self {
        Self {
            id: EntityId(0),
            name: String::new(),
            kind: ActorKind::Npc,
            region: RegionId::default(),
            position: Position::ORIGIN,
            heading: Heading::default(),
            object_state: ObjectState::Active,
            level: 1,
            attributes: Attributes::default(),
            shield_spec: 0,
            spell_crit_chance: 0,
            effectiveness: 1.0,
            health: ResourceMeter::full(100),
            power: ResourceMeter::full(100),
            endurance: ResourceMeter::full(100),
            resists: Resistances::none(),
            equipment: Equipment::empty(),
            effects: EffectList::empty(),
            attack_state: false,
            last_attack: None,
            last_attacked_by_enemy: None,
            interrupt: None,
        }
    }
}

impl ActorState {
    pub fn new(id: EntityId, name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn player(id: EntityId, name: impl Into<String>) -> Self {
        Self::new(id, name, ActorKind::Player)
    }

    pub fn npc(id: EntityId, name: impl Into<String>) -> Self {
        Self::new(id, name, ActorKind::Npc)
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0
    }

    pub fn is_active(&self) -> bool {
        self.object_state == ObjectState::Active
    }

    /// Armor factor at `location`; zero when nothing is worn there.
    pub fn armor_factor(&self, location: HitLocation) -> f64 {
        self.equipment
            .armor_at(location)
            .map_or(0.0, |piece| piece.armor_factor)
    }

    /// Absorb at `location` as a fraction.
    pub fn armor_absorb(&self, location: HitLocation) -> f64 {
        self.equipment
            .armor_at(location)
            .map_or(0.0, |piece| f64::from(piece.absorb) / 100.0)
    }

    /// Resist the armor at `location` grants against `damage_type`.
    pub fn armor_resist(&self, location: HitLocation, damage_type: DamageType) -> i16 {
        self.equipment
            .armor_at(location)
            .map_or(0, |piece| piece.resists.get(damage_type))
    }

    pub fn resist(&self, damage_type: DamageType) -> i16 {
        self.resists.get(damage_type)
    }

    // ===== builders =====

    #[must_use]
    pub fn in_region(mut self, region: RegionId) -> Self {
        self.region = region;
        self
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn facing(mut self, heading: Heading) -> Self {
        self.heading = heading;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_dexterity(mut self, dexterity: u16) -> Self {
        self.attributes.dexterity = dexterity;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: ResourceMeter) -> Self {
        self.health = health;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: ResourceMeter) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_endurance(mut self, endurance: ResourceMeter) -> Self {
        self.endurance = endurance;
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    #[must_use]
    pub fn with_shield_spec(mut self, spec: u8) -> Self {
        self.shield_spec = spec;
        self
    }

    #[must_use]
    pub fn with_crit_chance(mut self, percent: u8) -> Self {
        self.spell_crit_chance = percent.min(100);
        self
    }

    #[must_use]
    pub fn with_resists(mut self, resists: Resistances) -> Self {
        self.resists = resists;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: ActiveEffect) -> Self {
        self.effects.add(effect);
        self
    }

    #[must_use]
    pub fn in_attack_state(mut self, attacking: bool) -> Self {
        self.attack_state = attacking;
        self
    }
}
