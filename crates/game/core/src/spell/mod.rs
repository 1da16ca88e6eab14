//! Spell definitions and per-kind cast handlers.
//!
//! Every spell kind maps to one [`SpellHandler`] through [`handler_for`]. A
//! handler charges the caster, schedules deferred work on the region and
//! resolves that work when it fires.
mod bolt;
mod error;

use std::collections::BTreeMap;
use std::fmt;

pub use bolt::{BoltFlight, BoltHandler};
pub use error::CastError;

use crate::combat::{AttackOutcome, AttackType, DamageType, ImpactParams};
use crate::config::CombatConfig;
use crate::env::{CombatSink, RngOracle};
use crate::schedule::{ActionId, DueAction, Scheduler, SkipReason};
use crate::state::{ActorState, ActorStore, EntityId, Tick};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellId(pub u32);

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spell-{}", self.0)
    }
}

/// Client-visible animation identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u16);

/// Spell family; selects the handler.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpellKind {
    /// Ranged projectile whose damage lands after a travel delay.
    #[default]
    Bolt,
}

/// Immutable spell definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: SpellKind,
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub power_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: EffectId,
}

impl Spell {
    pub fn impact_params(&self) -> ImpactParams {
        ImpactParams {
            base_damage: self.damage,
            damage_type: self.damage_type,
            attack_type: AttackType::Spell,
        }
    }
}

/// Spells known to a region, keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpellBook {
    spells: BTreeMap<SpellId, Spell>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a spell, returning any definition it replaced.
    pub fn insert(&mut self, spell: Spell) -> Option<Spell> {
        self.spells.insert(spell.id, spell)
    }

    pub fn get(&self, id: SpellId) -> Option<&Spell> {
        self.spells.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

impl FromIterator<Spell> for SpellBook {
    fn from_iter<I: IntoIterator<Item = Spell>>(iter: I) -> Self {
        let mut book = Self::new();
        for spell in iter {
            book.insert(spell);
        }
        book
    }
}

/// Region state a handler may touch while casting.
pub struct CastScope<'a> {
    pub config: &'a CombatConfig,
    pub now: Tick,
    pub actors: &'a mut ActorStore,
    pub scheduler: &'a mut Scheduler,
    pub sink: &'a mut dyn CombatSink,
}

/// Region state a handler may touch while a deferred action fires.
pub struct ImpactScope<'a> {
    pub config: &'a CombatConfig,
    pub now: Tick,
    pub actors: &'a mut ActorStore,
    pub rng: &'a dyn RngOracle,
    pub seed: u64,
    pub sink: &'a mut dyn CombatSink,
}

/// Result of a successful cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastReceipt {
    pub action: ActionId,
    pub fire_at: Tick,
    pub flight: BoltFlight,
}

/// What happened when a deferred action fired.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FireOutcome {
    Applied(AttackOutcome),
    Skipped(SkipReason),
}

/// Cast, schedule and resolve behavior of one spell family.
pub trait SpellHandler: Send + Sync {
    fn kind(&self) -> SpellKind;

    /// Charges the caster for `spell`, then applies its effect to `target`.
    ///
    /// Affordability is the caller's concern: the cost is deducted, never
    /// checked.
    fn finish_cast(
        &self,
        scope: &mut CastScope<'_>,
        spell: &Spell,
        caster: EntityId,
        target: Option<EntityId>,
    ) -> Result<CastReceipt, CastError>;

    /// Issues the visible cue and schedules the deferred effect.
    fn apply_effect(
        &self,
        scope: &mut CastScope<'_>,
        spell: &Spell,
        caster: EntityId,
        target: Option<EntityId>,
        effectiveness: f64,
    ) -> Result<CastReceipt, CastError>;

    /// Chance in percent that `target` shrugs the spell off entirely.
    fn resist_chance(&self, target: &ActorState) -> u32;

    /// Resolves a deferred action of this kind.
    fn fire(&self, scope: &mut ImpactScope<'_>, due: &DueAction) -> FireOutcome;
}

/// Handler for a spell kind.
pub fn handler_for(kind: SpellKind) -> &'static dyn SpellHandler {
    match kind {
        SpellKind::Bolt => &BoltHandler,
    }
}
