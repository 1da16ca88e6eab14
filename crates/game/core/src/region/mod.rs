//! A spatial partition that owns its actors, clock and deferred actions.
//!
//! One region is driven by exactly one writer. Casting schedules work on the
//! region's queue; advancing the clock fires every action that came due, in
//! tick order, re-validating each against the state it finds at that moment.

use std::sync::Arc;

use crate::config::CombatConfig;
use crate::env::{CombatSink, RngOracle};
use crate::schedule::{ActionId, Scheduler};
use crate::spell::{
    CastError, CastReceipt, CastScope, FireOutcome, ImpactScope, SpellBook, SpellId, handler_for,
};
use crate::state::{ActorState, ActorStore, EntityId, RegionId, StateError, Tick};

/// Summary of one clock advance.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub region: RegionId,
    pub now: Tick,
    pub fired: Vec<FiredAction>,
}

impl TickReport {
    pub fn applied(&self) -> usize {
        self.fired
            .iter()
            .filter(|f| matches!(f.outcome, FireOutcome::Applied(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.fired.len() - self.applied()
    }
}

/// One deferred action that fired during an advance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiredAction {
    pub id: ActionId,
    pub fire_at: Tick,
    pub caster: EntityId,
    pub target: EntityId,
    pub spell: SpellId,
    pub outcome: FireOutcome,
}

pub struct Region {
    id: RegionId,
    clock: Tick,
    seed: u64,
    config: Arc<CombatConfig>,
    spells: Arc<SpellBook>,
    rng: Arc<dyn RngOracle>,
    actors: ActorStore,
    scheduler: Scheduler,
}

impl Region {
    pub fn new(
        id: RegionId,
        config: Arc<CombatConfig>,
        spells: Arc<SpellBook>,
        rng: Arc<dyn RngOracle>,
    ) -> Self {
        Self {
            id,
            clock: Tick::ZERO,
            seed: 0,
            config,
            spells,
            rng,
            actors: ActorStore::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Seed mixed into every roll made in this region.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn now(&self) -> Tick {
        self.clock
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn actors(&self) -> &ActorStore {
        &self.actors
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(id)
    }

    /// Mutable access for gameplay systems outside the combat core.
    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(id)
    }

    /// Adds an actor tagged with this region's id.
    pub fn insert_actor(&mut self, actor: ActorState) -> Result<(), StateError> {
        if actor.region != self.id {
            return Err(StateError::WrongRegion {
                actor: actor.id,
                expected: self.id,
                actual: actor.region,
            });
        }
        self.actors.insert(actor)
    }

    /// Removes an actor. Actions already aimed at it stay queued and are
    /// skipped when they fire.
    pub fn remove_actor(&mut self, id: EntityId) -> Result<ActorState, StateError> {
        self.actors.remove(id)
    }

    /// Number of deferred actions not yet fired.
    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_due(&self) -> Option<Tick> {
        self.scheduler.next_due()
    }

    /// Completes a cast of `spell` by `caster` on `target`.
    pub fn cast(
        &mut self,
        caster: EntityId,
        target: Option<EntityId>,
        spell: SpellId,
        sink: &mut dyn CombatSink,
    ) -> Result<CastReceipt, CastError> {
        let spell = self
            .spells
            .get(spell)
            .ok_or(CastError::UnknownSpell(spell))?;

        let mut scope = CastScope {
            config: &self.config,
            now: self.clock,
            actors: &mut self.actors,
            scheduler: &mut self.scheduler,
            sink,
        };
        handler_for(spell.kind).finish_cast(&mut scope, spell, caster, target)
    }

    /// Advances the clock by `ticks`.
    pub fn advance(&mut self, ticks: u64, sink: &mut dyn CombatSink) -> TickReport {
        self.advance_to(self.clock + ticks, sink)
    }

    /// Advances the clock to `until`, firing every action due on the way.
    ///
    /// Each action resolves with the clock set to its own fire tick. The clock
    /// never moves backwards; an earlier `until` fires nothing.
    pub fn advance_to(&mut self, until: Tick, sink: &mut dyn CombatSink) -> TickReport {
        let mut report = TickReport {
            region: self.id,
            now: self.clock,
            fired: Vec::new(),
        };
        if until <= self.clock {
            return report;
        }

        while let Some(due) = self.scheduler.pop_due(until) {
            self.clock = self.clock.max(due.fire_at);
            let context = due.action.context;
            let mut scope = ImpactScope {
                config: &self.config,
                now: self.clock,
                actors: &mut self.actors,
                rng: self.rng.as_ref(),
                seed: self.seed,
                sink: &mut *sink,
            };
            let outcome = handler_for(context.kind).fire(&mut scope, &due);
            report.fired.push(FiredAction {
                id: due.id,
                fire_at: due.fire_at,
                caster: due.action.source,
                target: due.action.target,
                spell: context.spell,
                outcome,
            });
        }

        self.clock = until;
        report.now = until;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;
    use crate::env::{CombatEvent, PcgRng};
    use crate::schedule::SkipReason;
    use crate::spell::{EffectId, Spell, SpellKind};
    use crate::state::{Position, ResourceMeter};

    fn region() -> Region {
        let spells: SpellBook = [Spell {
            id: SpellId(1),
            name: "Frost Bolt".to_string(),
            kind: SpellKind::Bolt,
            damage: 80,
            damage_type: DamageType::Cold,
            power_cost: 12,
            effect: EffectId(160),
        }]
        .into_iter()
        .collect();
        let mut region = Region::new(
            RegionId(1),
            Arc::new(CombatConfig::default()),
            Arc::new(spells),
            Arc::new(PcgRng),
        )
        .with_seed(42);
        region
            .insert_actor(
                ActorState::player(EntityId(1), "Caster")
                    .in_region(RegionId(1))
                    .with_level(40),
            )
            .unwrap();
        region
            .insert_actor(
                ActorState::npc(EntityId(2), "Target")
                    .in_region(RegionId(1))
                    .with_level(40)
                    .with_health(ResourceMeter::full(5_000))
                    .at(Position::new(850, 0, 0)),
            )
            .unwrap();
        region
    }

    #[test]
    fn cast_charges_power_and_schedules() {
        let mut region = region();
        let mut events = Vec::new();
        let receipt = region
            .cast(EntityId(1), Some(EntityId(2)), SpellId(1), &mut events)
            .unwrap();

        assert_eq!(receipt.flight.fire_delay, 1001);
        assert_eq!(receipt.fire_at, Tick(1001));
        assert_eq!(region.actor(EntityId(1)).unwrap().power.current, 88);
        assert_eq!(region.pending(), 1);
        assert!(matches!(
            &events[..],
            [CombatEvent::SpellEffect { observer, delay: 11, .. }] if *observer == EntityId(1)
        ));
    }

    #[test]
    fn action_fires_once_at_its_tick() {
        let mut region = region();
        let mut events = Vec::new();
        region
            .cast(EntityId(1), Some(EntityId(2)), SpellId(1), &mut events)
            .unwrap();

        assert!(region.advance(1000, &mut events).fired.is_empty());
        let report = region.advance(1, &mut events);
        assert_eq!(report.fired.len(), 1);
        assert_eq!(report.now, Tick(1001));
        assert_eq!(region.pending(), 0);
        assert!(region.advance(10_000, &mut events).fired.is_empty());
    }

    #[test]
    fn removed_target_is_skipped_silently() {
        let mut region = region();
        let mut events = Vec::new();
        region
            .cast(EntityId(1), Some(EntityId(2)), SpellId(1), &mut events)
            .unwrap();
        region.remove_actor(EntityId(2)).unwrap();
        events.clear();

        let report = region.advance(2_000, &mut events);
        assert_eq!(report.skipped(), 1);
        assert_eq!(
            report.fired[0].outcome,
            FireOutcome::Skipped(SkipReason::TargetAbsent)
        );
        assert!(events.is_empty());
    }

    #[test]
    fn cast_errors() {
        let mut region = region();
        let mut events = Vec::new();
        assert_eq!(
            region.cast(EntityId(1), Some(EntityId(2)), SpellId(9), &mut events),
            Err(CastError::UnknownSpell(SpellId(9)))
        );
        assert_eq!(
            region.cast(EntityId(7), Some(EntityId(2)), SpellId(1), &mut events),
            Err(CastError::CasterNotFound(EntityId(7)))
        );
        assert_eq!(
            region.cast(EntityId(1), Some(EntityId(8)), SpellId(1), &mut events),
            Err(CastError::TargetNotFound(EntityId(8)))
        );
        assert_eq!(region.pending(), 0);
    }

    #[test]
    fn insert_rejects_foreign_actor() {
        let mut region = region();
        let stranger = ActorState::npc(EntityId(3), "stranger").in_region(RegionId(2));
        assert!(matches!(
            region.insert_actor(stranger),
            Err(StateError::WrongRegion { .. })
        ));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut region = region();
        let mut events = Vec::new();
        region.advance_to(Tick(500), &mut events);
        let report = region.advance_to(Tick(100), &mut events);
        assert_eq!(report.now, Tick(500));
        assert_eq!(region.now(), Tick(500));
    }
}
