//! Bolt spells: charge, travel, re-validate, resolve.

use super::{
    CastError, CastReceipt, CastScope, FireOutcome, ImpactScope, Spell, SpellHandler, SpellKind,
};
use crate::combat::{ImpactContext, resolve_bolt_impact};
use crate::env::{CombatEvent, Dice};
use crate::schedule::{DeferredAction, DueAction, ResolutionContext, SkipReason, revalidate};
use crate::state::{ActorState, EntityId};

/// Travel timing of a bolt over a given distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoltFlight {
    pub distance: u32,
    /// `floor(distance × 100 / bolt_speed)`.
    pub ticks_to_target: u64,
    /// Ticks until the impact fires: `1 + ticks_to_target`.
    pub fire_delay: u64,
    /// Animation delay in tenths of a second: `1 + ticks_to_target / 100`.
    pub cue_delay: u64,
}

impl BoltFlight {
    pub fn new(distance: u32, bolt_speed: u32) -> Self {
        let ticks_to_target = u64::from(distance) * 100 / u64::from(bolt_speed.max(1));
        Self {
            distance,
            ticks_to_target,
            fire_delay: 1 + ticks_to_target,
            cue_delay: 1 + ticks_to_target / 100,
        }
    }
}

/// Handler for [`SpellKind::Bolt`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BoltHandler;

impl SpellHandler for BoltHandler {
    fn kind(&self) -> SpellKind {
        SpellKind::Bolt
    }

    fn finish_cast(
        &self,
        scope: &mut CastScope<'_>,
        spell: &Spell,
        caster: EntityId,
        target: Option<EntityId>,
    ) -> Result<CastReceipt, CastError> {
        let state = scope
            .actors
            .get_mut(caster)
            .ok_or(CastError::CasterNotFound(caster))?;
        if !state.is_active() {
            return Err(CastError::CasterInactive(caster));
        }
        state.power.spend(spell.power_cost);

        self.apply_effect(scope, spell, caster, target, 1.0)
    }

    /// Bolt damage ignores `effectiveness`; player effectiveness is applied
    /// when the impact resolves.
    fn apply_effect(
        &self,
        scope: &mut CastScope<'_>,
        spell: &Spell,
        caster: EntityId,
        target: Option<EntityId>,
        _effectiveness: f64,
    ) -> Result<CastReceipt, CastError> {
        let action = DeferredAction::new(
            caster,
            target,
            Some(ResolutionContext {
                spell: spell.id,
                kind: SpellKind::Bolt,
                impact: spell.impact_params(),
            }),
        )?;

        let origin = scope
            .actors
            .get(caster)
            .map(|a| a.position)
            .ok_or(CastError::CasterNotFound(caster))?;
        let landing = scope
            .actors
            .get(action.target)
            .map(|a| a.position)
            .ok_or(CastError::TargetNotFound(action.target))?;

        let flight = BoltFlight::new(origin.distance(&landing), scope.config.bolt_speed);

        for observer in scope
            .actors
            .players_within(&landing, scope.config.visibility_radius)
        {
            scope.sink.emit(CombatEvent::SpellEffect {
                observer: observer.id,
                caster,
                target: action.target,
                effect: spell.effect,
                delay: flight.cue_delay,
            });
        }

        let fire_at = scope.now + flight.fire_delay;
        let id = scope.scheduler.schedule(fire_at, action);
        Ok(CastReceipt {
            action: id,
            fire_at,
            flight,
        })
    }

    /// Bolts are never resisted outright; resists reduce damage instead.
    fn resist_chance(&self, _target: &ActorState) -> u32 {
        0
    }

    fn fire(&self, scope: &mut ImpactScope<'_>, due: &DueAction) -> FireOutcome {
        let action = &due.action;
        let caster = scope.actors.get(action.source).cloned();
        if let Some(reason) = revalidate(caster.as_ref(), scope.actors.get(action.target)) {
            return FireOutcome::Skipped(reason);
        }
        let (Some(caster), Some(target)) = (caster, scope.actors.get_mut(action.target)) else {
            return FireOutcome::Skipped(SkipReason::TargetAbsent);
        };

        let mut ctx = ImpactContext {
            config: scope.config,
            now: scope.now,
            dice: Dice::new(scope.rng, scope.seed, due.id.0, action.source),
        };
        let outcome = resolve_bolt_impact(
            &mut ctx,
            &action.context.impact,
            &caster,
            target,
            scope.sink,
        );
        FireOutcome::Applied(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_timing() {
        let flight = BoltFlight::new(85, 85);
        assert_eq!(flight.ticks_to_target, 100);
        assert_eq!(flight.cue_delay, 2);
        assert_eq!(flight.fire_delay, 101);

        let point_blank = BoltFlight::new(0, 85);
        assert_eq!(point_blank.fire_delay, 1);
        assert_eq!(point_blank.cue_delay, 1);

        // 1000 × 100 / 85 = 1176.47
        assert_eq!(BoltFlight::new(1000, 85).fire_delay, 1177);
    }

    #[test]
    fn zero_speed_does_not_divide_by_zero() {
        assert_eq!(BoltFlight::new(10, 0).ticks_to_target, 1000);
    }

    #[test]
    fn bolts_are_never_resisted() {
        let target = ActorState::npc(EntityId(1), "golem");
        assert_eq!(BoltHandler.resist_chance(&target), 0);
    }
}
