//! Shield block chance and the engage commitment.

use super::hit::con_level;
use crate::config::CombatConfig;
use crate::env::{ChatChannel, CombatEvent, CombatSink};
use crate::state::{ActorState, EffectKind, Tick};

/// Frontal arc, in degrees, inside which a shield can intercept a bolt.
pub const BLOCK_ARC_DEGREES: u16 = 180;

const MIN_BLOCK_CHANCE: f64 = 1.0;
const MAX_BLOCK_CHANCE: f64 = 99.0;

/// Whether `target` may attempt a shield block against `caster` at all.
///
/// Only players block. They need a shield in the off hand, a standard weapon
/// stance and the caster inside their frontal arc.
pub fn can_block(target: &ActorState, caster: &ActorState) -> bool {
    target.is_player()
        && target.equipment.can_block_with_shield()
        && target
            .heading
            .is_in_front(&target.position, &caster.position, BLOCK_ARC_DEGREES)
}

/// Block chance in percent, clamped to `[1, 99]`.
///
/// ```text
/// chance = (dex × 2 − 100) / 40 + 0.5 × shield_spec + 5 − 5 × con(target, caster)
/// ```
pub fn block_chance(target: &ActorState, caster: &ActorState) -> f64 {
    let dexterity = f64::from(target.attributes.dexterity);
    let mut chance = (dexterity * 2.0 - 100.0) / 40.0 + 0.5 * f64::from(target.shield_spec) + 5.0;
    chance -= con_level(target.level, caster.level) * 5.0;
    clamp_block_chance(chance)
}

pub fn clamp_block_chance(chance: f64) -> f64 {
    if chance.is_nan() {
        return MIN_BLOCK_CHANCE;
    }
    chance.clamp(MIN_BLOCK_CHANCE, MAX_BLOCK_CHANCE)
}

/// What an engage commitment did to a block attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngageOutcome {
    /// No engage effect on this caster, or the blocker is not fighting.
    NotEngaged,
    /// The caster was attacked too recently to be engaged.
    Inert,
    /// Not enough endurance; the effect was cancelled.
    Cancelled,
    /// Endurance spent and block chance floored.
    Honored,
}

/// Applies `target`'s engage commitment against `caster` to `chance`.
///
/// Returns the possibly raised block chance. Endurance and the effect list of
/// `target` are updated here.
pub fn apply_engage(
    config: &CombatConfig,
    now: Tick,
    target: &mut ActorState,
    caster: &ActorState,
    chance: f64,
    sink: &mut dyn CombatSink,
) -> (f64, EngageOutcome) {
    if !target.attack_state || target.effects.engage_target() != Some(caster.id) {
        return (chance, EngageOutcome::NotEngaged);
    }

    let attacked_recently = caster
        .last_attacked_by_enemy
        .is_some_and(|at| at.0.saturating_add(config.engage_attack_delay) > now.0);

    if attacked_recently {
        sink.message(
            target.id,
            format!(
                "{} has been attacked recently and you are unable to engage.",
                caster.name
            ),
            ChatChannel::System,
        );
        return (chance, EngageOutcome::Inert);
    }

    if target.endurance.percent() < config.engage_endurance_cost {
        target.effects.cancel(EffectKind::Engage);
        sink.emit(CombatEvent::EngageCancelled { source: target.id });
        return (chance, EngageOutcome::Cancelled);
    }

    target.endurance.spend_percent(config.engage_endurance_cost);
    sink.message(
        target.id,
        "You concentrate on blocking the blow!".to_string(),
        ChatChannel::Skill,
    );
    (
        clamp_block_chance(chance.max(config.engage_block_floor)),
        EngageOutcome::Honored,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        ActiveEffect, EntityId, Equipment, Heading, OffHand, Position, ResourceMeter,
        WeaponStance,
    };

    fn shield_bearer() -> ActorState {
        ActorState::player(EntityId(2), "Brynja")
            .with_level(50)
            .with_dexterity(100)
            .with_shield_spec(20)
            .with_equipment(Equipment::empty().with_off_hand(OffHand::Shield))
    }

    fn caster() -> ActorState {
        ActorState::npc(EntityId(1), "Shade")
            .with_level(50)
            .at(Position::new(0, 500, 0))
    }

    #[test]
    fn base_block_chance() {
        // (200 - 100) / 40 + 10 + 5 = 17.5
        assert_eq!(block_chance(&shield_bearer(), &caster()), 17.5);
    }

    #[test]
    fn block_chance_is_clamped() {
        let weak = shield_bearer().with_dexterity(0).with_shield_spec(0).with_level(1);
        let strong_caster = caster().with_level(60);
        assert_eq!(block_chance(&weak, &strong_caster), 1.0);

        let master = shield_bearer().with_shield_spec(250).with_level(60);
        let whelp = caster().with_level(1);
        assert_eq!(block_chance(&master, &whelp), 99.0);
        assert_eq!(clamp_block_chance(f64::NAN), 1.0);
    }

    #[test]
    fn blocking_requires_shield_stance_and_facing() {
        let target = shield_bearer();
        assert!(can_block(&target, &caster()));

        let behind = caster().at(Position::new(0, -500, 0));
        assert!(!can_block(&target, &behind));

        let turned = shield_bearer().facing(Heading(2048));
        assert!(can_block(&turned, &behind));

        let two_handed = shield_bearer().with_equipment(
            Equipment::empty()
                .with_off_hand(OffHand::Shield)
                .with_stance(WeaponStance::TwoHanded),
        );
        assert!(!can_block(&two_handed, &caster()));

        let npc = ActorState::npc(EntityId(9), "guard")
            .with_equipment(Equipment::empty().with_off_hand(OffHand::Shield));
        assert!(!can_block(&npc, &caster()));
    }

    #[test]
    fn honored_engage_floors_chance_and_spends_endurance() {
        let config = CombatConfig::default();
        let caster = caster();
        let mut target = shield_bearer()
            .in_attack_state(true)
            .with_endurance(ResourceMeter::full(100))
            .with_effect(ActiveEffect::Engage { target: caster.id });
        let mut events = Vec::new();

        let (chance, outcome) =
            apply_engage(&config, Tick(50_000), &mut target, &caster, 17.5, &mut events);

        assert_eq!(outcome, EngageOutcome::Honored);
        assert_eq!(chance, 85.0);
        assert_eq!(target.endurance.current, 85);
        assert!(matches!(
            &events[..],
            [CombatEvent::Message { text, .. }] if text == "You concentrate on blocking the blow!"
        ));
    }

    #[test]
    fn engage_floor_never_lifts_chance_past_ceiling() {
        let config = CombatConfig {
            engage_block_floor: 150.0,
            ..CombatConfig::default()
        };
        let caster = caster();
        let mut target = shield_bearer()
            .in_attack_state(true)
            .with_effect(ActiveEffect::Engage { target: caster.id });
        let mut events = Vec::new();

        let (chance, outcome) =
            apply_engage(&config, Tick(50_000), &mut target, &caster, 17.5, &mut events);

        assert_eq!(outcome, EngageOutcome::Honored);
        assert_eq!(chance, 99.0);
    }

    #[test]
    fn engage_is_inert_when_caster_was_just_attacked() {
        let config = CombatConfig::default();
        let mut caster = caster();
        caster.last_attacked_by_enemy = Some(Tick(45_000));
        let mut target = shield_bearer()
            .in_attack_state(true)
            .with_effect(ActiveEffect::Engage { target: caster.id });
        let mut events = Vec::new();

        let (chance, outcome) =
            apply_engage(&config, Tick(50_000), &mut target, &caster, 17.5, &mut events);

        assert_eq!(outcome, EngageOutcome::Inert);
        assert_eq!(chance, 17.5);
        assert_eq!(target.endurance.current, 100);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn exhausted_engage_is_cancelled() {
        let config = CombatConfig::default();
        let caster = caster();
        let mut target = shield_bearer()
            .in_attack_state(true)
            .with_endurance(ResourceMeter::new(10, 100))
            .with_effect(ActiveEffect::Engage { target: caster.id });
        let mut events = Vec::new();

        let (chance, outcome) =
            apply_engage(&config, Tick(50_000), &mut target, &caster, 17.5, &mut events);

        assert_eq!(outcome, EngageOutcome::Cancelled);
        assert_eq!(chance, 17.5);
        assert!(target.effects.engage_target().is_none());
        assert_eq!(events, vec![CombatEvent::EngageCancelled { source: target.id }]);
    }

    #[test]
    fn engage_needs_attack_state_and_matching_target() {
        let config = CombatConfig::default();
        let caster = caster();
        let mut idle = shield_bearer().with_effect(ActiveEffect::Engage { target: caster.id });
        let mut other = shield_bearer()
            .in_attack_state(true)
            .with_effect(ActiveEffect::Engage { target: EntityId(77) });
        let mut events = Vec::new();

        let (_, a) = apply_engage(&config, Tick(0), &mut idle, &caster, 10.0, &mut events);
        let (_, b) = apply_engage(&config, Tick(0), &mut other, &caster, 10.0, &mut events);
        assert_eq!(a, EngageOutcome::NotEngaged);
        assert_eq!(b, EngageOutcome::NotEngaged);
        assert!(events.is_empty());
    }
}
