//! Impact resolution for bolt spells.
//!
//! Stages run in a fixed order and consume rolls from the [`Dice`] in that
//! order: critical gate, miss, block (only when the target can block), hit
//! location (player targets that did not block), critical amount.

use super::block::{apply_engage, block_chance, can_block};
use super::critical::critical_bounds;
use super::damage::{DamageType, PhysicalInput, mitigate_physical};
use super::hit::miss_chance;
use super::result::{AttackOutcome, AttackResult, AttackType, ResultFlags};
use crate::config::CombatConfig;
use crate::env::{ChatChannel, CombatEvent, CombatSink, Dice};
use crate::state::{ActorState, HitLocation, InterruptTimer, Tick};

/// Resolution parameters captured when the bolt was cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactParams {
    /// Base damage of the spell.
    pub base_damage: u32,
    pub damage_type: DamageType,
    pub attack_type: AttackType,
}

/// Region services available while an impact resolves.
pub struct ImpactContext<'a, 'r> {
    pub config: &'a CombatConfig,
    pub now: Tick,
    pub dice: Dice<'r>,
}

/// Resolves one bolt impact of `caster` on `target` and applies it.
///
/// The target's health, endurance, effects and attack bookkeeping are updated
/// in place. Every message, damage application and interrupt is reported to
/// `sink`. The returned outcome is the record handed to the damage event.
pub fn resolve_bolt_impact(
    ctx: &mut ImpactContext<'_, '_>,
    params: &ImpactParams,
    caster: &ActorState,
    target: &mut ActorState,
    sink: &mut dyn CombatSink,
) -> AttackOutcome {
    let config = ctx.config;
    let mut outcome = AttackOutcome::new(caster.id, target.id, params.damage_type);
    outcome.attack_type = params.attack_type;

    let base = f64::from(params.base_damage);
    outcome.damage = (base * config.magical_fraction) as u32;
    outcome.critical = ctx.dice.chance(i32::from(caster.spell_crit_chance));

    let miss = miss_chance(config, caster, target);
    if ctx.dice.chance(miss) {
        outcome.result = AttackResult::Missed;
        outcome.damage = 0;
        sink.message(caster.id, "You miss!".to_string(), ChatChannel::YouHit);
        sink.message(
            target.id,
            format!("{} missed!", caster.name),
            ChatChannel::Missed,
        );
        target.last_attacked_by_enemy = Some(ctx.now);
        sink.emit(CombatEvent::Attacked {
            target: target.id,
            attacker: caster.id,
            result: outcome.result,
        });
        start_interrupt(ctx, params.attack_type, caster, target, sink);
        return outcome;
    }

    let mut blocked = false;
    if can_block(target, caster) {
        let chance = block_chance(target, caster);
        let (chance, _) = apply_engage(config, ctx.now, target, caster, chance, sink);
        if chance >= f64::from(ctx.dice.range(1, 100)) {
            sink.message(
                target.id,
                format!("You partially block {}'s spell!", caster.name),
                ChatChannel::Missed,
            );
            sink.message(
                caster.id,
                format!("{} blocks!", target.name),
                ChatChannel::YouHit,
            );
            blocked = true;
        }
    }

    if blocked {
        outcome.result = AttackResult::Blocked;
    } else {
        outcome.result = AttackResult::Hit;
        if target.is_player() {
            outcome.hit_location = HitLocation::from_roll(ctx.dice.range(1, 100));
        }
        let location = outcome.hit_location;
        let physical = mitigate_physical(&PhysicalInput {
            base: base * (1.0 - config.magical_fraction),
            caster_level: caster.level,
            caster_dexterity: caster.attributes.dexterity,
            armor_factor: target.armor_factor(location),
            armor_absorb: target.armor_absorb(location),
            max_absorb: config.max_absorb,
            target_resist: target.resist(params.damage_type),
            armor_resist: target.armor_resist(location, params.damage_type),
        });
        outcome.resist_modifier = physical.modifier;
        outcome.mitigated_damage = physical.damage;
        outcome.damage = outcome.damage.saturating_add(physical.damage);
    }

    outcome.uncapped_damage = outcome.damage;
    outcome.damage = outcome
        .damage
        .min(params.base_damage.saturating_mul(config.damage_cap_multiplier));

    if caster.is_player() {
        let effectiveness = caster.effectiveness.clamp(0.0, 1.0);
        outcome.damage = (f64::from(outcome.damage) * effectiveness) as u32;
    }

    if !blocked && outcome.critical {
        let (min, max) = critical_bounds(outcome.damage, target.is_player());
        outcome.critical_damage = ctx.dice.range(min, max);
    }

    send_damage_messages(&outcome, caster, target, sink);

    target.health.spend(outcome.total_damage());
    target.last_attacked_by_enemy = Some(ctx.now);
    sink.emit(CombatEvent::Attacked {
        target: target.id,
        attacker: caster.id,
        result: outcome.result,
    });
    sink.emit(CombatEvent::Damage {
        outcome: outcome.clone(),
        critical: outcome.critical_damage > 0,
        flags: ResultFlags::for_impact(blocked),
    });

    start_interrupt(ctx, params.attack_type, caster, target, sink);
    outcome
}

fn send_damage_messages(
    outcome: &AttackOutcome,
    caster: &ActorState,
    target: &ActorState,
    sink: &mut dyn CombatSink,
) {
    let modifier = match outcome.resist_modifier {
        0 => String::new(),
        m => format!(" ({m:+})"),
    };
    sink.message(
        caster.id,
        format!(
            "You hit {} for {}{} damage!",
            target.name, outcome.damage, modifier
        ),
        ChatChannel::YouHit,
    );
    sink.message(
        target.id,
        format!("{} hits you for {} damage!", caster.name, outcome.damage),
        ChatChannel::YouWereHit,
    );

    if outcome.critical_damage > 0 {
        sink.message(
            caster.id,
            format!(
                "You critically hit for an additional {} damage!",
                outcome.critical_damage
            ),
            ChatChannel::YouHit,
        );
        sink.message(
            target.id,
            format!(
                "{} critically hits you for an additional {} damage!",
                caster.name, outcome.critical_damage
            ),
            ChatChannel::YouWereHit,
        );
    }
}

fn start_interrupt(
    ctx: &ImpactContext<'_, '_>,
    attack_type: AttackType,
    caster: &ActorState,
    target: &mut ActorState,
    sink: &mut dyn CombatSink,
) {
    let until = ctx.now + ctx.config.spell_interrupt_duration;
    target.interrupt = Some(InterruptTimer {
        until,
        attack_type,
        attacker: caster.id,
    });
    sink.emit(CombatEvent::InterruptStarted {
        target: target.id,
        attacker: caster.id,
        attack_type,
        until,
    });
}
