//! Attack outcome records produced by the resolver.

use bitflags::bitflags;

use super::damage::DamageType;
use crate::state::{EntityId, HitLocation};

/// Result category of a single attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackResult {
    /// Not yet decided.
    #[default]
    Pending,
    Hit,
    /// Hit delivered by an executed combat style.
    HitStyle,
    Missed,
    Blocked,
}

/// How an attack was delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackType {
    #[default]
    Spell,
    MeleeOneHand,
    MeleeTwoHand,
    Ranged,
}

bitflags! {
    /// Hit-reaction flags handed to the combat-state sink with applied damage.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ResultFlags: u8 {
        const BLOCKED   = 0x02;
        const HIT       = 0x04;
        const UNBLOCKED = 0x10;
    }
}

impl ResultFlags {
    /// Flags for an impact, depending on whether the target blocked it.
    pub fn for_impact(blocked: bool) -> Self {
        if blocked {
            Self::BLOCKED
        } else {
            Self::HIT | Self::UNBLOCKED
        }
    }
}

/// Per-resolution record of one attack. Created fresh per impact and never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: Option<EntityId>,
    pub target: Option<EntityId>,
    pub result: AttackResult,
    /// Final damage after cap and effectiveness scaling.
    pub damage: u32,
    /// Damage before the cap was applied.
    pub uncapped_damage: u32,
    /// Physical damage after mitigation (0 when blocked or missed).
    pub mitigated_damage: u32,
    /// Extra damage on a critical impact.
    pub critical_damage: u32,
    /// Resistance contribution from the mitigation stage (negative for a reduction).
    pub resist_modifier: i32,
    pub hit_location: HitLocation,
    pub damage_type: DamageType,
    pub attack_type: AttackType,
    /// Defense bonus of the style that produced this outcome, if any.
    pub style_defense_bonus: i32,
    /// Set when the critical gate fired for this attack.
    pub critical: bool,
}

impl AttackOutcome {
    pub fn new(attacker: EntityId, target: EntityId, damage_type: DamageType) -> Self {
        Self {
            attacker: Some(attacker),
            target: Some(target),
            damage_type,
            ..Self::default()
        }
    }

    /// Total damage this outcome removes from the target.
    pub fn total_damage(&self) -> u32 {
        self.damage.saturating_add(self.critical_damage)
    }

    pub fn is_miss(&self) -> bool {
        self.result == AttackResult::Missed
    }

    pub fn is_blocked(&self) -> bool {
        self.result == AttackResult::Blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_flags_match_wire_values() {
        assert_eq!(ResultFlags::for_impact(true).bits(), 0x02);
        assert_eq!(ResultFlags::for_impact(false).bits(), 0x14);
    }

    #[test]
    fn total_damage_includes_critical() {
        let mut outcome = AttackOutcome::new(EntityId(1), EntityId(2), DamageType::Heat);
        outcome.damage = 40;
        outcome.critical_damage = 7;
        assert_eq!(outcome.total_damage(), 47);
        assert_eq!(outcome.result, AttackResult::Pending);
    }
}
