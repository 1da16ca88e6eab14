//! Damage types, resistances and the physical mitigation pipeline.

use strum::EnumCount;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type used for resistance lookups on actors and armor.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    Crush,
    Slash,
    Thrust,
    Body,
    Cold,
    Energy,
    #[default]
    Heat,
    Matter,
    Spirit,
}

impl DamageType {
    const fn index(self) -> usize {
        self as usize
    }
}

/// Percentage resist per damage type. Negative values are vulnerabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resistances {
    values: [i16; DamageType::COUNT],
}

impl Resistances {
    pub const fn none() -> Self {
        Self {
            values: [0; DamageType::COUNT],
        }
    }

    pub fn get(&self, damage_type: DamageType) -> i16 {
        self.values[damage_type.index()]
    }

    pub fn set(&mut self, damage_type: DamageType, percent: i16) {
        self.values[damage_type.index()] = percent;
    }

    /// Builder-style variant of [`Resistances::set`].
    #[must_use]
    pub fn with(mut self, damage_type: DamageType, percent: i16) -> Self {
        self.set(damage_type, percent);
        self
    }
}

// ============================================================================
// Physical Mitigation
// ============================================================================

/// Armor factor every target is assumed to carry on top of worn armor.
const BASE_ARMOR_FACTOR: f64 = 20.0 * 4.67;

/// Offset added to the attacker's weapon skill factor.
const WEAPON_SKILL_OFFSET: f64 = 90.68;

/// Inputs to the physical half of a bolt impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalInput {
    /// Physical share of the spell's base damage before mitigation.
    pub base: f64,
    pub caster_level: u8,
    pub caster_dexterity: u16,
    /// Armor factor of the piece covering the hit location.
    pub armor_factor: f64,
    /// Fractional absorb (0.0..=1.0) of the piece covering the hit location.
    pub armor_absorb: f64,
    /// Ceiling applied to `armor_absorb`.
    pub max_absorb: f64,
    /// Target's own resist for the damage type, in percent.
    pub target_resist: i16,
    /// Resist granted by the armor piece for the damage type, in percent.
    pub armor_resist: i16,
}

/// Result of the physical mitigation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalDamage {
    /// Mitigated physical damage, never negative.
    pub damage: u32,
    /// Resistance contribution (negative for a reduction).
    pub modifier: i32,
}

/// Weapon skill approximation for a caster: `level × 8 × (1 + (dex − 50) / 200)`.
pub fn weapon_skill_factor(level: u8, dexterity: u16) -> f64 {
    f64::from(level) * 8.0 * (1.0 + (f64::from(dexterity) - 50.0) / 200.0)
}

/// Runs armor factor, absorb and resist mitigation over the physical component.
///
/// # Formula
///
/// ```text
/// damage  = base × (ws + 90.68) / (af + 20 × 4.67)
/// damage *= 1 − min(max_absorb, absorb)
/// modifier = trunc(−damage × (target_resist + armor_resist) / 100)
/// damage  = max(0, damage + modifier)
/// ```
pub fn mitigate_physical(input: &PhysicalInput) -> PhysicalDamage {
    let ws = weapon_skill_factor(input.caster_level, input.caster_dexterity);

    let mut damage = input.base;
    damage *= (ws + WEAPON_SKILL_OFFSET) / (input.armor_factor.max(0.0) + BASE_ARMOR_FACTOR);
    damage *= 1.0 - input.max_absorb.min(input.armor_absorb.max(0.0));

    let total_resist = f64::from(input.target_resist) + f64::from(input.armor_resist);
    let modifier = (damage * total_resist / -100.0) as i32;
    damage += f64::from(modifier);
    if damage < 0.0 {
        damage = 0.0;
    }

    PhysicalDamage {
        damage: damage as u32,
        modifier,
    }
}
