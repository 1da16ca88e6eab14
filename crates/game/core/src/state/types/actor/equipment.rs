//! Worn equipment: off-hand item, weapon stance and armor by hit location.

use strum::EnumCount;

use crate::combat::{DamageType, Resistances};

/// Body location an attack lands on. Each location maps to one armor slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitLocation {
    #[default]
    Torso,
    Legs,
    Arms,
    Head,
    Hands,
    Feet,
}

impl HitLocation {
    /// Maps a `1..=100` roll onto a body location.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=40 => Self::Torso,
            41..=65 => Self::Legs,
            66..=80 => Self::Arms,
            81..=90 => Self::Head,
            91..=95 => Self::Hands,
            _ => Self::Feet,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// A worn armor piece.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorPiece {
    /// Armor factor added to the target's base armor.
    pub armor_factor: f64,
    /// Absorb in percent (0..=100).
    pub absorb: u8,
    /// Resist the piece grants per damage type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resists: Resistances,
}

impl ArmorPiece {
    pub fn new(armor_factor: f64, absorb: u8) -> Self {
        Self {
            armor_factor,
            absorb: absorb.min(100),
            resists: Resistances::none(),
        }
    }

    #[must_use]
    pub fn with_resist(mut self, damage_type: DamageType, percent: i16) -> Self {
        self.resists.set(damage_type, percent);
        self
    }
}

/// Item held in the off hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffHand {
    Shield,
    Weapon,
}

/// Which weapon set an actor is currently fighting with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponStance {
    /// Main hand plus off hand (or bare handed).
    #[default]
    Standard,
    TwoHanded,
    Ranged,
}

/// Equipment state for an actor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    #[cfg_attr(feature = "serde", serde(default))]
    pub off_hand: Option<OffHand>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stance: WeaponStance,
    #[cfg_attr(feature = "serde", serde(default))]
    armor: [Option<ArmorPiece>; HitLocation::COUNT],
}

impl Equipment {
    /// Creates empty equipment (no off-hand item, no armor).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Armor worn at `location`, if any.
    pub fn armor_at(&self, location: HitLocation) -> Option<&ArmorPiece> {
        self.armor[location.index()].as_ref()
    }

    /// Equips armor at `location`, returning the previously worn piece.
    pub fn equip_armor(&mut self, location: HitLocation, piece: ArmorPiece) -> Option<ArmorPiece> {
        self.armor[location.index()].replace(piece)
    }

    pub fn unequip_armor(&mut self, location: HitLocation) -> Option<ArmorPiece> {
        self.armor[location.index()].take()
    }

    #[must_use]
    pub fn with_armor(mut self, location: HitLocation, piece: ArmorPiece) -> Self {
        self.equip_armor(location, piece);
        self
    }

    #[must_use]
    pub fn with_off_hand(mut self, item: OffHand) -> Self {
        self.off_hand = Some(item);
        self
    }

    #[must_use]
    pub fn with_stance(mut self, stance: WeaponStance) -> Self {
        self.stance = stance;
        self
    }

    /// True when a shield is held and the actor is not fighting two-handed or ranged.
    pub fn can_block_with_shield(&self) -> bool {
        self.off_hand == Some(OffHand::Shield) && self.stance == WeaponStance::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_location_roll_bands() {
        assert_eq!(HitLocation::from_roll(1), HitLocation::Torso);
        assert_eq!(HitLocation::from_roll(40), HitLocation::Torso);
        assert_eq!(HitLocation::from_roll(41), HitLocation::Legs);
        assert_eq!(HitLocation::from_roll(80), HitLocation::Arms);
        assert_eq!(HitLocation::from_roll(90), HitLocation::Head);
        assert_eq!(HitLocation::from_roll(95), HitLocation::Hands);
        assert_eq!(HitLocation::from_roll(100), HitLocation::Feet);
    }

    #[test]
    fn shield_block_requires_standard_stance() {
        let shielded = Equipment::empty().with_off_hand(OffHand::Shield);
        assert!(shielded.can_block_with_shield());
        assert!(!shielded.clone().with_stance(WeaponStance::Ranged).can_block_with_shield());
        assert!(!Equipment::empty().with_off_hand(OffHand::Weapon).can_block_with_shield());
    }

    #[test]
    fn armor_slots_are_per_location() {
        let mut gear = Equipment::empty().with_armor(HitLocation::Torso, ArmorPiece::new(80.0, 27));
        assert!(gear.armor_at(HitLocation::Torso).is_some());
        assert!(gear.armor_at(HitLocation::Head).is_none());
        assert_eq!(
            gear.unequip_armor(HitLocation::Torso).map(|p| p.absorb),
            Some(27)
        );
    }
}
