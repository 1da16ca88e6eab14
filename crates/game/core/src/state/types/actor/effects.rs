//! Active effects carried by an actor.
//!
//! Only the standing effects the bolt resolver consults are modeled. The list
//! is bounded; adding to a full list is ignored.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::EntityId;

/// Discriminant used to look an effect up by type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Engage,
}

/// A standing effect on an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActiveEffect {
    /// The owner commits to intercepting attacks coming from `target`.
    Engage { target: EntityId },
}

impl ActiveEffect {
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Engage { .. } => EffectKind::Engage,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectList {
    effects: ArrayVec<ActiveEffect, { CombatConfig::MAX_ACTIVE_EFFECTS }>,
}

impl EffectList {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// First active effect of the given kind.
    pub fn of_kind(&self, kind: EffectKind) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    /// Adds an effect, replacing an existing one of the same kind.
    pub fn add(&mut self, effect: ActiveEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind() == effect.kind()) {
            *existing = effect;
            return;
        }
        if !self.effects.is_full() {
            self.effects.push(effect);
        }
    }

    /// Removes every effect of `kind`. Returns true if anything was removed.
    pub fn cancel(&mut self, kind: EffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind() != kind);
        self.effects.len() != before
    }

    /// Target of the owner's engage commitment, if one is active.
    pub fn engage_target(&self) -> Option<EntityId> {
        match self.of_kind(EffectKind::Engage) {
            Some(ActiveEffect::Engage { target }) => Some(*target),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engage_replaces_previous_commitment() {
        let mut effects = EffectList::empty();
        effects.add(ActiveEffect::Engage { target: EntityId(3) });
        effects.add(ActiveEffect::Engage { target: EntityId(4) });

        assert_eq!(effects.iter().count(), 1);
        assert_eq!(effects.engage_target(), Some(EntityId(4)));
    }

    #[test]
    fn cancel_removes_by_kind() {
        let mut effects = EffectList::empty();
        effects.add(ActiveEffect::Engage { target: EntityId(3) });

        assert!(effects.cancel(EffectKind::Engage));
        assert!(!effects.cancel(EffectKind::Engage));
        assert!(effects.is_empty());
        assert_eq!(effects.engage_target(), None);
    }
}
