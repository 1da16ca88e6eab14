//! Output seam for everything a resolution produces besides state changes.
//!
//! Events are fire-and-forget: the core never reads anything back from the
//! sink. The runtime fans them out to per-topic subscribers.

use crate::combat::{AttackOutcome, AttackResult, AttackType, ResultFlags};
use crate::spell::EffectId;
use crate::state::{EntityId, Tick};

/// Chat channel a message is rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ChatChannel {
    /// Caster-side combat feedback.
    YouHit,
    /// Target-side feedback for hits taken.
    YouWereHit,
    Missed,
    Skill,
    System,
}

/// One observable consequence of a cast or an impact.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    Message {
        to: EntityId,
        text: String,
        channel: ChatChannel,
    },
    /// Cast animation cue shown to one observer. `delay` is in tenths of a second.
    SpellEffect {
        observer: EntityId,
        caster: EntityId,
        target: EntityId,
        effect: EffectId,
        delay: u64,
    },
    /// Damage applied to the outcome's target.
    Damage {
        outcome: AttackOutcome,
        critical: bool,
        flags: ResultFlags,
    },
    /// The target registered an attack that dealt no damage.
    Attacked {
        target: EntityId,
        attacker: EntityId,
        result: AttackResult,
    },
    InterruptStarted {
        target: EntityId,
        attacker: EntityId,
        attack_type: AttackType,
        until: Tick,
    },
    EngageCancelled {
        source: EntityId,
    },
}

impl CombatEvent {
    /// Actor this event is primarily about.
    pub fn subject(&self) -> Option<EntityId> {
        match self {
            CombatEvent::Message { to, .. } => Some(*to),
            CombatEvent::SpellEffect { observer, .. } => Some(*observer),
            CombatEvent::Damage { outcome, .. } => outcome.target,
            CombatEvent::Attacked { target, .. } | CombatEvent::InterruptStarted { target, .. } => {
                Some(*target)
            }
            CombatEvent::EngageCancelled { source } => Some(*source),
        }
    }
}

/// Receives combat events.
pub trait CombatSink {
    fn emit(&mut self, event: CombatEvent);

    fn message(&mut self, to: EntityId, text: String, channel: ChatChannel) {
        self.emit(CombatEvent::Message { to, text, channel });
    }
}

impl CombatSink for Vec<CombatEvent> {
    fn emit(&mut self, event: CombatEvent) {
        self.push(event);
    }
}
