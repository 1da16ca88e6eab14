//! Per-region queue of deferred actions.
//!
//! Actions are plain records ordered by fire tick in a min-heap. Entries that
//! share a tick pop in insertion order, though callers must not rely on it.
mod error;

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

pub use error::ScheduleError;

use crate::combat::ImpactParams;
use crate::spell::{SpellId, SpellKind};
use crate::state::{ActorState, EntityId, Tick};

/// What a deferred action needs to resolve, captured at cast time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionContext {
    pub spell: SpellId,
    pub kind: SpellKind,
    pub impact: ImpactParams,
}

/// A unit of work that fires once at a future tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeferredAction {
    pub source: EntityId,
    pub target: EntityId,
    pub context: ResolutionContext,
}

impl DeferredAction {
    /// Builds an action, rejecting a missing target or context.
    pub fn new(
        source: EntityId,
        target: Option<EntityId>,
        context: Option<ResolutionContext>,
    ) -> Result<Self, ScheduleError> {
        let target = target.ok_or(ScheduleError::MissingTarget)?;
        let context = context.ok_or(ScheduleError::MissingContext)?;
        Ok(Self {
            source,
            target,
            context,
        })
    }
}

/// Why a fired action did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// The target is no longer in this region.
    TargetAbsent,
    /// The caster is no longer in this region.
    CasterAbsent,
    /// Caster and target are tracked under different regions.
    CrossRegion,
    TargetInactive,
    TargetDead,
}

/// Re-validates the actors of a firing action.
///
/// Returns the reason to abandon the action, or `None` if it may resolve.
pub fn revalidate(caster: Option<&ActorState>, target: Option<&ActorState>) -> Option<SkipReason> {
    let Some(target) = target else {
        return Some(SkipReason::TargetAbsent);
    };
    let Some(caster) = caster else {
        return Some(SkipReason::CasterAbsent);
    };
    if target.region != caster.region {
        return Some(SkipReason::CrossRegion);
    }
    if !target.is_active() {
        return Some(SkipReason::TargetInactive);
    }
    if !target.is_alive() {
        return Some(SkipReason::TargetDead);
    }
    None
}

/// Handle to a scheduled action; also its sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(pub u64);

/// An action popped from the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueAction {
    pub id: ActionId,
    pub fire_at: Tick,
    pub action: DeferredAction,
}

#[derive(Clone, Debug)]
struct Entry(DueAction);

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .fire_at
            .cmp(&other.0.fire_at)
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

/// Min-heap of deferred actions keyed by fire tick.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: Tick, action: DeferredAction) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry(DueAction {
            id,
            fire_at,
            action,
        })));
        id
    }

    /// Pops the earliest action whose fire tick is at or before `now`.
    pub fn pop_due(&mut self, now: Tick) -> Option<DueAction> {
        if self.queue.peek()?.0.0.fire_at > now {
            return None;
        }
        self.queue.pop().map(|Reverse(Entry(due))| due)
    }

    /// Fire tick of the earliest pending action.
    pub fn next_due(&self) -> Option<Tick> {
        self.queue.peek().map(|entry| entry.0.0.fire_at)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{AttackType, DamageType};
    use crate::state::{ObjectState, RegionId, ResourceMeter};

    fn context() -> ResolutionContext {
        ResolutionContext {
            spell: SpellId(1),
            kind: SpellKind::Bolt,
            impact: ImpactParams {
                base_damage: 40,
                damage_type: DamageType::Cold,
                attack_type: AttackType::Spell,
            },
        }
    }

    fn action(target: u32) -> DeferredAction {
        DeferredAction::new(EntityId(1), Some(EntityId(target)), Some(context())).unwrap()
    }

    #[test]
    fn construction_rejects_missing_parts() {
        assert_eq!(
            DeferredAction::new(EntityId(1), None, Some(context())),
            Err(ScheduleError::MissingTarget)
        );
        assert_eq!(
            DeferredAction::new(EntityId(1), Some(EntityId(2)), None),
            Err(ScheduleError::MissingContext)
        );
    }

    #[test]
    fn pops_in_tick_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Tick(30), action(3));
        scheduler.schedule(Tick(10), action(1));
        scheduler.schedule(Tick(20), action(2));
        scheduler.schedule(Tick(10), action(4));

        assert_eq!(scheduler.next_due(), Some(Tick(10)));
        assert!(scheduler.pop_due(Tick(5)).is_none());

        let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(Tick(25)))
            .map(|due| (due.fire_at, due.action.target))
            .collect();
        assert_eq!(
            fired,
            vec![
                (Tick(10), EntityId(1)),
                (Tick(10), EntityId(4)),
                (Tick(20), EntityId(2)),
            ]
        );
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn revalidation_reasons() {
        let caster = ActorState::player(EntityId(1), "c");
        let target = ActorState::npc(EntityId(2), "t");

        assert_eq!(revalidate(Some(&caster), Some(&target)), None);
        assert_eq!(revalidate(Some(&caster), None), Some(SkipReason::TargetAbsent));
        assert_eq!(revalidate(None, Some(&target)), Some(SkipReason::CasterAbsent));

        let elsewhere = target.clone().in_region(RegionId(9));
        assert_eq!(
            revalidate(Some(&caster), Some(&elsewhere)),
            Some(SkipReason::CrossRegion)
        );

        let mut inactive = target.clone();
        inactive.object_state = ObjectState::Inactive;
        assert_eq!(
            revalidate(Some(&caster), Some(&inactive)),
            Some(SkipReason::TargetInactive)
        );

        let dead = target.with_health(ResourceMeter::new(0, 100));
        assert_eq!(revalidate(Some(&caster), Some(&dead)), Some(SkipReason::TargetDead));
    }
}
