//! Region-owned actor state.
//!
//! Deferred work never holds references into this store; it carries
//! [`EntityId`]s and looks actors up again when it runs.
mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::StateError;
pub use types::{
    ActiveEffect, ActorKind, ActorState, ArmorPiece, Attributes, EffectKind, EffectList,
    EntityId, Equipment, Heading, HitLocation, InterruptTimer, LastAttack, ObjectState, OffHand,
    Position, RegionId, ResourceMeter, Tick, WeaponStance,
};

/// Arena of the actors currently inside one region, keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStore {
    actors: BTreeMap<EntityId, ActorState>,
}

impl ActorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor. Fails if the id is taken.
    pub fn insert(&mut self, actor: ActorState) -> Result<(), StateError> {
        if self.actors.contains_key(&actor.id) {
            return Err(StateError::DuplicateActor(actor.id));
        }
        self.actors.insert(actor.id, actor);
        Ok(())
    }

    pub fn remove(&mut self, id: EntityId) -> Result<ActorState, StateError> {
        self.actors.remove(&id).ok_or(StateError::ActorNotFound(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    /// Player-controlled actors within `radius` of `center`.
    pub fn players_within(
        &self,
        center: &Position,
        radius: u32,
    ) -> impl Iterator<Item = &ActorState> + '_ {
        let center = *center;
        self.actors
            .values()
            .filter(move |a| a.is_player() && a.is_active() && a.position.distance(&center) <= radius)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
