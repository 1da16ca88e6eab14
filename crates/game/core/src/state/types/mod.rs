pub mod actor;
pub mod common;

pub use actor::{
    ActiveEffect, ActorKind, ActorState, ArmorPiece, Attributes, EffectKind, EffectList,
    Equipment, HitLocation, InterruptTimer, LastAttack, ObjectState, OffHand, WeaponStance,
};
pub use common::{EntityId, Heading, Position, RegionId, ResourceMeter, Tick};
