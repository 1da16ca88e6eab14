//! Deterministic bolt-spell scheduling and combat resolution.
//!
//! `combat-core` owns no threads and performs no I/O. A [`region::Region`]
//! holds the actors of one spatial partition, the queue of deferred actions
//! and the clock; casting schedules a bolt and advancing the clock resolves
//! every impact that came due. Randomness and output go through the oracles
//! in [`env`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod region;
pub mod schedule;
pub mod spell;
pub mod state;

pub use combat::{
    AttackOutcome, AttackResult, AttackType, DamageType, ImpactParams, Resistances, ResultFlags,
};
pub use config::CombatConfig;
pub use env::{
    ChatChannel, CombatEvent, CombatSink, Dice, PcgRng, RngOracle, SequenceRng, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use region::{FiredAction, Region, TickReport};
pub use schedule::{
    ActionId, DeferredAction, DueAction, ResolutionContext, ScheduleError, Scheduler, SkipReason,
};
pub use spell::{
    BoltFlight, BoltHandler, CastError, CastReceipt, EffectId, FireOutcome, Spell, SpellBook,
    SpellHandler, SpellId, SpellKind, handler_for,
};
pub use state::{
    ActiveEffect, ActorKind, ActorState, ActorStore, ArmorPiece, Attributes, EffectKind,
    EffectList, EntityId, Equipment, Heading, HitLocation, InterruptTimer, LastAttack,
    ObjectState, OffHand, Position, RegionId, ResourceMeter, StateError, Tick, WeaponStance,
};
