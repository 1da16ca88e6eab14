//! Combat resolution for bolt impacts.
//!
//! The stage helpers (`hit`, `block`, `damage`, `critical`) are pure
//! functions. [`resolve_bolt_impact`] runs them in order, rolls dice and
//! applies the outcome to the target.

pub mod block;
pub mod critical;
pub mod damage;
pub mod hit;
pub mod resolve;
pub mod result;

pub use block::{BLOCK_ARC_DEGREES, EngageOutcome, apply_engage, block_chance, can_block};
pub use critical::critical_bounds;
pub use damage::{
    DamageType, PhysicalDamage, PhysicalInput, Resistances, mitigate_physical,
    weapon_skill_factor,
};
pub use hit::{con_level, miss_chance};
pub use resolve::{ImpactContext, ImpactParams, resolve_bolt_impact};
pub use result::{AttackOutcome, AttackResult, AttackType, ResultFlags};
