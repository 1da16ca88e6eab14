//! Async hosting for combat regions.
//!
//! Each region is owned by a single worker task, so its clock, actors and
//! deferred actions are only ever touched from one place. Consumers build a
//! [`Runtime`], drive regions through [`RuntimeHandle`], and watch what
//! happens on the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`workers`] keeps region tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{CombatNotice, Event, EventBus, RegionEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::RegionSnapshot;
