//! Data-driven combat content and its loaders.
//!
//! This crate turns data files into explicitly owned values handed to the
//! runtime at startup:
//! - Combat tunables (TOML)
//! - Spell book (RON)
//! - Actor roster per region (RON)
//!
//! Nothing here is global; callers own what the loaders return.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, RegionRoster, RosterLoader, SpellLoader};
