//! Services the combat core consumes but does not own.
//!
//! Randomness comes in through [`RngOracle`]; everything observable leaves
//! through a [`CombatSink`].
mod rng;
mod sink;

pub use rng::{Dice, PcgRng, RngOracle, SequenceRng, compute_seed};
pub use sink::{ChatChannel, CombatEvent, CombatSink};
