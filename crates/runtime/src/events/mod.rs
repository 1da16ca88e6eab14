//! Topic-based event bus for runtime events.
//!
//! Region workers publish everything the combat core reports, stamped with
//! region and tick. Consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatNotice, RegionEvent};
