//! Worker tasks that back the runtime orchestration.
//!
//! One region worker runs per hosted region; regions never share a writer.

mod region;

pub use region::{Command, RegionSnapshot, RegionWorker};
