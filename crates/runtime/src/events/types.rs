use serde::{Deserialize, Serialize};

use combat_core::{CombatEvent, EntityId, RegionId, Tick, TickReport};

/// A core combat event stamped with where and when it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatNotice {
    pub region: RegionId,
    pub tick: Tick,
    pub event: CombatEvent,
}

/// Region lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionEvent {
    /// The region clock moved; lists every deferred action that fired.
    Advanced(TickReport),
    ActorEntered { region: RegionId, actor: EntityId },
    ActorLeft { region: RegionId, actor: EntityId },
    WorkerStopped { region: RegionId },
}
