//! Cloneable façade for issuing commands to region workers.
//!
//! [`RuntimeHandle`] hides channel plumbing and routes every request to the
//! worker that owns the addressed region.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{ActorState, CastReceipt, EntityId, RegionId, SpellId, TickReport};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, RegionSnapshot};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    regions: Arc<HashMap<RegionId, mpsc::Sender<Command>>>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(
        regions: HashMap<RegionId, mpsc::Sender<Command>>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            regions: Arc::new(regions),
            event_bus,
        }
    }

    /// Regions hosted by the runtime, in ascending id order.
    pub fn regions(&self) -> Vec<RegionId> {
        let mut ids: Vec<_> = self.regions.keys().copied().collect();
        ids.sort();
        ids
    }

    async fn request<T>(
        &self,
        region: RegionId,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let tx = self
            .regions
            .get(&region)
            .ok_or(RuntimeError::UnknownRegion(region))?;
        let (reply_tx, reply_rx) = oneshot::channel();

        tx.send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed(region))?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Completes a cast in `region`. `target` may be `None`, which the core
    /// rejects as a contract violation.
    pub async fn cast(
        &self,
        region: RegionId,
        caster: EntityId,
        target: Option<EntityId>,
        spell: SpellId,
    ) -> Result<CastReceipt> {
        self.request(region, |reply| Command::Cast {
            caster,
            target,
            spell,
            reply,
        })
        .await?
    }

    /// Advances the clock of `region` by `ticks`.
    pub async fn advance(&self, region: RegionId, ticks: u64) -> Result<TickReport> {
        self.request(region, |reply| Command::Advance { ticks, reply })
            .await
    }

    /// Advances every region by `ticks`. Regions run concurrently.
    pub async fn advance_all(&self, ticks: u64) -> Result<Vec<TickReport>> {
        let mut pending = Vec::with_capacity(self.regions.len());
        for region in self.regions() {
            let handle = self.clone();
            pending.push(tokio::spawn(
                async move { handle.advance(region, ticks).await },
            ));
        }

        let mut reports = Vec::with_capacity(pending.len());
        for task in pending {
            reports.push(task.await.map_err(RuntimeError::WorkerJoin)??);
        }
        Ok(reports)
    }

    /// Adds an actor to the region named by its `region` field.
    pub async fn spawn_actor(&self, actor: ActorState) -> Result<()> {
        let region = actor.region;
        self.request(region, |reply| Command::Insert {
            actor: Box::new(actor),
            reply,
        })
        .await?
    }

    pub async fn remove_actor(&self, region: RegionId, actor: EntityId) -> Result<ActorState> {
        self.request(region, |reply| Command::Remove { actor, reply })
            .await?
    }

    /// Moves an actor between regions.
    ///
    /// Bolts already in flight toward the actor stay with the old region and
    /// are skipped when they fire. If the destination rejects the actor it is
    /// put back where it was.
    pub async fn transfer_actor(&self, actor: EntityId, from: RegionId, to: RegionId) -> Result<()> {
        if !self.regions.contains_key(&to) {
            return Err(RuntimeError::UnknownRegion(to));
        }

        let mut state = self.remove_actor(from, actor).await?;
        state.region = to;
        if let Err(err) = self.spawn_actor(state.clone()).await {
            state.region = from;
            self.spawn_actor(state).await?;
            return Err(err);
        }
        Ok(())
    }

    /// Current state of one actor, if it is in `region`.
    pub async fn actor(&self, region: RegionId, actor: EntityId) -> Result<Option<ActorState>> {
        self.request(region, |reply| Command::QueryActor { actor, reply })
            .await
    }

    /// Read-only snapshot of a region.
    pub async fn snapshot(&self, region: RegionId) -> Result<RegionSnapshot> {
        self.request(region, |reply| Command::Query { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Damage, attack notices, interrupts, engage changes
    /// - `Topic::Chat` - Messages addressed to actors
    /// - `Topic::Visual` - Cast animation cues
    /// - `Topic::Region` - Clock advances and actor arrivals/departures
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
