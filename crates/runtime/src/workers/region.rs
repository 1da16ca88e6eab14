//! Worker that owns one [`combat_core::Region`].
//!
//! The worker is the region's only writer. It receives commands from
//! [`RuntimeHandle`](crate::RuntimeHandle), steps the region clock either on
//! demand or on a fixed interval, and publishes everything the core reports
//! to the [`EventBus`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use combat_core::{
    ActorState, CastReceipt, CombatEvent, EntityId, FireOutcome, GameError, Region, RegionId,
    SpellId, Tick, TickReport,
};

use crate::api::Result;
use crate::events::{CombatNotice, Event, EventBus, RegionEvent};

/// Ticks advanced per interval tick. Never zero, so sub-millisecond
/// periods still move the clock.
fn interval_step(period: Duration) -> u64 {
    u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Commands that can be sent to a region worker
pub enum Command {
    /// Complete a cast and schedule its deferred effect.
    Cast {
        caster: EntityId,
        target: Option<EntityId>,
        spell: SpellId,
        reply: oneshot::Sender<Result<CastReceipt>>,
    },
    /// Move the region clock forward.
    Advance {
        ticks: u64,
        reply: oneshot::Sender<TickReport>,
    },
    Insert {
        actor: Box<ActorState>,
        reply: oneshot::Sender<Result<()>>,
    },
    Remove {
        actor: EntityId,
        reply: oneshot::Sender<Result<ActorState>>,
    },
    /// Query the region (read-only).
    Query {
        reply: oneshot::Sender<RegionSnapshot>,
    },
    QueryActor {
        actor: EntityId,
        reply: oneshot::Sender<Option<ActorState>>,
    },
}

/// Read-only copy of a region's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub region: RegionId,
    pub now: Tick,
    pub pending: usize,
    pub actors: Vec<ActorState>,
}

/// Background task that drives one region.
pub struct RegionWorker {
    region: Region,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Option<Duration>,
}

impl RegionWorker {
    pub fn new(
        region: Region,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Option<Duration>,
    ) -> Self {
        info!(
            region = %region.id(),
            actors = region.actors().len(),
            "RegionWorker initialized"
        );

        Self {
            region,
            command_rx,
            event_bus,
            tick_interval,
        }
    }

    /// Main worker loop. Ends when every command sender is dropped.
    pub async fn run(mut self) {
        let mut ticker = self.tick_interval.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            interval
        });
        let step = self.tick_interval.map_or(0, interval_step);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = async {
                    match ticker.as_mut() {
                        Some(interval) => { interval.tick().await; }
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    self.advance(step);
                }
            }
        }

        info!(region = %self.region.id(), "RegionWorker stopped");
        self.event_bus
            .publish(Event::Region(RegionEvent::WorkerStopped {
                region: self.region.id(),
            }));
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Cast {
                caster,
                target,
                spell,
                reply,
            } => {
                let result = self.handle_cast(caster, target, spell);
                if reply.send(result).is_err() {
                    debug!("Cast reply channel closed (caller dropped)");
                }
            }
            Command::Advance { ticks, reply } => {
                let report = self.advance(ticks);
                if reply.send(report).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::Insert { actor, reply } => {
                let result = self.handle_insert(*actor);
                if reply.send(result).is_err() {
                    debug!("Insert reply channel closed (caller dropped)");
                }
            }
            Command::Remove { actor, reply } => {
                let result = self.handle_remove(actor);
                if reply.send(result).is_err() {
                    debug!("Remove reply channel closed (caller dropped)");
                }
            }
            Command::Query { reply } => {
                let snapshot = RegionSnapshot {
                    region: self.region.id(),
                    now: self.region.now(),
                    pending: self.region.pending(),
                    actors: self.region.actors().iter().cloned().collect(),
                };
                if reply.send(snapshot).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
            }
            Command::QueryActor { actor, reply } => {
                if reply.send(self.region.actor(actor).cloned()).is_err() {
                    debug!("QueryActor reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_cast(
        &mut self,
        caster: EntityId,
        target: Option<EntityId>,
        spell: SpellId,
    ) -> Result<CastReceipt> {
        let mut events = Vec::new();
        let result = self.region.cast(caster, target, spell, &mut events);
        self.publish(self.region.now(), events);

        match result {
            Ok(receipt) => {
                debug!(
                    region = %self.region.id(),
                    %caster,
                    %spell,
                    fire_at = %receipt.fire_at,
                    "bolt scheduled"
                );
                Ok(receipt)
            }
            Err(err) => {
                warn!(
                    region = %self.region.id(),
                    %caster,
                    %spell,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    error = %err,
                    "cast rejected"
                );
                Err(err.into())
            }
        }
    }

    fn handle_insert(&mut self, actor: ActorState) -> Result<()> {
        let id = actor.id;
        if let Err(err) = self.region.insert_actor(actor) {
            warn!(
                region = %self.region.id(),
                actor = %id,
                code = err.error_code(),
                severity = err.severity().as_str(),
                error = %err,
                "insert rejected"
            );
            return Err(err.into());
        }
        self.event_bus
            .publish(Event::Region(RegionEvent::ActorEntered {
                region: self.region.id(),
                actor: id,
            }));
        Ok(())
    }

    fn handle_remove(&mut self, id: EntityId) -> Result<ActorState> {
        let actor = self.region.remove_actor(id)?;
        self.event_bus.publish(Event::Region(RegionEvent::ActorLeft {
            region: self.region.id(),
            actor: id,
        }));
        Ok(actor)
    }

    /// Advances by `ticks`, stopping at every fire tick on the way so each
    /// batch of events carries the tick it happened at.
    fn advance(&mut self, ticks: u64) -> TickReport {
        let until = self.region.now() + ticks;
        let mut combined = TickReport {
            region: self.region.id(),
            now: self.region.now(),
            fired: Vec::new(),
        };

        loop {
            let step = match self.region.next_due() {
                Some(due) if due < until => due,
                _ => until,
            };
            let mut events = Vec::new();
            let report = self.region.advance_to(step, &mut events);
            self.publish(report.now, events);

            for fired in &report.fired {
                match &fired.outcome {
                    FireOutcome::Applied(outcome) => debug!(
                        region = %self.region.id(),
                        caster = %fired.caster,
                        target = %fired.target,
                        result = %outcome.result,
                        damage = outcome.total_damage(),
                        "deferred action applied"
                    ),
                    FireOutcome::Skipped(reason) => debug!(
                        region = %self.region.id(),
                        caster = %fired.caster,
                        target = %fired.target,
                        %reason,
                        "deferred action skipped"
                    ),
                }
            }
            combined.fired.extend(report.fired);

            if step >= until {
                break;
            }
        }

        combined.now = self.region.now();
        if !combined.fired.is_empty() {
            self.event_bus
                .publish(Event::Region(RegionEvent::Advanced(combined.clone())));
        }
        combined
    }

    fn publish(&self, tick: Tick, events: Vec<CombatEvent>) {
        let region = self.region.id();
        for event in events {
            self.event_bus.publish(Event::from_notice(CombatNotice {
                region,
                tick,
                event,
            }));
        }
    }
}
