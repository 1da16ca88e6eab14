//! High-level runtime orchestrator.
//!
//! The runtime spawns one worker per region, wires up command/event channels,
//! and exposes a builder-based API for hosting regions.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use combat_content::RegionRoster;
use combat_core::{
    ActorState, CombatConfig, PcgRng, Region, RegionId, RngOracle, SpellBook, compute_seed,
};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, RegionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Wall-clock period after which every region advances by the same
    /// number of milliseconds. `None` means regions only move on request.
    pub tick_interval: Option<Duration>,
    /// Runtime seed. Regions without their own seed derive one from it.
    pub seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 32,
            tick_interval: None,
            seed: 0,
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Runtime seed (default: random)
    /// - `COMBAT_TICK_INTERVAL_MS` - Auto-advance period; 0 disables it
    /// - `COMBAT_EVENT_BUFFER` - Broadcast capacity per topic (default: 256)
    /// - `COMBAT_COMMAND_BUFFER` - Command queue depth per region (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self {
            seed: read_env::<u64>("COMBAT_SEED").unwrap_or_else(rand::random),
            ..Self::default()
        };

        if let Some(ms) = read_env::<u64>("COMBAT_TICK_INTERVAL_MS") {
            config.tick_interval = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(capacity) = read_env::<usize>("COMBAT_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("COMBAT_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    /// Seed for a region that did not declare one.
    pub fn region_seed(&self, region: RegionId) -> u64 {
        compute_seed(self.seed, 0, u32::from(region.0), 0)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that hosts region workers
///
/// Runtime owns the workers; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    workers: Vec<(RegionId, JoinHandle<()>)>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Workers stop once every outstanding [`RuntimeHandle`] clone is
    /// dropped, so callers must release theirs first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        for (region, worker) in self.workers {
            worker.await.map_err(RuntimeError::WorkerJoin)?;
            info!(%region, "region worker joined");
        }

        Ok(())
    }
}

struct RegionSetup {
    id: RegionId,
    seed: Option<u64>,
    actors: Vec<ActorState>,
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    combat: CombatConfig,
    spells: Option<SpellBook>,
    rng: Arc<dyn RngOracle>,
    regions: Vec<RegionSetup>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            combat: CombatConfig::default(),
            spells: None,
            rng: Arc::new(PcgRng),
            regions: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Combat tunables shared by every region.
    pub fn combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    /// Set the required spell book
    pub fn spells(mut self, spells: SpellBook) -> Self {
        self.spells = Some(spells);
        self
    }

    /// Replace the default [`PcgRng`] oracle.
    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Host a region with its starting actors.
    pub fn region(mut self, id: RegionId, seed: Option<u64>, actors: Vec<ActorState>) -> Self {
        self.regions.push(RegionSetup { id, seed, actors });
        self
    }

    /// Host every region of a loaded roster.
    pub fn rosters(mut self, rosters: Vec<RegionRoster>) -> Self {
        self.regions
            .extend(rosters.into_iter().map(|roster| RegionSetup {
                id: roster.id,
                seed: roster.seed,
                actors: roster.actors,
            }));
        self
    }

    /// Build the runtime and start one worker per region
    pub async fn build(self) -> Result<Runtime> {
        let spells = Arc::new(self.spells.ok_or(RuntimeError::MissingSpells)?);
        let combat = Arc::new(self.combat);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let mut regions = Vec::with_capacity(self.regions.len());
        for setup in self.regions {
            if regions.iter().any(|r: &Region| r.id() == setup.id) {
                return Err(RuntimeError::DuplicateRegion(setup.id));
            }
            let seed = setup.seed.unwrap_or_else(|| self.config.region_seed(setup.id));
            let mut region = Region::new(
                setup.id,
                Arc::clone(&combat),
                Arc::clone(&spells),
                Arc::clone(&self.rng),
            )
            .with_seed(seed);
            for mut actor in setup.actors {
                actor.region = setup.id;
                region.insert_actor(actor)?;
            }
            regions.push(region);
        }

        let mut senders = HashMap::with_capacity(regions.len());
        let mut workers = Vec::with_capacity(regions.len());
        for region in regions {
            let id = region.id();
            let (command_tx, command_rx) =
                mpsc::channel::<Command>(self.config.command_buffer_size);
            senders.insert(id, command_tx);

            let worker = RegionWorker::new(
                region,
                command_rx,
                event_bus.clone(),
                self.config.tick_interval,
            );
            workers.push((
                id,
                tokio::spawn(async move {
                    worker.run().await;
                }),
            ));
        }

        info!(regions = workers.len(), "runtime started");

        Ok(Runtime {
            handle: RuntimeHandle::new(senders, event_bus),
            workers,
        })
    }
}
