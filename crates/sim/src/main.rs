//! Command-line driver for the combat runtime.
//!
//! Loads content from a data directory, hosts every region of the roster,
//! issues the requested casts and advances one region's clock, then prints
//! what the runtime published.
//!
//! # Examples
//!
//! ```bash
//! # Ysolde casts Frost Bolt at Hakon, then at the troll
//! cargo run -p combat-sim -- --cast 1:2:1 --cast 1:3:1
//!
//! # Same run, one JSON event per line
//! cargo run -p combat-sim -- --cast 1:2:3 --format json --seed 7
//! ```

mod output;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;

use combat_content::ContentFactory;
use combat_core::{EntityId, RegionId, SpellId};
use region_runtime::{Event, Runtime, RuntimeConfig, Topic};

use output::OutputFormat;

/// Run scripted bolt casts against a loaded roster
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Resolve bolt casts against a data-driven roster", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding combat.toml, spells.ron and roster.ron
    #[arg(short, long, value_name = "DIR", default_value = "crates/sim/data")]
    data_dir: PathBuf,

    /// Region the casts are issued in
    #[arg(short, long, default_value_t = 1)]
    region: u16,

    /// Cast order as CASTER:TARGET:SPELL (repeatable)
    #[arg(short, long = "cast", value_name = "CASTER:TARGET:SPELL")]
    casts: Vec<CastOrder>,

    /// Ticks to advance after issuing the casts
    #[arg(short, long, default_value_t = 2_000)]
    ticks: u64,

    /// Runtime seed (overrides COMBAT_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug)]
struct CastOrder {
    caster: EntityId,
    target: EntityId,
    spell: SpellId,
}

impl FromStr for CastOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<_> = s.split(':').collect();
        let [caster, target, spell] = parts.as_slice() else {
            return Err(format!("expected CASTER:TARGET:SPELL, got `{s}`"));
        };
        let id = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid id `{part}`: {e}"))
        };
        Ok(Self {
            caster: EntityId(id(*caster)?),
            target: EntityId(id(*target)?),
            spell: SpellId(id(*spell)?),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1. Load content
    let factory = ContentFactory::new(&cli.data_dir);
    let combat = factory
        .load_config()
        .with_context(|| format!("loading config from {}", factory.data_dir().display()))?;
    let spells = factory.load_spells().context("loading spell book")?;
    let roster = factory.load_roster().context("loading roster")?;
    tracing::info!(
        spells = spells.len(),
        regions = roster.len(),
        "Content loaded from {}",
        factory.data_dir().display()
    );

    // 2. Build runtime
    let mut config = RuntimeConfig::from_env();
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    tracing::info!("Runtime seed: {}", config.seed);

    let runtime = Runtime::builder()
        .config(config)
        .combat(combat)
        .spells(spells)
        .rosters(roster)
        .build()
        .await?;
    let handle = runtime.handle();
    let mut receivers = handle.event_bus().subscribe_multiple(&Topic::ALL);

    // 3. Cast, then let the bolts land
    let region = RegionId(cli.region);
    for order in &cli.casts {
        match handle
            .cast(region, order.caster, Some(order.target), order.spell)
            .await
        {
            Ok(receipt) => tracing::info!(
                "{} -> {} with {}: lands at {}",
                order.caster,
                order.target,
                order.spell,
                receipt.fire_at
            ),
            Err(e) => tracing::warn!("Cast {:?} rejected: {}", order, e),
        }
    }

    let report = handle.advance(region, cli.ticks).await?;
    tracing::info!(
        applied = report.applied(),
        skipped = report.skipped(),
        "Advanced {} to {}",
        region,
        report.now
    );

    let snapshot = handle.snapshot(region).await?;

    // 4. Shut down so every published event is in the receivers
    drop(handle);
    runtime.shutdown().await?;

    let mut events = Vec::new();
    for topic in Topic::ALL {
        if let Some(rx) = receivers.get_mut(&topic) {
            drain(topic, rx, &mut events);
        }
    }

    output::print(cli.format, &events, &snapshot)?;
    Ok(())
}

fn drain(topic: Topic, rx: &mut broadcast::Receiver<Event>, out: &mut Vec<Event>) {
    loop {
        match rx.try_recv() {
            Ok(event) => out.push(event),
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                tracing::warn!("{:?} subscriber lagged, {} events dropped", topic, missed);
            }
            Err(_) => break,
        }
    }
}
