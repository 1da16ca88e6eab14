//! Rendering of collected runtime events.

use anyhow::Result;

use combat_core::{CombatEvent, Tick};
use region_runtime::{CombatNotice, Event, RegionEvent, RegionSnapshot};

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per event, then the final actor state
    Summary,
    /// One JSON object per event
    Json,
}

pub fn print(format: OutputFormat, events: &[Event], snapshot: &RegionSnapshot) -> Result<()> {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by_key(|event| sort_tick(event));

    match format {
        OutputFormat::Json => {
            for event in ordered {
                println!("{}", serde_json::to_string(event)?);
            }
            println!("{}", serde_json::to_string(snapshot)?);
        }
        OutputFormat::Summary => {
            for event in ordered {
                println!("{}", describe(event));
            }
            println!();
            println!("{} at {} ({} pending)", snapshot.region, snapshot.now, snapshot.pending);
            for actor in &snapshot.actors {
                println!(
                    "  {:>4} {:<14} hp {:>5}/{:<5} power {:>4}/{:<4} endurance {:>3}/{:<3}",
                    actor.id.to_string(),
                    actor.name,
                    actor.health.current,
                    actor.health.maximum,
                    actor.power.current,
                    actor.power.maximum,
                    actor.endurance.current,
                    actor.endurance.maximum,
                );
            }
        }
    }
    Ok(())
}

fn sort_tick(event: &Event) -> Tick {
    match event {
        Event::Combat(notice) | Event::Chat(notice) | Event::Visual(notice) => notice.tick,
        Event::Region(RegionEvent::Advanced(report)) => report.now,
        Event::Region(RegionEvent::WorkerStopped { .. }) => Tick(u64::MAX),
        Event::Region(_) => Tick::ZERO,
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::Combat(notice) | Event::Chat(notice) | Event::Visual(notice) => {
            format!("[{:>6}] {}", notice.tick.0, describe_notice(notice))
        }
        Event::Region(RegionEvent::Advanced(report)) => format!(
            "[{:>6}] {} advanced: {} applied, {} skipped",
            report.now.0,
            report.region,
            report.applied(),
            report.skipped()
        ),
        Event::Region(RegionEvent::ActorEntered { region, actor }) => {
            format!("[     -] {actor} entered {region}")
        }
        Event::Region(RegionEvent::ActorLeft { region, actor }) => {
            format!("[     -] {actor} left {region}")
        }
        Event::Region(RegionEvent::WorkerStopped { region }) => {
            format!("[     -] {region} worker stopped")
        }
    }
}

fn describe_notice(notice: &CombatNotice) -> String {
    match &notice.event {
        CombatEvent::Message { to, text, channel } => format!("{to} <{channel}> {text}"),
        CombatEvent::SpellEffect {
            observer,
            caster,
            target,
            effect,
            delay,
        } => format!(
            "{observer} sees {caster} cast effect {} at {target} (lands in {delay}/10 s)",
            effect.0
        ),
        CombatEvent::Damage {
            outcome, critical, ..
        } => format!(
            "{} {} for {} damage{}",
            outcome.target.map_or_else(|| "?".to_string(), |t| t.to_string()),
            outcome.result,
            outcome.total_damage(),
            if *critical { " (critical)" } else { "" }
        ),
        CombatEvent::Attacked {
            target,
            attacker,
            result,
        } => format!("{target} attacked by {attacker}: {result}"),
        CombatEvent::InterruptStarted { target, until, .. } => {
            format!("{target} interrupted until {}", until.0)
        }
        CombatEvent::EngageCancelled { source } => format!("{source} stopped engaging"),
    }
}
