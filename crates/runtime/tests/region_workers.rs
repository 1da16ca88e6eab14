use std::sync::Arc;
use std::time::Duration;

use combat_core::{
    ActorState, CastError, CombatEvent, DamageType, EffectId, EntityId, ErrorSeverity,
    FireOutcome, GameError, Position, RegionId, ResourceMeter, SequenceRng, SkipReason, Spell, SpellBook, SpellId, SpellKind, Tick,
};
use region_runtime::{Event, RegionEvent, Runtime, RuntimeConfig, RuntimeError, Topic};
use tokio::sync::broadcast;

const NORTH: RegionId = RegionId(1);
const SOUTH: RegionId = RegionId(2);
const BOLT: SpellId = SpellId(1);

fn spells() -> SpellBook {
    [Spell {
        id: BOLT,
        name: "Fire Bolt".to_string(),
        kind: SpellKind::Bolt,
        damage: 100,
        damage_type: DamageType::Heat,
        power_cost: 10,
        effect: EffectId(5),
    }]
    .into_iter()
    .collect()
}

fn north_actors() -> Vec<ActorState> {
    vec![
        ActorState::player(EntityId(1), "Ysolde")
            .with_level(50)
            .with_dexterity(60)
            .at(Position::new(0, 850, 0)),
        ActorState::npc(EntityId(2), "ghoul")
            .with_level(50)
            .with_health(ResourceMeter::full(1_000)),
    ]
}

async fn runtime(config: RuntimeConfig) -> Runtime {
    Runtime::builder()
        .config(config)
        .spells(spells())
        // crit gate never fires, miss roll 50 never misses
        .rng(Arc::new(SequenceRng::new(vec![99, 50])))
        .region(NORTH, Some(1), north_actors())
        .region(SOUTH, Some(2), Vec::new())
        .build()
        .await
        .expect("runtime should build")
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn bolt_resolves_inside_its_region_worker() {
    let runtime = runtime(RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut chat = handle.subscribe(Topic::Chat);
    let mut visual = handle.subscribe(Topic::Visual);
    let mut combat = handle.subscribe(Topic::Combat);
    let mut region = handle.subscribe(Topic::Region);

    assert_eq!(handle.regions(), vec![NORTH, SOUTH]);

    let receipt = handle
        .cast(NORTH, EntityId(1), Some(EntityId(2)), BOLT)
        .await
        .expect("cast should schedule");
    assert_eq!(receipt.fire_at, Tick(1001));

    let cue = visual.recv().await.expect("cast cue");
    let Event::Visual(notice) = cue else {
        panic!("expected a visual event, got {cue:?}");
    };
    assert_eq!(notice.region, NORTH);
    assert_eq!(notice.tick, Tick(0));
    assert!(matches!(notice.event, CombatEvent::SpellEffect { delay: 11, .. }));

    let report = handle.advance(NORTH, 2_000).await.expect("advance");
    assert_eq!(report.now, Tick(2_000));
    assert_eq!(report.applied(), 1);

    let ghoul = handle
        .actor(NORTH, EntityId(2))
        .await
        .expect("query")
        .expect("ghoul is still here");
    assert_eq!(ghoul.health.current, 700);

    let messages = drain(&mut chat);
    assert!(messages.iter().any(|e| matches!(
        e,
        Event::Chat(n) if n.tick == Tick(1001)
            && matches!(&n.event, CombatEvent::Message { text, .. } if text.starts_with("You hit ghoul"))
    )));
    assert!(drain(&mut combat).iter().any(|e| matches!(
        e,
        Event::Combat(n) if matches!(n.event, CombatEvent::Damage { .. })
    )));
    assert!(drain(&mut region).iter().any(|e| matches!(
        e,
        Event::Region(RegionEvent::Advanced(r)) if r.region == NORTH && r.fired.len() == 1
    )));

    drop(handle);
    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn transferred_target_escapes_bolt() {
    let runtime = runtime(RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut region_events = handle.subscribe(Topic::Region);

    handle
        .cast(NORTH, EntityId(1), Some(EntityId(2)), BOLT)
        .await
        .expect("cast should schedule");
    handle
        .transfer_actor(EntityId(2), NORTH, SOUTH)
        .await
        .expect("transfer");

    let report = handle.advance(NORTH, 2_000).await.expect("advance");
    assert_eq!(
        report.fired[0].outcome,
        FireOutcome::Skipped(SkipReason::TargetAbsent)
    );

    let south = handle.snapshot(SOUTH).await.expect("snapshot");
    assert_eq!(south.actors.len(), 1);
    assert_eq!(south.actors[0].region, SOUTH);
    assert_eq!(south.actors[0].health.current, 1_000);
    assert_eq!(
        handle.actor(NORTH, EntityId(2)).await.expect("query"),
        None
    );

    let events = drain(&mut region_events);
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Region(RegionEvent::ActorLeft { region, actor }) if *region == NORTH && *actor == EntityId(2)
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Region(RegionEvent::ActorEntered { region, .. }) if *region == SOUTH
    )));

    drop(handle);
    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn errors_surface_through_the_handle() {
    let runtime = runtime(RuntimeConfig::default()).await;
    let handle = runtime.handle();

    assert!(matches!(
        handle.advance(RegionId(9), 10).await,
        Err(RuntimeError::UnknownRegion(RegionId(9)))
    ));
    let unknown = handle
        .cast(NORTH, EntityId(1), Some(EntityId(2)), SpellId(42))
        .await
        .unwrap_err();
    assert!(matches!(
        unknown,
        RuntimeError::Cast(CastError::UnknownSpell(SpellId(42)))
    ));
    assert_eq!(unknown.severity(), ErrorSeverity::Validation);

    let untargeted = handle.cast(NORTH, EntityId(1), None, BOLT).await.unwrap_err();
    assert!(matches!(untargeted, RuntimeError::Cast(CastError::Schedule(_))));
    assert_eq!(untargeted.severity(), ErrorSeverity::Contract);

    let duplicate = handle
        .spawn_actor(ActorState::npc(EntityId(2), "twin").in_region(NORTH))
        .await
        .unwrap_err();
    assert!(matches!(duplicate, RuntimeError::State(_)));
    assert_eq!(duplicate.error_code(), "STATE_DUPLICATE_ACTOR");

    drop(handle);
    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn interval_advances_regions_without_requests() {
    let config = RuntimeConfig {
        tick_interval: Some(Duration::from_millis(5)),
        ..RuntimeConfig::default()
    };
    let runtime = runtime(config).await;
    let handle = runtime.handle();
    let mut region_events = handle.subscribe(Topic::Region);

    let caster = ActorState::player(EntityId(20), "Brannoc").in_region(SOUTH);
    let target = ActorState::npc(EntityId(21), "rat")
        .in_region(SOUTH)
        .at(Position::new(10, 0, 0));
    handle.spawn_actor(caster).await.expect("spawn caster");
    handle.spawn_actor(target).await.expect("spawn target");
    handle
        .cast(SOUTH, EntityId(20), Some(EntityId(21)), BOLT)
        .await
        .expect("cast should schedule");

    let fired = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match region_events.recv().await {
                Ok(Event::Region(RegionEvent::Advanced(report))) if report.region == SOUTH => {
                    break report;
                }
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => panic!("event bus closed"),
            }
        }
    })
    .await
    .expect("interval should fire the bolt");
    assert_eq!(fired.applied(), 1);

    drop(handle);
    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn shutdown_stops_every_worker() {
    let runtime = runtime(RuntimeConfig::default()).await;
    let mut region_events = runtime.subscribe(Topic::Region);

    runtime.shutdown().await.expect("clean shutdown");

    let mut stopped: Vec<RegionId> = drain(&mut region_events)
        .into_iter()
        .filter_map(|e| match e {
            Event::Region(RegionEvent::WorkerStopped { region }) => Some(region),
            _ => None,
        })
        .collect();
    stopped.sort();
    assert_eq!(stopped, vec![NORTH, SOUTH]);
}
