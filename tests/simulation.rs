//! Drives the full plugin set frame by frame with a fixed time step.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use dread_core::affliction::{AfflictionCatalog, AfflictionKind, AfflictionRegistry};
use dread_core::anxiety::{AnxietyConfig, AnxietyEngine, BandChance, UsePill};
use dread_core::capabilities::AnxietyUpFactor;
use dread_core::core::{
    AfflictionApplied, AfflictionExtended, DataDir, DebugCommand, MissionCompleted, SimRng,
    SimState,
};
use dread_core::mission::{
    ItemCountCondition, MissionDefinition, MissionDisplay, MissionEngine, UnlockReward,
};
use dread_core::player::{Inventory, PlayerVitals, PILLS};
use dread_core::weather::WeatherConfig;
use dread_core::world::{Door, InteractEvent, PillPickup, UnlockOnMission};
use dread_core::DreadPlugin;

const STEP: f32 = 0.1;

struct Constant(f32);

impl AnxietyUpFactor for Constant {
    fn rate(&self) -> f32 {
        self.0
    }
}

#[derive(Resource, Default)]
struct Seen {
    applied: Vec<String>,
    extended: Vec<String>,
    completed: Vec<String>,
}

fn record(
    mut seen: ResMut<Seen>,
    mut applied: EventReader<AfflictionApplied>,
    mut extended: EventReader<AfflictionExtended>,
    mut completed: EventReader<MissionCompleted>,
) {
    seen.applied.extend(applied.read().map(|e| e.name.clone()));
    seen.extended.extend(extended.read().map(|e| e.name.clone()));
    seen.completed.extend(completed.read().map(|e| e.name.clone()));
}

/// Weather that never adds anxiety.
fn calm_weather() -> WeatherConfig {
    WeatherConfig {
        rain_anxiety: 0.0,
        wind_anxiety: 0.0,
        thunder_spike: 0.0,
        lightning_min_interval: 1.0e6,
        lightning_max_interval: 1.0e6,
        ..WeatherConfig::default()
    }
}

/// App with the full plugin set. `setup` runs before the plugins are added,
/// so resources it inserts replace the file-loaded ones.
fn build_app(setup: impl FnOnce(&mut App)) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            STEP,
        )))
        .insert_resource(DataDir(PathBuf::from("tests/no-such-data")))
        .insert_resource(SimRng::seeded(1234))
        .insert_resource(calm_weather())
        .insert_resource(AnxietyEngine::new(AnxietyConfig::default().without_rolls()))
        .insert_resource(MissionEngine::default())
        .init_resource::<Seen>();

    setup(&mut app);

    app.add_plugins(DreadPlugin)
        .add_systems(Last, record);
    app
}

/// Update until the simulation is running.
fn start(app: &mut App) {
    for _ in 0..5 {
        app.update();
        if *app.world().resource::<State<SimState>>().get() == SimState::Running {
            return;
        }
    }
    panic!("simulation never left loading");
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn anxiety(app: &App) -> f32 {
    app.world().resource::<AnxietyEngine>().current()
}

#[test]
fn contributors_raise_anxiety_each_frame() {
    let mut app = build_app(|_| {});
    start(&mut app);

    app.world_mut()
        .resource_mut::<AnxietyEngine>()
        .register_up(Arc::new(Constant(10.0)));
    let before = anxiety(&app);
    run(&mut app, 10);

    assert!((anxiety(&app) - before - 10.0).abs() < 1e-3);
}

#[test]
fn rolled_affliction_is_applied_in_the_same_frame() {
    let mut app = build_app(|app| {
        app.insert_resource(AnxietyEngine::new(AnxietyConfig {
            low: vec![BandChance::new(AfflictionKind::Fatigue, 1.0)],
            ..AnxietyConfig::default()
        }));
    });
    start(&mut app);
    run(&mut app, 1);

    let registry = app.world().resource::<AfflictionRegistry>();
    assert!(registry.has("Fatigue"));
    assert_eq!(registry.len(), 1);
    assert_eq!(app.world().resource::<PlayerVitals>().jump_force, 0.5);

    // Active kinds are not rolled again while they run.
    run(&mut app, 10);
    assert_eq!(app.world().resource::<Seen>().applied, vec!["Fatigue"]);
}

#[test]
fn rolled_affliction_does_not_extend_one_requested_the_same_frame() {
    let mut app = build_app(|_| {});
    start(&mut app);

    *app.world_mut().resource_mut::<AnxietyEngine>() = AnxietyEngine::new(AnxietyConfig {
        low: vec![BandChance::new(AfflictionKind::Fatigue, 1.0)],
        ..AnxietyConfig::default()
    });
    app.world_mut()
        .send_event(DebugCommand::QueueAffliction("fatigue".into()));
    run(&mut app, 1);

    // Base 5s, ticked once.
    let remaining = app
        .world()
        .resource::<AfflictionRegistry>()
        .get("Fatigue")
        .map(|a| a.duration());
    assert!(remaining.is_some_and(|r| (r - 4.9).abs() < 1e-4));

    let seen = app.world().resource::<Seen>();
    assert_eq!(seen.applied, vec!["Fatigue"]);
    assert!(seen.extended.is_empty());
}

#[test]
fn explicit_request_still_extends_an_active_affliction() {
    let mut app = build_app(|_| {});
    start(&mut app);

    for _ in 0..2 {
        app.world_mut()
            .send_event(DebugCommand::QueueAffliction("drowsiness".into()));
    }
    run(&mut app, 1);

    let remaining = app
        .world()
        .resource::<AfflictionRegistry>()
        .get("Drowsiness")
        .map(|a| a.duration());
    assert!(remaining.is_some_and(|r| (r - 9.9).abs() < 1e-4));
    assert_eq!(app.world().resource::<Seen>().extended, vec!["Drowsiness"]);
}

#[test]
fn bundled_data_files_load() {
    let dir = DataDir::default();

    let missions = MissionEngine::load(&dir);
    assert_eq!(missions.queued_names(), vec!["Find your pills"]);

    assert_eq!(AnxietyEngine::load(&dir).config(), &AnxietyConfig::default());
    assert_eq!(WeatherConfig::load(&dir), WeatherConfig::default());

    let catalog = AfflictionCatalog::load(&dir);
    let blur = catalog.data(AfflictionKind::BlurredVision).map(|d| d.name.as_str());
    assert_eq!(blur, Some("Blurred Vision"));
}

#[test]
fn affliction_expires_and_restores_stats() {
    let mut app = build_app(|_| {});
    start(&mut app);

    app.world_mut()
        .send_event(DebugCommand::QueueAffliction("blurred vision".into()));
    run(&mut app, 1);
    assert!(app.world().resource::<PlayerVitals>().vision_blurred);

    // Default duration is 5 seconds.
    run(&mut app, 52);
    assert!(!app.world().resource::<PlayerVitals>().vision_blurred);
    assert!(app.world().resource::<AfflictionRegistry>().is_empty());
}

#[test]
fn mission_completes_unlocks_door_and_queues_follow_up() {
    let mut app = build_app(|app| {
        let mut engine = MissionEngine::default();
        engine.enqueue(Arc::new(
            MissionDefinition::new("Find your pills")
                .with_condition(ItemCountCondition::pills(2))
                .with_reward(UnlockReward::new("Key", "front_door"))
                .with_sub_mission(Arc::new(MissionDefinition::new("Get out"))),
        ));
        app.insert_resource(engine);
    });
    let door = app.world_mut().spawn(Door::locked("front_door")).id();
    let gate = app
        .world_mut()
        .spawn((Door::locked("gate"), UnlockOnMission("Find your pills".into())))
        .id();
    start(&mut app);
    run(&mut app, 1);

    let current = |app: &App| {
        app.world()
            .resource::<MissionEngine>()
            .current()
            .map(|m| m.name().to_string())
    };
    assert_eq!(current(&app).as_deref(), Some("Find your pills"));

    app.world_mut().resource_mut::<Inventory>().add(PILLS, 2);
    run(&mut app, 1);

    assert_eq!(app.world().resource::<Seen>().completed, vec!["Find your pills"]);
    let locked = |app: &App, entity| app.world().get::<Door>(entity).map(|d| d.locked);
    assert_eq!(locked(&app, door), Some(false));
    assert_eq!(locked(&app, gate), Some(false));

    run(&mut app, 1);
    assert_eq!(current(&app).as_deref(), Some("Get out"));
}

#[test]
fn timed_mission_fails_through_the_plugin() {
    let mut app = build_app(|app| {
        let mut engine = MissionEngine::default();
        engine.enqueue(Arc::new(
            MissionDefinition::new("Hurry")
                .with_time_limit(1.0)
                .with_condition(ItemCountCondition::pills(99)),
        ));
        app.insert_resource(engine).init_resource::<MissionDisplay>();
    });
    start(&mut app);
    run(&mut app, 2);

    let display = app.world().resource::<MissionDisplay>();
    assert_eq!(display.name, "Hurry");
    assert!(display.timer.starts_with("Time Limit: "));

    run(&mut app, 15);
    assert!(app.world().resource::<MissionEngine>().is_idle());
    assert_eq!(*app.world().resource::<MissionDisplay>(), MissionDisplay::default());
    assert!(app.world().resource::<Seen>().completed.is_empty());
}

#[test]
fn pill_lowers_anxiety_and_uses_one_pill() {
    let mut app = build_app(|app| {
        app.insert_resource(AnxietyEngine::new(
            AnxietyConfig {
                initial_anxiety: 50.0,
                ..AnxietyConfig::default()
            }
            .without_rolls(),
        ));
    });
    start(&mut app);
    app.world_mut().resource_mut::<Inventory>().add(PILLS, 2);

    app.world_mut().send_event(UsePill);
    run(&mut app, 1);
    assert!((anxiety(&app) - 30.0).abs() < 1e-4);
    assert_eq!(app.world().resource::<Inventory>().count(PILLS), 1);

    // Still on cooldown.
    app.world_mut().send_event(UsePill);
    run(&mut app, 1);
    assert_eq!(app.world().resource::<Inventory>().count(PILLS), 1);
}

#[test]
fn picking_up_pills_consumes_the_pickup() {
    let mut app = build_app(|_| {});
    let pickup = app
        .world_mut()
        .spawn(PillPickup {
            count: 3,
            ..PillPickup::default()
        })
        .id();
    start(&mut app);

    app.world_mut().send_event(InteractEvent { target: pickup });
    run(&mut app, 1);

    assert_eq!(app.world().resource::<Inventory>().count(PILLS), 3);
    assert!(!app.world().entities().contains(pickup));
}

#[test]
fn paused_simulation_does_not_tick() {
    let mut app = build_app(|_| {});
    start(&mut app);
    app.world_mut()
        .resource_mut::<AnxietyEngine>()
        .register_up(Arc::new(Constant(10.0)));

    app.world_mut()
        .resource_mut::<NextState<SimState>>()
        .set(SimState::Paused);
    run(&mut app, 1);
    let paused_at = anxiety(&app);

    run(&mut app, 10);
    assert_eq!(anxiety(&app), paused_at);
}
