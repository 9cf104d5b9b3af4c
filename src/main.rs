//! Dread - headless entry point.
//!
//! Runs the simulation without a window and logs what happens: anxiety
//! bands, afflictions, missions and weather. Data is read from
//! `assets/data/`.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use dread_core::anxiety::{AnxietySource, SafeZone};
use dread_core::core::{AfflictionApplied, AfflictionExpired, MissionStarted};
use dread_core::mission::MissionDisplay;
use dread_core::player::{Inventory, PlayerPosition, PILLS};
use dread_core::weather::IndoorZone;
use dread_core::world::{Door, PillPickup, UnlockOnMission};

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(StatesPlugin)

        // Our game plugin
        .add_plugins(dread_core::DreadPlugin)

        .init_resource::<MissionDisplay>()
        .add_systems(Startup, spawn_demo_scene)
        .add_systems(Update, log_feedback)
        .run();
}

/// A flat with a locked front door, a pill bottle and a scary corner.
fn spawn_demo_scene(
    mut commands: Commands,
    mut position: ResMut<PlayerPosition>,
    mut inventory: ResMut<Inventory>,
) {
    position.0 = Some(Vec3::ZERO);
    inventory.add(PILLS, 1);

    commands.spawn((
        Door::locked("front_door"),
        UnlockOnMission("Find your pills".to_string()),
        Transform::from_xyz(0.0, 0.0, 8.0),
    ));
    commands.spawn((PillPickup::default(), Transform::from_xyz(3.0, 0.0, 1.0)));
    commands.spawn((AnxietySource::new(0.2, 10.0), Transform::from_xyz(2.0, 0.0, 2.0)));
    commands.spawn((SafeZone { radius: 3.0 }, Transform::from_xyz(-4.0, 0.0, 0.0)));
    commands.spawn((
        IndoorZone {
            half_extents: Vec3::new(6.0, 3.0, 8.0),
        },
        Transform::default(),
    ));
}

fn log_feedback(
    mut started: EventReader<MissionStarted>,
    mut applied: EventReader<AfflictionApplied>,
    mut expired: EventReader<AfflictionExpired>,
    hud: Res<MissionDisplay>,
) {
    for event in started.read() {
        info!("[HUD] {} - {} {}", event.name, event.description, event.time_limit_text);
    }
    for event in applied.read() {
        info!("[HUD] {} for {:.1}s", event.name, event.duration);
    }
    for event in expired.read() {
        info!("[HUD] {} wore off", event.name);
    }
    if hud.is_changed() && !hud.timer.is_empty() {
        debug!("[HUD] {}", hud.timer);
    }
}
