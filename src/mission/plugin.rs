//! Mission plugin - ticks the workflow engine and publishes its events.

use bevy::prelude::*;

use super::engine::{MissionEngine, MissionEvent};
use crate::core::{
    insert_loaded, DebugCommand, MissionCompleted, MissionFailed, MissionStarted, SimSet, UnlockRequested,
};
use crate::player::{Inventory, PlayerPosition};
use crate::world::GameWorld;

/// Mission plugin - owns the engine, loaded with the initial queue from
/// `missions.ron`.
pub struct MissionPlugin;

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        insert_loaded(app, MissionEngine::load);

        app.add_systems(
            Update,
            (tick_missions, publish_mission_events)
                .chain()
                .in_set(SimSet::Missions),
        )
        .add_systems(Update, update_mission_display.in_set(SimSet::Feedback));
    }
}

/// Text for the mission HUD. Inserted by whoever draws it.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionDisplay {
    pub name: String,
    pub description: String,
    pub timer: String,
}

fn tick_missions(
    time: Res<Time>,
    mut engine: ResMut<MissionEngine>,
    mut inventory: ResMut<Inventory>,
    player: Res<PlayerPosition>,
    mut commands: EventReader<DebugCommand>,
    mut unlocks: EventWriter<UnlockRequested>,
) {
    let mut world = GameWorld::new(&mut inventory, player.0);

    for command in commands.read() {
        match command {
            DebugCommand::CompleteMission => {
                if !engine.complete_current(&mut world) {
                    info!("No active mission to complete");
                }
            }
            DebugCommand::FailMission => {
                if !engine.fail_current() {
                    info!("No active mission to fail");
                }
            }
            _ => {}
        }
    }

    engine.tick(time.delta_secs(), &mut world);

    for target in world.take_unlocks() {
        unlocks.send(UnlockRequested { target });
    }
}

fn publish_mission_events(
    mut engine: ResMut<MissionEngine>,
    mut started: EventWriter<MissionStarted>,
    mut completed: EventWriter<MissionCompleted>,
    mut failed: EventWriter<MissionFailed>,
) {
    for event in engine.drain_events() {
        match event {
            MissionEvent::Started {
                name,
                description,
                time_limit_text,
            } => {
                started.send(MissionStarted {
                    name,
                    description,
                    time_limit_text,
                });
            }
            MissionEvent::Completed { name } => {
                completed.send(MissionCompleted { name });
            }
            MissionEvent::Failed { name } => {
                failed.send(MissionFailed { name });
            }
        }
    }
}

/// Mirror the active mission into `MissionDisplay`. Without one the
/// missions still run; this warns once.
fn update_mission_display(
    engine: Res<MissionEngine>,
    display: Option<ResMut<MissionDisplay>>,
    mut warned: Local<bool>,
) {
    let Some(mut display) = display else {
        if !*warned {
            warn!("No MissionDisplay resource, mission text will not be shown");
            *warned = true;
        }
        return;
    };

    let next = match engine.current() {
        Some(mission) => MissionDisplay {
            name: mission.name().to_string(),
            description: mission.definition().description.clone(),
            timer: engine.timer_text(),
        },
        None => MissionDisplay::default(),
    };

    if *display != next {
        *display = next;
    }
}
