//! World plugin - interactables and unlock handling.

use bevy::prelude::*;

use super::access::GameWorld;
use super::interactables::{Door, PillPickup, UnlockOnMission};
use crate::capabilities::{InteractOutcome, Interactable};
use crate::core::{MissionCompleted, SimSet, UnlockRequested};
use crate::player::{Inventory, PlayerPosition};

/// World plugin - routes interactions and door unlocks.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionFocus>()
            .init_resource::<InteractionPrompt>()
            .add_event::<InteractEvent>()
            .add_systems(Update, interact_key.in_set(SimSet::Input))
            .add_systems(Update, process_interactions.in_set(SimSet::Environment))
            .add_systems(
                Update,
                (unlock_doors, update_prompt).chain().in_set(SimSet::Feedback),
            );
    }
}

/// The player used `target`.
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractEvent {
    pub target: Entity,
}

/// Entity the player is looking at, set by the host's raycast.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InteractionFocus(pub Option<Entity>);

/// Prompt for the focused interactable, empty when there is none.
#[derive(Resource, Debug, Clone, Default)]
pub struct InteractionPrompt(pub String);

/// F interacts with the focused entity when a keyboard is present.
fn interact_key(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    focus: Res<InteractionFocus>,
    mut interactions: EventWriter<InteractEvent>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if !keyboard.just_pressed(KeyCode::KeyF) {
        return;
    }
    if let Some(target) = focus.0 {
        interactions.send(InteractEvent { target });
    }
}

fn process_interactions(
    mut commands: Commands,
    mut interactions: EventReader<InteractEvent>,
    mut doors: Query<(&mut Door, Option<&mut Transform>)>,
    mut pickups: Query<&mut PillPickup>,
    mut inventory: ResMut<Inventory>,
    player: Res<PlayerPosition>,
    mut unlocks: EventWriter<UnlockRequested>,
) {
    let mut world = GameWorld::new(&mut inventory, player.0);

    for event in interactions.read() {
        let outcome = if let Ok((mut door, transform)) = doors.get_mut(event.target) {
            let was_open = door.open;
            let outcome = door.interact(&mut world);
            if let Some(mut transform) = transform {
                if door.open != was_open {
                    let angle = if door.open { 90.0_f32 } else { -90.0 };
                    transform.rotate_y(angle.to_radians());
                }
            }
            outcome
        } else if let Ok(mut pickup) = pickups.get_mut(event.target) {
            pickup.interact(&mut world)
        } else {
            debug!("Nothing to interact with on {:?}", event.target);
            continue;
        };

        if outcome == InteractOutcome::Consumed {
            commands.entity(event.target).despawn_recursive();
        }
    }

    for target in world.take_unlocks() {
        unlocks.send(UnlockRequested { target });
    }
}

/// Unlock doors by id, and doors waiting on a completed mission.
fn unlock_doors(
    mut requests: EventReader<UnlockRequested>,
    mut completed: EventReader<MissionCompleted>,
    mut doors: Query<(&mut Door, Option<&UnlockOnMission>)>,
) {
    for request in requests.read() {
        let mut found = false;
        for (mut door, _) in doors.iter_mut().filter(|(d, _)| d.id == request.target) {
            door.unlock();
            found = true;
        }
        if !found {
            warn!("Unlock target '{}' not found", request.target);
        }
    }

    for mission in completed.read() {
        for (mut door, trigger) in &mut doors {
            if trigger.is_some_and(|t| t.0 == mission.name) {
                door.unlock();
            }
        }
    }
}

fn update_prompt(
    focus: Res<InteractionFocus>,
    doors: Query<&Door>,
    pickups: Query<&PillPickup>,
    mut prompt: ResMut<InteractionPrompt>,
) {
    let text = match focus.0 {
        Some(entity) => {
            if let Ok(door) = doors.get(entity) {
                door.prompt()
            } else if let Ok(pickup) = pickups.get(entity) {
                pickup.prompt()
            } else {
                String::new()
            }
        }
        None => String::new(),
    };

    if prompt.0 != text {
        prompt.0 = text;
    }
}
