//! Core plugin that sets up simulation states, events and system ordering.

use bevy::prelude::*;

use super::data::DataDir;
use super::events::*;
use super::rng::SimRng;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Simulation states (Loading, Running, Paused)
/// - Global events (AfflictionRequest, MissionStarted, etc.)
/// - The chained `SimSet` ordering every engine plugs into
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Shared resources (kept if inserted beforehand)
            .init_resource::<DataDir>()
            .init_resource::<SimRng>()

            .init_state::<SimState>()

            // Register global events
            .add_event::<AfflictionRequest>()
            .add_event::<AfflictionApplied>()
            .add_event::<AfflictionExtended>()
            .add_event::<AfflictionExpired>()
            .add_event::<MissionStarted>()
            .add_event::<MissionCompleted>()
            .add_event::<MissionFailed>()
            .add_event::<UnlockRequested>()
            .add_event::<DebugCommand>()

            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Environment,
                    SimSet::Anxiety,
                    SimSet::Afflictions,
                    SimSet::Missions,
                    SimSet::Feedback,
                )
                    .chain()
                    .run_if(in_state(SimState::Running)),
            )

            // Data files are read while plugins build, so loading is done
            // by the time the first frame runs.
            .add_systems(OnEnter(SimState::Loading), finish_loading)

            .add_systems(Update, handle_pause_input);
    }
}

fn finish_loading(mut next_state: ResMut<NextState<SimState>>) {
    next_state.set(SimState::Running);
}

/// Handle Escape key to pause/unpause when a keyboard is present.
fn handle_pause_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    current_state: Res<State<SimState>>,
    mut next_state: ResMut<NextState<SimState>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            SimState::Running => next_state.set(SimState::Paused),
            SimState::Paused => next_state.set(SimState::Running),
            SimState::Loading => {}
        }
    }
}
