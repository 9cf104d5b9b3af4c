//! Affliction plugin - resolves requests and counts active afflictions down.

use bevy::prelude::*;

use super::catalog::{AfflictionCatalog, AfflictionKind};
use super::registry::{AfflictionRegistry, RequestOutcome};
use crate::core::{
    insert_loaded, AfflictionApplied, AfflictionExpired, AfflictionExtended, AfflictionRequest,
    DebugCommand, SimSet,
};
use crate::player::PlayerVitals;

/// Affliction plugin - owns the catalog and the registry.
pub struct AfflictionPlugin;

impl Plugin for AfflictionPlugin {
    fn build(&self, app: &mut App) {
        insert_loaded(app, AfflictionCatalog::load);

        app.init_resource::<AfflictionRegistry>()
            .add_systems(Update, queue_debug_afflictions.in_set(SimSet::Input))
            .add_systems(
                Update,
                (process_affliction_requests, tick_afflictions)
                    .chain()
                    .in_set(SimSet::Afflictions),
            );
    }
}

/// Turn `DebugCommand::QueueAffliction` into a regular request.
fn queue_debug_afflictions(
    mut commands: EventReader<DebugCommand>,
    mut requests: EventWriter<AfflictionRequest>,
) {
    for command in commands.read() {
        let DebugCommand::QueueAffliction(name) = command else {
            continue;
        };

        match name.parse::<AfflictionKind>() {
            Ok(kind) => {
                requests.send(AfflictionRequest::new(kind));
            }
            Err(e) => error!("Debug affliction ignored: {}", e),
        }
    }
}

/// Apply or merge every request sent this frame.
fn process_affliction_requests(
    mut requests: EventReader<AfflictionRequest>,
    catalog: Res<AfflictionCatalog>,
    mut registry: ResMut<AfflictionRegistry>,
    mut vitals: ResMut<PlayerVitals>,
    mut applied: EventWriter<AfflictionApplied>,
    mut extended: EventWriter<AfflictionExtended>,
) {
    for request in requests.read() {
        if request.passive && registry.has_kind(request.kind) {
            debug!("Rolled {:?} skipped, already active", request.kind);
            continue;
        }

        // Errors are already logged by the registry.
        let Ok(outcome) = registry.request(&catalog, request.kind, request.duration, &mut *vitals)
        else {
            continue;
        };

        match outcome {
            RequestOutcome::Applied { name, duration } => {
                applied.send(AfflictionApplied { name, duration });
            }
            RequestOutcome::Extended {
                name,
                added,
                remaining,
            } => {
                extended.send(AfflictionExtended {
                    name,
                    added,
                    remaining,
                });
            }
        }
    }
}

/// Count active afflictions down and announce the ones that ran out.
fn tick_afflictions(
    time: Res<Time>,
    mut registry: ResMut<AfflictionRegistry>,
    mut vitals: ResMut<PlayerVitals>,
    mut expired: EventWriter<AfflictionExpired>,
) {
    for name in registry.tick(time.delta_secs(), &mut *vitals) {
        expired.send(AfflictionExpired { name });
    }
}
