//! Anxiety plugin - the meter, its contributors and the relief actions.

use std::sync::Arc;

use bevy::prelude::*;

use super::engine::{AnxietyBand, AnxietyEngine};
use super::factors::{EarplugFactor, LocationAnxietyFactor};
use super::relief::*;
use crate::affliction::AfflictionRegistry;
use crate::core::{insert_loaded, load_or_default, AfflictionRequest, DataDir, SimRng, SimSet};
use crate::player::{Inventory, PlayerPosition, PlayerVitals};

/// Anxiety plugin - ticks the engine and feeds rolled afflictions to the
/// affliction systems.
pub struct AnxietyPlugin;

impl Plugin for AnxietyPlugin {
    fn build(&self, app: &mut App) {
        insert_loaded(app, AnxietyEngine::load);
        insert_loaded(app, ReliefTools::load);

        app.init_resource::<ReliefInput>()
            .add_event::<UsePill>()
            .add_event::<ToggleEarplugs>()
            .add_systems(
                Update,
                (use_pills, toggle_earplugs).in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                (advance_relief_timers, track_safe_zones, track_anxiety_sources)
                    .in_set(SimSet::Environment),
            )
            .add_systems(
                Update,
                (breathe, tick_anxiety).chain().in_set(SimSet::Anxiety),
            );
    }
}

/// A spot the player can do the breathing exercise in.
#[derive(Component, Debug, Clone, Copy)]
pub struct SafeZone {
    pub radius: f32,
}

/// A place that makes the player anxious when nearby.
#[derive(Component, Clone)]
pub struct AnxietySource {
    pub factor: Arc<LocationAnxietyFactor>,
}

impl AnxietySource {
    pub fn new(base_increase: f32, max_distance: f32) -> Self {
        Self {
            factor: Arc::new(LocationAnxietyFactor::new(base_increase, max_distance)),
        }
    }
}

/// Pills, breathing exercise and earplugs, tuned from `relief.ron`.
#[derive(Resource)]
pub struct ReliefTools {
    pub pills: PillDispenser,
    pub breathing: BreathingExercise,
    pub earplugs: Arc<EarplugFactor>,
}

impl Default for ReliefTools {
    fn default() -> Self {
        Self::new(ReliefConfig::default())
    }
}

impl ReliefTools {
    pub fn load(dir: &DataDir) -> Self {
        Self::new(load_or_default(&dir.file(RELIEF_FILE), ReliefConfig::validate))
    }

    pub fn new(config: ReliefConfig) -> Self {
        Self {
            pills: PillDispenser::new(config.pills),
            breathing: BreathingExercise::new(config.breathing),
            earplugs: Arc::new(EarplugFactor::new(config.earplugs)),
        }
    }
}

fn use_pills(
    mut events: EventReader<UsePill>,
    mut relief: ResMut<ReliefTools>,
    mut inventory: ResMut<Inventory>,
    mut engine: ResMut<AnxietyEngine>,
    mut rng: ResMut<SimRng>,
    mut requests: EventWriter<AfflictionRequest>,
) {
    for _ in events.read() {
        let outcome = relief.pills.try_use(&mut inventory, &mut engine, &mut rng.0);
        match outcome {
            PillOutcome::Taken {
                side_effect: Some(kind),
                ..
            } => {
                requests.send(AfflictionRequest::new(kind));
            }
            PillOutcome::OnCooldown { remaining } => {
                debug!("Pill on cooldown for {:.1}s", remaining);
            }
            _ => {}
        }
    }
}

fn toggle_earplugs(
    mut events: EventReader<ToggleEarplugs>,
    relief: Res<ReliefTools>,
    mut engine: ResMut<AnxietyEngine>,
) {
    for _ in events.read() {
        if relief.earplugs.toggle() {
            info!("Earplugs in");
            engine.register_down(relief.earplugs.clone());
        } else {
            info!("Earplugs out");
            engine.unregister_down(relief.earplugs.clone());
        }
    }
}

fn advance_relief_timers(time: Res<Time>, mut relief: ResMut<ReliefTools>) {
    let dt = time.delta_secs();
    relief.earplugs.update(dt);
    relief.pills.advance(dt);
}

/// Set the safe-zone flag from `SafeZone` entities, if there are any.
fn track_safe_zones(
    player: Res<PlayerPosition>,
    zones: Query<(&Transform, &SafeZone)>,
    mut input: ResMut<ReliefInput>,
) {
    if zones.is_empty() {
        return;
    }

    let inside = player.0.is_some_and(|pos| {
        zones
            .iter()
            .any(|(transform, zone)| transform.translation.distance(pos) <= zone.radius)
    });
    if input.in_safe_zone != inside {
        input.in_safe_zone = inside;
    }
}

/// Feed player distance to each location factor and keep it registered
/// only while in range.
fn track_anxiety_sources(
    player: Res<PlayerPosition>,
    sources: Query<(&Transform, &AnxietySource)>,
    mut engine: ResMut<AnxietyEngine>,
) {
    for (transform, source) in &sources {
        let distance = player
            .0
            .map_or(f32::INFINITY, |pos| transform.translation.distance(pos));
        source.factor.set_distance(distance);

        if source.factor.in_range() {
            engine.register_up(source.factor.clone());
        } else {
            engine.unregister_up(source.factor.clone());
        }
    }
}

fn breathe(
    time: Res<Time>,
    input: Res<ReliefInput>,
    mut relief: ResMut<ReliefTools>,
    mut engine: ResMut<AnxietyEngine>,
    mut vitals: ResMut<PlayerVitals>,
) {
    let delta = relief
        .breathing
        .update(time.delta_secs(), input.breathing_held, input.in_safe_zone);
    if delta != 0.0 {
        engine.modify(delta);
    }

    let locked = relief.breathing.locks_movement();
    if vitals.movement_locked != locked {
        vitals.movement_locked = locked;
    }
}

fn tick_anxiety(
    time: Res<Time>,
    mut engine: ResMut<AnxietyEngine>,
    registry: Res<AfflictionRegistry>,
    mut rng: ResMut<SimRng>,
    mut requests: EventWriter<AfflictionRequest>,
    mut last_band: Local<Option<AnxietyBand>>,
) {
    let rolled = engine.tick(time.delta_secs(), &mut rng.0, &registry);

    let band = engine.band();
    if *last_band != Some(band) {
        info!(
            "Anxiety band: {:?} ({:.1}, {} rising / {} falling factors)",
            band,
            engine.current(),
            engine.up_factor_count(),
            engine.down_factor_count()
        );
        *last_band = Some(band);
    }

    for kind in rolled {
        debug!("Anxiety rolled {:?}", kind);
        requests.send(AfflictionRequest::passive(kind));
    }
}
