//! Weather plugin - drifts the weather and keeps its anxiety factors
//! registered while they apply.

use std::sync::Arc;

use bevy::prelude::*;

use super::config::WeatherConfig;
use super::state::WeatherState;
use crate::anxiety::{
    AnxietyEngine, RainAnxietyFactor, ThunderAnxietyFactor, WindAnxietyFactor,
};
use crate::core::{insert_loaded, DebugCommand, SimRng, SimSet};
use crate::player::PlayerPosition;

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        insert_loaded(app, WeatherConfig::load);

        app.init_resource::<WeatherState>()
            .init_resource::<WeatherFactors>()
            .add_event::<LightningStruck>()
            .add_systems(
                Update,
                (track_indoor_zones, update_weather, sync_weather_factors)
                    .chain()
                    .in_set(SimSet::Environment),
            );
    }
}

/// Sent on every lightning strike, natural or forced.
#[derive(Event, Debug, Clone, Copy)]
pub struct LightningStruck;

/// Box-shaped area that counts as indoors, centred on its `Transform`.
#[derive(Component, Debug, Clone, Copy)]
pub struct IndoorZone {
    pub half_extents: Vec3,
}

impl IndoorZone {
    pub fn contains(&self, center: Vec3, point: Vec3) -> bool {
        let d = (point - center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y && d.z <= self.half_extents.z
    }
}

/// The weather's anxiety contributors.
#[derive(Resource)]
pub struct WeatherFactors {
    pub rain: Arc<RainAnxietyFactor>,
    pub wind: Arc<WindAnxietyFactor>,
    pub thunder: Arc<ThunderAnxietyFactor>,
}

impl FromWorld for WeatherFactors {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<WeatherConfig>()
            .cloned()
            .unwrap_or_default();
        Self::new(&config)
    }
}

impl WeatherFactors {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            rain: Arc::new(RainAnxietyFactor::new(config.rain_anxiety)),
            wind: Arc::new(WindAnxietyFactor::new(
                config.wind_anxiety,
                config.wind_anxiety_threshold,
                config.wind_anxiety_max_speed,
            )),
            thunder: Arc::new(ThunderAnxietyFactor::new(
                config.thunder_spike,
                config.thunder_spike_duration,
            )),
        }
    }
}

/// Set the indoor flag from `IndoorZone` entities, if there are any.
fn track_indoor_zones(
    player: Res<PlayerPosition>,
    zones: Query<(&Transform, &IndoorZone)>,
    config: Res<WeatherConfig>,
    mut weather: ResMut<WeatherState>,
    mut rng: ResMut<SimRng>,
) {
    if zones.is_empty() {
        return;
    }

    let indoor = player.0.is_some_and(|pos| {
        zones
            .iter()
            .any(|(transform, zone)| zone.contains(transform.translation, pos))
    });
    weather.set_indoor(indoor, &config, &mut rng.0);
}

fn update_weather(
    time: Res<Time>,
    config: Res<WeatherConfig>,
    mut weather: ResMut<WeatherState>,
    mut rng: ResMut<SimRng>,
    mut commands: EventReader<DebugCommand>,
    mut strikes: EventWriter<LightningStruck>,
) {
    let forced = commands
        .read()
        .filter(|c| matches!(c, DebugCommand::Thunder))
        .count();

    let natural = weather.update(time.delta_secs(), &config, &mut rng.0);

    if natural || forced > 0 {
        info!("Lightning strike");
        strikes.send(LightningStruck);
    }
}

fn sync_weather_factors(
    time: Res<Time>,
    weather: Res<WeatherState>,
    factors: Res<WeatherFactors>,
    mut strikes: EventReader<LightningStruck>,
    mut engine: ResMut<AnxietyEngine>,
) {
    let outdoors = !weather.is_indoor();

    factors.rain.set_intensity(weather.rain_intensity());
    if outdoors && factors.rain.intensity() > 0.0 {
        engine.register_up(factors.rain.clone());
    } else {
        engine.unregister_up(factors.rain.clone());
    }

    factors.wind.set_speed(weather.wind_speed());
    if outdoors && factors.wind.is_blowing() {
        engine.register_up(factors.wind.clone());
    } else {
        engine.unregister_up(factors.wind.clone());
    }

    let struck = strikes.read().count() > 0;
    let thunder_active = if struck {
        factors.thunder.strike();
        true
    } else {
        factors.thunder.update(time.delta_secs())
    };
    if thunder_active {
        engine.register_up(factors.thunder.clone());
    } else {
        engine.unregister_up(factors.thunder.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indoor_zone_is_a_box() {
        let zone = IndoorZone {
            half_extents: Vec3::new(2.0, 3.0, 4.0),
        };
        let center = Vec3::new(10.0, 0.0, 0.0);
        assert!(zone.contains(center, Vec3::new(12.0, -3.0, 4.0)));
        assert!(!zone.contains(center, Vec3::new(7.9, 0.0, 0.0)));
    }
}
