//! Drifting wind and rain, and the lightning timer.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::WeatherConfig;
use crate::core::SimRng;

/// A value moving toward a target at a fixed rate, picked so the target is
/// reached after one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    pub current: f32,
    pub target: f32,
    rate: f32,
}

impl Drift {
    fn new<R: Rng + ?Sized>(min: f32, max: f32, transition: f32, rng: &mut R) -> Self {
        let mut drift = Self {
            current: sample(min, max, rng),
            target: 0.0,
            rate: 0.0,
        };
        drift.retarget(min, max, transition, rng);
        drift
    }

    fn retarget<R: Rng + ?Sized>(&mut self, min: f32, max: f32, transition: f32, rng: &mut R) {
        self.target = sample(min, max, rng);
        self.rate = (self.target - self.current).abs() / transition;
    }

    /// Move toward the target. Returns true when it was reached.
    fn step(&mut self, dt: f32) -> bool {
        let max_step = self.rate * dt;
        let diff = self.target - self.current;
        if diff.abs() <= max_step || diff.abs() <= f32::EPSILON {
            self.current = self.target;
            true
        } else {
            self.current += max_step.copysign(diff);
            false
        }
    }
}

fn sample<R: Rng + ?Sized>(min: f32, max: f32, rng: &mut R) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Current weather. Frozen while the player is indoors.
#[derive(Resource, Debug, Clone)]
pub struct WeatherState {
    pub wind: Drift,
    pub rain: Drift,
    lightning_timer: f32,
    indoor: bool,
}

impl FromWorld for WeatherState {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<WeatherConfig>()
            .cloned()
            .unwrap_or_default();
        match world.get_resource_mut::<SimRng>() {
            Some(mut rng) => Self::new(&config, &mut rng.0),
            None => Self::new(&config, &mut StdRng::from_entropy()),
        }
    }
}

impl WeatherState {
    pub fn new<R: Rng + ?Sized>(config: &WeatherConfig, rng: &mut R) -> Self {
        Self {
            wind: Drift::new(config.wind_min, config.wind_max, config.wind_transition, rng),
            rain: Drift::new(config.rain_min, config.rain_max, config.rain_transition, rng),
            lightning_timer: lightning_interval(config, rng),
            indoor: false,
        }
    }

    pub fn wind_speed(&self) -> f32 {
        self.wind.current
    }

    pub fn rain_intensity(&self) -> f32 {
        self.rain.current
    }

    pub fn is_indoor(&self) -> bool {
        self.indoor
    }

    pub fn seconds_to_lightning(&self) -> f32 {
        self.lightning_timer
    }

    /// Going back outside restarts the lightning wait.
    pub fn set_indoor<R: Rng + ?Sized>(&mut self, indoor: bool, config: &WeatherConfig, rng: &mut R) {
        if self.indoor == indoor {
            return;
        }
        self.indoor = indoor;
        if indoor {
            info!("Player went indoors, weather paused");
        } else {
            info!("Player went outdoors, weather resumed");
            self.lightning_timer = lightning_interval(config, rng);
        }
    }

    /// Advance drift and the lightning timer. Returns true on a strike.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, config: &WeatherConfig, rng: &mut R) -> bool {
        if self.indoor {
            return false;
        }

        if self.wind.step(dt) {
            self.wind
                .retarget(config.wind_min, config.wind_max, config.wind_transition, rng);
        }
        if self.rain.step(dt) {
            self.rain
                .retarget(config.rain_min, config.rain_max, config.rain_transition, rng);
        }

        self.lightning_timer -= dt;
        if self.lightning_timer <= 0.0 {
            self.lightning_timer = lightning_interval(config, rng);
            return true;
        }
        false
    }
}

fn lightning_interval<R: Rng + ?Sized>(config: &WeatherConfig, rng: &mut R) -> f32 {
    sample(config.lightning_min_interval, config.lightning_max_interval, rng)
}
