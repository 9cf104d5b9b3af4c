//! Concrete anxiety contributors.
//!
//! Every factor keeps its live inputs in atomics so the same `Arc` can sit in
//! the engine's lists while gameplay systems update it.

use serde::Deserialize;

use crate::capabilities::{AnxietyDownFactor, AnxietyUpFactor};
use crate::core::{SharedFlag, SharedScalar};

/// Rises with rain intensity in `[0, 1]`.
#[derive(Debug)]
pub struct RainAnxietyFactor {
    base_increase: f32,
    intensity: SharedScalar,
}

impl RainAnxietyFactor {
    pub fn new(base_increase: f32) -> Self {
        Self {
            base_increase,
            intensity: SharedScalar::new(0.0),
        }
    }

    pub fn set_intensity(&self, intensity: f32) {
        self.intensity.set(intensity.clamp(0.0, 1.0));
    }

    pub fn intensity(&self) -> f32 {
        self.intensity.get()
    }
}

impl AnxietyUpFactor for RainAnxietyFactor {
    fn rate(&self) -> f32 {
        self.base_increase * self.intensity()
    }

    fn label(&self) -> &str {
        "rain"
    }
}

/// Rises once wind passes a threshold, scaling up to `max_speed`.
#[derive(Debug)]
pub struct WindAnxietyFactor {
    base_increase: f32,
    threshold: f32,
    max_speed: f32,
    speed: SharedScalar,
}

impl WindAnxietyFactor {
    pub fn new(base_increase: f32, threshold: f32, max_speed: f32) -> Self {
        Self {
            base_increase,
            threshold,
            max_speed,
            speed: SharedScalar::new(0.0),
        }
    }

    pub fn set_speed(&self, speed: f32) {
        self.speed.set(speed.max(0.0));
    }

    pub fn speed(&self) -> f32 {
        self.speed.get()
    }

    /// Wind only contributes while above the threshold.
    pub fn is_blowing(&self) -> bool {
        self.speed() > self.threshold
    }
}

impl AnxietyUpFactor for WindAnxietyFactor {
    fn rate(&self) -> f32 {
        let speed = self.speed();
        if speed < self.threshold {
            return 0.0;
        }
        let span = self.max_speed - self.threshold;
        let t = if span > 0.0 {
            ((speed - self.threshold) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.base_increase * t
    }

    fn label(&self) -> &str {
        "wind"
    }
}

/// Flat spike for a short while after each lightning strike.
#[derive(Debug)]
pub struct ThunderAnxietyFactor {
    spike_increase: f32,
    spike_duration: f32,
    remaining: SharedScalar,
}

impl ThunderAnxietyFactor {
    pub fn new(spike_increase: f32, spike_duration: f32) -> Self {
        Self {
            spike_increase,
            spike_duration,
            remaining: SharedScalar::new(0.0),
        }
    }

    /// Start (or restart) the spike.
    pub fn strike(&self) {
        self.remaining.set(self.spike_duration);
    }

    /// Count the spike down. Returns whether it is still active.
    pub fn update(&self, dt: f32) -> bool {
        let remaining = (self.remaining.get() - dt).max(0.0);
        self.remaining.set(remaining);
        remaining > 0.0
    }

    pub fn is_active(&self) -> bool {
        self.remaining.get() > 0.0
    }
}

impl AnxietyUpFactor for ThunderAnxietyFactor {
    fn rate(&self) -> f32 {
        if self.is_active() {
            self.spike_increase
        } else {
            0.0
        }
    }

    fn label(&self) -> &str {
        "thunder"
    }
}

/// Rises near a scary spot, linearly falling to zero at `max_distance`.
#[derive(Debug)]
pub struct LocationAnxietyFactor {
    base_increase: f32,
    max_distance: f32,
    distance: SharedScalar,
}

impl LocationAnxietyFactor {
    pub fn new(base_increase: f32, max_distance: f32) -> Self {
        Self {
            base_increase,
            max_distance,
            distance: SharedScalar::new(f32::INFINITY),
        }
    }

    pub fn set_distance(&self, distance: f32) {
        self.distance.set(distance);
    }

    pub fn in_range(&self) -> bool {
        self.distance.get() <= self.max_distance
    }
}

impl AnxietyUpFactor for LocationAnxietyFactor {
    fn rate(&self) -> f32 {
        if !self.in_range() || self.max_distance <= 0.0 {
            return 0.0;
        }
        self.base_increase * (1.0 - self.distance.get() / self.max_distance)
    }

    fn label(&self) -> &str {
        "location"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EarplugConfig {
    pub max_reduction: f32,
    /// Effectiveness lost per second while worn.
    pub decline_rate: f32,
    /// Seconds before worn-out plugs start recovering.
    pub cooldown: f32,
    /// Effectiveness regained per second once the cooldown is over.
    pub recovery_rate: f32,
}

impl Default for EarplugConfig {
    fn default() -> Self {
        Self {
            max_reduction: 10.0,
            decline_rate: 0.2,
            cooldown: 30.0,
            recovery_rate: 0.1,
        }
    }
}

/// Earplugs lower anxiety while worn, losing effectiveness over time.
#[derive(Debug)]
pub struct EarplugFactor {
    config: EarplugConfig,
    worn: SharedFlag,
    effectiveness: SharedScalar,
    cooldown: SharedScalar,
}

impl EarplugFactor {
    pub fn new(config: EarplugConfig) -> Self {
        Self {
            config,
            worn: SharedFlag::new(false),
            effectiveness: SharedScalar::new(1.0),
            cooldown: SharedScalar::new(0.0),
        }
    }

    /// Put in or take out. Returns whether they are worn afterwards.
    pub fn toggle(&self) -> bool {
        let worn = !self.worn.get();
        self.worn.set(worn);
        if worn {
            self.cooldown.set(self.config.cooldown);
        }
        worn
    }

    pub fn is_worn(&self) -> bool {
        self.worn.get()
    }

    pub fn effectiveness(&self) -> f32 {
        self.effectiveness.get()
    }

    pub fn update(&self, dt: f32) {
        if self.is_worn() {
            let e = (self.effectiveness() - self.config.decline_rate * dt).max(0.0);
            self.effectiveness.set(e);
            return;
        }

        let cooldown = self.cooldown.get();
        if cooldown > 0.0 {
            self.cooldown.set((cooldown - dt).max(0.0));
        } else {
            let e = (self.effectiveness() + self.config.recovery_rate * dt).min(1.0);
            self.effectiveness.set(e);
        }
    }
}

impl AnxietyDownFactor for EarplugFactor {
    fn rate(&self) -> f32 {
        if self.is_worn() {
            self.config.max_reduction * self.effectiveness()
        } else {
            0.0
        }
    }

    fn label(&self) -> &str {
        "earplugs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_scales_with_intensity() {
        let rain = RainAnxietyFactor::new(0.3);
        assert_eq!(rain.rate(), 0.0);
        rain.set_intensity(0.5);
        assert!((rain.rate() - 0.15).abs() < 1e-6);
        rain.set_intensity(4.0);
        assert!((rain.rate() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn wind_is_silent_below_threshold() {
        let wind = WindAnxietyFactor::new(4.0, 1.0, 30.0);
        wind.set_speed(0.8);
        assert!(!wind.is_blowing());
        assert_eq!(wind.rate(), 0.0);

        wind.set_speed(15.5);
        assert!(wind.is_blowing());
        assert!((wind.rate() - 2.0).abs() < 1e-5);

        wind.set_speed(80.0);
        assert_eq!(wind.rate(), 4.0);
    }

    #[test]
    fn thunder_spike_runs_out() {
        let thunder = ThunderAnxietyFactor::new(20.0, 1.0);
        assert_eq!(thunder.rate(), 0.0);

        thunder.strike();
        assert_eq!(thunder.rate(), 20.0);
        assert!(thunder.update(0.6));
        assert!(!thunder.update(0.6));
        assert_eq!(thunder.rate(), 0.0);
    }

    #[test]
    fn location_falls_off_with_distance() {
        let spot = LocationAnxietyFactor::new(0.2, 10.0);
        assert_eq!(spot.rate(), 0.0);

        spot.set_distance(0.0);
        assert!((spot.rate() - 0.2).abs() < 1e-6);
        spot.set_distance(5.0);
        assert!((spot.rate() - 0.1).abs() < 1e-6);
        spot.set_distance(10.5);
        assert_eq!(spot.rate(), 0.0);
    }

    #[test]
    fn earplugs_wear_out_and_recover_after_cooldown() {
        let plugs = EarplugFactor::new(EarplugConfig {
            cooldown: 2.0,
            ..EarplugConfig::default()
        });
        assert_eq!(plugs.rate(), 0.0);

        assert!(plugs.toggle());
        assert_eq!(plugs.rate(), 10.0);
        plugs.update(2.5);
        assert!((plugs.effectiveness() - 0.5).abs() < 1e-6);
        assert!((plugs.rate() - 5.0).abs() < 1e-5);

        assert!(!plugs.toggle());
        assert_eq!(plugs.rate(), 0.0);
        plugs.update(2.0);
        assert!((plugs.effectiveness() - 0.5).abs() < 1e-6);
        plugs.update(1.0);
        assert!((plugs.effectiveness() - 0.6).abs() < 1e-6);
    }
}
