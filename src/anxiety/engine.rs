//! The anxiety meter and its contributor lists.

use std::sync::Arc;

use bevy::prelude::*;
use rand::Rng;

use super::config::{AnxietyConfig, BandChance, ANXIETY_FILE};
use crate::affliction::{AfflictionKind, AfflictionRegistry};
use crate::capabilities::{AnxietyDownFactor, AnxietyUpFactor};
use crate::core::{load_or_default, DataDir};

pub type UpFactorHandle = Arc<dyn AnxietyUpFactor>;
pub type DownFactorHandle = Arc<dyn AnxietyDownFactor>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnxietyBand {
    Low,
    Mid,
    High,
    Critical,
}

/// Band for `value`. Boundaries belong to the lower band.
pub fn band_for(config: &AnxietyConfig, value: f32) -> AnxietyBand {
    if value <= config.level1 {
        AnxietyBand::Low
    } else if value <= config.level2 {
        AnxietyBand::Mid
    } else if value <= config.level3 {
        AnxietyBand::High
    } else {
        AnxietyBand::Critical
    }
}

/// Bounded anxiety level driven by registered contributors.
///
/// Each tick integrates the summed up-rate, then the summed down-rate, clamps
/// to `[0, max]`, and rolls the current band's affliction table.
#[derive(Resource)]
pub struct AnxietyEngine {
    config: AnxietyConfig,
    current: f32,
    up_factors: Vec<UpFactorHandle>,
    down_factors: Vec<DownFactorHandle>,
}

impl Default for AnxietyEngine {
    fn default() -> Self {
        Self::new(AnxietyConfig::default())
    }
}

impl AnxietyEngine {
    /// Engine tuned from `anxiety.ron`, or the defaults.
    pub fn load(dir: &DataDir) -> Self {
        Self::new(load_or_default(&dir.file(ANXIETY_FILE), AnxietyConfig::validate))
    }

    pub fn new(config: AnxietyConfig) -> Self {
        let current = clamp_level(config.initial_anxiety, config.max_anxiety);
        Self {
            config,
            current,
            up_factors: Vec::new(),
            down_factors: Vec::new(),
        }
    }

    pub fn config(&self) -> &AnxietyConfig {
        &self.config
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.config.max_anxiety
    }

    pub fn band(&self) -> AnxietyBand {
        band_for(&self.config, self.current)
    }

    /// Add `delta` and clamp. Returns the new level.
    pub fn modify(&mut self, delta: f32) -> f32 {
        if !delta.is_finite() {
            warn!("Ignoring non-finite anxiety change {}", delta);
            return self.current;
        }
        self.current = clamp_level(self.current + delta, self.config.max_anxiety);
        self.current
    }

    /// Returns false if the handle was already registered.
    pub fn register_up(&mut self, factor: UpFactorHandle) -> bool {
        if self.up_factors.iter().any(|f| Arc::ptr_eq(f, &factor)) {
            return false;
        }
        debug!("Anxiety up-factor registered: {}", factor.label());
        self.up_factors.push(factor);
        true
    }

    /// Returns false if the handle was not registered.
    pub fn unregister_up(&mut self, factor: UpFactorHandle) -> bool {
        let before = self.up_factors.len();
        self.up_factors.retain(|f| !Arc::ptr_eq(f, &factor));
        self.up_factors.len() != before
    }

    pub fn register_down(&mut self, factor: DownFactorHandle) -> bool {
        if self.down_factors.iter().any(|f| Arc::ptr_eq(f, &factor)) {
            return false;
        }
        debug!("Anxiety down-factor registered: {}", factor.label());
        self.down_factors.push(factor);
        true
    }

    pub fn unregister_down(&mut self, factor: DownFactorHandle) -> bool {
        let before = self.down_factors.len();
        self.down_factors.retain(|f| !Arc::ptr_eq(f, &factor));
        self.down_factors.len() != before
    }

    pub fn up_factor_count(&self) -> usize {
        self.up_factors.len()
    }

    pub fn down_factor_count(&self) -> usize {
        self.down_factors.len()
    }

    /// Sum of all up-rates. Non-finite rates are skipped.
    pub fn up_rate(&self) -> f32 {
        sum_rates(self.up_factors.iter().map(|f| (f.label(), f.rate())))
    }

    /// Sum of all down-rates. Non-finite rates are skipped.
    pub fn down_rate(&self) -> f32 {
        sum_rates(self.down_factors.iter().map(|f| (f.label(), f.rate())))
    }

    /// Integrate contributors over `dt`, then roll for afflictions.
    ///
    /// Returns the kinds to request. Kinds the registry already holds are
    /// left out.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        rng: &mut R,
        afflictions: &AfflictionRegistry,
    ) -> Vec<AfflictionKind> {
        self.integrate(dt);
        self.roll_afflictions(rng, |kind| afflictions.has_kind(kind))
    }

    /// Apply up then down rates for `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        let max = self.config.max_anxiety;
        let up = self.up_rate();
        self.current = clamp_level(self.current + up * dt, max);
        let down = self.down_rate();
        self.current = clamp_level(self.current - down * dt, max);
    }

    /// Roll each chance of the current band once.
    pub fn roll_afflictions<R, F>(&self, rng: &mut R, is_active: F) -> Vec<AfflictionKind>
    where
        R: Rng + ?Sized,
        F: Fn(AfflictionKind) -> bool,
    {
        let mut rolled: Vec<AfflictionKind> = Vec::new();
        for chance in self.chances(self.band()) {
            let roll: f32 = rng.gen();
            if roll < chance.chance && !is_active(chance.kind) && !rolled.contains(&chance.kind) {
                rolled.push(chance.kind);
            }
        }
        rolled
    }

    pub fn chances(&self, band: AnxietyBand) -> &[BandChance] {
        match band {
            AnxietyBand::Low => &self.config.low,
            AnxietyBand::Mid => &self.config.mid,
            AnxietyBand::High => &self.config.high,
            AnxietyBand::Critical => &self.config.critical,
        }
    }
}

/// Clamp to `[0, max]`. Never panics, even on an unvalidated `max`.
fn clamp_level(value: f32, max: f32) -> f32 {
    value.min(max).max(0.0)
}

fn sum_rates<'a>(rates: impl Iterator<Item = (&'a str, f32)>) -> f32 {
    rates
        .filter(|(label, rate)| {
            if rate.is_finite() {
                true
            } else {
                warn!("Skipping anxiety factor '{}' with rate {}", label, rate);
                false
            }
        })
        .map(|(_, rate)| rate)
        .sum()
}
