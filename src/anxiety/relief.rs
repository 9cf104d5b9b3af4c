//! Player-driven anxiety relief: pills, breathing and earplugs.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

use super::engine::AnxietyEngine;
use super::factors::EarplugConfig;
use crate::affliction::AfflictionKind;
use crate::core::DataLoadError;
use crate::player::{Inventory, PILLS};

pub(crate) const RELIEF_FILE: &str = "relief.ron";

/// Player asked to swallow a pill.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct UsePill;

/// Player asked to put in or take out the earplugs.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleEarplugs;

/// Held-input state fed by the host each frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ReliefInput {
    pub breathing_held: bool,
    pub in_safe_zone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PillConfig {
    pub reduction: f32,
    pub cooldown: f32,
    /// Uses allowed inside one window before a side effect is rolled.
    pub overuse_threshold: u32,
    pub overuse_window: f32,
    pub fatigue_chance: f32,
    pub drowsiness_chance: f32,
    pub blurred_vision_chance: f32,
}

impl Default for PillConfig {
    fn default() -> Self {
        Self {
            reduction: 20.0,
            cooldown: 10.0,
            overuse_threshold: 3,
            overuse_window: 30.0,
            fatigue_chance: 0.4,
            drowsiness_chance: 0.3,
            blurred_vision_chance: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    /// Anxiety removed per second at full effectiveness.
    pub base_rate: f32,
    pub decline_rate: f32,
    pub min_effectiveness: f32,
    pub cooldown: f32,
    pub require_safe_zone: bool,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            base_rate: 10.0,
            decline_rate: 0.1,
            min_effectiveness: 0.2,
            cooldown: 10.0,
            require_safe_zone: true,
        }
    }
}

/// Contents of `relief.ron`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ReliefConfig {
    pub pills: PillConfig,
    pub breathing: BreathingConfig,
    pub earplugs: EarplugConfig,
}

impl ReliefConfig {
    pub fn validate(self) -> Result<Self, DataLoadError> {
        let p = &self.pills;
        let chances = [p.fatigue_chance, p.drowsiness_chance, p.blurred_vision_chance];
        if chances.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(DataLoadError::invalid(
                RELIEF_FILE,
                "pill side effect chances must be in [0, 1]",
            ));
        }
        if p.reduction < 0.0 || p.cooldown < 0.0 || p.overuse_window <= 0.0 {
            return Err(DataLoadError::invalid(
                RELIEF_FILE,
                "pill reduction and cooldown must be >= 0, window > 0",
            ));
        }

        let b = &self.breathing;
        if !(0.0..=1.0).contains(&b.min_effectiveness) || b.base_rate < 0.0 {
            return Err(DataLoadError::invalid(
                RELIEF_FILE,
                "breathing min_effectiveness must be in [0, 1] and base_rate >= 0",
            ));
        }

        if self.earplugs.max_reduction < 0.0 {
            return Err(DataLoadError::invalid(
                RELIEF_FILE,
                "earplug max_reduction must be >= 0",
            ));
        }

        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PillOutcome {
    OnCooldown { remaining: f32 },
    Empty,
    Taken {
        relieved: f32,
        side_effect: Option<AfflictionKind>,
    },
}

/// Anti-anxiety pills with a cooldown and an overuse penalty.
#[derive(Debug, Clone)]
pub struct PillDispenser {
    config: PillConfig,
    clock: f32,
    last_use: Option<f32>,
    uses_in_window: u32,
    window_start: f32,
}

impl PillDispenser {
    pub fn new(config: PillConfig) -> Self {
        Self {
            config,
            clock: 0.0,
            last_use: None,
            uses_in_window: 0,
            window_start: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.clock += dt;
    }

    pub fn cooldown_remaining(&self) -> f32 {
        match self.last_use {
            Some(at) => (self.config.cooldown - (self.clock - at)).max(0.0),
            None => 0.0,
        }
    }

    pub fn uses_in_window(&self) -> u32 {
        self.uses_in_window
    }

    pub fn try_use<R: Rng + ?Sized>(
        &mut self,
        inventory: &mut Inventory,
        anxiety: &mut AnxietyEngine,
        rng: &mut R,
    ) -> PillOutcome {
        let remaining = self.cooldown_remaining();
        if remaining > 0.0 {
            return PillOutcome::OnCooldown { remaining };
        }

        if self.clock - self.window_start > self.config.overuse_window {
            self.window_start = self.clock;
            self.uses_in_window = 0;
        }

        if !inventory.take_one(PILLS) {
            info!("No pills left");
            return PillOutcome::Empty;
        }

        self.last_use = Some(self.clock);
        let before = anxiety.current();
        let relieved = before - anxiety.modify(-self.config.reduction);
        info!("Pill taken, anxiety -{:.1}", relieved);

        self.uses_in_window += 1;
        let side_effect = if self.uses_in_window > self.config.overuse_threshold {
            self.uses_in_window = 0;
            let kind = self.roll_side_effect(rng);
            warn!("Pill overuse, side effect: {:?}", kind);
            kind
        } else {
            None
        };

        PillOutcome::Taken {
            relieved,
            side_effect,
        }
    }

    fn roll_side_effect<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<AfflictionKind> {
        let c = &self.config;
        if rng.gen::<f32>() < c.fatigue_chance {
            Some(AfflictionKind::Fatigue)
        } else if rng.gen::<f32>() < c.drowsiness_chance {
            Some(AfflictionKind::Drowsiness)
        } else if rng.gen::<f32>() < c.blurred_vision_chance {
            Some(AfflictionKind::BlurredVision)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreathingPhase {
    Ready,
    Breathing,
    Cooldown { remaining: f32 },
}

/// Hold-to-breathe exercise. Effectiveness decays while held and resets
/// after the cooldown.
#[derive(Debug, Clone)]
pub struct BreathingExercise {
    config: BreathingConfig,
    phase: BreathingPhase,
    effectiveness: f32,
    was_held: bool,
}

impl BreathingExercise {
    pub fn new(config: BreathingConfig) -> Self {
        Self {
            config,
            phase: BreathingPhase::Ready,
            effectiveness: 1.0,
            was_held: false,
        }
    }

    pub fn phase(&self) -> BreathingPhase {
        self.phase
    }

    pub fn effectiveness(&self) -> f32 {
        self.effectiveness
    }

    pub fn locks_movement(&self) -> bool {
        self.phase == BreathingPhase::Breathing
    }

    /// Advance one frame. Returns the anxiety change (zero or negative).
    pub fn update(&mut self, dt: f32, held: bool, in_safe_zone: bool) -> f32 {
        let pressed = held && !self.was_held;
        self.was_held = held;

        match self.phase {
            BreathingPhase::Ready => {
                if pressed {
                    if self.config.require_safe_zone && !in_safe_zone {
                        info!("Breathing exercise needs a safe zone");
                    } else {
                        info!("Breathing exercise started");
                        self.phase = BreathingPhase::Breathing;
                    }
                }
            }
            BreathingPhase::Breathing => {
                if !held {
                    info!("Breathing exercise stopped");
                    self.phase = BreathingPhase::Cooldown {
                        remaining: self.config.cooldown,
                    };
                }
            }
            BreathingPhase::Cooldown { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.effectiveness = 1.0;
                    self.phase = BreathingPhase::Ready;
                } else {
                    self.phase = BreathingPhase::Cooldown { remaining };
                }
            }
        }

        if self.phase != BreathingPhase::Breathing {
            return 0.0;
        }

        let delta = -self.config.base_rate * self.effectiveness * dt;
        self.effectiveness = (self.effectiveness - self.config.decline_rate * dt)
            .clamp(self.config.min_effectiveness, 1.0);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anxiety::AnxietyConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine_at(level: f32) -> AnxietyEngine {
        let mut engine = AnxietyEngine::new(AnxietyConfig::default().without_rolls());
        engine.modify(level);
        engine
    }

    #[test]
    fn pill_relieves_and_respects_cooldown() {
        let mut pills = PillDispenser::new(PillConfig::default());
        let mut inventory = Inventory::default();
        inventory.add(PILLS, 2);
        let mut engine = engine_at(50.0);
        let mut rng = StdRng::seed_from_u64(5);

        let first = pills.try_use(&mut inventory, &mut engine, &mut rng);
        assert_eq!(
            first,
            PillOutcome::Taken {
                relieved: 20.0,
                side_effect: None
            }
        );
        assert_eq!(engine.current(), 30.0);

        pills.advance(4.0);
        assert_eq!(
            pills.try_use(&mut inventory, &mut engine, &mut rng),
            PillOutcome::OnCooldown { remaining: 6.0 }
        );
        assert_eq!(inventory.count(PILLS), 1);

        pills.advance(6.0);
        assert!(matches!(
            pills.try_use(&mut inventory, &mut engine, &mut rng),
            PillOutcome::Taken { .. }
        ));
        assert_eq!(engine.current(), 10.0);
    }

    #[test]
    fn no_pills_means_no_relief() {
        let mut pills = PillDispenser::new(PillConfig::default());
        let mut inventory = Inventory::default();
        let mut engine = engine_at(50.0);
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(
            pills.try_use(&mut inventory, &mut engine, &mut rng),
            PillOutcome::Empty
        );
        assert_eq!(engine.current(), 50.0);
        assert_eq!(pills.cooldown_remaining(), 0.0);
    }

    #[test]
    fn overuse_rolls_a_side_effect_and_resets() {
        let mut pills = PillDispenser::new(PillConfig {
            cooldown: 0.0,
            fatigue_chance: 1.0,
            ..PillConfig::default()
        });
        let mut inventory = Inventory::default();
        inventory.add(PILLS, 10);
        let mut engine = engine_at(100.0);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..3 {
            let outcome = pills.try_use(&mut inventory, &mut engine, &mut rng);
            assert!(matches!(
                outcome,
                PillOutcome::Taken {
                    side_effect: None,
                    ..
                }
            ));
        }

        let fourth = pills.try_use(&mut inventory, &mut engine, &mut rng);
        assert!(matches!(
            fourth,
            PillOutcome::Taken {
                side_effect: Some(AfflictionKind::Fatigue),
                ..
            }
        ));
        assert_eq!(pills.uses_in_window(), 0);
    }

    #[test]
    fn overuse_window_expires() {
        let mut pills = PillDispenser::new(PillConfig {
            cooldown: 0.0,
            fatigue_chance: 1.0,
            ..PillConfig::default()
        });
        let mut inventory = Inventory::default();
        inventory.add(PILLS, 10);
        let mut engine = engine_at(100.0);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..3 {
            pills.try_use(&mut inventory, &mut engine, &mut rng);
        }
        pills.advance(31.0);
        let outcome = pills.try_use(&mut inventory, &mut engine, &mut rng);
        assert!(matches!(
            outcome,
            PillOutcome::Taken {
                side_effect: None,
                ..
            }
        ));
        assert_eq!(pills.uses_in_window(), 1);
    }

    #[test]
    fn breathing_needs_safe_zone() {
        let mut breathing = BreathingExercise::new(BreathingConfig::default());
        assert_eq!(breathing.update(0.1, true, false), 0.0);
        assert_eq!(breathing.phase(), BreathingPhase::Ready);

        // Still held, so no new press.
        assert_eq!(breathing.update(0.1, true, true), 0.0);
        assert_eq!(breathing.phase(), BreathingPhase::Ready);
    }

    #[test]
    fn breathing_lowers_anxiety_then_cools_down() {
        let config = BreathingConfig {
            cooldown: 1.0,
            ..BreathingConfig::default()
        };
        let mut breathing = BreathingExercise::new(config);

        let first = breathing.update(1.0, true, true);
        assert!((first + 10.0).abs() < 1e-5);
        assert!(breathing.locks_movement());
        assert!((breathing.effectiveness() - 0.9).abs() < 1e-5);

        let second = breathing.update(1.0, true, true);
        assert!((second + 9.0).abs() < 1e-5);

        assert_eq!(breathing.update(0.5, false, true), 0.0);
        assert_eq!(breathing.phase(), BreathingPhase::Cooldown { remaining: 1.0 });

        // Pressing during cooldown does nothing.
        assert_eq!(breathing.update(0.5, true, true), 0.0);
        breathing.update(0.6, false, true);
        assert_eq!(breathing.phase(), BreathingPhase::Ready);
        assert_eq!(breathing.effectiveness(), 1.0);
    }

    #[test]
    fn breathing_effectiveness_has_a_floor() {
        let mut breathing = BreathingExercise::new(BreathingConfig::default());
        breathing.update(0.1, true, true);
        for _ in 0..200 {
            breathing.update(0.1, true, true);
        }
        assert!((breathing.effectiveness() - 0.2).abs() < 1e-6);
    }
}
