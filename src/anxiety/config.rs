//! Anxiety tuning loaded from `anxiety.ron`.

use serde::Deserialize;

use crate::affliction::AfflictionKind;
use crate::core::DataLoadError;

pub(crate) const ANXIETY_FILE: &str = "anxiety.ron";

/// Chance per tick that a band requests an affliction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BandChance {
    pub kind: AfflictionKind,
    /// Probability in [0, 1] for one tick.
    pub chance: f32,
}

impl BandChance {
    pub const fn new(kind: AfflictionKind, chance: f32) -> Self {
        Self { kind, chance }
    }
}

/// Anxiety meter range, band thresholds and per-band affliction chances.
///
/// Bands: Low `[0, level1]`, Mid `(level1, level2]`, High
/// `(level2, level3]`, Critical `(level3, max]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnxietyConfig {
    pub max_anxiety: f32,
    pub initial_anxiety: f32,
    pub level1: f32,
    pub level2: f32,
    pub level3: f32,
    pub low: Vec<BandChance>,
    pub mid: Vec<BandChance>,
    pub high: Vec<BandChance>,
    pub critical: Vec<BandChance>,
}

impl Default for AnxietyConfig {
    fn default() -> Self {
        use AfflictionKind::*;

        Self {
            max_anxiety: 100.0,
            initial_anxiety: 0.0,
            level1: 30.0,
            level2: 60.0,
            level3: 90.0,
            low: vec![BandChance::new(Fatigue, 0.3)],
            mid: vec![BandChance::new(Fatigue, 0.5), BandChance::new(Drowsiness, 0.3)],
            high: Vec::new(),
            critical: vec![
                BandChance::new(Fatigue, 0.7),
                BandChance::new(Drowsiness, 0.5),
                BandChance::new(BlurredVision, 0.3),
            ],
        }
    }
}

impl AnxietyConfig {
    /// A config that never rolls afflictions.
    pub fn without_rolls(self) -> Self {
        Self {
            low: Vec::new(),
            mid: Vec::new(),
            high: Vec::new(),
            critical: Vec::new(),
            ..self
        }
    }

    /// Thresholds must be ordered inside `[0, max]` and chances in `[0, 1]`.
    pub fn validate(self) -> Result<Self, DataLoadError> {
        if !(self.max_anxiety > 0.0) {
            return Err(DataLoadError::invalid(
                ANXIETY_FILE,
                format!("max_anxiety must be positive, got {}", self.max_anxiety),
            ));
        }

        let ordered = 0.0 <= self.level1
            && self.level1 < self.level2
            && self.level2 < self.level3
            && self.level3 <= self.max_anxiety;
        if !ordered {
            return Err(DataLoadError::invalid(
                ANXIETY_FILE,
                format!(
                    "thresholds must satisfy 0 <= {} < {} < {} <= {}",
                    self.level1, self.level2, self.level3, self.max_anxiety
                ),
            ));
        }

        if !(0.0..=self.max_anxiety).contains(&self.initial_anxiety) {
            return Err(DataLoadError::invalid(
                ANXIETY_FILE,
                format!("initial_anxiety {} is outside the meter", self.initial_anxiety),
            ));
        }

        let bad_chance = [&self.low, &self.mid, &self.high, &self.critical]
            .into_iter()
            .flatten()
            .find(|c| !(0.0..=1.0).contains(&c.chance));
        if let Some(c) = bad_chance {
            return Err(DataLoadError::invalid(
                ANXIETY_FILE,
                format!("chance {} for {:?} is outside [0, 1]", c.chance, c.kind),
            ));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AnxietyConfig::default().validate().is_ok());
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let config = AnxietyConfig {
            level2: 20.0,
            ..AnxietyConfig::default()
        };
        assert!(matches!(config.validate(), Err(DataLoadError::Invalid { .. })));
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config: AnxietyConfig =
            ron::from_str("(max_anxiety: 200.0, level3: 150.0, high: [(kind: Fatigue, chance: 0.6)])")
                .unwrap();
        let config = config.validate().unwrap();
        assert_eq!(config.max_anxiety, 200.0);
        assert_eq!(config.level1, 30.0);
        assert_eq!(config.high, vec![BandChance::new(AfflictionKind::Fatigue, 0.6)]);
    }
}
