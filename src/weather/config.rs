//! Weather tuning loaded from `weather.ron`.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{load_or_default, DataDir, DataLoadError};

pub(crate) const WEATHER_FILE: &str = "weather.ron";

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub wind_min: f32,
    pub wind_max: f32,
    /// Seconds to reach each new wind target.
    pub wind_transition: f32,
    pub rain_min: f32,
    pub rain_max: f32,
    pub rain_transition: f32,
    pub lightning_min_interval: f32,
    pub lightning_max_interval: f32,

    /// Anxiety per second at full rain.
    pub rain_anxiety: f32,
    /// Anxiety per second at `wind_anxiety_max_speed`.
    pub wind_anxiety: f32,
    pub wind_anxiety_threshold: f32,
    pub wind_anxiety_max_speed: f32,
    pub thunder_spike: f32,
    pub thunder_spike_duration: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            wind_min: 0.8,
            wind_max: 3.0,
            wind_transition: 10.0,
            rain_min: 0.0,
            rain_max: 1.0,
            rain_transition: 10.0,
            lightning_min_interval: 10.0,
            lightning_max_interval: 30.0,
            rain_anxiety: 0.3,
            wind_anxiety: 4.0,
            wind_anxiety_threshold: 1.0,
            wind_anxiety_max_speed: 30.0,
            thunder_spike: 20.0,
            thunder_spike_duration: 1.0,
        }
    }
}

impl WeatherConfig {
    pub fn load(dir: &DataDir) -> Self {
        load_or_default(&dir.file(WEATHER_FILE), WeatherConfig::validate)
    }

    pub fn validate(self) -> Result<Self, DataLoadError> {
        let ranges = [
            ("wind", self.wind_min, self.wind_max),
            ("rain", self.rain_min, self.rain_max),
            (
                "lightning interval",
                self.lightning_min_interval,
                self.lightning_max_interval,
            ),
        ];
        for (label, min, max) in ranges {
            if !(0.0 <= min && min <= max) {
                return Err(DataLoadError::invalid(
                    WEATHER_FILE,
                    format!("{} range {}..{} is invalid", label, min, max),
                ));
            }
        }

        if self.rain_max > 1.0 {
            return Err(DataLoadError::invalid(
                WEATHER_FILE,
                "rain intensity cannot exceed 1",
            ));
        }

        if !(self.wind_transition > 0.0 && self.rain_transition > 0.0) {
            return Err(DataLoadError::invalid(
                WEATHER_FILE,
                "transition durations must be positive",
            ));
        }

        if self.lightning_max_interval <= 0.0 {
            return Err(DataLoadError::invalid(
                WEATHER_FILE,
                "lightning interval must be positive",
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
        assert!(WeatherConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let config = WeatherConfig {
            wind_min: 5.0,
            ..WeatherConfig::default()
        };
        assert!(config.validate().is_err());

        let config = WeatherConfig {
            rain_transition: 0.0,
            ..WeatherConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
