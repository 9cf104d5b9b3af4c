//! Weather module - wind, rain and lightning feeding the anxiety meter.

mod config;
mod plugin;
mod state;

pub use config::WeatherConfig;
pub use plugin::{IndoorZone, LightningStruck, WeatherFactors, WeatherPlugin};
pub use state::{Drift, WeatherState};
