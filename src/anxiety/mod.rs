//! Anxiety module - the bounded meter, its contributors and relief actions.

mod config;
mod engine;
mod factors;
mod plugin;
mod relief;

pub use config::{AnxietyConfig, BandChance};
pub use engine::{band_for, AnxietyBand, AnxietyEngine, DownFactorHandle, UpFactorHandle};
pub use factors::{
    EarplugConfig, EarplugFactor, LocationAnxietyFactor, RainAnxietyFactor,
    ThunderAnxietyFactor, WindAnxietyFactor,
};
pub use plugin::{AnxietyPlugin, AnxietySource, ReliefTools, SafeZone};
pub use relief::{
    BreathingConfig, BreathingExercise, BreathingPhase, PillConfig, PillDispenser, PillOutcome,
    ReliefConfig, ReliefInput, ToggleEarplugs, UsePill,
};
