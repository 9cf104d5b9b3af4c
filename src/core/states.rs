//! Simulation state definitions.
//!
//! The engines only advance while the simulation is `Running`. Pausing
//! freezes anxiety, affliction timers and mission clocks together so no
//! engine drifts relative to the others.

use bevy::prelude::*;

/// Overall simulation flow.
///
/// - Start in `Loading` while data files are read
/// - `Running` ticks every engine once per frame
/// - `Paused` freezes all of them
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SimState {
    #[default]
    Loading,
    Running,
    Paused,
}

/// Per-frame ordering of the simulation.
///
/// Anxiety runs before afflictions so requests rolled this frame resolve
/// this frame; missions run last so conditions see settled state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Player actions and debug commands.
    Input,
    /// Weather, zones and contributor bookkeeping.
    Environment,
    Anxiety,
    Afflictions,
    Missions,
    /// Display models and door relays.
    Feedback,
}
