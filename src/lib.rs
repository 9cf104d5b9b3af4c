//! Dread - the anxiety, affliction and mission core of a first-person
//! parkour/horror game, built on Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Simulation states, global events, data loading, system ordering
//! - **Player**: Vitals, inventory and position the engines act on
//! - **Affliction**: Timed negative effects with merge-on-duplicate
//! - **Anxiety**: Bounded meter fed by contributors, relief actions
//! - **Mission**: Sequential mission queue with conditions and timeouts
//! - **Weather**: Wind, rain and lightning driving anxiety factors
//! - **World**: Doors, pickups and mission-driven unlocks
//!
//! Every frame runs `SimSet::Input → Environment → Anxiety → Afflictions →
//! Missions → Feedback`, so afflictions rolled by the anxiety engine are
//! applied in the same frame.

pub mod affliction;
pub mod anxiety;
pub mod capabilities;
pub mod core;
pub mod mission;
pub mod player;
pub mod weather;
pub mod world;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
///
/// Needs `StatesPlugin` (part of `DefaultPlugins`) and a `Time` source.
pub struct DreadPlugin;

impl Plugin for DreadPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Resources the engines act on
            .add_plugins(player::PlayerPlugin)

            // Engines
            .add_plugins(affliction::AfflictionPlugin)
            .add_plugins(anxiety::AnxietyPlugin)
            .add_plugins(mission::MissionPlugin)

            // Environment
            .add_plugins(weather::WeatherPlugin)
            .add_plugins(world::WorldPlugin);
    }
}
