//! Player module - vitals, inventory and position.

mod components;
mod plugin;

pub use components::*;
pub use plugin::PlayerPlugin;
