//! World module - interactables and the world view handed to missions.

mod access;
mod interactables;
mod plugin;

pub use access::GameWorld;
pub use interactables::{Door, PillPickup, UnlockOnMission};
pub use plugin::{InteractEvent, InteractionFocus, InteractionPrompt, WorldPlugin};
