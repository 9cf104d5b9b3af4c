//! Capability contracts between the engines and gameplay code.
//!
//! The engines only ever see these traits. Weather, zones, pills, doors and
//! mission scripts implement them without the engines knowing the concrete
//! types, and the host implements [`StatTarget`] and [`WorldAccess`] to give
//! the engines a way to touch the player and the world.

use bevy::math::Vec3;
use thiserror::Error;

/// A source of rising anxiety, in units per second.
pub trait AnxietyUpFactor: Send + Sync {
    /// Current increase rate. Expected to be `>= 0`.
    fn rate(&self) -> f32;

    /// Name used in log output.
    fn label(&self) -> &str {
        "up-factor"
    }
}

/// A source of falling anxiety, in units per second.
pub trait AnxietyDownFactor: Send + Sync {
    /// Current decrease rate. Expected to be `>= 0`.
    fn rate(&self) -> f32;

    fn label(&self) -> &str {
        "down-factor"
    }
}

/// Player stats an affliction is allowed to degrade.
///
/// Apply/remove hooks are the only callers. `restore_*` returns a stat to
/// its unafflicted base value.
pub trait StatTarget {
    fn scale_max_stamina(&mut self, factor: f32);
    fn restore_max_stamina(&mut self);
    fn scale_jump_force(&mut self, factor: f32);
    fn restore_jump_force(&mut self);
    fn set_vision_blurred(&mut self, blurred: bool);
}

/// World surface consumed by mission conditions, rewards and interactables.
pub trait WorldAccess {
    /// Count of an inventory item, `None` when no inventory is available.
    fn item_count(&self, item: &str) -> Option<u32>;

    /// Player position, `None` when there is no player in the world.
    fn player_position(&self) -> Option<Vec3>;

    /// Add (or with a negative count remove) inventory items.
    fn add_items(&mut self, item: &str, count: i32);

    /// Unlock a door or gate by id.
    fn unlock(&mut self, target: &str);
}

/// Why a mission condition could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("world state '{0}' is unavailable")]
    Unavailable(&'static str),
}

/// A check that must pass for a mission to complete on its own.
pub trait MissionCondition: Send + Sync {
    /// Pure query: must not mutate anything.
    fn is_met(&self, world: &dyn WorldAccess) -> Result<bool, ConditionError>;

    fn describe(&self) -> String {
        String::from("condition")
    }
}

/// Something granted when a mission completes.
pub trait Reward: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, world: &mut dyn WorldAccess);
}

/// What happened to an interactable after the player used it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractOutcome {
    /// Stays in the world (doors).
    Kept,
    /// Used up and should be despawned (pickups).
    Consumed,
}

/// Something the player can use while looking at it.
pub trait Interactable {
    fn interact(&mut self, world: &mut dyn WorldAccess) -> InteractOutcome;

    /// Prompt shown while the player is focused on it.
    fn prompt(&self) -> String;
}
