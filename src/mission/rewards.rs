//! Built-in mission rewards.

use bevy::prelude::*;

use crate::capabilities::{Reward, WorldAccess};

/// Adds items to the player's inventory.
#[derive(Debug, Clone)]
pub struct ItemReward {
    pub name: String,
    pub item: String,
    pub quantity: i32,
}

impl ItemReward {
    pub fn new(name: impl Into<String>, item: impl Into<String>, quantity: i32) -> Self {
        Self {
            name: name.into(),
            item: item.into(),
            quantity,
        }
    }
}

impl Reward for ItemReward {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, world: &mut dyn WorldAccess) {
        info!("Reward Applied: {} - {} x{}", self.name, self.item, self.quantity);
        world.add_items(&self.item, self.quantity);
    }
}

/// Unlocks a door or gate by id.
#[derive(Debug, Clone)]
pub struct UnlockReward {
    pub name: String,
    pub target: String,
}

impl UnlockReward {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

impl Reward for UnlockReward {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, world: &mut dyn WorldAccess) {
        info!("Reward Applied: {} - Unlocking: {}", self.name, self.target);
        world.unlock(&self.target);
    }
}
