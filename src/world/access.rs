//! `WorldAccess` backed by the player resources.

use bevy::prelude::*;

use crate::capabilities::WorldAccess;
use crate::player::Inventory;

/// Borrowed view of the world handed to conditions, rewards and
/// interactables for the duration of one system call.
///
/// Unlocks are collected and sent as events by the caller afterwards.
pub struct GameWorld<'a> {
    inventory: &'a mut Inventory,
    player: Option<Vec3>,
    unlocks: Vec<String>,
}

impl<'a> GameWorld<'a> {
    pub fn new(inventory: &'a mut Inventory, player: Option<Vec3>) -> Self {
        Self {
            inventory,
            player,
            unlocks: Vec::new(),
        }
    }

    /// Unlock targets collected since the last call.
    pub fn take_unlocks(&mut self) -> Vec<String> {
        std::mem::take(&mut self.unlocks)
    }
}

impl WorldAccess for GameWorld<'_> {
    fn item_count(&self, item: &str) -> Option<u32> {
        Some(self.inventory.count(item))
    }

    fn player_position(&self) -> Option<Vec3> {
        self.player
    }

    fn add_items(&mut self, item: &str, count: i32) {
        self.inventory.add(item, count);
    }

    fn unlock(&mut self, target: &str) {
        self.unlocks.push(target.to_string());
    }
}
