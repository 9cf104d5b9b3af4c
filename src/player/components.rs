//! Player-related resources.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::capabilities::StatTarget;

/// Inventory key for anti-anxiety pills.
pub const PILLS: &str = "pills";

/// Player stats the afflictions act on.
#[derive(Resource, Debug, Clone)]
pub struct PlayerVitals {
    pub stamina: f32,
    pub max_stamina: f32,
    /// Max stamina without any affliction.
    pub base_max_stamina: f32,
    /// Stamina regained per second.
    pub regen_rate: f32,
    pub jump_force: f32,
    /// Jump force without any affliction.
    pub base_jump_force: f32,
    pub vision_blurred: bool,
    /// Set while an action (breathing exercise) holds the player in place.
    pub movement_locked: bool,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self {
            stamina: 100.0,
            max_stamina: 100.0,
            base_max_stamina: 100.0,
            regen_rate: 10.0,
            jump_force: 1.0,
            base_jump_force: 1.0,
            vision_blurred: false,
            movement_locked: false,
        }
    }
}

impl PlayerVitals {
    pub fn regenerate(&mut self, delta: f32) {
        self.stamina = (self.stamina + self.regen_rate * delta).min(self.max_stamina);
    }
}

impl StatTarget for PlayerVitals {
    fn scale_max_stamina(&mut self, factor: f32) {
        self.max_stamina *= factor;
        self.stamina = self.stamina.min(self.max_stamina);
    }

    fn restore_max_stamina(&mut self) {
        self.max_stamina = self.base_max_stamina;
    }

    fn scale_jump_force(&mut self, factor: f32) {
        self.jump_force *= factor;
    }

    fn restore_jump_force(&mut self) {
        self.jump_force = self.base_jump_force;
    }

    fn set_vision_blurred(&mut self, blurred: bool) {
        self.vision_blurred = blurred;
    }
}

/// Consumable counts keyed by item id.
#[derive(Resource, Debug, Clone, Default)]
pub struct Inventory {
    items: HashMap<String, u32>,
}

impl Inventory {
    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Add `delta` (which may be negative) and return the new count.
    /// Counts never go below zero.
    pub fn add(&mut self, item: &str, delta: i32) -> u32 {
        let entry = self.items.entry(item.to_string()).or_insert(0);
        *entry = entry.saturating_add_signed(delta);
        info!("Inventory: {} {:+} (total {})", item, delta, *entry);
        *entry
    }

    /// Remove one item if any are left.
    pub fn take_one(&mut self, item: &str) -> bool {
        if self.count(item) == 0 {
            return false;
        }
        self.add(item, -1);
        true
    }
}

/// Player position fed by the host's movement code.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerPosition(pub Option<Vec3>);
