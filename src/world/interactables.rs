//! Things the player can use: doors and pill pickups.

use bevy::prelude::*;

use crate::capabilities::{InteractOutcome, Interactable, WorldAccess};
use crate::player::PILLS;

/// A door that can be opened, closed and locked.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Door {
    /// Id used by unlock rewards.
    pub id: String,
    pub locked: bool,
    pub open: bool,
}

impl Door {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locked: false,
            open: false,
        }
    }

    pub fn locked(id: impl Into<String>) -> Self {
        Self {
            locked: true,
            ..Self::new(id)
        }
    }

    /// Returns true if the door was locked.
    pub fn unlock(&mut self) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        info!("Door '{}' unlocked", self.id);
        true
    }
}

impl Interactable for Door {
    fn interact(&mut self, _world: &mut dyn WorldAccess) -> InteractOutcome {
        if self.locked {
            info!("Door '{}' is locked", self.id);
            return InteractOutcome::Kept;
        }

        self.open = !self.open;
        info!(
            "Door '{}' {}",
            self.id,
            if self.open { "opened" } else { "closed" }
        );
        InteractOutcome::Kept
    }

    fn prompt(&self) -> String {
        if self.locked {
            "Door is locked".to_string()
        } else if self.open {
            "Press F to close door".to_string()
        } else {
            "Press F to open door".to_string()
        }
    }
}

/// Unlock this door when the named mission completes.
#[derive(Component, Debug, Clone)]
pub struct UnlockOnMission(pub String);

/// A pickup that adds pills to the inventory and disappears.
#[derive(Component, Debug, Clone)]
pub struct PillPickup {
    pub count: u32,
    pub name: String,
}

impl Default for PillPickup {
    fn default() -> Self {
        Self {
            count: 1,
            name: "Anti-Anxiety Pills".to_string(),
        }
    }
}

impl Interactable for PillPickup {
    fn interact(&mut self, world: &mut dyn WorldAccess) -> InteractOutcome {
        let count = i32::try_from(self.count).unwrap_or(i32::MAX);
        world.add_items(PILLS, count);
        InteractOutcome::Consumed
    }

    fn prompt(&self) -> String {
        format!("Press F to collect {} {}", self.count, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Inventory;
    use crate::world::GameWorld;

    #[test]
    fn locked_door_stays_shut_until_unlocked() {
        let mut inventory = Inventory::default();
        let mut world = GameWorld::new(&mut inventory, None);
        let mut door = Door::locked("cellar");

        assert_eq!(door.prompt(), "Door is locked");
        assert_eq!(door.interact(&mut world), InteractOutcome::Kept);
        assert!(!door.open);

        assert!(door.unlock());
        assert!(!door.unlock());
        assert_eq!(door.prompt(), "Press F to open door");
        door.interact(&mut world);
        assert!(door.open);
        assert_eq!(door.prompt(), "Press F to close door");
    }

    #[test]
    fn pill_pickup_fills_inventory_and_is_consumed() {
        let mut inventory = Inventory::default();
        let mut pickup = PillPickup {
            count: 3,
            ..PillPickup::default()
        };
        assert_eq!(pickup.prompt(), "Press F to collect 3 Anti-Anxiety Pills");

        let mut world = GameWorld::new(&mut inventory, None);
        assert_eq!(pickup.interact(&mut world), InteractOutcome::Consumed);
        assert_eq!(inventory.count(PILLS), 3);
    }
}
