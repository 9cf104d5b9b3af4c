//! Built-in mission conditions.

use bevy::prelude::*;

use crate::capabilities::{ConditionError, MissionCondition, WorldAccess};
use crate::player::PILLS;

/// Met while the inventory holds at least `required` of `item`.
#[derive(Debug, Clone)]
pub struct ItemCountCondition {
    pub item: String,
    pub required: u32,
}

impl ItemCountCondition {
    pub fn new(item: impl Into<String>, required: u32) -> Self {
        Self {
            item: item.into(),
            required,
        }
    }

    pub fn pills(required: u32) -> Self {
        Self::new(PILLS, required)
    }
}

impl MissionCondition for ItemCountCondition {
    fn is_met(&self, world: &dyn WorldAccess) -> Result<bool, ConditionError> {
        let count = world
            .item_count(&self.item)
            .ok_or(ConditionError::Unavailable("inventory"))?;
        Ok(count >= self.required)
    }

    fn describe(&self) -> String {
        format!("have {} {}", self.required, self.item)
    }
}

/// Met while the player is within `radius` of `target`.
#[derive(Debug, Clone, Copy)]
pub struct ReachAreaCondition {
    pub target: Vec3,
    pub radius: f32,
}

impl ReachAreaCondition {
    pub fn new(target: Vec3, radius: f32) -> Self {
        Self { target, radius }
    }
}

impl MissionCondition for ReachAreaCondition {
    fn is_met(&self, world: &dyn WorldAccess) -> Result<bool, ConditionError> {
        let player = world
            .player_position()
            .ok_or(ConditionError::Unavailable("player position"))?;
        Ok(player.distance(self.target) <= self.radius)
    }

    fn describe(&self) -> String {
        format!("reach {} (r = {})", self.target, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Snapshot {
        pills: Option<u32>,
        player: Option<Vec3>,
    }

    impl WorldAccess for Snapshot {
        fn item_count(&self, _item: &str) -> Option<u32> {
            self.pills
        }

        fn player_position(&self) -> Option<Vec3> {
            self.player
        }

        fn add_items(&mut self, _item: &str, _count: i32) {}

        fn unlock(&mut self, _target: &str) {}
    }

    #[test]
    fn pill_count_needs_inventory_and_enough_pills() {
        let condition = ItemCountCondition::pills(2);
        let none = Snapshot {
            pills: None,
            player: None,
        };
        assert_eq!(
            condition.is_met(&none),
            Err(ConditionError::Unavailable("inventory"))
        );

        let one = Snapshot {
            pills: Some(1),
            player: None,
        };
        assert_eq!(condition.is_met(&one), Ok(false));

        let two = Snapshot {
            pills: Some(2),
            player: None,
        };
        assert_eq!(condition.is_met(&two), Ok(true));
    }

    #[test]
    fn reach_area_includes_the_edge() {
        let condition = ReachAreaCondition::new(Vec3::new(10.0, 0.0, 0.0), 5.0);
        let at = |x: f32| Snapshot {
            pills: None,
            player: Some(Vec3::new(x, 0.0, 0.0)),
        };

        assert_eq!(condition.is_met(&at(0.0)), Ok(false));
        assert_eq!(condition.is_met(&at(5.0)), Ok(true));
        assert!(condition
            .is_met(&Snapshot {
                pills: None,
                player: None
            })
            .is_err());
    }
}
