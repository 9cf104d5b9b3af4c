//! `missions.ron`: the initial mission queue.

use std::sync::Arc;

use bevy::math::Vec3;
use serde::Deserialize;

use super::conditions::{ItemCountCondition, ReachAreaCondition};
use super::definition::MissionDefinition;
use super::rewards::{ItemReward, UnlockReward};
use crate::capabilities::{MissionCondition, Reward};
use crate::core::DataLoadError;
use crate::player::PILLS;

pub(crate) const MISSION_FILE: &str = "missions.ron";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ConditionSpec {
    PillCount {
        #[serde(default = "one")]
        required: u32,
    },
    ItemCount {
        item: String,
        #[serde(default = "one")]
        required: u32,
    },
    ReachArea {
        target: [f32; 3],
        #[serde(default = "default_radius")]
        radius: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum RewardSpec {
    Items {
        name: String,
        #[serde(default = "pills")]
        item: String,
        quantity: i32,
    },
    Unlock {
        name: String,
        target: String,
    },
}

fn one() -> u32 {
    1
}

fn default_radius() -> f32 {
    5.0
}

fn pills() -> String {
    PILLS.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MissionSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time_limit: Option<f32>,
    /// `None` entries are empty slots.
    #[serde(default)]
    pub conditions: Vec<Option<ConditionSpec>>,
    #[serde(default)]
    pub rewards: Vec<Option<RewardSpec>>,
    #[serde(default)]
    pub sub_missions: Vec<MissionSpec>,
}

impl MissionSpec {
    /// Build the shared definition, sub-missions included.
    pub fn build(&self) -> Arc<MissionDefinition> {
        let mut definition = MissionDefinition::new(&self.name).with_description(&self.description);
        definition.time_limit = self.time_limit;
        definition.conditions = self
            .conditions
            .iter()
            .map(|c| c.as_ref().map(ConditionSpec::build))
            .collect();
        definition.rewards = self
            .rewards
            .iter()
            .map(|r| r.as_ref().map(RewardSpec::build))
            .collect();
        definition.sub_missions = self.sub_missions.iter().map(MissionSpec::build).collect();
        Arc::new(definition)
    }

    fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("mission with an empty name".to_string());
        }
        if let Some(limit) = self.time_limit {
            if !(limit > 0.0) {
                return Err(format!("mission '{}' has time limit {}", self.name, limit));
            }
        }
        for condition in self.conditions.iter().flatten() {
            if let ConditionSpec::ReachArea { radius, .. } = condition {
                if *radius < 0.0 {
                    return Err(format!("mission '{}' has negative radius", self.name));
                }
            }
        }
        self.sub_missions.iter().try_for_each(MissionSpec::check)
    }
}

impl ConditionSpec {
    fn build(&self) -> Arc<dyn MissionCondition> {
        match self {
            Self::PillCount { required } => Arc::new(ItemCountCondition::pills(*required)),
            Self::ItemCount { item, required } => {
                Arc::new(ItemCountCondition::new(item.clone(), *required))
            }
            Self::ReachArea { target, radius } => {
                Arc::new(ReachAreaCondition::new(Vec3::from_array(*target), *radius))
            }
        }
    }
}

impl RewardSpec {
    fn build(&self) -> Arc<dyn Reward> {
        match self {
            Self::Items {
                name,
                item,
                quantity,
            } => Arc::new(ItemReward::new(name.clone(), item.clone(), *quantity)),
            Self::Unlock { name, target } => {
                Arc::new(UnlockReward::new(name.clone(), target.clone()))
            }
        }
    }
}

/// Top-level contents of `missions.ron`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MissionFile {
    #[serde(default)]
    pub missions: Vec<MissionSpec>,
}

impl MissionFile {
    /// Every mission in the tree needs a name and a positive time limit,
    /// if it has one.
    pub fn validate(self) -> Result<Self, DataLoadError> {
        self.missions
            .iter()
            .try_for_each(MissionSpec::check)
            .map_err(|details| DataLoadError::invalid(MISSION_FILE, details))?;
        Ok(self)
    }

    /// Definitions for the initial queue, in file order.
    pub fn build(&self) -> Vec<Arc<MissionDefinition>> {
        self.missions.iter().map(MissionSpec::build).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"(
        missions: [
            (
                name: "Find your pills",
                description: "The bottle is somewhere in the flat.",
                conditions: [Some(PillCount(required: 2)), None],
                rewards: [Some(Unlock(name: "Front door", target: "front_door"))],
                sub_missions: [
                    (
                        name: "Get out",
                        time_limit: Some(45.0),
                        conditions: [Some(ReachArea(target: (0.0, 0.0, 30.0)))],
                        rewards: [None, Some(Items(name: "Spare pills", quantity: 3))],
                    ),
                ],
            ),
        ],
    )"#;

    #[test]
    fn sample_builds_nested_definitions() {
        let file: MissionFile = ron::from_str(SAMPLE).unwrap();
        let file = file.validate().unwrap();
        let definitions = file.build();

        assert_eq!(definitions.len(), 1);
        let first = &definitions[0];
        assert_eq!(first.conditions.len(), 2);
        assert!(first.conditions[1].is_none());
        assert!(!first.is_timed());

        let sub = &first.sub_missions[0];
        assert_eq!(sub.name, "Get out");
        assert_eq!(sub.time_limit, Some(45.0));
        assert!(sub.rewards[0].is_none());
        assert_eq!(sub.rewards[1].as_ref().map(|r| r.name()), Some("Spare pills"));
        assert_eq!(
            file.missions[0].sub_missions[0].conditions[0],
            Some(ConditionSpec::ReachArea {
                target: [0.0, 0.0, 30.0],
                radius: 5.0
            })
        );
    }

    #[test]
    fn nested_bad_time_limit_is_rejected() {
        let file: MissionFile = ron::from_str(
            r#"(missions: [(name: "Outer", sub_missions: [(name: "Inner", time_limit: Some(0.0))])])"#,
        )
        .unwrap();
        assert!(matches!(file.validate(), Err(DataLoadError::Invalid { .. })));
    }
}
