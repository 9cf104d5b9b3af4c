//! Mission module - a FIFO of missions with conditions, timeouts, rewards
//! and follow-up missions.

mod conditions;
mod data;
mod definition;
mod engine;
mod plugin;
mod rewards;

pub use conditions::{ItemCountCondition, ReachAreaCondition};
pub use data::{ConditionSpec, MissionFile, MissionSpec, RewardSpec};
pub use definition::{
    ConditionEntry, MissionDefinition, MissionInstance, MissionStatus, RewardEntry,
};
pub use engine::{MissionEngine, MissionEvent};
pub use plugin::{MissionDisplay, MissionPlugin};
pub use rewards::{ItemReward, UnlockReward};
