//! Mission definitions and the instances created from them.

use std::fmt;
use std::sync::Arc;

use crate::capabilities::{MissionCondition, Reward};

/// A condition slot. `None` is an empty slot and counts as satisfied.
pub type ConditionEntry = Option<Arc<dyn MissionCondition>>;

/// A reward slot. `None` is an empty slot and is skipped with a warning.
pub type RewardEntry = Option<Arc<dyn Reward>>;

/// Immutable mission description, shared by every instance made from it.
#[derive(Default)]
pub struct MissionDefinition {
    pub name: String,
    pub description: String,
    /// Seconds before the mission fails, if timed.
    pub time_limit: Option<f32>,
    pub conditions: Vec<ConditionEntry>,
    pub rewards: Vec<RewardEntry>,
    /// Queued in order when this mission completes.
    pub sub_missions: Vec<Arc<MissionDefinition>>,
}

impl MissionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_time_limit(mut self, seconds: f32) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_condition(self, condition: impl MissionCondition + 'static) -> Self {
        self.with_condition_entry(Some(Arc::new(condition)))
    }

    pub fn with_condition_entry(mut self, entry: ConditionEntry) -> Self {
        self.conditions.push(entry);
        self
    }

    pub fn with_reward(self, reward: impl Reward + 'static) -> Self {
        self.with_reward_entry(Some(Arc::new(reward)))
    }

    pub fn with_reward_entry(mut self, entry: RewardEntry) -> Self {
        self.rewards.push(entry);
        self
    }

    pub fn with_sub_mission(mut self, sub: Arc<MissionDefinition>) -> Self {
        self.sub_missions.push(sub);
        self
    }

    pub fn is_timed(&self) -> bool {
        self.time_limit.is_some()
    }

    /// "Time Limit: 30s" for timed missions, empty otherwise.
    pub fn time_limit_text(&self) -> String {
        match self.time_limit {
            Some(limit) => format!("Time Limit: {}s", limit),
            None => String::new(),
        }
    }
}

impl fmt::Debug for MissionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MissionDefinition")
            .field("name", &self.name)
            .field("time_limit", &self.time_limit)
            .field("conditions", &self.conditions.len())
            .field("rewards", &self.rewards.len())
            .field("sub_missions", &self.sub_missions)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed,
}

impl MissionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One run of a mission definition.
///
/// Status only moves forward: NotStarted, InProgress, then Completed or
/// Failed.
#[derive(Debug, Clone)]
pub struct MissionInstance {
    definition: Arc<MissionDefinition>,
    status: MissionStatus,
    start_time: f32,
    elapsed: f32,
}

impl MissionInstance {
    pub fn new(definition: Arc<MissionDefinition>) -> Self {
        Self {
            definition,
            status: MissionStatus::NotStarted,
            start_time: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn definition(&self) -> &Arc<MissionDefinition> {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds left on a timed mission.
    pub fn remaining(&self) -> Option<f32> {
        self.definition.time_limit.map(|limit| limit - self.elapsed)
    }

    pub fn is_timed_out(&self) -> bool {
        self.definition
            .time_limit
            .is_some_and(|limit| self.elapsed > limit)
    }

    pub(crate) fn start(&mut self, now: f32) -> bool {
        if self.status != MissionStatus::NotStarted {
            return false;
        }
        self.status = MissionStatus::InProgress;
        self.start_time = now;
        self.elapsed = 0.0;
        true
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        if self.status == MissionStatus::InProgress {
            self.elapsed += dt;
        }
    }

    pub(crate) fn finish(&mut self, outcome: MissionStatus) -> bool {
        if self.status != MissionStatus::InProgress || !outcome.is_terminal() {
            return false;
        }
        self.status = outcome;
        true
    }
}
