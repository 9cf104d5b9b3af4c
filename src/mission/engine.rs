//! Sequential mission workflow: one active mission, a FIFO queue behind it.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;

use super::data::{MissionFile, MISSION_FILE};
use super::definition::{MissionDefinition, MissionInstance, MissionStatus};
use crate::capabilities::WorldAccess;
use crate::core::{load_or_default, DataDir};

/// Lifecycle notifications, drained by the mission systems each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MissionEvent {
    Started {
        name: String,
        description: String,
        time_limit_text: String,
    },
    Completed {
        name: String,
    },
    Failed {
        name: String,
    },
}

#[derive(Resource, Debug, Default)]
pub struct MissionEngine {
    queue: VecDeque<MissionInstance>,
    current: Option<MissionInstance>,
    clock: f32,
    events: Vec<MissionEvent>,
}

impl MissionEngine {
    /// Engine with the initial queue from `missions.ron`.
    pub fn load(dir: &DataDir) -> Self {
        let file = load_or_default(&dir.file(MISSION_FILE), MissionFile::validate);

        let mut engine = Self::default();
        for definition in file.build() {
            engine.enqueue(definition);
        }
        engine
    }

    /// Append a fresh NotStarted instance to the queue.
    pub fn enqueue(&mut self, definition: Arc<MissionDefinition>) {
        debug!("Mission queued: {}", definition.name);
        self.queue.push_back(MissionInstance::new(definition));
    }

    /// Drop every pending mission. The active one is left alone.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn current(&self) -> Option<&MissionInstance> {
        self.current.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn queued_names(&self) -> Vec<&str> {
        self.queue.iter().map(MissionInstance::name).collect()
    }

    /// Seconds left on the active mission, if it is timed.
    pub fn remaining_time(&self) -> Option<f32> {
        self.current.as_ref().and_then(MissionInstance::remaining)
    }

    /// "Time Limit: 12.3s" while a timed mission runs, empty otherwise.
    pub fn timer_text(&self) -> String {
        match self.remaining_time() {
            Some(remaining) => format!("Time Limit: {:.1}s", remaining.max(0.0)),
            None => String::new(),
        }
    }

    /// Take the lifecycle events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<MissionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start the next mission when idle, then check the active one for
    /// timeout and completion.
    pub fn tick(&mut self, dt: f32, world: &mut dyn WorldAccess) {
        self.clock += dt;

        match self.current.as_mut() {
            Some(current) => current.advance(dt),
            None => {
                if !self.start_next() {
                    return;
                }
            }
        }

        let Some(current) = self.current.as_ref() else {
            return;
        };

        if current.is_timed_out() {
            self.fail_current();
            return;
        }

        if self.conditions_met(&*world) {
            info!("All mission conditions met");
            self.complete_current(world);
        }
    }

    /// Complete the active mission: notify, apply rewards, queue
    /// sub-missions, go idle. Returns false when idle.
    pub fn complete_current(&mut self, world: &mut dyn WorldAccess) -> bool {
        let Some(mut mission) = self.current.take() else {
            return false;
        };
        mission.finish(MissionStatus::Completed);

        let definition = Arc::clone(mission.definition());
        info!("Mission completed: {}", definition.name);
        self.events.push(MissionEvent::Completed {
            name: definition.name.clone(),
        });

        for (index, reward) in definition.rewards.iter().enumerate() {
            match reward {
                Some(reward) => reward.apply(world),
                None => warn!("Mission '{}' has an empty reward slot {}", definition.name, index),
            }
        }

        for sub in &definition.sub_missions {
            self.enqueue(Arc::clone(sub));
        }
        true
    }

    /// Fail the active mission and go idle. No rewards, no sub-missions.
    /// Returns false when idle.
    pub fn fail_current(&mut self) -> bool {
        let Some(mut mission) = self.current.take() else {
            return false;
        };
        mission.finish(MissionStatus::Failed);

        info!("Mission failed: {}", mission.name());
        self.events.push(MissionEvent::Failed {
            name: mission.name().to_string(),
        });
        true
    }

    fn start_next(&mut self) -> bool {
        let Some(mut next) = self.queue.pop_front() else {
            return false;
        };
        next.start(self.clock);

        let definition = next.definition();
        info!("Mission started: {}", definition.name);
        self.events.push(MissionEvent::Started {
            name: definition.name.clone(),
            description: definition.description.clone(),
            time_limit_text: definition.time_limit_text(),
        });

        self.current = Some(next);
        true
    }

    /// True when the active mission has conditions and every one passes.
    /// Empty slots pass; errors count as not met.
    fn conditions_met(&self, world: &dyn WorldAccess) -> bool {
        let Some(current) = self.current.as_ref() else {
            return false;
        };
        let conditions = &current.definition().conditions;
        if conditions.is_empty() {
            return false;
        }

        conditions.iter().all(|entry| match entry {
            None => true,
            Some(condition) => match condition.is_met(world) {
                Ok(met) => met,
                Err(e) => {
                    debug!("Condition '{}' not met: {}", condition.describe(), e);
                    false
                }
            },
        })
    }
}
