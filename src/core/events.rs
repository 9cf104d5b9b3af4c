//! Global events used for cross-system communication.
//!
//! The anxiety engine never touches the affliction registry directly. It
//! sends an [`AfflictionRequest`] and the affliction systems, which run
//! later in the same frame, resolve it. Mission lifecycle changes go out
//! the same way so HUD text, doors and scripted sequences can react
//! without the mission engine knowing about them.

use bevy::prelude::*;

use crate::affliction::AfflictionKind;

/// Ask the affliction registry to apply (or extend) an affliction.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AfflictionRequest {
    pub kind: AfflictionKind,
    /// Overrides the catalog's base duration when positive.
    pub duration: Option<f32>,
    /// Rolled by the anxiety meter. Dropped instead of merged when the
    /// kind is already active.
    pub passive: bool,
}

impl AfflictionRequest {
    pub fn new(kind: AfflictionKind) -> Self {
        Self {
            kind,
            duration: None,
            passive: false,
        }
    }

    pub fn passive(kind: AfflictionKind) -> Self {
        Self {
            passive: true,
            ..Self::new(kind)
        }
    }
}

/// Sent when a new affliction instance starts affecting the player.
#[derive(Event, Debug, Clone)]
pub struct AfflictionApplied {
    pub name: String,
    pub duration: f32,
}

/// Sent when a request merged into an already active affliction.
#[derive(Event, Debug, Clone)]
pub struct AfflictionExtended {
    pub name: String,
    pub added: f32,
    pub remaining: f32,
}

/// Sent when an affliction ran out and its effect was removed.
#[derive(Event, Debug, Clone)]
pub struct AfflictionExpired {
    pub name: String,
}

/// Sent when a mission becomes the active one.
#[derive(Event, Debug, Clone)]
pub struct MissionStarted {
    pub name: String,
    pub description: String,
    /// "Time Limit: 30s" for timed missions, empty otherwise.
    pub time_limit_text: String,
}

/// Sent when the active mission completes, before its rewards apply.
#[derive(Event, Debug, Clone)]
pub struct MissionCompleted {
    pub name: String,
}

/// Sent when the active mission fails.
#[derive(Event, Debug, Clone)]
pub struct MissionFailed {
    pub name: String,
}

/// Ask the world to unlock a door or gate by id. Sent by unlock rewards.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct UnlockRequested {
    pub target: String,
}

/// Manual triggers for testing and debugging.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum DebugCommand {
    /// Force-queue an affliction by name ("fatigue", "Blurred Vision", ...).
    QueueAffliction(String),
    CompleteMission,
    FailMission,
    /// Simulate a lightning strike.
    Thunder,
}
