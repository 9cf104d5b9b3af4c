//! Affliction module - timed negative effects on the player.

mod catalog;
mod effects;
mod error;
mod plugin;
mod registry;

pub use catalog::{AfflictionCatalog, AfflictionCatalogFile, AfflictionData, AfflictionKind};
pub use effects::{effect_for, AfflictionEffect, BlurredVision, JumpForcePenalty, StaminaPenalty};
pub use error::AfflictionError;
pub use plugin::AfflictionPlugin;
pub use registry::{Affliction, AfflictionRegistry, AfflictionSnapshot, RequestOutcome};
