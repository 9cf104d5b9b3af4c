//! Gameplay consequences of each affliction.
//!
//! `apply` runs once when an affliction is added to the registry and
//! `remove` once when it expires. Merged requests call neither.

use std::fmt;

use crate::capabilities::StatTarget;

use super::catalog::AfflictionKind;

/// Apply/remove side effects of an affliction.
pub trait AfflictionEffect: Send + Sync + fmt::Debug {
    fn apply(&mut self, target: &mut dyn StatTarget);
    fn remove(&mut self, target: &mut dyn StatTarget);
}

/// Fatigue: weaker jumps, making parkour harder.
#[derive(Debug, Clone, Copy)]
pub struct JumpForcePenalty {
    pub factor: f32,
}

impl AfflictionEffect for JumpForcePenalty {
    fn apply(&mut self, target: &mut dyn StatTarget) {
        target.scale_jump_force(self.factor);
    }

    fn remove(&mut self, target: &mut dyn StatTarget) {
        target.restore_jump_force();
    }
}

/// Drowsiness: a smaller stamina pool, making every move count.
#[derive(Debug, Clone, Copy)]
pub struct StaminaPenalty {
    pub factor: f32,
}

impl AfflictionEffect for StaminaPenalty {
    fn apply(&mut self, target: &mut dyn StatTarget) {
        target.scale_max_stamina(self.factor);
    }

    fn remove(&mut self, target: &mut dyn StatTarget) {
        target.restore_max_stamina();
    }
}

/// Blurred vision: the renderer switches to a manual depth-of-field blur.
#[derive(Debug, Clone, Copy)]
pub struct BlurredVision;

impl AfflictionEffect for BlurredVision {
    fn apply(&mut self, target: &mut dyn StatTarget) {
        target.set_vision_blurred(true);
    }

    fn remove(&mut self, target: &mut dyn StatTarget) {
        target.set_vision_blurred(false);
    }
}

/// Build the effect for a kind. `factor` only matters for stat penalties.
pub fn effect_for(kind: AfflictionKind, factor: f32) -> Box<dyn AfflictionEffect> {
    match kind {
        AfflictionKind::Fatigue => Box::new(JumpForcePenalty { factor }),
        AfflictionKind::Drowsiness => Box::new(StaminaPenalty { factor }),
        AfflictionKind::BlurredVision => Box::new(BlurredVision),
    }
}
