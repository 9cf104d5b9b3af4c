//! Random number source for affliction rolls and weather drift.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Shared simulation RNG. Seeded from entropy unless one is inserted.
#[derive(Resource)]
pub struct SimRng(pub StdRng);

impl Default for SimRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
