//! Player plugin - vitals, inventory and position resources.

use bevy::prelude::*;

use super::components::*;
use crate::core::SimSet;

/// Player plugin - owns the resources afflictions and missions act on.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerVitals>()
            .init_resource::<Inventory>()
            .init_resource::<PlayerPosition>()
            .add_systems(Update, stamina_regen.in_set(SimSet::Environment));
    }
}

/// Regenerate stamina over time.
fn stamina_regen(time: Res<Time>, mut vitals: ResMut<PlayerVitals>) {
    vitals.regenerate(time.delta_secs());
}
