//! Bevy driver for the consist: one system owning the strict tick order,
//! plus the plugin registering state and events.

use bevy::prelude::*;

use crate::input::ThrottleInput;
use crate::terrain::Terrain;
use crate::track_path::{TrackPath, TrackPathChanged};
use crate::SimulationSet;

use super::state::TrainConsist;
use super::types::{WagonAdded, WagonRemoved};

/// Advances the whole consist once per frame and publishes what changed.
pub fn drive_consist(
    time: Res<Time>,
    mut input: ResMut<ThrottleInput>,
    mut consist: ResMut<TrainConsist>,
    mut path: ResMut<TrackPath>,
    terrain: Res<Terrain>,
    mut path_changed: EventWriter<TrackPathChanged>,
    mut added: EventWriter<WagonAdded>,
    mut removed: EventWriter<WagonRemoved>,
) {
    let dt = time.delta_secs();
    let outcome = consist.advance(dt, &input, &mut path, Some(&terrain.sampler));
    input.clear_triggers();

    if outcome.path_changed() {
        if outcome.points_pruned > 0 {
            debug!(
                "pruned {} points, base index now {}",
                outcome.points_pruned,
                path.base_index()
            );
        }
        path_changed.send(TrackPathChanged {
            arc_shift: outcome.points_pruned,
        });
    }
    if let Some(index) = outcome.wagon_added {
        added.send(WagonAdded { index });
    }
    if let Some(index) = outcome.wagon_removed {
        removed.send(WagonRemoved { index });
    }
}

pub struct ConsistPlugin;

impl Plugin for ConsistPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrainConsist>()
            .init_resource::<ThrottleInput>()
            .add_event::<WagonAdded>()
            .add_event::<WagonRemoved>()
            .add_systems(Update, drive_consist.in_set(SimulationSet::Drive));
    }
}
