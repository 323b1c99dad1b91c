//! Core simulation for the endless train ride: procedural track, terrain
//! sampling, the consist, and the environment clocks. No rendering here;
//! everything is plain resources and events the render/UI crates consume.

use bevy::prelude::*;

pub mod config;
pub mod consist;
pub mod gauges;
pub mod input;
pub mod kinematics;
pub mod scene;
pub mod terrain;
pub mod time_of_day;
pub mod track_events;
pub mod track_path;
pub mod weather;

// ---------------------------------------------------------------------------
// Update phases
// ---------------------------------------------------------------------------

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Drive` → `Derive`.
///
/// * **Input** – Keyboard and UI intents collected into `ThrottleInput`.
/// * **Drive** – The consist tick: throttle, arc advance, path extend,
///   pose resolution, prune. Single-writer for `TrackPath`.
/// * **Derive** – Everything downstream of the tick: gauges, the day
///   clock, trackside prop refresh. Read-only over the consist and path.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Drive,
    Derive,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let settings = scene::SceneSettings::default();
        app.insert_resource(terrain::Terrain::from_settings(&settings))
            .insert_resource(settings)
            .add_event::<track_path::TrackPathChanged>()
            .configure_sets(
                Update,
                (SimulationSet::Input, SimulationSet::Drive, SimulationSet::Derive).chain(),
            )
            .add_systems(Startup, track_path::init_track_path)
            .add_systems(
                Update,
                terrain::rebuild_terrain.in_set(SimulationSet::Input),
            );

        app.add_plugins((
            consist::ConsistPlugin,
            gauges::GaugesPlugin,
            time_of_day::DayCyclePlugin,
            weather::WeatherPlugin,
            track_events::TracksideEventsPlugin,
        ));
    }
}
