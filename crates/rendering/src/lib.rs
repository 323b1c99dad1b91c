//! Render side of the ride: meshes, lights, cameras, and particles, all
//! derived from simulation resources and never written back.

use bevy::prelude::*;

use simulation::SimulationSet;

pub mod camera;
pub mod day_night;
pub mod input;
pub mod precipitation;
pub mod scenery;
pub mod smoke;
pub mod terrain_mesh;
pub mod track_mesh;
pub mod train_render;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<camera::CameraMode>()
            .init_resource::<camera::ObserverAnchor>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    day_night::setup_lighting,
                    train_render::setup_train,
                    track_mesh::setup_railway,
                    terrain_mesh::setup_terrain_patch,
                    scenery::setup_prop_assets,
                    smoke::setup_smoke_pool,
                    precipitation::setup_precipitation,
                ),
            )
            .add_systems(
                Update,
                (input::collect_throttle_input, camera::cycle_camera_mode)
                    .in_set(SimulationSet::Input),
            )
            .add_systems(
                Update,
                (
                    track_mesh::rebuild_railway,
                    terrain_mesh::update_terrain_patch,
                    scenery::sync_trackside_props,
                    train_render::sync_wagon_entities,
                    train_render::sync_train_transforms.after(train_render::sync_wagon_entities),
                    train_render::spin_wheels,
                    camera::drive_camera.after(train_render::sync_train_transforms),
                    smoke::drive_smoke,
                    precipitation::drive_precipitation.after(camera::drive_camera),
                    day_night::update_sun,
                    day_night::update_fog,
                )
                    .after(SimulationSet::Derive),
            );
    }
}
