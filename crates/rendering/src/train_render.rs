//! Train entities: the locomotive and its wagons, kept in sync with the
//! simulated consist each frame.
//!
//! Poses come straight from the simulation; only orientation is eased here
//! (render-side polish, never written back). Wagon entities are reconciled
//! against the consist list, and the enter/exit tween drives both scale and
//! material alpha.

use bevy::prelude::*;

use simulation::config::{MOVEMENT_SCALE, ORIENT_SMOOTHING};
use simulation::consist::TrainConsist;
use simulation::kinematics::{approach, approach_angle};

/// Wheel radius shared by every car; spin rate derives from it.
const WHEEL_RADIUS: f32 = 0.35;

#[derive(Component)]
pub struct Locomotive;

#[derive(Component)]
pub struct WagonCar {
    pub index: usize,
}

#[derive(Component)]
pub struct Wheel;

/// Eased orientation state, carried per car so each smooths independently.
#[derive(Component, Default)]
pub struct SmoothedOrientation {
    heading: f32,
    pitch: f32,
}

/// Wagon entities and their materials, indexed like `TrainConsist::wagons`.
#[derive(Resource, Default)]
pub struct WagonEntities {
    pub entries: Vec<(Entity, Handle<StandardMaterial>)>,
}

/// Shared meshes for the train, built once.
#[derive(Resource)]
pub struct TrainMeshes {
    loco_body: Handle<Mesh>,
    chimney: Handle<Mesh>,
    wagon_body: Handle<Mesh>,
    wheel: Handle<Mesh>,
}

pub fn setup_train(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let train_meshes = TrainMeshes {
        loco_body: meshes.add(Cuboid::new(1.6, 1.8, 4.2)),
        chimney: meshes.add(Cylinder::new(0.22, 1.0)),
        wagon_body: meshes.add(Cuboid::new(1.5, 1.4, 3.6)),
        wheel: meshes.add(Cylinder::new(WHEEL_RADIUS, 0.2)),
    };

    let loco_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.15, 0.32, 0.16),
        perceptual_roughness: 0.6,
        ..default()
    });
    let dark = materials.add(StandardMaterial {
        base_color: Color::srgb(0.1, 0.1, 0.11),
        perceptual_roughness: 0.8,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(train_meshes.loco_body.clone()),
            MeshMaterial3d(loco_material),
            Transform::from_xyz(0.0, 10.0, 0.0),
            Locomotive,
            SmoothedOrientation::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(train_meshes.chimney.clone()),
                MeshMaterial3d(dark.clone()),
                Transform::from_xyz(0.0, 1.3, 1.4),
            ));
            for (x, z) in wheel_offsets() {
                parent.spawn((
                    Mesh3d(train_meshes.wheel.clone()),
                    MeshMaterial3d(dark.clone()),
                    Transform::from_xyz(x, -0.9, z)
                        .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                    Wheel,
                ));
            }
        });

    commands.insert_resource(train_meshes);
    commands.init_resource::<WagonEntities>();
}

fn wheel_offsets() -> [(f32, f32); 4] {
    [(-0.85, 1.3), (0.85, 1.3), (-0.85, -1.3), (0.85, -1.3)]
}

/// Spawns/despawns wagon entities so the render list matches the consist.
/// Each wagon owns its material so the fade tween stays per-car.
pub fn sync_wagon_entities(
    mut commands: Commands,
    consist: Res<TrainConsist>,
    train_meshes: Res<TrainMeshes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut wagons: ResMut<WagonEntities>,
) {
    let want = consist.wagons().len();

    while wagons.entries.len() < want {
        let index = wagons.entries.len();
        let hue = (0.55 + 0.07 * (index % 4) as f32) * 360.0;
        let material = materials.add(StandardMaterial {
            base_color: Color::hsl(hue, 0.45, 0.4),
            perceptual_roughness: 0.7,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        let entity = commands
            .spawn((
                Mesh3d(train_meshes.wagon_body.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, 10.0, 0.0),
                WagonCar { index },
                SmoothedOrientation::default(),
            ))
            .with_children(|parent| {
                for (x, z) in wheel_offsets() {
                    parent.spawn((
                        Mesh3d(train_meshes.wheel.clone()),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: Color::srgb(0.1, 0.1, 0.11),
                            ..default()
                        })),
                        Transform::from_xyz(x, -0.7, z)
                            .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                        Wheel,
                    ));
                }
            })
            .id();
        wagons.entries.push((entity, material));
    }

    while wagons.entries.len() > want {
        if let Some((entity, _)) = wagons.entries.pop() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Applies consist poses to the train entities, easing orientation and
/// driving the wagon enter/exit tween (scale + alpha).
pub fn sync_train_transforms(
    time: Res<Time>,
    consist: Res<TrainConsist>,
    wagons: Res<WagonEntities>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut loco: Query<(&mut Transform, &mut SmoothedOrientation), (With<Locomotive>, Without<WagonCar>)>,
    mut cars: Query<(&mut Transform, &mut SmoothedOrientation), With<WagonCar>>,
) {
    let dt = time.delta_secs();

    if let Ok((mut transform, mut smoothed)) = loco.get_single_mut() {
        apply_pose(
            &mut transform,
            &mut smoothed,
            consist.loco_pose().position,
            consist.loco_pose().heading,
            consist.loco_pose().pitch,
            1.0,
            dt,
        );
    }

    for (k, wagon) in consist.wagons().iter().enumerate() {
        let Some((entity, material)) = wagons.entries.get(k) else {
            continue;
        };
        let Ok((mut transform, mut smoothed)) = cars.get_mut(*entity) else {
            continue;
        };
        apply_pose(
            &mut transform,
            &mut smoothed,
            wagon.pose.position,
            wagon.pose.heading,
            wagon.pose.pitch,
            wagon.visibility,
            dt,
        );
        if let Some(material) = materials.get_mut(material) {
            material.base_color.set_alpha(wagon.visibility);
        }
    }
}

fn apply_pose(
    transform: &mut Transform,
    smoothed: &mut SmoothedOrientation,
    position: Vec3,
    heading: f32,
    pitch: f32,
    visibility: f32,
    dt: f32,
) {
    smoothed.heading = approach_angle(smoothed.heading, heading, ORIENT_SMOOTHING, dt);
    smoothed.pitch = approach(smoothed.pitch, pitch, ORIENT_SMOOTHING, dt);
    transform.translation = position + Vec3::Y * 1.0;
    transform.rotation = Quat::from_euler(EulerRot::YXZ, smoothed.heading, -smoothed.pitch, 0.0);
    // Grow-in/shrink-out; floor keeps the transform invertible mid-tween.
    transform.scale = Vec3::splat(visibility.max(0.01));
}

/// Rolls every wheel at the rate the train covers ground.
pub fn spin_wheels(
    time: Res<Time>,
    consist: Res<TrainConsist>,
    mut wheels: Query<&mut Transform, With<Wheel>>,
) {
    // Arc units are path-point indices; one unit is 6 world units of track.
    let ground_speed = consist.speed() * MOVEMENT_SCALE * 6.0;
    let spin = ground_speed / WHEEL_RADIUS * time.delta_secs();
    for mut transform in &mut wheels {
        transform.rotate_local_y(spin);
    }
}
