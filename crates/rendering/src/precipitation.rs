//! Rain and snow: a fixed pool of falling particles wrapped around the
//! camera, active only while the weather calls for them.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simulation::weather::{WeatherChanged, WeatherKind, WeatherState};

use crate::camera::RideCamera;

const POOL_SIZE: usize = 400;
/// Half-extent of the box the particles cycle inside, centered on the camera.
const VOLUME_HALF: f32 = 30.0;
const VOLUME_HEIGHT: f32 = 25.0;

const RAIN_FALL_SPEED: f32 = 28.0;
const SNOW_FALL_SPEED: f32 = 3.5;

#[derive(Component)]
pub struct Precipitation {
    /// Per-particle lateral drift, re-rolled on each wrap.
    drift: Vec3,
}

#[derive(Resource)]
pub struct PrecipitationAssets {
    rng: ChaCha8Rng,
    rain_mesh: Handle<Mesh>,
    snow_mesh: Handle<Mesh>,
    active_kind: Option<WeatherKind>,
}

pub fn setup_precipitation(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let rain_mesh = meshes.add(Cuboid::new(0.02, 0.5, 0.02));
    let snow_mesh = meshes.add(Sphere::new(0.05));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.85, 0.88, 0.95, 0.7),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let mut rng = ChaCha8Rng::seed_from_u64(0x7A13);
    for _ in 0..POOL_SIZE {
        let x = rng.gen_range(-VOLUME_HALF..VOLUME_HALF);
        let y = rng.gen_range(0.0..VOLUME_HEIGHT);
        let z = rng.gen_range(-VOLUME_HALF..VOLUME_HALF);
        commands.spawn((
            Mesh3d(rain_mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(x, y, z),
            Visibility::Hidden,
            Precipitation { drift: Vec3::ZERO },
        ));
    }

    commands.insert_resource(PrecipitationAssets {
        rng,
        rain_mesh,
        snow_mesh,
        active_kind: None,
    });
}

/// The pool swaps meshes when the panel announced a flip, or when the
/// tracked kind has drifted from the state (covers the first frame, before
/// any `WeatherChanged` has fired).
fn needs_retune(
    announced: bool,
    active_kind: Option<WeatherKind>,
    current: Option<WeatherKind>,
) -> bool {
    announced || active_kind != current
}

/// Falls, wraps, and retunes the pool when the weather kind flips.
pub fn drive_precipitation(
    time: Res<Time>,
    weather: Res<WeatherState>,
    mut changed: EventReader<WeatherChanged>,
    mut assets: ResMut<PrecipitationAssets>,
    cameras: Query<&Transform, (With<RideCamera>, Without<Precipitation>)>,
    mut particles: Query<
        (&mut Transform, &mut Visibility, &mut Mesh3d, &mut Precipitation),
        Without<RideCamera>,
    >,
) {
    let Ok(camera) = cameras.get_single() else {
        return;
    };
    let center = camera.translation;
    let dt = time.delta_secs();

    let precipitating = weather.kind.has_precipitation();
    let kind_flipped = needs_retune(
        changed.read().next().is_some(),
        assets.active_kind,
        precipitating.then_some(weather.kind),
    );

    let fall_speed = match weather.kind {
        WeatherKind::Snow => SNOW_FALL_SPEED,
        _ => RAIN_FALL_SPEED,
    };
    // Intensity decides how much of the pool is live.
    let live = (POOL_SIZE as f32 * weather.intensity) as usize;

    for (i, (mut transform, mut visibility, mut mesh, mut particle)) in
        particles.iter_mut().enumerate()
    {
        if !precipitating || i >= live {
            *visibility = Visibility::Hidden;
            continue;
        }
        if kind_flipped {
            mesh.0 = match weather.kind {
                WeatherKind::Snow => assets.snow_mesh.clone(),
                _ => assets.rain_mesh.clone(),
            };
        }
        *visibility = Visibility::Visible;

        transform.translation += (Vec3::NEG_Y * fall_speed + particle.drift) * dt;

        // Wrap back to the top of the volume, re-rolled laterally so the
        // pattern never visibly repeats.
        if transform.translation.y < center.y - 2.0 {
            let x = center.x + assets.rng.gen_range(-VOLUME_HALF..VOLUME_HALF);
            let z = center.z + assets.rng.gen_range(-VOLUME_HALF..VOLUME_HALF);
            transform.translation = Vec3::new(x, center.y + VOLUME_HEIGHT, z);
            particle.drift = match weather.kind {
                WeatherKind::Snow => Vec3::new(
                    assets.rng.gen_range(-1.0..1.0),
                    0.0,
                    assets.rng.gen_range(-1.0..1.0),
                ),
                _ => Vec3::ZERO,
            };
        }
        // Keep the volume loosely tethered to the camera as it travels.
        let offset = transform.translation - center;
        if offset.x.abs() > VOLUME_HALF * 1.5 {
            transform.translation.x = center.x - offset.x.signum() * VOLUME_HALF;
        }
        if offset.z.abs() > VOLUME_HALF * 1.5 {
            transform.translation.z = center.z - offset.z.signum() * VOLUME_HALF;
        }
    }

    assets.active_kind = precipitating.then_some(weather.kind);
}
