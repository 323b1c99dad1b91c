//! Chimney smoke and brake dust: a fixed pool of puff entities recycled in
//! place.
//!
//! No spawning or despawning at runtime; inactive puffs sit hidden until the
//! emitter claims them. Chimney emission scales with throttle; braking at
//! speed kicks up extra puffs at wheel height.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simulation::consist::TrainConsist;

use crate::train_render::Locomotive;

const POOL_SIZE: usize = 64;
const PUFF_LIFETIME: f32 = 2.5;
/// Puffs per second at full throttle.
const MAX_EMIT_RATE: f32 = 20.0;
const RISE_SPEED: f32 = 2.2;
const DRIFT: f32 = 0.6;
/// Brake-dust puffs per second while braking at speed.
const BRAKE_EMIT_RATE: f32 = 12.0;

#[derive(Component)]
pub struct SmokePuff {
    pub age: f32,
    pub active: bool,
    pub velocity: Vec3,
}

#[derive(Resource)]
pub struct SmokeEmitter {
    /// Accumulated fractional puffs owed; emits on crossing 1.0.
    chimney_accumulator: f32,
    brake_accumulator: f32,
    rng: ChaCha8Rng,
}

/// Fractional-accumulator emission: returns how many puffs to emit this tick
/// at `rate` puffs per second.
fn emission_count(accumulator: &mut f32, rate: f32, dt: f32) -> usize {
    *accumulator += rate * dt;
    let count = accumulator.floor() as usize;
    *accumulator -= count as f32;
    count
}

pub fn setup_smoke_pool(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(0.25));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.75, 0.75, 0.75, 0.8),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for _ in 0..POOL_SIZE {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(0.0, -100.0, 0.0),
            Visibility::Hidden,
            SmokePuff {
                age: 0.0,
                active: false,
                velocity: Vec3::ZERO,
            },
        ));
    }

    commands.insert_resource(SmokeEmitter {
        chimney_accumulator: 0.0,
        brake_accumulator: 0.0,
        rng: ChaCha8Rng::seed_from_u64(0x5140),
    });
}

/// Claims idle puffs at the chimney (and the wheels, while braking) and
/// ages the live ones.
pub fn drive_smoke(
    time: Res<Time>,
    consist: Res<TrainConsist>,
    mut emitter: ResMut<SmokeEmitter>,
    loco: Query<&Transform, (With<Locomotive>, Without<SmokePuff>)>,
    mut puffs: Query<(&mut SmokePuff, &mut Transform, &mut Visibility)>,
) {
    let dt = time.delta_secs();
    let speed_frac = consist.speed() / simulation::config::MAX_SPEED;

    let mut chimney_to_emit =
        emission_count(&mut emitter.chimney_accumulator, speed_frac * MAX_EMIT_RATE, dt);
    let brake_rate = if consist.is_braking() && speed_frac > 0.02 {
        BRAKE_EMIT_RATE
    } else {
        0.0
    };
    let mut brake_to_emit = emission_count(&mut emitter.brake_accumulator, brake_rate, dt);

    let Ok(loco_transform) = loco.get_single() else {
        return;
    };
    let chimney = loco_transform.translation + loco_transform.rotation * Vec3::new(0.0, 2.0, 1.4);
    let wheels = loco_transform.translation - Vec3::Y * 0.9;

    for (mut puff, mut transform, mut visibility) in &mut puffs {
        if puff.active {
            puff.age += dt;
            if puff.age >= PUFF_LIFETIME {
                puff.active = false;
                *visibility = Visibility::Hidden;
                continue;
            }
            let t = puff.age / PUFF_LIFETIME;
            transform.translation += puff.velocity * dt;
            transform.scale = Vec3::splat(1.0 + t * 3.0);
        } else if chimney_to_emit > 0 {
            chimney_to_emit -= 1;
            puff.active = true;
            puff.age = 0.0;
            puff.velocity = Vec3::new(
                emitter.rng.gen_range(-DRIFT..DRIFT),
                RISE_SPEED + emitter.rng.gen_range(0.0..0.8),
                emitter.rng.gen_range(-DRIFT..DRIFT),
            );
            transform.translation = chimney;
            transform.scale = Vec3::splat(1.0);
            *visibility = Visibility::Visible;
        } else if brake_to_emit > 0 {
            // Brake dust billows low and sideways instead of rising.
            brake_to_emit -= 1;
            puff.active = true;
            puff.age = PUFF_LIFETIME * 0.5;
            puff.velocity = Vec3::new(
                emitter.rng.gen_range(-DRIFT * 2.0..DRIFT * 2.0),
                emitter.rng.gen_range(0.2..0.6),
                emitter.rng.gen_range(-DRIFT * 2.0..DRIFT * 2.0),
            );
            transform.translation = wheels;
            transform.scale = Vec3::splat(1.0);
            *visibility = Visibility::Visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emission_matches_rate_over_time() {
        let mut acc = 0.0;
        let mut total = 0;
        for _ in 0..60 {
            total += emission_count(&mut acc, MAX_EMIT_RATE, 1.0 / 60.0);
        }
        let expected = MAX_EMIT_RATE as usize;
        assert!(total >= expected - 1 && total <= expected + 1, "emitted {total}");

        acc = 0.0;
        total = 0;
        for _ in 0..60 {
            total += emission_count(&mut acc, 0.0, 1.0 / 60.0);
        }
        assert_eq!(total, 0);
    }

    #[test]
    fn emission_accumulates_fractions() {
        // Half rate over two seconds still delivers the full-rate count.
        let mut acc = 0.0;
        let mut total = 0;
        for _ in 0..120 {
            total += emission_count(&mut acc, MAX_EMIT_RATE / 2.0, 1.0 / 60.0);
        }
        let expected = MAX_EMIT_RATE as usize;
        assert!(total >= expected - 1 && total <= expected + 1, "emitted {total}");
    }
}
