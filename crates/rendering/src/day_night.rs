//! Sun, ambient light, and distance fog driven by the day clock and weather.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use simulation::time_of_day::DayCycle;
use simulation::weather::WeatherState;

use crate::camera::RideCamera;

#[derive(Component)]
pub struct Sun;

pub fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -1.0, 0.4, 0.0)),
        Sun,
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 300.0,
    });
}

/// Positions and colors the sun from the normalized day clock.
pub fn update_sun(
    cycle: Res<DayCycle>,
    mut suns: Query<(&mut DirectionalLight, &mut Transform), With<Sun>>,
    mut ambient: ResMut<AmbientLight>,
) {
    let daylight = cycle.daylight();

    // Moonlight floor at night; warm tint through dawn/dusk.
    let illuminance = 400.0 + 9_600.0 * daylight;
    let warm = Color::srgb(1.0, 0.95, 0.88);
    let night = Color::srgb(0.45, 0.5, 0.75);
    let low_sun = Color::srgb(1.0, 0.62, 0.32);
    let color = if daylight <= 0.0 {
        night
    } else if daylight < 1.0 {
        color_lerp(low_sun, warm, daylight)
    } else {
        warm
    };

    for (mut light, mut transform) in &mut suns {
        light.illuminance = illuminance;
        light.color = color;
        let direction = cycle.sun_direction();
        *transform = Transform::default().looking_to(direction, Vec3::Y);
    }

    ambient.brightness = 40.0 + 260.0 * daylight;
    ambient.color = color_lerp(night, Color::srgb(0.9, 0.9, 1.0), daylight);
}

/// Keeps camera fog in sync with weather and darkens it after sundown.
pub fn update_fog(
    weather: Res<WeatherState>,
    cycle: Res<DayCycle>,
    mut commands: Commands,
    cameras: Query<Entity, With<RideCamera>>,
) {
    let profile = weather.kind.fog();
    let daylight = cycle.daylight();
    let srgba = profile.color.to_srgba();
    let night_factor = 0.15 + 0.85 * daylight;
    let color = Color::srgb(
        srgba.red * night_factor,
        srgba.green * night_factor,
        srgba.blue * night_factor,
    );

    // Intensity pulls the far plane in toward the near one.
    let end = profile.end - (profile.end - profile.start) * 0.5 * weather.intensity;

    for entity in &cameras {
        commands.entity(entity).insert(DistanceFog {
            color,
            falloff: FogFalloff::Linear {
                start: profile.start,
                end,
            },
            ..default()
        });
    }
}

fn color_lerp(a: Color, b: Color, t: f32) -> Color {
    let a = a.to_srgba();
    let b = b.to_srgba();
    Color::srgb(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
    )
}
