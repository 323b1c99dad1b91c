//! The ride cameras: a chase view, the cab, and a trackside observer.

use bevy::prelude::*;

use simulation::consist::TrainConsist;
use simulation::kinematics::approach;

/// How fast the chase camera eases toward its target position.
const CHASE_SMOOTHING: f32 = 4.0;

/// The observer re-anchors beside the track once the train is this far away.
const OBSERVER_RANGE: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Resource)]
pub enum CameraMode {
    /// Behind and above the locomotive, easing through curves.
    #[default]
    ThirdPerson,
    /// Inside the cab, locked to the locomotive frame.
    Cockpit,
    /// Standing beside the track, watching the train pass.
    Observer,
}

impl CameraMode {
    pub fn next(self) -> Self {
        match self {
            CameraMode::ThirdPerson => CameraMode::Cockpit,
            CameraMode::Cockpit => CameraMode::Observer,
            CameraMode::Observer => CameraMode::ThirdPerson,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CameraMode::ThirdPerson => "Chase",
            CameraMode::Cockpit => "Cab",
            CameraMode::Observer => "Trackside",
        }
    }
}

#[derive(Component)]
pub struct RideCamera;

/// Where the observer camera currently stands.
#[derive(Resource, Default)]
pub struct ObserverAnchor {
    pub position: Vec3,
    pub placed: bool,
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 18.0, -25.0).looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y),
        RideCamera,
    ));
}

pub fn cycle_camera_mode(keys: Res<ButtonInput<KeyCode>>, mut mode: ResMut<CameraMode>) {
    if keys.just_pressed(KeyCode::KeyC) {
        *mode = mode.next();
    }
}

/// Moves the single ride camera per the active mode, after the consist has
/// been advanced this frame.
pub fn drive_camera(
    time: Res<Time>,
    mode: Res<CameraMode>,
    consist: Res<TrainConsist>,
    mut anchor: ResMut<ObserverAnchor>,
    mut cameras: Query<&mut Transform, With<RideCamera>>,
) {
    let dt = time.delta_secs();
    let pose = consist.loco_pose();
    let forward = pose.forward();

    for mut transform in &mut cameras {
        match *mode {
            CameraMode::ThirdPerson => {
                let target = pose.position - forward * 14.0 + Vec3::Y * 7.0;
                transform.translation.x = approach(transform.translation.x, target.x, CHASE_SMOOTHING, dt);
                transform.translation.y = approach(transform.translation.y, target.y, CHASE_SMOOTHING, dt);
                transform.translation.z = approach(transform.translation.z, target.z, CHASE_SMOOTHING, dt);
                transform.look_at(pose.position + Vec3::Y * 2.0, Vec3::Y);
            }
            CameraMode::Cockpit => {
                // Rigid mount in the cab; no easing, the cab IS the frame.
                transform.translation = pose.position + Vec3::Y * 2.4 + forward * 0.8;
                transform.rotation = pose.rotation();
            }
            CameraMode::Observer => {
                if !anchor.placed
                    || (anchor.position - pose.position).length() > OBSERVER_RANGE
                {
                    // Stand ahead of the train, off to the side.
                    let side = Vec3::new(forward.z, 0.0, -forward.x);
                    anchor.position = pose.position + forward * 60.0 + side * 12.0 + Vec3::Y * 1.7;
                    anchor.placed = true;
                }
                transform.translation = anchor.position;
                transform.look_at(pose.position + Vec3::Y * 1.5, Vec3::Y);
            }
        }
    }

    if mode.is_changed() && *mode != CameraMode::Observer {
        anchor.placed = false;
    }
}
