//! Keyboard bindings for the throttle and consist controls.
//!
//! Writes intents into `ThrottleInput`; the simulation consumes them in its
//! drive phase the same frame. Camera cycling lives in `camera.rs`.

use bevy::prelude::*;

use simulation::input::ThrottleInput;

/// W/Up throttle up, S/Down throttle down (brake), A couples a wagon,
/// R uncouples one.
pub fn collect_throttle_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<ThrottleInput>,
) {
    input.forward = keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp);
    input.backward = keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown);

    // Edge-triggered; the drive tick clears these after acting on them, so a
    // held key does not spam couplings.
    if keys.just_pressed(KeyCode::KeyA) {
        input.add_wagon = true;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        input.remove_wagon = true;
    }
}
