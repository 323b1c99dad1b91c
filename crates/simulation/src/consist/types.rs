//! Wagon records and consist events.

use bevy::prelude::*;

use crate::config::WAGON_TWEEN_SECS;
use crate::kinematics::PathPose;

/// One trailing car. The pose is re-resolved from the shared path every
/// tick; `visibility` drives the enter/exit tween only.
#[derive(Debug, Clone, PartialEq)]
pub struct Wagon {
    pub pose: PathPose,
    /// Scale and opacity share this value during the enter/exit tween.
    pub visibility: f32,
    /// Where the tween is heading: 1.0 while coupled, 0.0 while leaving.
    pub tween_target: f32,
}

impl Wagon {
    /// A freshly coupled wagon: invisible, already at its resolved pose.
    pub fn entering(pose: PathPose) -> Self {
        Self {
            pose,
            visibility: 0.0,
            tween_target: 1.0,
        }
    }

    /// True while an enter/exit tween is running.
    pub fn tweening(&self) -> bool {
        (self.visibility - self.tween_target).abs() > f32::EPSILON
    }

    /// True once an uncoupled wagon has fully faded and can be dropped.
    pub fn departed(&self) -> bool {
        self.tween_target == 0.0 && self.visibility <= 0.0
    }

    /// Advance the tween by wall-clock `dt`. Moves `visibility` toward the
    /// target at the fixed tween rate, from wherever it currently is, so an
    /// opposing add/remove request simply retargets mid-flight.
    pub fn tick_tween(&mut self, dt: f32) {
        let step = dt / WAGON_TWEEN_SECS;
        if self.visibility < self.tween_target {
            self.visibility = (self.visibility + step).min(self.tween_target);
        } else if self.visibility > self.tween_target {
            self.visibility = (self.visibility - step).max(self.tween_target);
        }
    }
}

/// A wagon finished coupling (fired when the tween starts, so audio/UI cues
/// line up with the visual).
#[derive(Event, Debug, Clone, Copy)]
pub struct WagonAdded {
    pub index: usize,
}

/// A wagon was uncoupled (fired when the exit tween starts).
#[derive(Event, Debug, Clone, Copy)]
pub struct WagonRemoved {
    pub index: usize,
}
