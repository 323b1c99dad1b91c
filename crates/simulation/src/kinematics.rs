//! Arc-position kinematics: resolving a scalar position along the path into
//! a world transform, and the smoothing helpers the render side applies to
//! orientation targets.

use bevy::prelude::*;

use crate::config::MOVEMENT_SCALE;

/// A resolved sample on the path: world position plus heading (yaw around Y)
/// and pitch (uphill/downhill tilt). No roll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathPose {
    pub position: Vec3,
    pub heading: f32,
    pub pitch: f32,
}

impl PathPose {
    /// Rotation with the model's forward axis along the path tangent.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.heading, -self.pitch, 0.0)
    }

    /// Horizontal unit vector along the heading.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }
}

/// Resolve `arc` against the point sequence.
///
/// Integer part selects the segment, fractional part interpolates within it.
/// Out-of-range arcs clamp to the ends rather than wrapping, so a transiently
/// short path (startup, right after a prune) yields a plausible pose instead
/// of teleporting a car to the far end. Returns `None` only when the path has
/// fewer than two points.
pub fn resolve(points: &[Vec3], arc: f32) -> Option<PathPose> {
    if points.len() < 2 {
        return None;
    }
    let last_segment = points.len() - 2;
    let i = (arc.max(0.0).floor() as usize).min(last_segment);
    let frac = (arc - i as f32).clamp(0.0, 1.0);

    let a = points[i];
    let b = points[i + 1];
    let position = a.lerp(b, frac);

    let d = b - a;
    let horizontal = (d.x * d.x + d.z * d.z).sqrt();
    let heading = d.x.atan2(d.z);
    let pitch = d.y.atan2(horizontal);

    Some(PathPose {
        position,
        heading,
        pitch,
    })
}

/// Advance an arc position by one tick: `speed` is the unitless throttle,
/// scaled to arc-units per second by `MOVEMENT_SCALE`.
pub fn advance_arc(arc: f32, speed: f32, dt: f32) -> f32 {
    arc + speed * MOVEMENT_SCALE * dt
}

/// Exponential approach toward a target: `current += (target - current) * rate * dt`,
/// with the step clamped so large `dt` never overshoots.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// `approach` over an angle, taking the shortest way around the circle.
pub fn approach_angle(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let mut delta = (target - current) % std::f32::consts::TAU;
    if delta > std::f32::consts::PI {
        delta -= std::f32::consts::TAU;
    } else if delta < -std::f32::consts::PI {
        delta += std::f32::consts::TAU;
    }
    current + delta * (rate * dt).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

    fn straight_path() -> Vec<Vec3> {
        (0..5).map(|i| Vec3::new(0.0, 0.0, i as f32 * 2.0)).collect()
    }

    #[test]
    fn resolve_interpolates_position() {
        let path = straight_path();
        let pose = resolve(&path, 1.5).unwrap();
        assert!((pose.position - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn resolve_is_idempotent() {
        let path = vec![
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(3.0, 2.0, 4.0),
            Vec3::new(5.0, 2.5, 9.0),
        ];
        assert_eq!(resolve(&path, 1.25), resolve(&path, 1.25));
    }

    #[test]
    fn resolve_heading_along_z_is_zero() {
        let pose = resolve(&straight_path(), 0.0).unwrap();
        assert!(pose.heading.abs() < 1e-6);
        assert!(pose.pitch.abs() < 1e-6);
    }

    #[test]
    fn resolve_heading_along_x() {
        let path = vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)];
        let pose = resolve(&path, 0.0).unwrap();
        assert!((pose.heading - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn resolve_pitch_uphill() {
        // 45 degree climb.
        let path = vec![Vec3::ZERO, Vec3::new(0.0, 2.0, 2.0)];
        let pose = resolve(&path, 0.5).unwrap();
        assert!((pose.pitch - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn resolve_clamps_past_both_ends() {
        let path = straight_path();
        let start = resolve(&path, -3.0).unwrap();
        assert!((start.position - path[0]).length() < 1e-6);
        let end = resolve(&path, 99.0).unwrap();
        assert!((end.position - path[4]).length() < 1e-6);
    }

    #[test]
    fn resolve_degenerate_paths() {
        assert!(resolve(&[], 0.0).is_none());
        assert!(resolve(&[Vec3::ONE], 0.0).is_none());
    }

    #[test]
    fn advance_arc_scales_speed() {
        let arc = advance_arc(2.0, 1.0, 1.0 / 60.0);
        assert!((arc - (2.0 + MOVEMENT_SCALE / 60.0)).abs() < 1e-6);
    }

    #[test]
    fn approach_converges_without_overshoot() {
        let mut v = 0.0;
        for _ in 0..200 {
            v = approach(v, 1.0, 8.0, 1.0 / 60.0);
            assert!(v <= 1.0);
        }
        assert!((v - 1.0).abs() < 1e-3);

        // Huge dt clamps to the target instead of oscillating.
        assert_eq!(approach(0.0, 1.0, 8.0, 10.0), 1.0);
    }

    #[test]
    fn approach_angle_takes_shortest_way() {
        // From just below TAU toward just above zero: must wrap, not unwind.
        let v = approach_angle(TAU - 0.1, 0.1, 1.0, 1.0);
        assert!((v - TAU - 0.1).abs() < 1e-5 || (v - 0.1).abs() < 1e-5);

        let mid = approach_angle(-PI + 0.2, PI - 0.2, 1.0, 0.5);
        // Shortest route crosses PI, so the value moves away from zero.
        assert!(mid < -PI + 0.2);
    }
}
