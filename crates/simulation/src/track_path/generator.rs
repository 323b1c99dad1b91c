//! Incremental path extension: a bounded random walk in heading and
//! elevation, smoothed into sub-points.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{
    MAX_ELEVATION_DELTA, MAX_HEADING_DELTA, MAX_TRACK_HEIGHT, MIN_TRACK_HEIGHT, SECTION_LENGTH,
    SUB_POINTS,
};
use crate::terrain::{smoothstep, HeightSampler};

/// Append one section to `path`.
///
/// The new heading perturbs the last committed heading by at most
/// `MAX_HEADING_DELTA`, so the track curves but never doubles back. The new
/// anchor's elevation random-walks within `MAX_ELEVATION_DELTA`, leans
/// toward the local terrain height when a sampler is supplied, and is
/// clamped to the track's height band. Sub-point x/z interpolate linearly;
/// y uses a smoothstep-eased fraction so grade changes never kink at
/// section boundaries.
pub(super) fn extend(path: &mut super::TrackPath, sampler: Option<&HeightSampler>) {
    let last = path
        .points()
        .last()
        .copied()
        .unwrap_or(Vec3::new(0.0, 10.0, 0.0));
    let prev_heading = path.heading();

    let rng = path.rng_mut();
    let heading = prev_heading + rng.gen_range(-MAX_HEADING_DELTA..=MAX_HEADING_DELTA);
    let elevation_delta = rng.gen_range(-MAX_ELEVATION_DELTA..=MAX_ELEVATION_DELTA);

    let anchor_x = last.x + heading.sin() * SECTION_LENGTH;
    let anchor_z = last.z + heading.cos() * SECTION_LENGTH;

    let mut anchor_y = last.y + elevation_delta;
    if let Some(sampler) = sampler {
        // Lean the rail bed toward the surrounding terrain so cuttings and
        // embankments stay shallow, still bounded by the walk delta.
        let terrain_y = sampler.height(anchor_x, anchor_z);
        let leaned = anchor_y + (terrain_y - anchor_y) * 0.25;
        anchor_y = leaned.clamp(
            last.y - MAX_ELEVATION_DELTA,
            last.y + MAX_ELEVATION_DELTA,
        );
    }
    let anchor_y = anchor_y.clamp(MIN_TRACK_HEIGHT, MAX_TRACK_HEIGHT);

    let section = (1..=SUB_POINTS).map(move |k| {
        let t = k as f32 / SUB_POINTS as f32;
        let eased = smoothstep(t);
        Vec3::new(
            last.x + (anchor_x - last.x) * t,
            last.y + (anchor_y - last.y) * eased,
            last.z + (anchor_z - last.z) * t,
        )
    });

    path.commit_section(section, heading);
}
