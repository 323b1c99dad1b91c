//! The rail centerline: an append-at-tail, prune-at-head sequence of world
//! points that every track-following consumer (train, rails, terrain blend,
//! trackside scenery) resolves against.

mod generator;
mod window;

#[cfg(test)]
mod tests;

pub use window::prune;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{INITIAL_SECTIONS, SUB_POINTS};
use crate::scene::SceneSettings;
use crate::terrain::{HeightSampler, Terrain};

/// Fired whenever the point sequence changes shape, so rails, terrain and
/// scenery rebuild. `arc_shift` is non-zero only for prunes; consumers that
/// store arc positions of their own must subtract it in the same tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct TrackPathChanged {
    pub arc_shift: usize,
}

/// The generated rail path and its random-walk state.
///
/// `points` is the single source of truth for track geometry. `base_index`
/// counts points pruned from the head since the start of the session, giving
/// every point a stable global index (`base_index + local index`) that
/// trackside placement keys off.
#[derive(Resource, Debug, Clone)]
pub struct TrackPath {
    points: Vec<Vec3>,
    heading: f32,
    base_index: u64,
    rng: ChaCha8Rng,
}

impl TrackPath {
    /// Start a path at the origin with a deterministic walk for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            points: vec![Vec3::new(0.0, 10.0, 0.0)],
            heading: 0.0,
            base_index: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Path with `INITIAL_SECTIONS` sections generated up front, so wagons
    /// have track behind the locomotive from the first tick.
    pub fn with_initial_sections(seed: u64, sampler: Option<&HeightSampler>) -> Self {
        let mut path = Self::new(seed);
        for _ in 0..INITIAL_SECTIONS {
            path.extend(sampler);
        }
        path
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Global index of the first retained point.
    pub fn base_index(&self) -> u64 {
        self.base_index
    }

    /// Last committed heading of the random walk, radians.
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Append one section (`SUB_POINTS` points). See `generator.rs`.
    pub fn extend(&mut self, sampler: Option<&HeightSampler>) {
        generator::extend(self, sampler);
    }

    /// How many points of track remain ahead of `arc`.
    pub fn points_ahead(&self, arc: f32) -> usize {
        let consumed = arc.max(0.0).floor() as usize;
        self.points.len().saturating_sub(consumed + 1)
    }

    pub(crate) fn commit_section(&mut self, sub_points: impl IntoIterator<Item = Vec3>, heading: f32) {
        self.points.extend(sub_points);
        self.heading = heading;
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub(crate) fn drop_front(&mut self, count: usize) {
        let count = count.min(self.points.len());
        self.points.drain(..count);
        self.base_index += count as u64;
    }

    /// Number of sub-points appended per `extend` call.
    pub const POINTS_PER_SECTION: usize = SUB_POINTS;
}

/// Seeds the path resource at startup from the scene settings.
pub fn init_track_path(mut commands: Commands, settings: Res<SceneSettings>, terrain: Res<Terrain>) {
    let path = TrackPath::with_initial_sections(settings.seed, Some(&terrain.sampler));
    info!(
        "track seeded: {} points, seed {}, {} scene",
        path.len(),
        settings.seed,
        settings.kind.name()
    );
    commands.insert_resource(path);
}
