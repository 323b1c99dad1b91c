//! Trackside events: stations, signals, and scenery props placed beside the
//! rails at deterministic intervals.
//!
//! Placement is keyed by each candidate point's GLOBAL index
//! (`TrackPath::base_index` plus the local index), so a prop neither moves
//! nor re-rolls when the path head is pruned. Every `EVENT_SPACING`th global
//! point is a candidate; a per-point RNG seeded from the scene seed and the
//! global index decides whether it spawns, what it is, and which side of the
//! track it stands on.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{EVENT_CHANCE, EVENT_SIDE_OFFSET, EVENT_SPACING};
use crate::scene::SceneSettings;
use crate::track_path::{TrackPath, TrackPathChanged};
use crate::SimulationSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracksideKind {
    Station,
    Signal,
    Tree,
    Rock,
    Sign,
}

impl TracksideKind {
    const ALL: [TracksideKind; 5] = [
        TracksideKind::Station,
        TracksideKind::Signal,
        TracksideKind::Tree,
        TracksideKind::Rock,
        TracksideKind::Sign,
    ];
}

/// One placed prop. `global_index` is its identity across prunes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracksideEvent {
    pub global_index: u64,
    pub kind: TracksideKind,
    pub position: Vec3,
    /// Yaw of the local track tangent, so props face along the rails.
    pub heading: f32,
}

/// Props alongside the currently retained stretch of track.
#[derive(Resource, Debug, Clone, Default)]
pub struct TracksideEvents {
    pub events: Vec<TracksideEvent>,
}

impl TracksideEvents {
    /// Rebuild the prop list for the retained path window. Pure function of
    /// the path and seed, so repeated calls are idempotent.
    pub fn rebuild(&mut self, path: &TrackPath, seed: u64) {
        self.events.clear();
        let points = path.points();
        for (local, window) in points.windows(2).enumerate() {
            let global = path.base_index() + local as u64;
            if global == 0 || global % EVENT_SPACING != 0 {
                continue;
            }
            if let Some(event) = roll_event(global, seed, window[0], window[1]) {
                self.events.push(event);
            }
        }
    }
}

/// Decide deterministically whether a prop stands at the given global point.
fn roll_event(global: u64, seed: u64, at: Vec3, next: Vec3) -> Option<TracksideEvent> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ global);
    if !rng.gen_bool(EVENT_CHANCE) {
        return None;
    }
    let kind = TracksideKind::ALL[rng.gen_range(0..TracksideKind::ALL.len())];
    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

    // Offset perpendicular to the local track direction, in the ground plane.
    let dir = next - at;
    let perp = Vec3::new(dir.z, 0.0, -dir.x).normalize_or_zero();
    let position = at + perp * side * EVENT_SIDE_OFFSET;
    Some(TracksideEvent {
        global_index: global,
        kind,
        position,
        heading: dir.x.atan2(dir.z),
    })
}

/// Re-derives the prop list whenever the path grows or is pruned.
pub fn refresh_trackside_events(
    mut changed: EventReader<TrackPathChanged>,
    path: Res<TrackPath>,
    settings: Res<SceneSettings>,
    mut events: ResMut<TracksideEvents>,
) {
    if changed.read().next().is_none() && !path.is_added() {
        return;
    }
    events.rebuild(&path, settings.seed);
}

pub struct TracksideEventsPlugin;

impl Plugin for TracksideEventsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TracksideEvents>()
            .add_systems(Update, refresh_trackside_events.in_set(SimulationSet::Derive));
    }
}
