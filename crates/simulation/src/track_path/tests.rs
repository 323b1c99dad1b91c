//! Unit tests for path generation and the pruning window.

use super::*;
use crate::config::{
    MAX_TRACK_HEIGHT, MIN_TRACK_HEIGHT, PRUNE_THRESHOLD, SECTION_LENGTH, SUB_POINTS,
};
use crate::kinematics::resolve;
use crate::scene::{SceneKind, TerrainParams};
use crate::terrain::HeightSampler;

fn sampler() -> HeightSampler {
    HeightSampler::new(11, TerrainParams::for_scene(SceneKind::Plain))
}

#[test]
fn extend_appends_exactly_one_section() {
    let mut path = TrackPath::new(1);
    let before = path.len();
    path.extend(None);
    assert_eq!(path.len(), before + SUB_POINTS);
}

#[test]
fn generation_is_deterministic_per_seed() {
    let mut a = TrackPath::new(99);
    let mut b = TrackPath::new(99);
    for _ in 0..5 {
        a.extend(None);
        b.extend(None);
    }
    assert_eq!(a.points(), b.points());

    let mut c = TrackPath::new(100);
    c.extend(None);
    assert_ne!(a.points()[..SUB_POINTS], *c.points());
}

#[test]
fn consecutive_points_stay_within_section_step() {
    let mut path = TrackPath::with_initial_sections(7, Some(&sampler()));
    for _ in 0..20 {
        path.extend(Some(&sampler()));
    }
    let max_step = SECTION_LENGTH / SUB_POINTS as f32 * 1.05;
    for pair in path.points().windows(2) {
        let dx = pair[1].x - pair[0].x;
        let dz = pair[1].z - pair[0].z;
        let planar = (dx * dx + dz * dz).sqrt();
        assert!(planar <= max_step, "planar step {planar} exceeds {max_step}");
    }
}

#[test]
fn elevation_stays_in_track_band() {
    let mut path = TrackPath::new(3);
    for _ in 0..100 {
        path.extend(Some(&sampler()));
    }
    for p in path.points() {
        assert!((MIN_TRACK_HEIGHT..=MAX_TRACK_HEIGHT).contains(&p.y), "y out of band: {}", p.y);
    }
}

#[test]
fn track_never_doubles_back_sharply() {
    let mut path = TrackPath::new(5);
    for _ in 0..50 {
        path.extend(None);
    }
    // Heading between consecutive sub-points may never flip by more than the
    // per-section bound (30 degrees) plus slack.
    let points = path.points();
    for w in points.windows(3) {
        let h1 = (w[1].x - w[0].x).atan2(w[1].z - w[0].z);
        let h2 = (w[2].x - w[1].x).atan2(w[2].z - w[1].z);
        let mut d = (h2 - h1).abs();
        if d > std::f32::consts::PI {
            d = std::f32::consts::TAU - d;
        }
        assert!(d < 35f32.to_radians(), "kink of {} degrees", d.to_degrees());
    }
}

#[test]
fn points_ahead_tracks_consumption() {
    let mut path = TrackPath::new(2);
    path.extend(None); // 11 points
    assert_eq!(path.points_ahead(0.0), path.len() - 1);
    assert_eq!(path.points_ahead(4.5), path.len() - 5);
}

#[test]
fn prune_below_threshold_is_noop() {
    let mut path = TrackPath::with_initial_sections(8, None);
    assert!(path.len() <= PRUNE_THRESHOLD);
    assert_eq!(prune(&mut path, 90.0, 3, 0.5), 0);
}

#[test]
fn prune_keeps_retention_floor_and_shifts_base() {
    // 25 sections = 251 points, locomotive at arc 220.
    let mut path = TrackPath::new(4);
    for _ in 0..25 {
        path.extend(None);
    }
    assert_eq!(path.len(), 251);

    let removed = prune(&mut path, 220.0, 3, 0.5);
    assert!(removed > 0);
    // oldest needed = 220 - 4*0.5 - margin(10) = 208; retain 100 behind it.
    assert_eq!(removed, 108);
    assert_eq!(path.len(), 251 - 108);
    assert_eq!(path.base_index(), 108);
}

#[test]
fn prune_preserves_resolved_world_position() {
    let mut path = TrackPath::new(12);
    for _ in 0..25 {
        path.extend(None);
    }
    let arc = 220.0;
    let before = resolve(path.points(), arc).unwrap();

    let removed = prune(&mut path, arc, 3, 0.5);
    assert!(removed > 0);
    let after = resolve(path.points(), arc - removed as f32).unwrap();

    assert!(
        (before.position - after.position).length() < 1e-4,
        "prune desynced the resolved position: {:?} vs {:?}",
        before.position,
        after.position
    );
    assert!((before.heading - after.heading).abs() < 1e-5);
    assert!((before.pitch - after.pitch).abs() < 1e-5);
}

#[test]
fn prune_never_strands_the_consist() {
    let mut path = TrackPath::new(6);
    for _ in 0..30 {
        path.extend(None);
    }
    let arc = 250.0;
    let removed = prune(&mut path, arc, 10, 1.0);
    let shifted = arc - removed as f32;
    // Last wagon (10 cars at spacing 1.0) must still resolve on real track.
    let tail_arc = shifted - 11.0;
    assert!(tail_arc > 0.0);
    assert!(resolve(path.points(), tail_arc).is_some());
}

#[test]
fn repeated_prunes_keep_global_indices_monotonic() {
    let mut path = TrackPath::new(9);
    let mut arc = 0.0f32;
    let mut last_base = 0;
    for _ in 0..200 {
        arc += 2.0;
        while path.points_ahead(arc) < 20 {
            path.extend(None);
        }
        let removed = prune(&mut path, arc, 3, 1.0);
        arc -= removed as f32;
        assert!(path.base_index() >= last_base);
        last_base = path.base_index();
        assert!(path.len() <= PRUNE_THRESHOLD + SUB_POINTS + 1);
    }
}
