//! Head pruning: drops path history far behind the consist so memory and
//! rebuild cost stay bounded on an endless track.

use crate::config::{PRUNE_MARGIN, PRUNE_RETAIN, PRUNE_THRESHOLD};

/// Prune consumed points from the head of `path`.
///
/// The oldest arc that must stay addressable is the last wagon's position
/// (`loco_arc - (wagon_count + 1) * spacing`) minus a safety margin. Nothing
/// is removed unless the path exceeds `PRUNE_THRESHOLD` points and more than
/// `PRUNE_RETAIN` points lie strictly behind that arc; the retention floor
/// is kept. Returns the number of points removed, which the caller MUST
/// subtract from every stored arc position in the same tick.
pub fn prune(path: &mut super::TrackPath, loco_arc: f32, wagon_count: usize, spacing: f32) -> usize {
    if path.len() <= PRUNE_THRESHOLD {
        return 0;
    }

    let oldest_needed = loco_arc - (wagon_count as f32 + 1.0) * spacing - PRUNE_MARGIN;
    if oldest_needed <= 0.0 {
        return 0;
    }

    let behind = (oldest_needed.floor() as usize).min(path.len());
    if behind <= PRUNE_RETAIN {
        return 0;
    }

    let removed = behind - PRUNE_RETAIN;
    path.drop_front(removed);
    removed
}
