//! Pure consist logic: the per-tick update and the mutation API.

use bevy::prelude::*;

use crate::config::{
    HORIZON_LOOKAHEAD, INITIAL_SPEED, INITIAL_WAGONS, MAX_SPEED, MAX_WAGONS, MIN_WAGONS,
    SPEED_STEP, WAGON_SPACING,
};
use crate::input::ThrottleInput;
use crate::kinematics::{advance_arc, resolve, PathPose};
use crate::terrain::HeightSampler;
use crate::track_path::{prune, TrackPath};

use super::types::Wagon;

/// What one `advance` call did, so the driving system can emit events and
/// trigger rebuilds without re-deriving it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Sections generated this tick (usually 0 or 1).
    pub sections_extended: usize,
    /// Points pruned from the head this tick (already applied to the arcs).
    pub points_pruned: usize,
    /// Index of a wagon whose enter tween started.
    pub wagon_added: Option<usize>,
    /// Index of a wagon whose exit tween started.
    pub wagon_removed: Option<usize>,
}

impl AdvanceOutcome {
    pub fn path_changed(&self) -> bool {
        self.sections_extended > 0 || self.points_pruned > 0
    }
}

/// Locomotive arc state, throttle, and the wagon list.
#[derive(Resource, Debug, Clone)]
pub struct TrainConsist {
    arc: f32,
    speed: f32,
    braking: bool,
    loco_pose: PathPose,
    wagons: Vec<Wagon>,
}

impl Default for TrainConsist {
    fn default() -> Self {
        let mut consist = Self {
            arc: (INITIAL_WAGONS as f32 + 1.0) * WAGON_SPACING,
            speed: INITIAL_SPEED,
            braking: false,
            loco_pose: PathPose::default(),
            wagons: Vec::new(),
        };
        for _ in 0..INITIAL_WAGONS {
            consist.wagons.push(Wagon {
                pose: PathPose::default(),
                visibility: 1.0,
                tween_target: 1.0,
            });
        }
        consist
    }
}

impl TrainConsist {
    pub fn arc(&self) -> f32 {
        self.arc
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_braking(&self) -> bool {
        self.braking
    }

    pub fn loco_pose(&self) -> PathPose {
        self.loco_pose
    }

    pub fn wagons(&self) -> &[Wagon] {
        &self.wagons
    }

    /// Wagons currently coupled (exit-tweening cars no longer count).
    pub fn coupled_count(&self) -> usize {
        self.wagons.iter().filter(|w| w.tween_target > 0.0).count()
    }

    /// Clamp-set the throttle. The only speed mutation path besides the
    /// held throttle keys in `advance`.
    pub fn set_speed(&mut self, v: f32) {
        self.speed = v.clamp(0.0, MAX_SPEED);
    }

    /// Start coupling a wagon. No-op at `MAX_WAGONS`. The new wagon is
    /// resolved to its correct pose immediately so it fades in in place.
    ///
    /// An add while a wagon is still exit-tweening recouples that wagon
    /// in place (tween retargets from its current value) rather than
    /// appending a second car behind the fading one.
    pub fn add_wagon(&mut self, path: &TrackPath) -> Option<usize> {
        if let Some((index, wagon)) = self
            .wagons
            .iter_mut()
            .enumerate()
            .find(|(_, w)| w.tween_target == 0.0)
        {
            wagon.tween_target = 1.0;
            return Some(index);
        }
        if self.wagons.len() >= MAX_WAGONS {
            return None;
        }
        let index = self.wagons.len();
        let arc = self.wagon_arc(index);
        let pose = resolve(path.points(), arc).unwrap_or(self.loco_pose);
        self.wagons.push(Wagon::entering(pose));
        Some(index)
    }

    /// Start uncoupling the last coupled wagon. No-op at the minimum.
    pub fn remove_wagon(&mut self) -> Option<usize> {
        if self.coupled_count() <= MIN_WAGONS {
            return None;
        }
        let (index, wagon) = self
            .wagons
            .iter_mut()
            .enumerate()
            .rev()
            .find(|(_, w)| w.tween_target > 0.0)?;
        wagon.tween_target = 0.0;
        Some(index)
    }

    /// One simulation tick, in strict order: throttle -> advance arc ->
    /// extend near the horizon -> resolve locomotive then wagons -> prune
    /// (arc shift applied atomically).
    pub fn advance(
        &mut self,
        dt: f32,
        input: &ThrottleInput,
        path: &mut TrackPath,
        sampler: Option<&HeightSampler>,
    ) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();

        // Throttle. Backward doubles as the brake flag for the HUD/sparks.
        if input.forward {
            self.set_speed(self.speed + SPEED_STEP * dt);
        }
        if input.backward {
            self.set_speed(self.speed - SPEED_STEP * dt);
        }
        self.braking = input.backward;

        if input.add_wagon {
            outcome.wagon_added = self.add_wagon(path);
        }
        if input.remove_wagon {
            outcome.wagon_removed = self.remove_wagon();
        }

        // Advance and keep the horizon ahead of travel. High speed relative
        // to section length may queue several extends in one tick.
        self.arc = advance_arc(self.arc, self.speed, dt);
        while path.points_ahead(self.arc) < HORIZON_LOOKAHEAD {
            path.extend(sampler);
            outcome.sections_extended += 1;
        }

        // Resolve every car independently from the shared path; the wagons
        // use the same resolver as the locomotive so the train stays
        // visually coherent through curves.
        if let Some(pose) = resolve(path.points(), self.arc) {
            self.loco_pose = pose;
        }
        for k in 0..self.wagons.len() {
            let arc = self.wagon_arc(k);
            if let Some(pose) = resolve(path.points(), arc) {
                self.wagons[k].pose = pose;
            }
            self.wagons[k].tick_tween(dt);
        }
        self.wagons.retain(|w| !w.departed());

        // Prune last; shifting the locomotive arc here keeps the prune
        // atomic with the shift.
        let removed = prune(path, self.arc, self.wagons.len(), WAGON_SPACING);
        if removed > 0 {
            self.arc -= removed as f32;
            outcome.points_pruned = removed;
        }

        outcome
    }

    /// Arc position of wagon `k`, spaced behind the locomotive.
    pub fn wagon_arc(&self, k: usize) -> f32 {
        self.arc - (k as f32 + 1.0) * WAGON_SPACING
    }
}
