//! Tuning constants for track generation and train movement.

use std::f32::consts::PI;

/// World-unit distance between consecutive path anchors.
pub const SECTION_LENGTH: f32 = 60.0;

/// Sub-points each anchor-to-anchor section is subdivided into.
pub const SUB_POINTS: usize = 10;

/// Maximum heading change per section, radians (bounded random walk).
pub const MAX_HEADING_DELTA: f32 = 30.0 * PI / 180.0;

/// Maximum elevation change per section, world units.
pub const MAX_ELEVATION_DELTA: f32 = 6.0;

/// Track elevation is clamped to this range.
pub const MIN_TRACK_HEIGHT: f32 = 0.0;
pub const MAX_TRACK_HEIGHT: f32 = 50.0;

/// A new section is generated once the locomotive comes within this many
/// points of the path's far end.
pub const HORIZON_LOOKAHEAD: usize = 20;

/// Sections generated up front, before the first tick. Ten sections give the
/// consist 100 points of track so wagons always resolve behind the
/// locomotive without clamping.
pub const INITIAL_SECTIONS: usize = 10;

/// Pruning only happens while the path holds more points than this.
pub const PRUNE_THRESHOLD: usize = 200;

/// Points kept behind the oldest needed arc position after a prune.
pub const PRUNE_RETAIN: usize = 100;

/// Extra arc-units of lookback preserved behind the last wagon.
pub const PRUNE_MARGIN: f32 = 10.0;

/// Arc-length spacing between consecutive cars, in path-point index units.
/// One index unit is SECTION_LENGTH / SUB_POINTS = 6 world units.
pub const WAGON_SPACING: f32 = 1.0;

pub const MAX_WAGONS: usize = 10;
pub const MIN_WAGONS: usize = 1;

/// Unitless throttle range. Initial value matches the original toy's 0.91.
pub const MAX_SPEED: f32 = 2.0;
pub const INITIAL_SPEED: f32 = 0.91;

/// Throttle change per second while a throttle key is held.
pub const SPEED_STEP: f32 = 0.6;

/// Converts throttle to arc-units per second: arc += speed * MOVEMENT_SCALE * dt.
pub const MOVEMENT_SCALE: f32 = 5.0;

/// Wall-clock duration of the wagon enter/exit scale+opacity tween.
pub const WAGON_TWEEN_SECS: f32 = 0.2;

/// Exponential smoothing rate for heading/pitch applied render-side.
pub const ORIENT_SMOOTHING: f32 = 8.0;

/// Number of starting wagons, as in the original toy.
pub const INITIAL_WAGONS: usize = 3;

/// Trackside events: one candidate every EVENT_SPACING points, placed with
/// probability EVENT_CHANCE at EVENT_SIDE_OFFSET units beside the rails.
pub const EVENT_SPACING: u64 = 50;
pub const EVENT_CHANCE: f64 = 0.3;
pub const EVENT_SIDE_OFFSET: f32 = 3.0;

/// Wall-clock seconds for one full day/night revolution.
pub const DAY_CYCLE_SECS: f32 = 600.0;

/// Fuel drains at this rate per unit of throttle per second; tank is 0..100.
pub const FUEL_BURN_RATE: f32 = 0.35;
pub const MAX_FUEL: f32 = 100.0;

/// Boiler pressure range and dynamics (rise under throttle, bleed at idle).
pub const MAX_PRESSURE: f32 = 10.0;
pub const PRESSURE_RISE_RATE: f32 = 1.5;
pub const PRESSURE_BLEED_RATE: f32 = 0.8;
pub const IDLE_PRESSURE: f32 = 2.0;
