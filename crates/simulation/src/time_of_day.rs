//! The day/night clock: a normalized 0..1 time that wraps every
//! `DAY_CYCLE_SECS`, plus the sun geometry derived from it.

use std::f32::consts::TAU;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::DAY_CYCLE_SECS;
use crate::SimulationSet;

/// Coarse phase labels for lighting and the HUD clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Night,
    Dawn,
    Day,
    Dusk,
}

/// Normalized time of day. 0.0 is midnight, 0.25 dawn, 0.5 noon, 0.75 dusk.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DayCycle {
    /// Current time in [0, 1).
    pub time: f32,
    /// When false the clock is frozen (UI slider takes over).
    pub auto_advance: bool,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self {
            // Start mid-morning so the first impression is daylight.
            time: 0.35,
            auto_advance: true,
        }
    }
}

impl DayCycle {
    /// Quick-jump presets offered by the environment panel.
    pub const PRESETS: [(&'static str, f32); 4] = [
        ("Morning", 0.3),
        ("Noon", 0.5),
        ("Evening", 0.75),
        ("Night", 0.0),
    ];

    /// Advance the clock by wall-clock `dt`, wrapping at 1.0.
    pub fn tick(&mut self, dt: f32) {
        if self.auto_advance {
            self.time = (self.time + dt / DAY_CYCLE_SECS).rem_euclid(1.0);
        }
    }

    /// Sun angle above the horizon, radians. Negative at night.
    pub fn sun_elevation(&self) -> f32 {
        // time 0.25 -> sunrise (0), 0.5 -> noon (max), 0.75 -> sunset (0).
        ((self.time - 0.25) * TAU).sin() * std::f32::consts::FRAC_PI_3
    }

    /// Unit direction light travels from the sun toward the scene.
    pub fn sun_direction(&self) -> Vec3 {
        let elev = self.sun_elevation();
        let azimuth = self.time * TAU;
        Vec3::new(azimuth.cos() * elev.cos(), -elev.sin().max(0.05), azimuth.sin() * elev.cos())
            .normalize()
    }

    pub fn phase(&self) -> DayPhase {
        match self.time {
            t if !(0.2..0.8).contains(&t) => DayPhase::Night,
            t if t < 0.3 => DayPhase::Dawn,
            t if t < 0.7 => DayPhase::Day,
            _ => DayPhase::Dusk,
        }
    }

    /// 0 at night, 1 at full day, ramping through dawn/dusk. Lighting and
    /// fog color lerp off this.
    pub fn daylight(&self) -> f32 {
        match self.time {
            t if !(0.2..0.8).contains(&t) => 0.0,
            t if t < 0.3 => (t - 0.2) / 0.1,
            t if t < 0.7 => 1.0,
            t => 1.0 - (t - 0.7) / 0.1,
        }
    }
}

pub fn advance_day_cycle(time: Res<Time>, mut cycle: ResMut<DayCycle>) {
    cycle.tick(time.delta_secs());
}

pub struct DayCyclePlugin;

impl Plugin for DayCyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayCycle>()
            .add_systems(Update, advance_day_cycle.in_set(SimulationSet::Derive));
    }
}
