//! Cab gauges: fuel, boiler pressure, and the odometer.
//!
//! Cosmetic bookkeeping for the HUD and cockpit dials; none of it feeds back
//! into movement.

use bevy::prelude::*;

use crate::config::{
    FUEL_BURN_RATE, IDLE_PRESSURE, MAX_FUEL, MAX_PRESSURE, MOVEMENT_SCALE, PRESSURE_BLEED_RATE,
    PRESSURE_RISE_RATE,
};
use crate::consist::TrainConsist;
use crate::SimulationSet;

#[derive(Resource, Debug, Clone)]
pub struct TrainGauges {
    /// Remaining fuel, 0..MAX_FUEL.
    pub fuel: f32,
    /// Boiler pressure, 0..MAX_PRESSURE.
    pub pressure: f32,
    /// Cumulative world-units traveled this session.
    pub distance: f32,
}

impl Default for TrainGauges {
    fn default() -> Self {
        Self {
            fuel: MAX_FUEL,
            pressure: 5.0,
            distance: 0.0,
        }
    }
}

impl TrainGauges {
    /// Advance the dials one tick for the given throttle.
    pub fn tick(&mut self, dt: f32, speed: f32) {
        self.fuel = (self.fuel - speed * FUEL_BURN_RATE * dt).clamp(0.0, MAX_FUEL);
        self.distance += speed * MOVEMENT_SCALE * dt;

        // Pressure climbs with the throttle and bleeds back to idle when
        // coasting.
        let target = IDLE_PRESSURE + speed / crate::config::MAX_SPEED * (MAX_PRESSURE - IDLE_PRESSURE);
        let rate = if target > self.pressure {
            PRESSURE_RISE_RATE
        } else {
            PRESSURE_BLEED_RATE
        };
        let step = rate * dt;
        if (target - self.pressure).abs() <= step {
            self.pressure = target;
        } else if target > self.pressure {
            self.pressure += step;
        } else {
            self.pressure -= step;
        }
        self.pressure = self.pressure.clamp(0.0, MAX_PRESSURE);
    }
}

pub fn update_gauges(time: Res<Time>, consist: Res<TrainConsist>, mut gauges: ResMut<TrainGauges>) {
    gauges.tick(time.delta_secs(), consist.speed());
}

pub struct GaugesPlugin;

impl Plugin for GaugesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrainGauges>()
            .add_systems(Update, update_gauges.in_set(SimulationSet::Derive));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn fuel_drains_with_throttle_and_clamps_at_zero() {
        let mut g = TrainGauges::default();
        for _ in 0..60 {
            g.tick(DT, 1.0);
        }
        assert!((g.fuel - (MAX_FUEL - FUEL_BURN_RATE)).abs() < 1e-3);

        g.fuel = 0.01;
        for _ in 0..600 {
            g.tick(DT, 2.0);
        }
        assert_eq!(g.fuel, 0.0);
    }

    #[test]
    fn fuel_holds_while_stopped() {
        let mut g = TrainGauges::default();
        let before = g.fuel;
        for _ in 0..600 {
            g.tick(DT, 0.0);
        }
        assert_eq!(g.fuel, before);
    }

    #[test]
    fn odometer_integrates_speed() {
        let mut g = TrainGauges::default();
        for _ in 0..120 {
            g.tick(DT, 1.0);
        }
        assert!((g.distance - 2.0 * MOVEMENT_SCALE).abs() < 1e-3);
    }

    #[test]
    fn pressure_rises_under_throttle_and_bleeds_at_idle() {
        let mut g = TrainGauges::default();
        for _ in 0..600 {
            g.tick(DT, crate::config::MAX_SPEED);
        }
        assert!((g.pressure - MAX_PRESSURE).abs() < 1e-3);

        for _ in 0..1200 {
            g.tick(DT, 0.0);
        }
        assert!((g.pressure - IDLE_PRESSURE).abs() < 1e-3);
    }
}
