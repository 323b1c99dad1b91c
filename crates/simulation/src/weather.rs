//! Weather state and the fog parameters each condition implies.
//!
//! Weather is player-selected from the environment panel; it never changes
//! on its own. The particle pool listens for `WeatherChanged` to swap its
//! meshes; fog reads the state directly every frame.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Fog tuning for one weather condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogProfile {
    pub color: Color,
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherKind {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Snow,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 4] = [
        WeatherKind::Clear,
        WeatherKind::Cloudy,
        WeatherKind::Rain,
        WeatherKind::Snow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeatherKind::Clear => "Clear",
            WeatherKind::Cloudy => "Cloudy",
            WeatherKind::Rain => "Rain",
            WeatherKind::Snow => "Snow",
        }
    }

    /// Fog closes in as conditions worsen; rain pulls the far plane from a
    /// kilometre down to 300 units and tints the haze blue-grey.
    pub fn fog(self) -> FogProfile {
        match self {
            WeatherKind::Clear => FogProfile {
                color: Color::srgb(1.0, 1.0, 1.0),
                start: 100.0,
                end: 1000.0,
            },
            WeatherKind::Cloudy => FogProfile {
                color: Color::srgb(0.63, 0.67, 0.72),
                start: 80.0,
                end: 600.0,
            },
            WeatherKind::Rain => FogProfile {
                color: Color::srgb(0.125, 0.19, 0.25),
                start: 50.0,
                end: 300.0,
            },
            WeatherKind::Snow => FogProfile {
                color: Color::srgb(0.88, 0.90, 0.93),
                start: 60.0,
                end: 350.0,
            },
        }
    }

    /// True for conditions that emit precipitation particles.
    pub fn has_precipitation(self) -> bool {
        matches!(self, WeatherKind::Rain | WeatherKind::Snow)
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WeatherState {
    pub kind: WeatherKind,
    /// Particle density and fog blend weight, 0..1.
    pub intensity: f32,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            kind: WeatherKind::Clear,
            intensity: 0.7,
        }
    }
}

impl WeatherState {
    pub fn set_kind(&mut self, kind: WeatherKind) -> bool {
        if self.kind == kind {
            return false;
        }
        self.kind = kind;
        true
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
    }
}

/// Fired by the UI when the condition flips, so the particle pool retunes
/// once instead of every frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct WeatherChanged {
    pub kind: WeatherKind,
}

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeatherState>().add_event::<WeatherChanged>();
    }
}
