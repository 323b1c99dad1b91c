//! Scene presets selecting terrain character.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which landscape the railway runs through. Chosen once per session; the
/// terrain sampler is rebuilt when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneKind {
    #[default]
    Plain,
    Mountain,
}

impl SceneKind {
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Plain => "Plain",
            SceneKind::Mountain => "Mountain",
        }
    }
}

/// Noise parameters for one scene kind. Immutable once built into a
/// `HeightSampler`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    /// World-units per noise unit at the base octave.
    pub scale: f32,
    /// World-space amplitude of the normalized octave sum.
    pub height_scale: f32,
    pub octaves: u32,
    /// Amplitude falloff per octave.
    pub persistence: f32,
    /// Half-width of the rail bed itself.
    pub railway_width: f32,
}

impl TerrainParams {
    pub fn for_scene(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Plain => Self {
                scale: 100.0,
                height_scale: 5.0,
                octaves: 3,
                persistence: 0.3,
                railway_width: 5.0,
            },
            SceneKind::Mountain => Self {
                scale: 150.0,
                height_scale: 15.0,
                octaves: 6,
                persistence: 0.5,
                railway_width: 5.0,
            },
        }
    }

    /// Lateral band around the centerline inside which terrain height is
    /// blended toward the rail bed.
    pub fn corridor_width(&self) -> f32 {
        self.railway_width * 4.0
    }
}

/// Session configuration: scene kind and the world seed everything
/// deterministic (path walk, noise, trackside events) derives from.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SceneSettings {
    pub kind: SceneKind,
    pub seed: u64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            kind: SceneKind::Plain,
            seed: 0xC0FFEE,
        }
    }
}

impl SceneSettings {
    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams::for_scene(self.kind)
    }
}
