//! Terrain height sampling: a seeded 2D noise field plus the octave ladder
//! and rail-corridor blend that terrain meshes and the path generator share.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::scene::{SceneSettings, TerrainParams};

/// Hermite smoothstep on [0, 1].
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Deterministic, continuous 2D scalar field in [-1, 1].
///
/// The octave ladder lives in `HeightSampler`, so the field itself stays
/// single-layer (no fractal mode).
pub struct NoiseField {
    noise: FastNoiseLite,
}

// FastNoiseLite carries no Clone impl; the field is a pure function of its
// seed, so rebuilding from the seed is an exact copy.
impl Clone for NoiseField {
    fn clone(&self) -> Self {
        Self::new(self.noise.seed)
    }
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z)
    }
}

/// World elevation at any (x, z), blending free noise toward the rail bed
/// near the track.
#[derive(Clone)]
pub struct HeightSampler {
    field: NoiseField,
    params: TerrainParams,
}

impl HeightSampler {
    pub fn new(seed: i32, params: TerrainParams) -> Self {
        Self {
            field: NoiseField::new(seed),
            params,
        }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Free terrain height: octave sum at doubling frequency and
    /// `persistence` amplitude falloff, normalized by total amplitude.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let mut height = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut total_amplitude = 0.0;

        for _ in 0..self.params.octaves {
            height += self
                .field
                .sample(x / self.params.scale * frequency, z / self.params.scale * frequency)
                * amplitude;
            total_amplitude += amplitude;
            frequency *= 2.0;
            amplitude *= self.params.persistence;
        }

        height / total_amplitude * self.params.height_scale
    }

    /// Height blended toward the rail bed inside the corridor.
    ///
    /// At the nearest path point the result is exactly that point's y; at or
    /// beyond `corridor_width` it is the free noise height, with a smoothstep
    /// transition between. An empty path falls back to free noise.
    pub fn height_near_path(&self, x: f32, z: f32, path: &[Vec3]) -> f32 {
        let free = self.height(x, z);
        let Some((nearest, dist)) = nearest_path_point(x, z, path) else {
            return free;
        };

        let corridor = self.params.corridor_width();
        if dist >= corridor {
            return free;
        }

        let w = smoothstep(dist / corridor);
        nearest.y * (1.0 - w) + free * w
    }
}

/// Nearest path point to (x, z) in the XZ plane and its planar distance.
/// Linear scan; the path window keeps the sequence short enough.
fn nearest_path_point(x: f32, z: f32, path: &[Vec3]) -> Option<(Vec3, f32)> {
    let mut best: Option<(Vec3, f32)> = None;
    for &p in path {
        let dx = p.x - x;
        let dz = p.z - z;
        let d2 = dx * dx + dz * dz;
        match best {
            Some((_, bd)) if bd * bd <= d2 => {}
            _ => best = Some((p, d2.sqrt())),
        }
    }
    best
}

/// Resource wrapper so terrain consumers share one sampler per scene.
#[derive(Resource, Clone)]
pub struct Terrain {
    pub sampler: HeightSampler,
}

impl Terrain {
    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self {
            sampler: HeightSampler::new(settings.seed as i32, settings.terrain_params()),
        }
    }
}

/// Rebuilds the sampler when the scene kind or seed changes.
pub fn rebuild_terrain(settings: Res<SceneSettings>, mut terrain: ResMut<Terrain>) {
    if settings.is_changed() && !settings.is_added() {
        info!("terrain resampled for {} scene", settings.kind.name());
        *terrain = Terrain::from_settings(&settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneKind;

    fn sampler() -> HeightSampler {
        HeightSampler::new(7, TerrainParams::for_scene(SceneKind::Mountain))
    }

    #[test]
    fn noise_field_is_deterministic_and_bounded() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..100 {
            let x = i as f32 * 0.173;
            let z = i as f32 * -0.311;
            let v = a.sample(x, z);
            assert_eq!(v, b.sample(x, z));
            assert!((-1.0..=1.0).contains(&v), "sample out of range: {v}");
        }
    }

    #[test]
    fn cloned_field_samples_identically() {
        let a = NoiseField::new(5);
        let b = a.clone();
        for i in 0..50 {
            let x = i as f32 * 0.37;
            let z = i as f32 * -0.53;
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
    }

    #[test]
    fn height_is_pure() {
        let s = sampler();
        assert_eq!(s.height(12.5, -40.0), s.height(12.5, -40.0));
    }

    #[test]
    fn height_at_path_point_returns_path_elevation() {
        let s = sampler();
        let path = vec![Vec3::new(10.0, 23.0, 5.0), Vec3::new(16.0, 24.0, 5.0)];
        let h = s.height_near_path(10.0, 5.0, &path);
        assert!((h - 23.0).abs() < 1e-5, "expected rail bed height, got {h}");
    }

    #[test]
    fn height_outside_corridor_is_free_noise() {
        let s = sampler();
        let corridor = s.params().corridor_width();
        let path = vec![Vec3::new(0.0, 40.0, 0.0)];
        let x = corridor + 1.0;
        assert_eq!(s.height_near_path(x, 0.0, &path), s.height(x, 0.0));
    }

    #[test]
    fn empty_path_falls_back_to_free_noise() {
        let s = sampler();
        assert_eq!(s.height_near_path(3.0, 4.0, &[]), s.height(3.0, 4.0));
    }

    #[test]
    fn corridor_blend_is_monotonic_toward_track() {
        // Flat path well above the free terrain: closer samples must be higher.
        let s = sampler();
        let path = vec![Vec3::new(0.0, 200.0, 0.0)];
        let corridor = s.params().corridor_width();
        let near = s.height_near_path(corridor * 0.1, 0.0, &path);
        let mid = s.height_near_path(corridor * 0.5, 0.0, &path);
        let far = s.height_near_path(corridor * 0.95, 0.0, &path);
        assert!(near > mid && mid > far, "blend not graded: {near} {mid} {far}");
    }

    #[test]
    fn smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(-2.0), 0.0);
        assert_eq!(smoothstep(3.0), 1.0);
    }
}
