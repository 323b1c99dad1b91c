//! The rail mesh: two steel rails and wooden sleepers, regenerated from the
//! retained path window whenever it grows or is pruned.

use bevy::prelude::*;
use bevy::render::mesh::Indices;

use simulation::track_path::{TrackPath, TrackPathChanged};

/// Half the distance between rail centerlines.
const RAIL_HALF_GAUGE: f32 = 1.0;
/// Rail cross-section half-width and height above the bed.
const RAIL_HALF_WIDTH: f32 = 0.08;
const RAIL_LIFT: f32 = 0.15;
/// Sleepers sit just above the bed, one per path point.
const SLEEPER_HALF_LENGTH: f32 = 1.1;
const SLEEPER_HALF_WIDTH: f32 = 0.18;
const SLEEPER_LIFT: f32 = 0.05;

const RAIL_COLOR: [f32; 4] = [0.35, 0.33, 0.32, 1.0];
const SLEEPER_COLOR: [f32; 4] = [0.32, 0.2, 0.1, 1.0];

#[derive(Component)]
pub struct RailwayMesh;

pub fn setup_railway(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::new(
            bevy::render::mesh::PrimitiveTopology::TriangleList,
            bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
                | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.85,
            ..default()
        })),
        Transform::IDENTITY,
        RailwayMesh,
    ));
}

/// Rebuilds the rail mesh in place when the path changes shape.
pub fn rebuild_railway(
    mut changed: EventReader<TrackPathChanged>,
    path: Res<TrackPath>,
    mut meshes: ResMut<Assets<Mesh>>,
    railway: Query<&Mesh3d, With<RailwayMesh>>,
) {
    if changed.read().next().is_none() && !path.is_added() {
        return;
    }
    let Ok(handle) = railway.get_single() else {
        return;
    };
    if let Some(mesh) = meshes.get_mut(&handle.0) {
        *mesh = build_railway_mesh(path.points());
    }
}

struct MeshBuffers {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
}

impl MeshBuffers {
    fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Upward-facing quad from four corners in winding order.
    fn push_quad(&mut self, corners: [Vec3; 4], color: [f32; 4]) {
        let base = self.positions.len() as u32;
        for corner in corners {
            self.positions.push([corner.x, corner.y, corner.z]);
            self.normals.push([0.0, 1.0, 0.0]);
            self.colors.push(color);
        }
        self.indices
            .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    fn into_mesh(self) -> Mesh {
        let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; self.positions.len()];
        Mesh::new(
            bevy::render::mesh::PrimitiveTopology::TriangleList,
            bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
                | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(self.indices))
    }
}

fn build_railway_mesh(points: &[Vec3]) -> Mesh {
    let mut buffers = MeshBuffers::new();

    for window in points.windows(2) {
        let (a, b) = (window[0], window[1]);
        let dir = b - a;
        let side = Vec3::new(dir.z, 0.0, -dir.x).normalize_or_zero();
        if side == Vec3::ZERO {
            continue;
        }

        for rail_side in [-1.0, 1.0] {
            let offset = side * rail_side * RAIL_HALF_GAUGE;
            let lift = Vec3::Y * RAIL_LIFT;
            buffers.push_quad(
                [
                    a + offset - side * RAIL_HALF_WIDTH + lift,
                    a + offset + side * RAIL_HALF_WIDTH + lift,
                    b + offset + side * RAIL_HALF_WIDTH + lift,
                    b + offset - side * RAIL_HALF_WIDTH + lift,
                ],
                RAIL_COLOR,
            );
        }

        // One sleeper at the segment start, laid across the bed.
        let along = dir.normalize_or_zero() * SLEEPER_HALF_WIDTH;
        let lift = Vec3::Y * SLEEPER_LIFT;
        buffers.push_quad(
            [
                a - side * SLEEPER_HALF_LENGTH - along + lift,
                a + side * SLEEPER_HALF_LENGTH - along + lift,
                a + side * SLEEPER_HALF_LENGTH + along + lift,
                a - side * SLEEPER_HALF_LENGTH + along + lift,
            ],
            SLEEPER_COLOR,
        );
    }

    buffers.into_mesh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rail_quads_straddle_the_centerline() {
        let points = vec![Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 10.0, 6.0)];
        let mesh = build_railway_mesh(&points);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .unwrap();
        // 2 rails + 1 sleeper, 4 vertices each.
        assert_eq!(positions.len(), 12);
        let left = positions.iter().filter(|p| p[0] < 0.0).count();
        let right = positions.iter().filter(|p| p[0] > 0.0).count();
        assert_eq!(left, right);
    }

    #[test]
    fn empty_and_single_point_paths_build_empty_meshes() {
        for points in [vec![], vec![Vec3::ONE]] {
            let mesh = build_railway_mesh(&points);
            let positions = mesh
                .attribute(Mesh::ATTRIBUTE_POSITION)
                .and_then(|a| a.as_float3())
                .unwrap();
            assert!(positions.is_empty());
        }
    }
}
