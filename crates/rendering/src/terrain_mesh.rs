//! The terrain patch: a heightfield grid kept centered on the locomotive.
//!
//! Rather than paging chunks, one square patch follows the train. It is
//! re-sampled when the train has moved a cell or the path window changed
//! (the corridor blend depends on the retained points). Vertex colors band
//! by elevation: water, grass, forest, rock, snowcap.

use bevy::prelude::*;
use bevy::render::mesh::Indices;

use simulation::consist::TrainConsist;
use simulation::terrain::Terrain;
use simulation::track_path::{TrackPath, TrackPathChanged};

/// Patch edge length in world units and vertices per edge.
const PATCH_SIZE: f32 = 400.0;
const PATCH_VERTS: usize = 81;

const CELL: f32 = PATCH_SIZE / (PATCH_VERTS as f32 - 1.0);

#[derive(Component)]
pub struct TerrainPatch;

/// Last center the patch was sampled at, snapped to the cell grid.
#[derive(Resource, Default)]
pub struct PatchCenter {
    pub center: Vec2,
    pub sampled: bool,
}

pub fn setup_terrain_patch(
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
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::IDENTITY,
        TerrainPatch,
    ));
    commands.init_resource::<PatchCenter>();
}

/// Re-samples the patch when the train leaves the current cell or the path
/// window shifts underneath it.
pub fn update_terrain_patch(
    mut changed: EventReader<TrackPathChanged>,
    consist: Res<TrainConsist>,
    terrain: Res<Terrain>,
    path: Res<TrackPath>,
    mut center: ResMut<PatchCenter>,
    mut meshes: ResMut<Assets<Mesh>>,
    patch: Query<&Mesh3d, With<TerrainPatch>>,
) {
    let loco = consist.loco_pose().position;
    let snapped = Vec2::new((loco.x / CELL).round() * CELL, (loco.z / CELL).round() * CELL);

    let path_changed = changed.read().next().is_some();
    if center.sampled && snapped == center.center && !path_changed && !terrain.is_changed() {
        return;
    }

    let Ok(handle) = patch.get_single() else {
        return;
    };
    if let Some(mesh) = meshes.get_mut(&handle.0) {
        *mesh = build_patch_mesh(&terrain, path.points(), snapped);
        center.center = snapped;
        center.sampled = true;
    }
}

fn build_patch_mesh(terrain: &Terrain, path: &[Vec3], center: Vec2) -> Mesh {
    let mut positions = Vec::with_capacity(PATCH_VERTS * PATCH_VERTS);
    let mut colors = Vec::with_capacity(PATCH_VERTS * PATCH_VERTS);
    let half = PATCH_SIZE / 2.0;

    let mut heights = vec![0.0f32; PATCH_VERTS * PATCH_VERTS];
    for row in 0..PATCH_VERTS {
        for col in 0..PATCH_VERTS {
            let x = center.x - half + col as f32 * CELL;
            let z = center.y - half + row as f32 * CELL;
            let y = terrain.sampler.height_near_path(x, z, path);
            heights[row * PATCH_VERTS + col] = y;
            positions.push([x, y, z]);
            colors.push(elevation_color(y));
        }
    }

    // Normals from central differences over the sampled heightfield.
    let mut normals = Vec::with_capacity(positions.len());
    for row in 0..PATCH_VERTS {
        for col in 0..PATCH_VERTS {
            let h = |r: usize, c: usize| heights[r * PATCH_VERTS + c];
            let left = h(row, col.saturating_sub(1));
            let right = h(row, (col + 1).min(PATCH_VERTS - 1));
            let down = h(row.saturating_sub(1), col);
            let up = h((row + 1).min(PATCH_VERTS - 1), col);
            let normal = Vec3::new(left - right, 2.0 * CELL, down - up).normalize();
            normals.push([normal.x, normal.y, normal.z]);
        }
    }

    let mut indices = Vec::with_capacity((PATCH_VERTS - 1) * (PATCH_VERTS - 1) * 6);
    for row in 0..PATCH_VERTS - 1 {
        for col in 0..PATCH_VERTS - 1 {
            let i = (row * PATCH_VERTS + col) as u32;
            let below = i + PATCH_VERTS as u32;
            indices.extend_from_slice(&[i, below, i + 1, i + 1, below, below + 1]);
        }
    }

    let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; positions.len()];
    Mesh::new(
        bevy::render::mesh::PrimitiveTopology::TriangleList,
        bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
            | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

/// Elevation bands, low to high: water, grass, forest floor, rock, snow.
fn elevation_color(y: f32) -> [f32; 4] {
    if y < 0.0 {
        [0.12, 0.24, 0.35, 1.0]
    } else if y < 2.0 {
        [0.18, 0.35, 0.15, 1.0]
    } else if y < 8.0 {
        [0.29, 0.33, 0.13, 1.0]
    } else if y < 12.0 {
        [0.55, 0.27, 0.07, 1.0]
    } else {
        [0.96, 0.96, 0.96, 1.0]
    }
}
