//! Trackside prop entities, reconciled against the simulation's event list.
//!
//! Each prop is keyed by its global path-point index, so a rebuild after a
//! prune despawns only the props that actually fell off the head.

use bevy::prelude::*;

use simulation::track_events::{TracksideEvents, TracksideKind};

#[derive(Component)]
pub struct TracksideProp {
    pub global_index: u64,
}

/// Shared prop meshes, built once at startup.
#[derive(Resource)]
pub struct PropAssets {
    station: (Handle<Mesh>, Handle<StandardMaterial>),
    signal: (Handle<Mesh>, Handle<StandardMaterial>),
    tree: (Handle<Mesh>, Handle<StandardMaterial>),
    rock: (Handle<Mesh>, Handle<StandardMaterial>),
    sign: (Handle<Mesh>, Handle<StandardMaterial>),
}

impl PropAssets {
    fn for_kind(&self, kind: TracksideKind) -> (Handle<Mesh>, Handle<StandardMaterial>) {
        match kind {
            TracksideKind::Station => self.station.clone(),
            TracksideKind::Signal => self.signal.clone(),
            TracksideKind::Tree => self.tree.clone(),
            TracksideKind::Rock => self.rock.clone(),
            TracksideKind::Sign => self.sign.clone(),
        }
    }

    fn lift(kind: TracksideKind) -> f32 {
        match kind {
            TracksideKind::Station => 1.5,
            TracksideKind::Signal => 1.5,
            TracksideKind::Tree => 1.5,
            TracksideKind::Rock => 0.4,
            TracksideKind::Sign => 0.9,
        }
    }
}

pub fn setup_prop_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(PropAssets {
        station: (
            meshes.add(Cuboid::new(4.0, 3.0, 2.5)),
            materials.add(Color::srgb(0.7, 0.55, 0.4)),
        ),
        signal: (
            meshes.add(Cylinder::new(0.1, 3.0)),
            materials.add(Color::srgb(0.8, 0.15, 0.1)),
        ),
        tree: (
            meshes.add(Cone {
                radius: 1.2,
                height: 3.0,
            }),
            materials.add(Color::srgb(0.1, 0.35, 0.12)),
        ),
        rock: (
            meshes.add(Sphere::new(0.8)),
            materials.add(Color::srgb(0.45, 0.44, 0.42)),
        ),
        sign: (
            meshes.add(Cuboid::new(0.9, 1.1, 0.1)),
            materials.add(Color::srgb(0.85, 0.8, 0.3)),
        ),
    });
}

/// Despawns props no longer in the list, spawns props that are new to it.
pub fn sync_trackside_props(
    mut commands: Commands,
    events: Res<TracksideEvents>,
    assets: Res<PropAssets>,
    existing: Query<(Entity, &TracksideProp)>,
) {
    if !events.is_changed() {
        return;
    }

    for (entity, prop) in &existing {
        if !events
            .events
            .iter()
            .any(|e| e.global_index == prop.global_index)
        {
            commands.entity(entity).despawn_recursive();
        }
    }

    for event in &events.events {
        if existing
            .iter()
            .any(|(_, prop)| prop.global_index == event.global_index)
        {
            continue;
        }
        let (mesh, material) = assets.for_kind(event.kind);
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(event.position + Vec3::Y * PropAssets::lift(event.kind))
                .with_rotation(Quat::from_rotation_y(event.heading)),
            TracksideProp {
                global_index: event.global_index,
            },
        ));
    }
}
