use bevy::prelude::*;
use std::collections::HashMap;
use metharizon_core::BodyId;
use metharizon_sim::SimulationState;

/// Marker tying a render entity to its body
#[derive(Component)]
pub struct BodyVisual {
    pub id: BodyId,
}

/// Shared mesh and materials, plus the entity spawned for each body
#[derive(Resource)]
pub struct BodyVisuals {
    mesh: Handle<Mesh>,
    materials: Vec<Handle<StandardMaterial>>,
    entities: HashMap<BodyId, Entity>,
}

const BODY_PALETTE: [(f32, f32, f32); 5] = [
    (0.95, 0.55, 0.20),
    (0.30, 0.70, 0.95),
    (0.55, 0.90, 0.40),
    (0.90, 0.35, 0.55),
    (0.85, 0.85, 0.30),
];

/// Create the shared sphere mesh (unit radius, scaled per body) and palette
pub fn init_body_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // UV sphere so spin is visible under lighting
    let mesh = meshes.add(Sphere::new(1.0).mesh().uv(32, 18));
    let materials = BODY_PALETTE
        .iter()
        .map(|&(r, g, b)| {
            materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, b),
                perceptual_roughness: 0.6,
                ..default()
            })
        })
        .collect();

    commands.insert_resource(BodyVisuals {
        mesh,
        materials,
        entities: HashMap::new(),
    });
}

fn material_slot(id: BodyId, palette_len: usize) -> usize {
    id.0 as usize % palette_len.max(1)
}

/// Spawn visuals for new bodies and copy every body's pose onto its entity
pub fn sync_body_visuals(
    mut commands: Commands,
    state: Res<SimulationState>,
    mut visuals: ResMut<BodyVisuals>,
    mut query: Query<&mut Transform, With<BodyVisual>>,
) {
    let bodies = state.sim.bodies();
    let poses = bodies
        .ids()
        .iter()
        .zip(bodies.positions())
        .zip(bodies.orientations())
        .zip(bodies.radii());

    for (((&id, &position), &rotation), &radius) in poses {
        let transform = Transform {
            translation: position,
            rotation,
            scale: Vec3::splat(radius),
        };

        if let Some(&entity) = visuals.entities.get(&id) {
            if let Ok(mut current) = query.get_mut(entity) {
                *current = transform;
            }
            continue;
        }

        let material = visuals.materials[material_slot(id, visuals.materials.len())].clone();
        let entity = commands
            .spawn((Mesh3d(visuals.mesh.clone()), MeshMaterial3d(material), transform, BodyVisual { id }))
            .id();
        visuals.entities.insert(id, entity);
    }
}
