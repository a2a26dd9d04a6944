use bevy::prelude::*;
use metharizon_core::Shape;
use metharizon_sim::SimulationState;
use std::f32::consts::FRAC_PI_2;

/// Marker for the rendered surface
#[derive(Component)]
pub struct SurfaceVisual;

/// Surface turn rate for the rotation keys, rad/s
pub const SURFACE_TURN_RATE: f32 = FRAC_PI_2;

/// Half-size of the rendered quad for an unbounded plane
const PLANE_HALF_SIZE: f32 = 25.0;

/// Mesh matching the zero level set of a surface shape, in the surface's local frame
pub fn surface_mesh(shape: &Shape) -> Mesh {
    match *shape {
        Shape::Sphere { radius } => Sphere::new(radius).mesh().uv(64, 32),
        Shape::Cuboid { half_extents } => Mesh::from(Cuboid::from_size(half_extents * 2.0)),
        Shape::Torus { major_radius, minor_radius } => {
            Mesh::from(Torus::new(major_radius - minor_radius, major_radius + minor_radius))
        }
        Shape::Plane { normal, offset } => {
            let n = normal.try_normalize().unwrap_or(Vec3::Y);
            Mesh::from(Plane3d::new(n, Vec2::splat(PLANE_HALF_SIZE))).translated_by(n * offset)
        }
    }
}

/// Spawn the surface mesh for the configured shape
pub fn spawn_surface_visual(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    state: Res<SimulationState>,
) {
    let shape = state.config().surface;
    info!("Surface: {}", shape.name());

    commands.spawn((
        Mesh3d(meshes.add(surface_mesh(&shape))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.38, 0.45),
            perceptual_roughness: 0.8,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        state.surface_transform,
        SurfaceVisual,
    ));
}

/// Signed turn per local axis from the held keys: U/H about X, J/K about Y, L/O about Z
pub fn surface_spin(keyboard: &ButtonInput<KeyCode>) -> Vec3 {
    let axis = |plus: KeyCode, minus: KeyCode| {
        let mut s = 0.0;
        if keyboard.pressed(plus) {
            s += 1.0;
        }
        if keyboard.pressed(minus) {
            s -= 1.0;
        }
        s
    };

    Vec3::new(
        axis(KeyCode::KeyU, KeyCode::KeyH),
        axis(KeyCode::KeyJ, KeyCode::KeyK),
        axis(KeyCode::KeyL, KeyCode::KeyO),
    )
}

/// Rotate the simulation's surface transform from the keyboard
pub fn rotate_surface_system(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<SimulationState>,
) {
    let spin = surface_spin(&keyboard);
    if spin == Vec3::ZERO {
        return;
    }

    let angle = SURFACE_TURN_RATE * time.delta_secs();
    let transform = &mut state.surface_transform;
    transform.rotate_local_x(spin.x * angle);
    transform.rotate_local_y(spin.y * angle);
    transform.rotate_local_z(spin.z * angle);
}

/// Keep the rendered surface on the transform the physics used
pub fn sync_surface_visual(state: Res<SimulationState>, mut query: Query<&mut Transform, With<SurfaceVisual>>) {
    if !state.is_changed() {
        return;
    }
    for mut transform in query.iter_mut() {
        *transform = state.surface_transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(v)) => v.iter().map(|p| Vec3::from_array(*p)).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_sphere_mesh_sits_on_level_set() {
        let mesh = surface_mesh(&Shape::Sphere { radius: 1.5 });
        let verts = positions(&mesh);
        assert!(!verts.is_empty());
        for p in verts {
            assert!((p.length() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cuboid_and_torus_extents() {
        let cuboid = surface_mesh(&Shape::Cuboid { half_extents: Vec3::new(1.0, 2.0, 3.0) });
        let max = positions(&cuboid).into_iter().fold(Vec3::ZERO, Vec3::max);
        assert!((max - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);

        let torus = surface_mesh(&Shape::Torus { major_radius: 2.0, minor_radius: 0.5 });
        let reach = positions(&torus)
            .into_iter()
            .map(|p| Vec2::new(p.x, p.z).length())
            .fold(0.0f32, f32::max);
        assert!((reach - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_plane_mesh_is_offset_along_normal() {
        let mesh = surface_mesh(&Shape::Plane { normal: Vec3::Y, offset: -1.0 });
        for p in positions(&mesh) {
            assert!((p.y + 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rotation_keys() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        assert_eq!(surface_spin(&keyboard), Vec3::ZERO);

        keyboard.press(KeyCode::KeyU);
        keyboard.press(KeyCode::KeyK);
        keyboard.press(KeyCode::KeyL);
        keyboard.press(KeyCode::KeyO);
        assert_eq!(surface_spin(&keyboard), Vec3::new(1.0, -1.0, 0.0));
    }
}
