use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use metharizon_sim::{SimulationState, SpawnBody};

/// Free-fly camera state; the rotation is rebuilt from yaw and pitch every frame
#[derive(Component)]
pub struct FlyCamera {
    pub speed: f32,
    pub sensitivity: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            speed: 20.0,
            sensitivity: 0.003,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FlyCamera {
    /// Camera whose yaw/pitch reproduce `rotation` (roll is dropped)
    pub fn facing(rotation: Quat) -> Self {
        let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
        Self {
            yaw,
            pitch,
            ..default()
        }
    }
}

/// Spawn the 3D camera back from the surface, plus lights
pub fn spawn_camera(mut commands: Commands) {
    let transform = Transform::from_xyz(0.0, 2.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y);
    info!(
        "Camera spawned at ({:.1}, {:.1}, {:.1})",
        transform.translation.x, transform.translation.y, transform.translation.z
    );

    commands.spawn((Camera3d::default(), FlyCamera::facing(transform.rotation), transform));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.6, 0.6, 0.7),
        brightness: 200.0,
    });
}

/// Unit direction from the held movement keys, or zero.
/// W/S along `forward`, A/D along `right`, Space/ShiftLeft along world up.
pub fn movement_direction(keyboard: &ButtonInput<KeyCode>, forward: Vec3, right: Vec3) -> Vec3 {
    let mut direction = Vec3::ZERO;

    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += right;
    }
    if keyboard.pressed(KeyCode::Space) {
        direction += Vec3::Y;
    }
    if keyboard.pressed(KeyCode::ShiftLeft) {
        direction -= Vec3::Y;
    }

    direction.normalize_or_zero()
}

/// Handle camera movement with WASD + mouse
pub fn fly_camera_system(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<(&mut Transform, &mut FlyCamera)>,
) {
    let Ok((mut transform, mut cam)) = query.get_single_mut() else {
        return;
    };

    // Mouse look (only when right-click held)
    if mouse_button.pressed(MouseButton::Right) {
        let delta = mouse_motion.delta;
        cam.yaw -= delta.x * cam.sensitivity;
        cam.pitch -= delta.y * cam.sensitivity;
        cam.pitch = cam.pitch.clamp(-1.5, 1.5);
    }
    transform.rotation = Quat::from_euler(EulerRot::YXZ, cam.yaw, cam.pitch, 0.0);

    let scroll = mouse_scroll.delta.y;
    if scroll != 0.0 {
        cam.speed = (cam.speed * (1.0 + scroll * 0.1)).clamp(0.5, 500.0);
    }

    let direction = movement_direction(&keyboard, *transform.forward(), *transform.right());
    transform.translation += direction * cam.speed * time.delta_secs();
}

/// [P] drops a body in front of the camera
pub fn spawn_body_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<SimulationState>,
    query: Query<&Transform, With<FlyCamera>>,
    mut spawns: EventWriter<SpawnBody>,
) {
    if !keyboard.just_pressed(KeyCode::KeyP) {
        return;
    }
    let Ok(transform) = query.get_single() else {
        return;
    };

    let config = state.config();
    spawns.send(SpawnBody {
        position: transform.translation + *transform.forward() * config.spawn_distance,
        radius: config.spawn_radius,
    });
}

/// [Escape] closes the app
pub fn quit_system(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Escape pressed, exiting");
        exit.send(AppExit::Success);
    }
}
