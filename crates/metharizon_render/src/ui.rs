use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use metharizon_sim::SimulationState;

/// Marker for the HUD text
#[derive(Component)]
pub struct HudText;

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// Time scales selected by the digit keys 1-5
pub const TIME_SCALES: [f32; 5] = [0.25, 0.5, 1.0, 2.0, 4.0];

/// Spawn the HUD overlay
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Metharizon"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgba(0.85, 0.9, 1.0, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

pub fn window_title(fps: f64, frame_ms: f64, objects: usize) -> String {
    format!("Metharizon | {fps:.1} FPS | {frame_ms:.2} ms/frame | {objects} objects")
}

/// Update HUD text and window title every 10th frame (string formatting is expensive)
pub fn update_hud(
    state: Res<SimulationState>,
    diagnostics: Res<DiagnosticsStore>,
    mut throttle: ResMut<HudThrottle>,
    mut hud_query: Query<&mut Text, With<HudText>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    let frame_ms = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    if let Ok(mut window) = window_query.get_single_mut() {
        window.title = window_title(fps, frame_ms, state.body_count());
    }

    if let Ok(mut text) = hud_query.get_single_mut() {
        let paused = if state.paused { " [PAUSED]" } else { "" };
        let report = &state.last_report;

        **text = format!(
            "Surface: {} | Bodies: {}\n\
             Frame: {} | Sim time: {:.2}s | Speed: {}x{}\n\
             Contacts: {} pair, {} surface (total {})\n\
             \n\
             [WASD] Move  [Space/Shift] Up/Down  [RMB+Mouse] Look  [Scroll] Speed\n\
             [P] Spawn  [U/H J/K L/O] Rotate surface\n\
             [Enter] Pause  [1-5] Time scale  [Esc] Quit",
            state.config().surface.name(),
            state.body_count(),
            state.sim.frame(),
            state.sim.elapsed(),
            state.time_scale,
            paused,
            report.pair_contacts,
            report.surface_contacts,
            state.total_contacts,
        );
    }
}

/// Time scale bound to a digit key, if any
pub fn time_scale_for(key: KeyCode) -> Option<f32> {
    let slot = match key {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        _ => return None,
    };
    Some(TIME_SCALES[slot])
}

/// Handle keyboard input for time controls
pub fn time_control_system(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<SimulationState>) {
    if keyboard.just_pressed(KeyCode::Enter) {
        state.paused = !state.paused;
        info!("Simulation {}", if state.paused { "paused" } else { "resumed" });
    }
    for &key in keyboard.get_just_pressed() {
        if let Some(scale) = time_scale_for(key) {
            state.time_scale = scale;
        }
    }
}
