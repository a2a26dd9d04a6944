use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use metharizon_sim::SimSet;

use super::bodies;
use super::camera;
use super::surface;
use super::ui;

/// Render plugin: camera, body and surface visuals, HUD, and the interactive controls
pub struct MetharizonRenderPlugin;

impl Plugin for MetharizonRenderPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin);
        }

        app.init_resource::<ui::HudThrottle>()
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    ui::spawn_hud,
                    bodies::init_body_visuals,
                    surface::spawn_surface_visual,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::fly_camera_system,
                    camera::spawn_body_system.after(camera::fly_camera_system),
                    camera::quit_system,
                    surface::rotate_surface_system,
                    ui::time_control_system,
                )
                    .in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                (
                    bodies::sync_body_visuals,
                    surface::sync_surface_visual,
                    ui::update_hud,
                )
                    .after(SimSet::Step),
            );
    }
}
