use bevy::prelude::*;

use super::world::SimulationState;

/// Request to add a body; rejected requests are logged and dropped
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnBody {
    pub position: Vec3,
    pub radius: f32,
}

/// Ordering for per-frame work: input that changes the world runs before the
/// step, anything that reads bodies runs after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Step,
}

/// Bevy plugin for the simulation pipeline
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnBody>()
            .configure_sets(Update, (SimSet::Input, SimSet::Step).chain())
            .add_systems(Update, (handle_spawn_requests, simulation_tick).chain().in_set(SimSet::Step));
    }
}

fn handle_spawn_requests(mut requests: EventReader<SpawnBody>, mut state: ResMut<SimulationState>) {
    for request in requests.read() {
        match state.spawn(request.position, request.radius) {
            Ok(id) => info!(
                "Spawned body {} at ({:.2}, {:.2}, {:.2}), {} total",
                id.0,
                request.position.x,
                request.position.y,
                request.position.z,
                state.body_count()
            ),
            Err(e) => warn!("Spawn rejected: {e}"),
        }
    }
}

/// Main simulation tick, one `advance` per rendered frame
fn simulation_tick(mut state: ResMut<SimulationState>, time: Res<Time>) {
    state.tick(time.delta_secs());
}
