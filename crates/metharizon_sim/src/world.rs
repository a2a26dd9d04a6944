use bevy::prelude::*;
use metharizon_core::{BodyId, FrameReport, PhysicsError, SimConfig};
use metharizon_physics::Simulation;

/// The running simulation, tracked as a Bevy Resource
#[derive(Resource)]
pub struct SimulationState {
    pub sim: Simulation,
    /// Where the surface sits in the world; rotated by the render controls
    pub surface_transform: Transform,
    /// Whether simulation is paused
    pub paused: bool,
    /// Multiplier on the frame delta (1.0 = real time)
    pub time_scale: f32,
    /// Report of the most recent advanced frame
    pub last_report: FrameReport,
    /// Contacts resolved since startup, pairs and surface together
    pub total_contacts: u64,
}

impl SimulationState {
    pub fn new(config: SimConfig) -> Result<Self, PhysicsError> {
        Ok(Self {
            sim: Simulation::new(config)?,
            surface_transform: Transform::IDENTITY,
            paused: false,
            time_scale: 1.0,
            last_report: FrameReport::default(),
            total_contacts: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        self.sim.config()
    }

    pub fn body_count(&self) -> usize {
        self.sim.count()
    }

    pub fn spawn(&mut self, position: Vec3, radius: f32) -> Result<BodyId, PhysicsError> {
        self.sim.spawn(position, radius)
    }

    /// Advance by one rendered frame
    pub fn tick(&mut self, dt: f32) {
        if self.paused {
            return;
        }

        let report = self.sim.advance(dt * self.time_scale, &self.surface_transform.compute_matrix());
        if report.clamped {
            warn!(
                "Frame {} clamped to {:.3}s (requested {:.3}s)",
                report.frame,
                self.sim.config().max_frame_time,
                dt * self.time_scale
            );
        }
        self.total_contacts += u64::from(report.pair_contacts) + u64::from(report.surface_contacts);
        self.last_report = report;
    }
}
