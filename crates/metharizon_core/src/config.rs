use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::PhysicsError;
use crate::types::Shape;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant scaling
    pub gravitational_constant: f32,
    /// Softening length for the gravity pass
    pub softening: f32,
    /// Density used to derive mass from radius
    pub density: f32,
    /// Restitution for sphere-sphere contacts (0.0 - 1.0)
    pub restitution: f32,
    /// Coulomb friction for sphere-sphere contacts
    pub friction: f32,
    /// Restitution against the surface (0.0 - 1.0)
    pub surface_restitution: f32,
    /// Coulomb friction against the surface
    pub surface_friction: f32,
    /// Substeps per frame
    pub substeps: u32,
    /// Tangential speed below which friction is skipped
    pub rest_epsilon: f32,
    /// Finite-difference step for surface normals
    pub gradient_step: f32,
    /// Longest frame time simulated in one call (seconds)
    pub max_frame_time: f32,
    /// Distance in front of the camera for interactive spawns
    pub spawn_distance: f32,
    /// Radius of interactive spawns
    pub spawn_radius: f32,
    /// Static implicit surface
    pub surface: Shape,
    /// Random seed for scenario generation
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            softening: SOFTENING,
            density: DENSITY,
            restitution: RESTITUTION,
            friction: FRICTION,
            surface_restitution: SURFACE_RESTITUTION,
            surface_friction: SURFACE_FRICTION,
            substeps: SUBSTEPS,
            rest_epsilon: REST_EPSILON,
            gradient_step: GRADIENT_STEP,
            max_frame_time: MAX_FRAME_TIME,
            spawn_distance: SPAWN_DISTANCE,
            spawn_radius: SPAWN_RADIUS,
            surface: Shape::default(),
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Check every field the physics relies on.
    ///
    /// Mass and inertia are only positive if density is, and restitution above
    /// one injects energy on every contact, so both are rejected here rather
    /// than guarded inside the step.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        let unit = |v: f32| (0.0..=1.0).contains(&v);

        if !non_negative(self.gravitational_constant) {
            return Err(PhysicsError::InvalidConfig("gravitational_constant must be >= 0"));
        }
        if !non_negative(self.softening) {
            return Err(PhysicsError::InvalidConfig("softening must be >= 0"));
        }
        if !positive(self.density) {
            return Err(PhysicsError::InvalidConfig("density must be > 0"));
        }
        if !unit(self.restitution) || !unit(self.surface_restitution) {
            return Err(PhysicsError::InvalidConfig("restitution must be within [0, 1]"));
        }
        if !non_negative(self.friction) || !non_negative(self.surface_friction) {
            return Err(PhysicsError::InvalidConfig("friction must be >= 0"));
        }
        if self.substeps == 0 {
            return Err(PhysicsError::InvalidConfig("substeps must be >= 1"));
        }
        if !non_negative(self.rest_epsilon) {
            return Err(PhysicsError::InvalidConfig("rest_epsilon must be >= 0"));
        }
        if !positive(self.gradient_step) {
            return Err(PhysicsError::InvalidConfig("gradient_step must be > 0"));
        }
        if !positive(self.max_frame_time) {
            return Err(PhysicsError::InvalidConfig("max_frame_time must be > 0"));
        }
        if !positive(self.spawn_radius) {
            return Err(PhysicsError::InvalidConfig("spawn_radius must be > 0"));
        }
        Ok(())
    }
}
