use glam::{Quat, Vec3};
use metharizon_core::{BodyId, BodyInstance, PhysicsError};
use std::f32::consts::PI;

/// Dense table of every simulated sphere, one array per attribute.
///
/// Index `i` in every array refers to the same body, in spawn order. Bodies
/// are only ever appended, so an index stays valid for the store's lifetime.
/// Ids live in their own array: a future despawn can swap-remove and keep an
/// id -> index map without touching consumers that key on ids.
#[derive(Debug, Clone)]
pub struct BodyStore {
    density: f32,
    next_id: u32,
    ids: Vec<BodyId>,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    radii: Vec<f32>,
    masses: Vec<f32>,
    inertias: Vec<f32>,
    orientations: Vec<Quat>,
    angular_velocities: Vec<Vec3>,
}

impl BodyStore {
    /// Empty store. `density` must be positive; `SimConfig::validate` checks it.
    pub fn new(density: f32) -> Self {
        Self::with_capacity(density, 0)
    }

    pub fn with_capacity(density: f32, capacity: usize) -> Self {
        Self {
            density,
            next_id: 1,
            ids: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
            velocities: Vec::with_capacity(capacity),
            radii: Vec::with_capacity(capacity),
            masses: Vec::with_capacity(capacity),
            inertias: Vec::with_capacity(capacity),
            orientations: Vec::with_capacity(capacity),
            angular_velocities: Vec::with_capacity(capacity),
        }
    }

    /// Append a body at rest. Fails without touching the store if the radius
    /// is not a positive finite number, the position is not finite, or the
    /// `u32` id space is used up.
    pub fn spawn(&mut self, position: Vec3, radius: f32) -> Result<BodyId, PhysicsError> {
        if !(radius.is_finite() && radius > 0.0) || !position.is_finite() {
            return Err(PhysicsError::InvalidBodyParameters { radius });
        }
        let next_id = self.next_id.checked_add(1).ok_or(PhysicsError::IdsExhausted)?;

        let mass = sphere_mass(self.density, radius);
        let id = BodyId(self.next_id);
        self.next_id = next_id;

        self.ids.push(id);
        self.positions.push(position);
        self.velocities.push(Vec3::ZERO);
        self.radii.push(radius);
        self.masses.push(mass);
        self.inertias.push(sphere_inertia(mass, radius));
        self.orientations.push(Quat::IDENTITY);
        self.angular_velocities.push(Vec3::ZERO);

        log::trace!("spawned body {} at {position} (r = {radius}, m = {mass})", id.0);
        Ok(id)
    }

    /// Live population
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Dense index of a body, if it exists
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        // ids are appended in increasing order and never removed
        self.ids.binary_search(&id).ok()
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec3) -> Result<(), PhysicsError> {
        let i = self.index_of(id).ok_or(PhysicsError::UnknownBody(id))?;
        if !velocity.is_finite() {
            return Err(PhysicsError::NonFiniteVelocity(id));
        }
        self.velocities[i] = velocity;
        Ok(())
    }

    pub fn set_angular_velocity(&mut self, id: BodyId, angular_velocity: Vec3) -> Result<(), PhysicsError> {
        let i = self.index_of(id).ok_or(PhysicsError::UnknownBody(id))?;
        if !angular_velocity.is_finite() {
            return Err(PhysicsError::NonFiniteVelocity(id));
        }
        self.angular_velocities[i] = angular_velocity;
        Ok(())
    }

    pub fn ids(&self) -> &[BodyId] {
        &self.ids
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn velocities_mut(&mut self) -> &mut [Vec3] {
        &mut self.velocities
    }

    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    pub fn masses(&self) -> &[f32] {
        &self.masses
    }

    pub fn inertias(&self) -> &[f32] {
        &self.inertias
    }

    pub fn orientations(&self) -> &[Quat] {
        &self.orientations
    }

    pub fn orientations_mut(&mut self) -> &mut [Quat] {
        &mut self.orientations
    }

    pub fn angular_velocities(&self) -> &[Vec3] {
        &self.angular_velocities
    }

    pub fn angular_velocities_mut(&mut self) -> &mut [Vec3] {
        &mut self.angular_velocities
    }

    /// Split borrow for the collision stage: mutable kinematics alongside the
    /// immutable per-body constants.
    pub fn contact_view(&mut self) -> ContactView<'_> {
        ContactView {
            positions: &mut self.positions,
            velocities: &mut self.velocities,
            angular_velocities: &mut self.angular_velocities,
            radii: &self.radii,
            masses: &self.masses,
            inertias: &self.inertias,
        }
    }

    /// Split borrow for the linear integrator
    pub fn linear_view(&mut self) -> (&mut [Vec3], &mut [Vec3], &[f32]) {
        (&mut self.positions, &mut self.velocities, &self.masses)
    }

    /// Split borrow for the angular integrator
    pub fn angular_view(&mut self) -> (&mut [Quat], &[Vec3]) {
        (&mut self.orientations, &self.angular_velocities)
    }

    /// Copy of the render-facing attributes, in spawn order
    pub fn snapshot(&self) -> Vec<BodyInstance> {
        let mut out = Vec::with_capacity(self.count());
        self.snapshot_into(&mut out);
        out
    }

    /// Same as `snapshot` but reuses the caller's buffer
    pub fn snapshot_into(&self, out: &mut Vec<BodyInstance>) {
        out.clear();
        out.extend((0..self.count()).map(|i| {
            BodyInstance::new(self.ids[i], self.positions[i], self.radii[i], self.orientations[i])
        }));
    }
}

/// Mutable kinematic state plus the per-body constants contacts need
pub struct ContactView<'a> {
    pub positions: &'a mut [Vec3],
    pub velocities: &'a mut [Vec3],
    pub angular_velocities: &'a mut [Vec3],
    pub radii: &'a [f32],
    pub masses: &'a [f32],
    pub inertias: &'a [f32],
}

/// Mass of a solid sphere: density * 4/3 * pi * r^3
pub fn sphere_mass(density: f32, radius: f32) -> f32 {
    density * 4.0 / 3.0 * PI * radius * radius * radius
}

/// Moment of inertia of a solid sphere: 2/5 * m * r^2
pub fn sphere_inertia(mass: f32, radius: f32) -> f32 {
    0.4 * mass * radius * radius
}
