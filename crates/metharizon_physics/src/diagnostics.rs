use glam::Vec3;

use crate::body::BodyStore;
use crate::forces::GravityParams;
use crate::pairs::AllPairs;

/// Sum of m * v over all bodies
pub fn total_momentum(bodies: &BodyStore) -> Vec3 {
    bodies
        .velocities()
        .iter()
        .zip(bodies.masses())
        .map(|(v, m)| *v * *m)
        .sum()
}

/// Orbital (r x m v) plus spin (I w) angular momentum about the origin
pub fn total_angular_momentum(bodies: &BodyStore) -> Vec3 {
    (0..bodies.count())
        .map(|i| {
            let orbital = bodies.positions()[i].cross(bodies.velocities()[i] * bodies.masses()[i]);
            let spin = bodies.angular_velocities()[i] * bodies.inertias()[i];
            orbital + spin
        })
        .sum()
}

/// Translational plus rotational kinetic energy
pub fn kinetic_energy(bodies: &BodyStore) -> f64 {
    (0..bodies.count())
        .map(|i| {
            let linear = 0.5 * bodies.masses()[i] as f64 * bodies.velocities()[i].length_squared() as f64;
            let angular = 0.5 * bodies.inertias()[i] as f64 * bodies.angular_velocities()[i].length_squared() as f64;
            linear + angular
        })
        .sum()
}

/// Softened gravitational potential energy, consistent with the force pass
pub fn potential_energy(bodies: &BodyStore, params: &GravityParams) -> f64 {
    let positions = bodies.positions();
    let masses = bodies.masses();
    let eps2 = (params.softening * params.softening) as f64;
    AllPairs::new(bodies.count())
        .map(|(i, j)| {
            let dist2 = (positions[j] - positions[i]).length_squared() as f64 + eps2;
            if dist2 > 0.0 {
                -(params.g as f64) * masses[i] as f64 * masses[j] as f64 / dist2.sqrt()
            } else {
                0.0
            }
        })
        .sum()
}

/// Largest | |q| - 1 | over all orientations
pub fn max_orientation_error(bodies: &BodyStore) -> f32 {
    bodies
        .orientations()
        .iter()
        .map(|q| (q.length() - 1.0).abs())
        .fold(0.0, f32::max)
}
