use glam::Vec3;
use metharizon_core::SimConfig;

use crate::pairs::AllPairs;

/// Constants of the gravity pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    pub g: f32,
    pub softening: f32,
}

impl GravityParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            g: config.gravitational_constant,
            softening: config.softening,
        }
    }
}

/// Force exerted on body i by body j. The force on j is the negation.
pub fn gravity_pair_force(
    pos_i: Vec3,
    pos_j: Vec3,
    mass_i: f32,
    mass_j: f32,
    params: &GravityParams,
) -> Vec3 {
    let d = pos_j - pos_i;
    let dist2 = d.length_squared() + params.softening * params.softening;
    if dist2 <= 0.0 {
        // coincident centers with zero softening: no defined direction
        return Vec3::ZERO;
    }
    let inv_dist = dist2.sqrt().recip();
    let force_mag = params.g * mass_i * mass_j * inv_dist * inv_dist;
    d * (force_mag * inv_dist)
}

/// Pairwise gravity over every live body, written into `out`.
///
/// `out` is resized to match and zeroed first; it is scratch the caller keeps
/// across substeps. Each pair is visited once and applied with opposite
/// signs, so the forces sum to zero up to rounding.
pub fn compute_forces(positions: &[Vec3], masses: &[f32], params: &GravityParams, out: &mut Vec<Vec3>) {
    let n = positions.len();
    out.clear();
    out.resize(n, Vec3::ZERO);

    for (i, j) in AllPairs::new(n) {
        let f = gravity_pair_force(positions[i], positions[j], masses[i], masses[j], params);
        out[i] += f;
        out[j] -= f;
    }
}
