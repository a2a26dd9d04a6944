//! Semi-implicit (symplectic) Euler for both halves of the body state.
//!
//! The linear pass runs after forces and before collision, the angular pass
//! after collision has applied its angular impulses. Velocity is updated
//! before position, which keeps orbits bounded where explicit Euler spirals
//! outward.

use glam::{Quat, Vec3};

/// `v += f/m * h; x += v * h` for every body
pub fn integrate_linear(positions: &mut [Vec3], velocities: &mut [Vec3], forces: &[Vec3], masses: &[f32], h: f32) {
    for i in 0..positions.len() {
        velocities[i] += forces[i] / masses[i] * h;
        positions[i] += velocities[i] * h;
    }
}

/// `q = normalize(q + 0.5 * h * (0, w) * q)` for every body
pub fn integrate_angular(orientations: &mut [Quat], angular_velocities: &[Vec3], h: f32) {
    for (q, &w) in orientations.iter_mut().zip(angular_velocities) {
        *q = advance_orientation(*q, w, h);
    }
}

/// One spin step of a single orientation, renormalized
pub fn advance_orientation(q: Quat, w: Vec3, h: f32) -> Quat {
    let dq = spin_derivative(q, w) * (0.5 * h);
    let next = q + dq;
    let len = next.length();
    if len > 0.0 && len.is_finite() { next / len } else { q }
}

/// Hamilton product (0, w) * q, without the unit-length assumption of `Quat * Quat`
fn spin_derivative(q: Quat, w: Vec3) -> Quat {
    Quat::from_xyzw(
        w.x * q.w + w.y * q.z - w.z * q.y,
        w.y * q.w + w.z * q.x - w.x * q.z,
        w.z * q.w + w.x * q.y - w.y * q.x,
        -(w.x * q.x + w.y * q.y + w.z * q.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_linear_is_velocity_first() {
        let mut pos = [Vec3::ZERO];
        let mut vel = [Vec3::ZERO];
        integrate_linear(&mut pos, &mut vel, &[Vec3::new(2.0, 0.0, 0.0)], &[2.0], 0.5);
        // v = 0 + (2/2) * 0.5 = 0.5, x = 0 + 0.5 * 0.5 = 0.25
        assert!((vel[0].x - 0.5).abs() < 1e-6);
        assert!((pos[0].x - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_spin_derivative_matches_product() {
        let q = Quat::from_rotation_y(0.7);
        let w = Vec3::new(0.3, -1.2, 2.0);
        let expected = Quat::from_xyzw(w.x, w.y, w.z, 0.0) * q;
        let got = spin_derivative(q, w);
        assert!((got.x - expected.x).abs() < 1e-6);
        assert!((got.y - expected.y).abs() < 1e-6);
        assert!((got.z - expected.z).abs() < 1e-6);
        assert!((got.w - expected.w).abs() < 1e-6);
    }

    #[test]
    fn test_orientation_stays_unit() {
        let mut q = [Quat::IDENTITY];
        let w = [Vec3::new(3.0, -7.0, 11.0)];
        for _ in 0..10_000 {
            integrate_angular(&mut q, &w, 1.0 / 240.0);
        }
        assert!((q[0].length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_spin_about_z_turns_x_axis() {
        // quarter turn at 1 rad/s, small steps
        let mut q = Quat::IDENTITY;
        let steps = 10_000;
        let h = (PI / 2.0) / steps as f32;
        for _ in 0..steps {
            q = advance_orientation(q, Vec3::Z, h);
        }
        let x = q * Vec3::X;
        assert!((x - Vec3::Y).length() < 1e-2, "rotated x axis {x}");
    }

    #[test]
    fn test_zero_spin_is_identity() {
        let q = Quat::from_rotation_x(1.0);
        let next = advance_orientation(q, Vec3::ZERO, 0.1);
        assert!((next.dot(q) - 1.0).abs() < 1e-6);
    }
}
