//! Contact detection and response.
//!
//! Sphere-sphere contacts are resolved before sphere-surface contacts, so the
//! surface pass always sees positions that are already separated from their
//! neighbours. Each contact does three things in order: push the bodies out
//! of penetration, apply a restitution impulse along the normal if they are
//! approaching, then apply a Coulomb-clamped friction impulse along the slip
//! direction. Both impulses also feed angular velocity through the lever arm
//! from center to contact point.

use glam::Vec3;
use metharizon_core::SimConfig;

use crate::body::ContactView;
use crate::pairs::AllPairs;
use crate::surface::{ImplicitSurface, SignedDistance, SurfaceFrame};

/// Normal used when two centers coincide exactly
pub const FALLBACK_NORMAL: Vec3 = Vec3::X;

/// Material response for one kind of contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactParams {
    pub restitution: f32,
    pub friction: f32,
    pub rest_epsilon: f32,
}

impl ContactParams {
    pub fn pairs_from_config(config: &SimConfig) -> Self {
        Self {
            restitution: config.restitution,
            friction: config.friction,
            rest_epsilon: config.rest_epsilon,
        }
    }

    pub fn surface_from_config(config: &SimConfig) -> Self {
        Self {
            restitution: config.surface_restitution,
            friction: config.surface_friction,
            rest_epsilon: config.rest_epsilon,
        }
    }
}

/// Resolve every overlapping sphere pair once. Returns the number of contacts.
pub fn resolve_sphere_pairs(view: &mut ContactView<'_>, params: &ContactParams) -> u32 {
    let mut contacts = 0;
    for (i, j) in AllPairs::new(view.positions.len()) {
        if resolve_pair(view, i, j, params) {
            contacts += 1;
        }
    }
    contacts
}

/// Resolve one pair if it overlaps. Returns whether it did.
pub fn resolve_pair(view: &mut ContactView<'_>, i: usize, j: usize, params: &ContactParams) -> bool {
    let (ri, rj) = (view.radii[i], view.radii[j]);
    let delta = view.positions[j] - view.positions[i];
    let dist = delta.length();
    let overlap = (ri + rj) - dist;
    if overlap <= 0.0 {
        return false;
    }

    let n = if dist > 0.0 { delta / dist } else { FALLBACK_NORMAL };

    // Split the correction evenly regardless of mass
    let push = n * (overlap * 0.5);
    view.positions[i] -= push;
    view.positions[j] += push;

    let (mi, mj) = (view.masses[i], view.masses[j]);
    let (ii, ij) = (view.inertias[i], view.inertias[j]);
    let arm_i = n * ri;
    let arm_j = -n * rj;

    let contact_vel_i = view.velocities[i] + view.angular_velocities[i].cross(arm_i);
    let contact_vel_j = view.velocities[j] + view.angular_velocities[j].cross(arm_j);
    let rel = contact_vel_j - contact_vel_i;
    let vn = rel.dot(n);
    if vn >= 0.0 {
        // touching but separating
        return true;
    }

    let inv_mass_sum = 1.0 / mi + 1.0 / mj;
    let jn = -(1.0 + params.restitution) * vn / inv_mass_sum;
    let impulse = n * jn;
    apply_impulse(view, j, impulse, arm_j);
    apply_impulse(view, i, -impulse, arm_i);

    let tangent = rel - n * vn;
    let slip = tangent.length();
    if slip < params.rest_epsilon {
        return true;
    }

    let k = inv_mass_sum + ri * ri / ii + rj * rj / ij;
    let jt = (slip / k).min(params.friction * jn);
    let friction = -tangent / slip * jt;
    apply_impulse(view, j, friction, arm_j);
    apply_impulse(view, i, -friction, arm_i);

    true
}

/// Resolve every body against the implicit surface. Returns the number of contacts.
pub fn resolve_surface_contacts<S: SignedDistance>(
    view: &mut ContactView<'_>,
    surface: &ImplicitSurface<S>,
    frame: &SurfaceFrame,
    params: &ContactParams,
) -> u32 {
    let mut contacts = 0;
    for i in 0..view.positions.len() {
        let radius = view.radii[i];
        let local = frame.to_local(view.positions[i]);
        let d = surface.distance(local);
        if d >= radius {
            continue;
        }
        contacts += 1;

        let n = frame.normal_to_world(surface.normal(local));
        view.positions[i] += n * (radius - d);

        let (m, inertia) = (view.masses[i], view.inertias[i]);
        let arm = -n * radius;
        let contact_vel = view.velocities[i] + view.angular_velocities[i].cross(arm);
        let vn = contact_vel.dot(n);
        if vn >= 0.0 {
            continue;
        }

        let jn = -(1.0 + params.restitution) * vn * m;
        apply_impulse(view, i, n * jn, arm);

        let tangent = contact_vel - n * vn;
        let slip = tangent.length();
        if slip < params.rest_epsilon {
            continue;
        }
        let k = 1.0 / m + radius * radius / inertia;
        let jt = (slip / k).min(params.friction * jn);
        apply_impulse(view, i, -tangent / slip * jt, arm);
    }
    contacts
}

/// Linear and angular response of one body to an impulse at `arm` from its center
fn apply_impulse(view: &mut ContactView<'_>, i: usize, impulse: Vec3, arm: Vec3) {
    view.velocities[i] += impulse / view.masses[i];
    view.angular_velocities[i] += arm.cross(impulse) / view.inertias[i];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyStore;
    use approx::assert_relative_eq;
    use glam::{Mat4, Quat};
    use std::f32::consts::FRAC_PI_2;

    const ELASTIC: ContactParams = ContactParams {
        restitution: 1.0,
        friction: 0.5,
        rest_epsilon: 1e-4,
    };

    fn store_with(bodies: &[(Vec3, f32, Vec3)]) -> BodyStore {
        let mut store = BodyStore::new(1.0);
        for &(pos, radius, vel) in bodies {
            let id = store.spawn(pos, radius).unwrap();
            store.set_velocity(id, vel).unwrap();
        }
        store
    }

    #[test]
    fn test_overlap_separates_symmetrically() {
        let mut store = store_with(&[
            (Vec3::new(-0.3, 0.0, 0.0), 0.5, Vec3::ZERO),
            (Vec3::new(0.3, 0.0, 0.0), 0.5, Vec3::ZERO),
        ]);
        let contacts = resolve_sphere_pairs(&mut store.contact_view(), &ELASTIC);
        assert_eq!(contacts, 1);

        let p = store.positions();
        let dist = (p[1] - p[0]).length();
        assert!(dist >= 1.0 - 1e-5, "still penetrating: {dist}");
        assert_relative_eq!(p[0].x, -0.5, epsilon = 1e-5);
        assert_relative_eq!(p[1].x, 0.5, epsilon = 1e-5);
        // at rest: no impulse
        assert_eq!(store.velocities()[0], Vec3::ZERO);
    }

    #[test]
    fn test_coincident_centers_use_fallback_normal() {
        let mut store = store_with(&[(Vec3::ZERO, 0.5, Vec3::ZERO), (Vec3::ZERO, 0.5, Vec3::ZERO)]);
        resolve_sphere_pairs(&mut store.contact_view(), &ELASTIC);
        let p = store.positions();
        assert!(p.iter().all(|v| v.is_finite()));
        assert_relative_eq!(p[0].x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(p[1].x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_elastic_equal_masses_exchange_velocities() {
        let mut store = store_with(&[
            (Vec3::new(-0.49, 0.0, 0.0), 0.5, Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(0.49, 0.0, 0.0), 0.5, Vec3::new(-1.0, 0.0, 0.0)),
        ]);
        resolve_sphere_pairs(&mut store.contact_view(), &ELASTIC);
        let v = store.velocities();
        assert_relative_eq!(v[0].x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(v[1].x, 1.0, epsilon = 1e-5);
        // head-on: no slip, no spin
        assert!(store.angular_velocities().iter().all(|w| w.length() < 1e-6));
    }

    #[test]
    fn test_elastic_unequal_masses_follow_1d_formula() {
        // same density, radius 1.0 vs 0.5 -> mass ratio 8:1
        let mut store = store_with(&[
            (Vec3::new(0.0, 0.0, 0.0), 1.0, Vec3::new(2.0, 0.0, 0.0)),
            (Vec3::new(1.45, 0.0, 0.0), 0.5, Vec3::new(-1.0, 0.0, 0.0)),
        ]);
        let (m1, m2) = (store.masses()[0], store.masses()[1]);
        let (u1, u2) = (2.0, -1.0);
        resolve_sphere_pairs(&mut store.contact_view(), &ELASTIC);

        let v1 = ((m1 - m2) * u1 + 2.0 * m2 * u2) / (m1 + m2);
        let v2 = ((m2 - m1) * u2 + 2.0 * m1 * u1) / (m1 + m2);
        assert_relative_eq!(store.velocities()[0].x, v1, epsilon = 1e-4);
        assert_relative_eq!(store.velocities()[1].x, v2, epsilon = 1e-4);
    }

    #[test]
    fn test_separating_pair_gets_no_impulse() {
        let mut store = store_with(&[
            (Vec3::new(-0.4, 0.0, 0.0), 0.5, Vec3::new(-1.0, 0.0, 0.0)),
            (Vec3::new(0.4, 0.0, 0.0), 0.5, Vec3::new(1.0, 0.0, 0.0)),
        ]);
        resolve_sphere_pairs(&mut store.contact_view(), &ELASTIC);
        assert_eq!(store.velocities()[0], Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(store.velocities()[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_glancing_contact_spins_both_and_respects_coulomb() {
        let params = ContactParams { restitution: 0.5, friction: 0.3, rest_epsilon: 1e-4 };
        let mut store = store_with(&[
            (Vec3::new(0.0, 0.0, 0.0), 0.5, Vec3::new(1.0, 1.0, 0.0)),
            (Vec3::new(0.95, 0.0, 0.0), 0.5, Vec3::ZERO),
        ]);
        let m = store.masses()[0];
        let momentum_before: Vec3 = store.velocities().iter().map(|v| *v * m).sum();
        resolve_sphere_pairs(&mut store.contact_view(), &params);

        let v = store.velocities();
        let w = store.angular_velocities();
        assert!(w[0].length() > 0.0 && w[1].length() > 0.0);
        // opposite tangential impulses spin both bodies the same way about Z
        assert!(w[0].z.signum() == w[1].z.signum());

        // normal impulse m * (1 + e) * 1 / 2, tangential limited to mu times that
        let jn = m * 1.5 * 0.5;
        let tangential_change = (v[1].y * m).abs();
        assert!(tangential_change <= 0.3 * jn + 1e-5);

        let momentum_after: Vec3 = v.iter().map(|v| *v * m).sum();
        assert!((momentum_after - momentum_before).length() < 1e-5);
    }

    #[test]
    fn test_pair_slip_below_epsilon_skips_friction() {
        let params = ContactParams { restitution: 0.5, friction: 1.0, rest_epsilon: 1e-4 };
        let mut store = store_with(&[
            (Vec3::new(-0.49, 0.0, 0.0), 0.5, Vec3::new(1.0, 5e-5, 0.0)),
            (Vec3::new(0.49, 0.0, 0.0), 0.5, Vec3::new(-1.0, 0.0, 0.0)),
        ]);
        assert_eq!(resolve_sphere_pairs(&mut store.contact_view(), &params), 1);

        assert_eq!(store.angular_velocities(), &[Vec3::ZERO, Vec3::ZERO]);
        assert_eq!(store.velocities()[0].y, 5e-5);
        assert_eq!(store.velocities()[1].y, 0.0);
        // normal response still happened
        assert!(store.velocities()[0].x < 0.0);
    }

    #[test]
    fn test_surface_slip_below_epsilon_skips_friction() {
        let surface = ImplicitSurface::new(|p: Vec3| p.y, 1e-3);
        let frame = SurfaceFrame::new(&Mat4::IDENTITY).unwrap();
        let params = ContactParams { restitution: 0.5, friction: 1.0, rest_epsilon: 1e-4 };
        let mut store = store_with(&[(Vec3::new(0.0, 0.1, 0.0), 0.2, Vec3::new(5e-5, -2.0, 0.0))]);

        assert_eq!(resolve_surface_contacts(&mut store.contact_view(), &surface, &frame, &params), 1);
        assert_eq!(store.angular_velocities()[0], Vec3::ZERO);
        assert_eq!(store.velocities()[0].x, 5e-5);
        assert!(store.velocities()[0].y > 0.0);
    }

    #[test]
    fn test_flat_surface_contact() {
        let surface = ImplicitSurface::new(|p: Vec3| p.y, 1e-3);
        let frame = SurfaceFrame::new(&Mat4::IDENTITY).unwrap();
        let params = ContactParams { restitution: 0.6, friction: 0.5, rest_epsilon: 1e-4 };
        let mut store = store_with(&[(Vec3::new(0.0, 0.1, 0.0), 0.2, Vec3::new(0.0, -2.0, 0.0))]);

        let contacts = resolve_surface_contacts(&mut store.contact_view(), &surface, &frame, &params);
        assert_eq!(contacts, 1);
        assert_relative_eq!(store.positions()[0].y, 0.2, epsilon = 1e-5);
        assert_relative_eq!(store.velocities()[0].y, 1.2, epsilon = 1e-4);
        assert!(store.angular_velocities()[0].length() < 1e-6);
    }

    #[test]
    fn test_surface_friction_starts_rolling() {
        let surface = ImplicitSurface::new(|p: Vec3| p.y, 1e-3);
        let frame = SurfaceFrame::new(&Mat4::IDENTITY).unwrap();
        let params = ContactParams { restitution: 0.0, friction: 0.5, rest_epsilon: 1e-4 };
        let mut store = store_with(&[(Vec3::new(0.0, 0.15, 0.0), 0.2, Vec3::new(3.0, -1.0, 0.0))]);

        resolve_surface_contacts(&mut store.contact_view(), &surface, &frame, &params);
        let v = store.velocities()[0];
        let w = store.angular_velocities()[0];
        assert!(v.x < 3.0, "friction should slow sliding");
        // sliding toward +X over a floor spins clockwise seen from +Z
        assert!(w.z < 0.0);
    }

    #[test]
    fn test_surface_far_away_untouched() {
        let surface = ImplicitSurface::new(|p: Vec3| p.y, 1e-3);
        let frame = SurfaceFrame::new(&Mat4::IDENTITY).unwrap();
        let mut store = store_with(&[(Vec3::new(0.0, 5.0, 0.0), 0.2, Vec3::new(0.0, -2.0, 0.0))]);
        let contacts = resolve_surface_contacts(&mut store.contact_view(), &surface, &frame, &ELASTIC);
        assert_eq!(contacts, 0);
        assert_eq!(store.positions()[0], Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_rotated_surface_pushes_along_world_normal() {
        // floor turned 90 deg about Z becomes a wall whose solid side is +X
        let surface = ImplicitSurface::new(|p: Vec3| p.y, 1e-3);
        let frame = SurfaceFrame::new(&Mat4::from_quat(Quat::from_rotation_z(FRAC_PI_2))).unwrap();
        let mut store = store_with(&[(Vec3::new(-0.1, 0.0, 0.0), 0.2, Vec3::new(1.0, 0.0, 0.0))]);

        resolve_surface_contacts(&mut store.contact_view(), &surface, &frame, &ELASTIC);
        assert_relative_eq!(store.positions()[0].x, -0.2, epsilon = 1e-4);
        assert_relative_eq!(store.velocities()[0].x, -1.0, epsilon = 1e-4);
    }
}
