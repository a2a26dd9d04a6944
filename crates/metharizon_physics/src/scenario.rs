use glam::Vec3;
use metharizon_core::{BodyId, PhysicsError, SimConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::body::BodyStore;

/// Placement of a scattered population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterParams {
    /// Shell inner radius, measured from the world origin
    pub inner_radius: f32,
    /// Shell outer radius
    pub outer_radius: f32,
    /// Body radius varies by +/- this fraction of `SimConfig::spawn_radius`
    pub radius_jitter: f32,
    /// Speed of the initial tangential velocity
    pub tangential_speed: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            inner_radius: 1.5,
            outer_radius: 4.0,
            radius_jitter: 0.3,
            tangential_speed: 0.5,
        }
    }
}

/// Tries per body before accepting an overlapping spot
const PLACEMENT_ATTEMPTS: usize = 32;

/// Deterministic RNG for a scenario seed
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Spawn `count` bodies in a spherical shell around the origin, each moving
/// tangentially so the cloud swirls instead of collapsing straight inward.
///
/// Spots that overlap an existing body are re-drawn a bounded number of
/// times; a crowded shell still gets every body, the contact pass sorts out
/// the rest.
pub fn scatter_shell(
    store: &mut BodyStore,
    config: &SimConfig,
    params: &ScatterParams,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<BodyId>, PhysicsError> {
    let mut ids = Vec::with_capacity(count);

    for _ in 0..count {
        let jitter = params.radius_jitter.clamp(0.0, 0.95);
        let radius = config.spawn_radius * rng.gen_range(1.0 - jitter..=1.0 + jitter);

        let mut pos = random_in_shell(params, rng);
        for _ in 1..PLACEMENT_ATTEMPTS {
            if !overlaps_existing(store, pos, radius) {
                break;
            }
            pos = random_in_shell(params, rng);
        }

        let id = store.spawn(pos, radius)?;

        // tangent = radial x random axis, so it is perpendicular to the radius
        let axis = random_unit(rng);
        let tangent = pos.cross(axis).try_normalize().unwrap_or(Vec3::X);
        store.set_velocity(id, tangent * params.tangential_speed)?;
        ids.push(id);
    }

    log::debug!("scattered {} bodies in shell [{}, {}]", ids.len(), params.inner_radius, params.outer_radius);
    Ok(ids)
}

fn random_in_shell(params: &ScatterParams, rng: &mut impl Rng) -> Vec3 {
    let lo = params.inner_radius.min(params.outer_radius);
    let hi = params.inner_radius.max(params.outer_radius);
    // uniform in volume: r^3 uniform between lo^3 and hi^3
    let r = rng.gen_range(lo.powi(3)..=hi.powi(3)).cbrt();
    random_unit(rng) * r
}

/// Uniform direction on the sphere (spherical coordinates)
fn random_unit(rng: &mut impl Rng) -> Vec3 {
    let theta = rng.gen_range(0.0..std::f32::consts::TAU);
    let phi = rng.gen_range(-1.0..1.0f32).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

fn overlaps_existing(store: &BodyStore, pos: Vec3, radius: f32) -> bool {
    store
        .positions()
        .iter()
        .zip(store.radii())
        .any(|(p, r)| (*p - pos).length_squared() < (r + radius) * (r + radius))
}
