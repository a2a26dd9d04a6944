use glam::{Mat4, Vec3};
use metharizon_core::{BodyId, BodyInstance, FrameReport, PhysicsError, Shape, SimConfig};

use crate::body::BodyStore;
use crate::collision::{self, ContactParams};
use crate::forces::{self, GravityParams};
use crate::integrator;
use crate::surface::{ImplicitSurface, SignedDistance, SurfaceFrame};

/// The whole physics core: bodies, the static surface, and the frame entry point.
///
/// `advance` is synchronous and finishes every substep before it returns;
/// callers read the body arrays or take a snapshot afterwards.
#[derive(Debug, Clone)]
pub struct Simulation<S = Shape> {
    config: SimConfig,
    bodies: BodyStore,
    surface: ImplicitSurface<S>,
    gravity: GravityParams,
    pair_contact: ContactParams,
    surface_contact: ContactParams,
    /// Force scratch, reused across substeps
    forces: Vec<Vec3>,
    frame: u64,
    elapsed: f64,
}

impl Simulation<Shape> {
    /// Simulation against the surface shape named in the config
    pub fn new(config: SimConfig) -> Result<Self, PhysicsError> {
        let shape = config.surface;
        Self::with_surface(config, shape)
    }
}

impl<S: SignedDistance> Simulation<S> {
    /// Simulation against any distance field, e.g. a closure
    pub fn with_surface(config: SimConfig, shape: S) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            bodies: BodyStore::new(config.density),
            surface: ImplicitSurface::new(shape, config.gradient_step),
            gravity: GravityParams::from_config(&config),
            pair_contact: ContactParams::pairs_from_config(&config),
            surface_contact: ContactParams::surface_from_config(&config),
            forces: Vec::new(),
            frame: 0,
            elapsed: 0.0,
            config,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &BodyStore {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut BodyStore {
        &mut self.bodies
    }

    pub fn surface(&self) -> &ImplicitSurface<S> {
        &self.surface
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds so far (after clamping)
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn spawn(&mut self, position: Vec3, radius: f32) -> Result<BodyId, PhysicsError> {
        self.bodies.spawn(position, radius)
    }

    pub fn count(&self) -> usize {
        self.bodies.count()
    }

    pub fn snapshot(&self) -> Vec<BodyInstance> {
        self.bodies.snapshot()
    }

    /// Advance one rendered frame of `dt` seconds against the surface placed
    /// at `surface_transform` (local to world).
    ///
    /// Non-finite or non-positive `dt` does nothing. `dt` above
    /// `max_frame_time` is clamped so one stalled frame cannot inject a huge
    /// step. A singular surface transform skips the surface pass for this frame.
    pub fn advance(&mut self, dt: f32, surface_transform: &Mat4) -> FrameReport {
        if !(dt.is_finite() && dt > 0.0) {
            log::trace!("advance skipped: dt = {dt}");
            return FrameReport {
                frame: self.frame,
                ..FrameReport::default()
            };
        }

        let clamped = dt > self.config.max_frame_time;
        let dt = if clamped {
            log::debug!("frame time {dt:.4}s clamped to {:.4}s", self.config.max_frame_time);
            self.config.max_frame_time
        } else {
            dt
        };

        let frame = SurfaceFrame::new(surface_transform);
        if frame.is_none() {
            log::warn!("surface transform is singular; skipping surface contacts this frame");
        }

        let substeps = self.config.substeps;
        let h = dt / substeps as f32;
        let mut report = FrameReport {
            substeps,
            substep_dt: h,
            clamped,
            ..FrameReport::default()
        };

        for _ in 0..substeps {
            let (pairs, surface) = self.substep(h, frame.as_ref());
            report.pair_contacts += pairs;
            report.surface_contacts += surface;
        }

        self.frame += 1;
        self.elapsed += dt as f64;
        report.frame = self.frame;
        report
    }

    /// Force -> linear integrate -> contacts (pairs, then surface) -> angular integrate
    fn substep(&mut self, h: f32, frame: Option<&SurfaceFrame>) -> (u32, u32) {
        forces::compute_forces(self.bodies.positions(), self.bodies.masses(), &self.gravity, &mut self.forces);

        let (positions, velocities, masses) = self.bodies.linear_view();
        integrator::integrate_linear(positions, velocities, &self.forces, masses, h);

        let mut view = self.bodies.contact_view();
        let pairs = collision::resolve_sphere_pairs(&mut view, &self.pair_contact);
        let surface = match frame {
            Some(frame) => collision::resolve_surface_contacts(&mut view, &self.surface, frame, &self.surface_contact),
            None => 0,
        };

        let (orientations, angular_velocities) = self.bodies.angular_view();
        integrator::integrate_angular(orientations, angular_velocities, h);

        (pairs, surface)
    }
}
