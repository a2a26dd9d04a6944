use glam::{Mat3, Mat4, Vec2, Vec3};
use metharizon_core::Shape;

/// A scalar distance field, negative inside, evaluated in the surface's local frame.
pub trait SignedDistance {
    fn distance(&self, p: Vec3) -> f32;
}

impl<F> SignedDistance for F
where
    F: Fn(Vec3) -> f32,
{
    fn distance(&self, p: Vec3) -> f32 {
        self(p)
    }
}

impl SignedDistance for Shape {
    fn distance(&self, p: Vec3) -> f32 {
        match *self {
            Shape::Sphere { radius } => p.length() - radius,
            Shape::Cuboid { half_extents } => {
                let q = p.abs() - half_extents;
                q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
            }
            Shape::Torus { major_radius, minor_radius } => {
                // ring lies in the local XZ plane
                let q = Vec2::new(Vec2::new(p.x, p.z).length() - major_radius, p.y);
                q.length() - minor_radius
            }
            Shape::Plane { normal, offset } => {
                let n = normal.try_normalize().unwrap_or(Vec3::Y);
                p.dot(n) - offset
            }
        }
    }
}

/// Distance field plus the finite-difference step used to estimate its normal.
#[derive(Debug, Clone)]
pub struct ImplicitSurface<S> {
    shape: S,
    gradient_step: f32,
}

impl<S: SignedDistance> ImplicitSurface<S> {
    pub fn new(shape: S, gradient_step: f32) -> Self {
        Self { shape, gradient_step }
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn gradient_step(&self) -> f32 {
        self.gradient_step
    }

    /// Signed distance at a local-space point
    pub fn distance(&self, local: Vec3) -> f32 {
        self.shape.distance(local)
    }

    /// Unit outward normal at a local-space point, by central differences.
    /// Falls back to +Y where the gradient vanishes (e.g. the center of a sphere).
    pub fn normal(&self, local: Vec3) -> Vec3 {
        let e = self.gradient_step;
        let dx = self.distance(local + Vec3::X * e) - self.distance(local - Vec3::X * e);
        let dy = self.distance(local + Vec3::Y * e) - self.distance(local - Vec3::Y * e);
        let dz = self.distance(local + Vec3::Z * e) - self.distance(local - Vec3::Z * e);
        Vec3::new(dx, dy, dz).try_normalize().unwrap_or(Vec3::Y)
    }
}

/// World placement of the surface for one frame: the transform, its inverse,
/// and the inverse-transpose used to carry local normals back to world space.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceFrame {
    pub world_to_local: Mat4,
    normal_to_world: Mat3,
}

impl SurfaceFrame {
    /// `None` if the transform is singular (e.g. a zero scale)
    pub fn new(local_to_world: &Mat4) -> Option<Self> {
        let det = local_to_world.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let world_to_local = local_to_world.inverse();
        Some(Self {
            world_to_local,
            normal_to_world: Mat3::from_mat4(world_to_local).transpose(),
        })
    }

    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.world_to_local.transform_point3(world)
    }

    pub fn normal_to_world(&self, local_normal: Vec3) -> Vec3 {
        (self.normal_to_world * local_normal)
            .try_normalize()
            .unwrap_or(local_normal)
    }
}
