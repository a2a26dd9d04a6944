use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Stable identity of a body. Assigned from 1 upward, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Per-body record for renderer upload
/// Must be repr(C) and Pod so it can be cast straight into an instance buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Position (x, y, z) + radius packed in w
    pub position: [f32; 4],
    /// Orientation quaternion (x, y, z, w)
    pub orientation: [f32; 4],
    pub id: u32,
    /// Padding for 16-byte alignment
    pub _pad: [u32; 3],
}

impl BodyInstance {
    pub fn new(id: BodyId, pos: Vec3, radius: f32, orientation: Quat) -> Self {
        Self {
            position: [pos.x, pos.y, pos.z, radius],
            orientation: orientation.to_array(),
            id: id.0,
            _pad: [0; 3],
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }

    pub fn radius(&self) -> f32 {
        self.position[3]
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_array(self.orientation)
    }

    pub fn body_id(&self) -> BodyId {
        BodyId(self.id)
    }
}

/// Shape of the static implicit surface, in its local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
    Torus { major_radius: f32, minor_radius: f32 },
    /// Half-space `dot(p, normal) - offset`, normal need not be unit length
    Plane { normal: Vec3, offset: f32 },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "Sphere",
            Self::Cuboid { .. } => "Cuboid",
            Self::Torus { .. } => "Torus",
            Self::Plane { .. } => "Plane",
        }
    }

    /// Unit sphere at the origin
    pub fn unit_sphere() -> Self {
        Self::Sphere { radius: 1.0 }
    }

    /// Ground plane y = 0, solid below
    pub fn ground() -> Self {
        Self::Plane {
            normal: Vec3::Y,
            offset: 0.0,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::unit_sphere()
    }
}

/// What one call to `advance` did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Frame counter after this call (only counts frames that stepped)
    pub frame: u64,
    /// Substeps actually run
    pub substeps: u32,
    /// Duration of each substep in seconds
    pub substep_dt: f32,
    /// Frame time was clamped to `max_frame_time`
    pub clamped: bool,
    /// Sphere-sphere contacts resolved, summed over substeps
    pub pair_contacts: u32,
    /// Sphere-surface contacts resolved, summed over substeps
    pub surface_contacts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 48);
        let inst = BodyInstance::new(BodyId(3), Vec3::new(1.0, 2.0, 3.0), 0.5, Quat::IDENTITY);
        let bytes: &[u8] = bytemuck::bytes_of(&inst);
        assert_eq!(bytes.len(), 48);
        assert_eq!(inst.pos(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(inst.radius(), 0.5);
        assert_eq!(inst.rotation(), Quat::IDENTITY);
        assert_eq!(inst.body_id(), BodyId(3));
    }

    #[test]
    fn test_shape_serde_tagged() {
        let json = serde_json::to_string(&Shape::Torus { major_radius: 2.0, minor_radius: 0.5 }).unwrap();
        assert!(json.contains("\"kind\":\"torus\""));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Shape::Torus { major_radius: 2.0, minor_radius: 0.5 });
    }

    #[test]
    fn test_cuboid_from_json() {
        let shape: Shape = serde_json::from_str(r#"{"kind":"cuboid","half_extents":[1.0,0.5,2.0]}"#).unwrap();
        assert_eq!(shape, Shape::Cuboid { half_extents: Vec3::new(1.0, 0.5, 2.0) });
        assert_eq!(shape.name(), "Cuboid");
    }
}
