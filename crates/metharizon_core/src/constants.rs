// Simulation constants (scene units)
// - Distance: 1 unit ~ the radius of the default surface sphere
// - Mass: derived from radius and DENSITY at spawn
// - Time: seconds of wall clock, scaled by the app's time scale
// G is tuned so a handful of default-sized bodies visibly clump within seconds.

/// Gravitational constant in scene units
pub const G: f32 = 1.0;

/// Softening length added to pair distances in the gravity pass
pub const SOFTENING: f32 = 0.05;

/// Density used to derive body mass from radius
pub const DENSITY: f32 = 50.0;

/// Coefficient of restitution for sphere-sphere contacts
pub const RESTITUTION: f32 = 0.5;

/// Coulomb friction coefficient for sphere-sphere contacts
pub const FRICTION: f32 = 0.4;

/// Coefficient of restitution against the implicit surface
pub const SURFACE_RESTITUTION: f32 = 0.6;

/// Coulomb friction coefficient against the implicit surface
pub const SURFACE_FRICTION: f32 = 0.5;

/// Substeps per rendered frame
pub const SUBSTEPS: u32 = 4;

/// Tangential speeds below this skip friction (no jitter at rest)
pub const REST_EPSILON: f32 = 1e-4;

/// Central-difference step for surface normal estimation
pub const GRADIENT_STEP: f32 = 1e-3;

/// Frames longer than this are clamped before substepping (seconds)
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Distance in front of the camera where new bodies appear
pub const SPAWN_DISTANCE: f32 = 2.0;

/// Radius of bodies spawned from the interactive loop
pub const SPAWN_RADIUS: f32 = 0.2;

/// Tolerance for the unit-norm orientation invariant
pub const ORIENTATION_TOLERANCE: f32 = 1e-4;
