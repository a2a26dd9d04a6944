use std::fmt;

use crate::types::BodyId;

/// Errors surfaced at the simulation boundary.
///
/// Numerical trouble inside a step (coincident centers, flat gradients) is
/// handled by fallbacks and never reaches this type.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Spawn rejected: radius must be finite and positive, position finite
    InvalidBodyParameters { radius: f32 },
    /// No live body carries this id
    UnknownBody(BodyId),
    /// Velocity or angular velocity with a NaN or infinite component
    NonFiniteVelocity(BodyId),
    /// Every `u32` id has been handed out
    IdsExhausted,
    /// A configuration field is out of range
    InvalidConfig(&'static str),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBodyParameters { radius } => {
                write!(f, "invalid body parameters: radius {radius} (must be finite and > 0, position finite)")
            }
            Self::UnknownBody(id) => write!(f, "unknown body id {}", id.0),
            Self::NonFiniteVelocity(id) => write!(f, "non-finite velocity for body {}", id.0),
            Self::IdsExhausted => write!(f, "body id space exhausted"),
            Self::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for PhysicsError {}
