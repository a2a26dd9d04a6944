pub mod body;
pub mod collision;
pub mod diagnostics;
pub mod forces;
pub mod integrator;
pub mod pairs;
pub mod scenario;
pub mod step;
pub mod surface;

pub use body::BodyStore;
pub use step::Simulation;
pub use surface::{ImplicitSurface, SignedDistance};
