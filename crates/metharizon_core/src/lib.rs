pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::SimConfig;
pub use constants::*;
pub use error::PhysicsError;
pub use types::*;
