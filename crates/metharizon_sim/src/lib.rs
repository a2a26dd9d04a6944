pub mod pipeline;
pub mod world;

pub use pipeline::{SimSet, SimulationPlugin, SpawnBody};
pub use world::SimulationState;
