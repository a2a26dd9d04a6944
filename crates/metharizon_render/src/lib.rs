pub mod bodies;
pub mod camera;
pub mod plugin;
pub mod surface;
pub mod ui;

pub use plugin::MetharizonRenderPlugin;
