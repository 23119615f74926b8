pub mod camera;
pub mod instance;

pub use camera::{Camera3D, Ray};
pub use instance::{NodeInstance, RenderBuffer};
