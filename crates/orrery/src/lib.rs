pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::OrreryConfig;
pub use api::system::{BodyPosition, SolarSystem};
pub use api::types::{BodyId, NodeId};
pub use assets::catalog::{BodyDescriptor, Catalog, CometDescriptor, MoonDescriptor};
pub use components::body::{BodyKind, DescriptorKind};
pub use components::mesh::{ColorValue, MeshComponent, Rgb, Shape};
pub use components::ring::{RingBand, RingPreset, RingSpec};
pub use crate::core::registry::{BodyHandle, BodyRegistry};
pub use crate::core::scene::{LocalTransform, NodeKind, SceneGraph, SceneNode};
pub use input::gesture::{Gesture, PointerTracker, DRAG_THRESHOLD};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{Camera3D, Ray};
pub use renderer::instance::{NodeInstance, RenderBuffer};
pub use systems::animation::AnimationDriver;
pub use systems::belt::{BoundingSphere, PointCloud};
pub use systems::builder::{OrbitPath, TextureRequest};
pub use systems::comet::{Comet, CometOrbit};
pub use systems::effects::{HistoryBuffer, Rng, TrailParticles};
pub use systems::picking::Pick;

/// Math types used throughout the public API.
pub use glam;
