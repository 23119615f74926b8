pub mod registry;
pub mod scene;
