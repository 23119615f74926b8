use glam::{Vec2, Vec3};

use crate::api::config::OrreryConfig;
use crate::api::types::BodyId;
use crate::assets::catalog::Catalog;
use crate::core::registry::{BodyHandle, BodyRegistry};
use crate::core::scene::SceneGraph;
use crate::renderer::camera::{Camera3D, Ray};
use crate::renderer::instance::RenderBuffer;
use crate::systems::animation::AnimationDriver;
use crate::systems::builder::{BuiltScene, CloudNode, OrbitPath, SceneBuilder, TextureRequest};
use crate::systems::comet::Comet;
use crate::systems::picking::{self, Pick};
use crate::systems::render::build_render_buffer;

/// World position of one body, for mini-maps and distance readouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub body: BodyId,
    pub position: Vec3,
}

/// The assembled solar system: scene graph, bodies, comets and the driver
/// that animates them.
pub struct SolarSystem {
    config: OrreryConfig,
    world: BuiltScene,
    driver: AnimationDriver,
    selected: Option<BodyId>,
}

impl SolarSystem {
    /// Build the scene for `catalog`, using its embedded config if any.
    pub fn new(catalog: &Catalog) -> Self {
        let config = catalog.config.clone().unwrap_or_default();
        Self::with_config(catalog, config)
    }

    pub fn with_config(catalog: &Catalog, config: OrreryConfig) -> Self {
        let world = SceneBuilder::build(catalog, &config);
        log::info!(
            "solar system built: {} bodies, {} comets, {} nodes, {} textures requested",
            world.registry.len(),
            world.comets.len(),
            world.scene.len(),
            world.textures.len()
        );
        let driver = AnimationDriver::new(&config);
        Self {
            config,
            world,
            driver,
            selected: None,
        }
    }

    /// Parse a catalog and build it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(&Catalog::from_json(json)?))
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32) -> bool {
        self.driver.step(dt, &self.config, &mut self.world)
    }

    /// Body under a pointer at `ndc` (normalized device coordinates).
    pub fn pick(&self, camera: &Camera3D, ndc: Vec2) -> Option<BodyId> {
        self.pick_ray(&camera.ray_from_ndc(ndc)).map(|p| p.body)
    }

    pub fn pick_ray(&self, ray: &Ray) -> Option<Pick> {
        picking::pick(&self.world.scene, ray)
    }

    pub fn body_id(&self, name: &str) -> Option<BodyId> {
        self.world.registry.id_of(name)
    }

    pub fn body(&self, id: BodyId) -> Option<&BodyHandle> {
        self.world.registry.get(id)
    }

    pub fn name_of(&self, id: BodyId) -> Option<&str> {
        self.body(id).map(|b| b.name.as_str())
    }

    pub fn world_position(&self, name: &str) -> Option<Vec3> {
        self.body_id(name).and_then(|id| self.body_position(id))
    }

    pub fn body_position(&self, id: BodyId) -> Option<Vec3> {
        let body = self.world.registry.get(id)?;
        self.world.scene.world_position(body.node)
    }

    /// Every body's current world position, in registry order.
    pub fn positions(&self) -> Vec<BodyPosition> {
        self.world
            .registry
            .iter()
            .filter_map(|(body, handle)| {
                let position = self.world.scene.world_position(handle.node)?;
                Some(BodyPosition { body, position })
            })
            .collect()
    }

    pub fn distance_between(&self, a: &str, b: &str) -> Option<f32> {
        Some(self.world_position(a)?.distance(self.world_position(b)?))
    }

    /// Show the highlight shell of `body` and hide the previous one.
    pub fn select(&mut self, body: Option<BodyId>) {
        let shell = |sys: &Self, id: BodyId| sys.world.registry.get(id).map(|b| b.highlight);
        if let Some(node) = self.selected.and_then(|id| shell(self, id)) {
            if let Some(n) = self.world.scene.get_mut(node) {
                n.visible = false;
            }
        }
        self.selected = body.filter(|id| self.world.registry.get(*id).is_some());
        if let Some(node) = self.selected.and_then(|id| shell(self, id)) {
            if let Some(n) = self.world.scene.get_mut(node) {
                n.visible = true;
            }
        }
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.driver.set_time_scale(scale);
    }

    pub fn time_scale(&self) -> f32 {
        self.driver.time_scale()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.driver.toggle_pause()
    }

    pub fn is_paused(&self) -> bool {
        self.driver.paused
    }

    /// Simulated seconds since construction.
    pub fn elapsed(&self) -> f64 {
        self.driver.elapsed
    }

    /// Pending texture loads. Each request is handed out once.
    pub fn take_texture_requests(&mut self) -> Vec<TextureRequest> {
        std::mem::take(&mut self.world.textures)
    }

    pub fn orbit_paths(&self) -> &[OrbitPath] {
        &self.world.orbit_paths
    }

    pub fn build_render_buffer(&self, buffer: &mut RenderBuffer) {
        build_render_buffer(
            &self.world.scene,
            [&self.world.belt, &self.world.starfield],
            &self.world.comets,
            buffer,
        );
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.world.scene
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.world.registry
    }

    pub fn comets(&self) -> &[Comet] {
        &self.world.comets
    }

    pub fn belt(&self) -> &CloudNode {
        &self.world.belt
    }

    pub fn starfield(&self) -> &CloudNode {
        &self.world.starfield
    }
}
