//! Scene construction: orbit pivots, bodies, rings, moons, probes, comets
//! and the static point clouds.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use crate::api::config::OrreryConfig;
use crate::api::types::{BodyId, NodeId};
use crate::assets::catalog::{BodyDescriptor, Catalog, CometDescriptor, MoonDescriptor};
use crate::components::body::BodyKind;
use crate::components::mesh::{ColorValue, MeshComponent, Rgb, Shape};
use crate::components::ring::RingSpec;
use crate::core::registry::{BodyHandle, BodyRegistry};
use crate::core::scene::{LocalTransform, NodeKind, SceneGraph, SceneNode};
use crate::systems::belt::{asteroid_belt, starfield, PointCloud};
use crate::systems::comet::Comet;
use crate::systems::effects::Rng;

/// Golden ratio, used to spread moon start phases.
const PHI: f32 = 1.618_034;
/// Samples per orbit polyline.
const ORBIT_SEGMENTS: usize = 128;
/// Reach of a probe's panels, as a multiple of its bus radius.
const PROBE_SPAN: f32 = 2.6;
const COMET_COLOR: Rgb = Rgb::new(0.75, 0.9, 1.0);
const PROBE_COLOR: Rgb = Rgb::new(0.8, 0.8, 0.85);
const PANEL_COLOR: Rgb = Rgb::new(0.15, 0.25, 0.55);

/// A texture the host should load for `node`. The mesh renders with its
/// solid color until then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRequest {
    pub node: NodeId,
    pub path: String,
}

/// World-space polyline of a body's orbit, sampled once at construction.
#[derive(Debug, Clone)]
pub struct OrbitPath {
    pub body: BodyId,
    pub points: Vec<Vec3>,
}

/// A point cloud and the node that places it.
#[derive(Debug, Clone)]
pub struct CloudNode {
    pub node: NodeId,
    pub cloud: PointCloud,
}

/// Placement of the `index`-th moon around a parent of visual radius `parent_r`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonOrbit {
    pub distance: f32,
    /// One-time orbital-plane tilt about X (radians).
    pub tilt: f32,
    /// Starting pivot yaw (radians).
    pub phase: f32,
    pub speed: f32,
}

impl MoonOrbit {
    pub fn for_index(index: usize, parent_r: f32, cfg: &OrreryConfig) -> Self {
        let i = index as f32;
        let base = parent_r * 1.8 + cfg.moon_gap;
        let spacing = parent_r * 0.5 + cfg.moon_gap;
        Self {
            distance: base + i * spacing,
            tilt: (i * 1.7).sin() * cfg.moon_max_tilt,
            phase: (i * PHI * PI).rem_euclid(TAU),
            speed: cfg.moon_base_speed / (1.0 + i * 0.4),
        }
    }
}

/// Everything construction produces.
#[derive(Debug, Clone)]
pub struct BuiltScene {
    pub scene: SceneGraph,
    pub registry: BodyRegistry,
    pub comets: Vec<Comet>,
    pub belt: CloudNode,
    pub starfield: CloudNode,
    pub textures: Vec<TextureRequest>,
    pub orbit_paths: Vec<OrbitPath>,
    /// Generator state after construction; later drives trail jitter.
    pub rng: Rng,
}

/// Visual radius in scene units. Stars use the configured star radius.
pub fn visual_radius(id: &str, radius_km: Option<f32>, is_star: bool, cfg: &OrreryConfig) -> f32 {
    if is_star {
        return cfg.star_radius;
    }
    match radius_km {
        Some(km) if km.is_finite() && km > 0.0 && cfg.km_per_unit > 0.0 => km / cfg.km_per_unit,
        _ => {
            log::warn!("body '{}': missing or invalid radius, using {}", id, cfg.fallback_radius);
            cfg.fallback_radius
        }
    }
}

/// Offset of a body from its pivot origin, in scene units.
pub fn scene_distance(desc: &BodyDescriptor, cfg: &OrreryConfig) -> f32 {
    match desc.distance {
        Some(d) if d.is_finite() && d > 0.0 => d * cfg.distance_scale,
        _ => {
            log::warn!(
                "body '{}': missing or invalid distance, using {}",
                desc.id,
                cfg.fallback_distance
            );
            cfg.fallback_distance * cfg.distance_scale
        }
    }
}

/// Pivot yaw speed; closer bodies revolve faster.
pub fn orbit_speed(scene_distance: f32, cfg: &OrreryConfig) -> f32 {
    if scene_distance > 0.0 {
        cfg.orbit_speed_factor / scene_distance
    } else {
        0.0
    }
}

fn resolve_color(id: &str, color: Option<&ColorValue>, textured: bool, fallback: Rgb) -> Rgb {
    match color.map(ColorValue::to_rgb) {
        Some(Some(rgb)) => rgb,
        Some(None) => {
            log::warn!("body '{}': unreadable color, using fallback", id);
            fallback
        }
        None if textured => Rgb::WHITE,
        None => {
            log::warn!("body '{}': no color, using fallback", id);
            fallback
        }
    }
}

fn degrees(value: Option<f32>) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0).to_radians()
}

/// Incremental scene builder. Bodies are registered in the order added.
pub struct SceneBuilder<'a> {
    cfg: &'a OrreryConfig,
    scene: SceneGraph,
    registry: BodyRegistry,
    comets: Vec<Comet>,
    textures: Vec<TextureRequest>,
    orbit_paths: Vec<OrbitPath>,
    rng: Rng,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(cfg: &'a OrreryConfig) -> Self {
        Self {
            cfg,
            scene: SceneGraph::new(),
            registry: BodyRegistry::new(),
            comets: Vec::new(),
            textures: Vec::new(),
            orbit_paths: Vec::new(),
            rng: Rng::new(cfg.seed),
        }
    }

    /// Build the full scene for `catalog`.
    pub fn build(catalog: &Catalog, cfg: &'a OrreryConfig) -> BuiltScene {
        let mut builder = Self::new(cfg);
        for desc in &catalog.bodies {
            builder.add_body(desc);
        }
        for desc in &catalog.comets {
            builder.add_comet(desc);
        }
        builder.finish()
    }

    /// Add a top-level body with its rings and moons.
    pub fn add_body(&mut self, desc: &BodyDescriptor) -> BodyId {
        let kind = BodyKind::resolve(desc);
        let root = self.scene.root();
        let id = self.registry.next_id();
        let radius = visual_radius(&desc.id, desc.radius_km, kind.is_star(), self.cfg);
        let default_color = match kind {
            BodyKind::Probe => PROBE_COLOR,
            _ => self.cfg.fallback_color,
        };
        let color = resolve_color(&desc.id, desc.color.as_ref(), desc.texture.is_some(), default_color);
        let axial_tilt = Quat::from_rotation_z(degrees(desc.axial_tilt_deg));

        let (pivot, node, distance, speed) = if kind.is_star() {
            let node = self.scene.attach(
                root,
                SceneNode::new(NodeKind::Body(id))
                    .with_local(LocalTransform::new().with_tilt(axial_tilt))
                    .with_mesh(
                        MeshComponent::sphere(radius, color)
                            .with_emissive(1.0)
                            .with_texture(desc.texture.clone()),
                    ),
            );
            (None, node, 0.0, 0.0)
        } else {
            let distance = scene_distance(desc, self.cfg);
            let speed = orbit_speed(distance, self.cfg);
            let plane = Quat::from_rotation_x(degrees(desc.inclination_deg));
            let phase = self.rng.next_f32() * TAU;
            let pivot = self.scene.attach(
                root,
                SceneNode::new(NodeKind::Pivot)
                    .with_local(LocalTransform::new().with_tilt(plane).with_yaw(phase)),
            );
            let local = LocalTransform::new()
                .with_offset(Vec3::new(distance, 0.0, 0.0))
                .with_tilt(axial_tilt);
            let node = if kind == BodyKind::Probe {
                self.attach_probe(pivot, id, local, radius, color)
            } else {
                self.scene.attach(
                    pivot,
                    SceneNode::new(NodeKind::Body(id)).with_local(local).with_mesh(
                        MeshComponent::sphere(radius, color).with_texture(desc.texture.clone()),
                    ),
                )
            };
            self.orbit_paths.push(OrbitPath {
                body: id,
                points: circle(plane, distance),
            });
            (Some(pivot), node, distance, speed)
        };

        let pick_radius = match kind {
            BodyKind::Probe => radius * PROBE_SPAN,
            _ => radius,
        };
        let (hitbox, highlight) = self.attach_markers(node, id, pick_radius);
        self.request_texture(node, desc.texture.as_deref());

        log::debug!(
            "body '{}' ({:?}): radius {:.3}, distance {:.1}, speed {:.4}",
            desc.id,
            kind,
            radius,
            distance,
            speed
        );
        let rings = kind.rings().cloned();
        let inserted = self.registry.insert(BodyHandle {
            name: desc.id.clone(),
            kind,
            parent: None,
            pivot,
            node,
            hitbox,
            highlight,
            orbit_speed: speed,
            visual_radius: radius,
            orbit_distance: distance,
        });
        debug_assert_eq!(inserted, id);

        if let Some(rings) = rings {
            self.attach_rings(node, radius, &rings);
        }
        for (index, moon) in desc.moons.iter().enumerate() {
            self.add_moon(id, node, radius, index, moon);
        }
        id
    }

    fn add_moon(&mut self, parent: BodyId, parent_node: NodeId, parent_r: f32, index: usize, desc: &MoonDescriptor) -> BodyId {
        let id = self.registry.next_id();
        let orbit = MoonOrbit::for_index(index, parent_r, self.cfg);
        let radius = visual_radius(&desc.id, desc.radius_km, false, self.cfg);
        let color = resolve_color(&desc.id, desc.color.as_ref(), desc.texture.is_some(), self.cfg.fallback_color);

        let pivot = self.scene.attach(
            parent_node,
            SceneNode::new(NodeKind::Pivot).with_local(
                LocalTransform::new()
                    .with_tilt(Quat::from_rotation_x(orbit.tilt))
                    .with_yaw(orbit.phase),
            ),
        );
        let node = self.scene.attach(
            pivot,
            SceneNode::new(NodeKind::Body(id))
                .with_local(LocalTransform::new().with_offset(Vec3::new(orbit.distance, 0.0, 0.0)))
                .with_mesh(MeshComponent::sphere(radius, color).with_texture(desc.texture.clone())),
        );
        let (hitbox, highlight) = self.attach_markers(node, id, radius);
        self.request_texture(node, desc.texture.as_deref());

        log::debug!("moon '{}' #{}: distance {:.2}, speed {:.3}", desc.id, index, orbit.distance, orbit.speed);
        self.registry.insert(BodyHandle {
            name: desc.id.clone(),
            kind: BodyKind::Moon,
            parent: Some(parent),
            pivot: Some(pivot),
            node,
            hitbox,
            highlight,
            orbit_speed: orbit.speed,
            visual_radius: radius,
            orbit_distance: orbit.distance,
        })
    }

    /// Add a comet on its conic orbit around the root star.
    pub fn add_comet(&mut self, desc: &CometDescriptor) -> BodyId {
        let id = self.registry.next_id();
        let color = match desc.color.as_ref().map(ColorValue::to_rgb) {
            Some(Some(rgb)) => rgb,
            _ => COMET_COLOR,
        };
        let radius = match desc.radius_km {
            Some(km) if km.is_finite() && km > 0.0 => visual_radius(&desc.id, Some(km), false, self.cfg),
            _ => self.cfg.comet_radius,
        };

        let root = self.scene.root();
        let node = self.scene.attach(
            root,
            SceneNode::new(NodeKind::Body(id))
                .with_mesh(MeshComponent::sphere(radius, color).with_emissive(0.6)),
        );
        let comet = Comet::new(id, node, desc, color, self.cfg);
        if let Some(local) = self.scene.local_mut(node) {
            local.offset = comet.position;
        }
        self.scene.propagate();
        let (hitbox, highlight) = self.attach_markers(node, id, radius);

        log::debug!(
            "comet '{}': a {:.1}, e {:.3}",
            desc.id,
            comet.orbit.semi_major,
            comet.orbit.eccentricity
        );
        self.orbit_paths.push(OrbitPath {
            body: id,
            points: comet.orbit_path(ORBIT_SEGMENTS * 2),
        });
        self.registry.insert(BodyHandle {
            name: desc.id.clone(),
            kind: BodyKind::Comet,
            parent: None,
            pivot: None,
            node,
            hitbox,
            highlight,
            orbit_speed: comet.speed,
            visual_radius: radius,
            orbit_distance: comet.orbit.semi_major,
        });
        self.comets.push(comet);
        id
    }

    /// Invisible pick sphere and selection shell, both children of `node`.
    fn attach_markers(&mut self, node: NodeId, id: BodyId, radius: f32) -> (NodeId, NodeId) {
        let hit_r = (radius * self.cfg.hitbox_scale).max(self.cfg.hitbox_min);
        let hitbox = self.scene.attach(
            node,
            SceneNode::new(NodeKind::Hitbox(id))
                .with_mesh(MeshComponent::sphere(hit_r, Rgb::WHITE).with_opacity(0.0))
                .hidden(),
        );
        let highlight = self.scene.attach(
            node,
            SceneNode::new(NodeKind::Highlight(id))
                .with_mesh(
                    MeshComponent::sphere(radius * self.cfg.highlight_scale, Rgb::WHITE).with_opacity(0.35),
                )
                .hidden(),
        );
        (hitbox, highlight)
    }

    fn attach_rings(&mut self, body: NodeId, radius: f32, rings: &RingSpec) {
        let group = self.scene.attach(body, SceneNode::new(NodeKind::Rings));
        for band in rings.resolve() {
            self.scene.attach(
                group,
                SceneNode::new(NodeKind::Rings).with_mesh(
                    MeshComponent::new(
                        Shape::Annulus {
                            inner: band.inner * radius,
                            outer: band.outer * radius,
                        },
                        band.color,
                    )
                    .with_opacity(band.opacity),
                ),
            );
        }
    }

    /// Probe: an invisible body frame carrying a bus, a dish and two panels.
    fn attach_probe(&mut self, pivot: NodeId, id: BodyId, local: LocalTransform, r: f32, color: Rgb) -> NodeId {
        let node = self.scene.attach(pivot, SceneNode::new(NodeKind::Body(id)).with_local(local).hidden());
        let part = |offset: Vec3, shape: Shape, color: Rgb| {
            SceneNode::new(NodeKind::Part(id))
                .with_local(LocalTransform::new().with_offset(offset))
                .with_mesh(MeshComponent::new(shape, color))
        };

        self.scene.attach(node, part(Vec3::ZERO, Shape::Cuboid { half_extents: Vec3::splat(r * 0.5) }, color));
        self.scene.attach(node, part(Vec3::new(0.0, r * 0.8, 0.0), Shape::Sphere { radius: r * 0.45 }, color));
        let panel = Shape::Cuboid {
            half_extents: Vec3::new(r, r * 0.03, r * 0.35),
        };
        self.scene.attach(node, part(Vec3::new(r * 1.6, 0.0, 0.0), panel, PANEL_COLOR));
        self.scene.attach(node, part(Vec3::new(-r * 1.6, 0.0, 0.0), panel, PANEL_COLOR));
        node
    }

    fn request_texture(&mut self, node: NodeId, path: Option<&str>) {
        if let Some(path) = path.filter(|p| !p.is_empty()) {
            self.textures.push(TextureRequest {
                node,
                path: path.to_string(),
            });
        }
    }

    /// Generate the belt and starfield and hand over the finished scene.
    pub fn finish(mut self) -> BuiltScene {
        let root = self.scene.root();
        let belt = asteroid_belt(self.cfg, &mut self.rng);
        let belt_node = self.scene.attach(
            root,
            SceneNode::new(NodeKind::Belt).with_mesh(MeshComponent::new(Shape::Points, belt.color)),
        );
        let stars = starfield(self.cfg, &mut self.rng);
        let star_node = self.scene.attach(
            root,
            SceneNode::new(NodeKind::Starfield).with_mesh(MeshComponent::new(Shape::Points, stars.color)),
        );
        self.scene.propagate();

        BuiltScene {
            scene: self.scene,
            registry: self.registry,
            comets: self.comets,
            belt: CloudNode { node: belt_node, cloud: belt },
            starfield: CloudNode { node: star_node, cloud: stars },
            textures: self.textures,
            orbit_paths: self.orbit_paths,
            rng: self.rng,
        }
    }
}

fn circle(plane: Quat, radius: f32) -> Vec<Vec3> {
    (0..=ORBIT_SEGMENTS)
        .map(|i| {
            let a = i as f32 / ORBIT_SEGMENTS as f32 * TAU;
            plane * Vec3::new(radius * a.cos(), 0.0, -radius * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> BodyDescriptor {
        Catalog::from_json(
            r#"{ "bodies": [ { "id": "earth", "raioKm": 6371, "distanciaMediaAoSol": 150,
                 "luas": [ { "id": "moon", "raioKm": 1737 } ] } ] }"#,
        )
        .unwrap()
        .bodies
        .remove(0)
    }

    fn build(json: &str, cfg: &OrreryConfig) -> BuiltScene {
        SceneBuilder::build(&Catalog::from_json(json).unwrap(), cfg)
    }

    #[test]
    fn planet_sits_at_twice_its_distance() {
        let cfg = OrreryConfig::default();
        let mut builder = SceneBuilder::new(&cfg);
        let id = builder.add_body(&earth());
        let built = builder.finish();

        let handle = built.registry.get(id).unwrap();
        let pivot = handle.pivot.expect("planets have a pivot");
        assert_eq!(built.scene.parent(pivot), Some(built.scene.root()));
        assert_eq!(built.scene.parent(handle.node), Some(pivot));
        let local = built.scene.get(handle.node).unwrap().local;
        assert_eq!(local.offset, Vec3::new(300.0, 0.0, 0.0));
        assert_eq!(handle.orbit_distance, 300.0);
        assert!((handle.orbit_speed - 50.0 / 300.0).abs() < 1e-6);
    }

    #[test]
    fn moon_pivot_hangs_off_the_planet_body() {
        let cfg = OrreryConfig::default();
        let built = build(
            r#"{ "bodies": [ { "id": "earth", "raioKm": 6371, "distanciaMediaAoSol": 150,
                 "luas": [ { "id": "moon", "raioKm": 1737 } ] } ] }"#,
            &cfg,
        );
        let earth = built.registry.by_name("earth").unwrap();
        let moon = built.registry.by_name("moon").unwrap();
        let moon_pivot = moon.pivot.unwrap();

        assert_eq!(built.scene.parent(moon_pivot), Some(earth.node));
        assert_eq!(moon.parent, built.registry.id_of("earth"));
        assert!(moon.orbit_distance >= earth.visual_radius * 1.8);
        let offset = built.scene.get(moon.node).unwrap().local.offset;
        assert_eq!(offset.x, moon.orbit_distance);
    }

    #[test]
    fn moon_count_and_spacing() {
        let cfg = OrreryConfig::default();
        let built = build(
            r#"{ "bodies": [
                { "id": "mars", "raioKm": 3390, "distanciaMediaAoSol": 228 },
                { "id": "jupiter", "raioKm": 69911, "distanciaMediaAoSol": 778,
                  "luas": [ { "id": "io" }, { "id": "europa" }, { "id": "ganymede" }, { "id": "callisto" } ] }
            ] }"#,
            &cfg,
        );
        let mars = built.registry.id_of("mars").unwrap();
        assert_eq!(built.registry.moons_of(mars).count(), 0);
        let mars_node = built.registry.get(mars).unwrap().node;
        assert!(built
            .scene
            .children(mars_node)
            .iter()
            .all(|c| built.scene.get(*c).unwrap().kind != NodeKind::Pivot));

        let jupiter = built.registry.id_of("jupiter").unwrap();
        let distances: Vec<f32> = built.registry.moons_of(jupiter).map(|(_, m)| m.orbit_distance).collect();
        assert_eq!(distances.len(), 4);
        assert!(distances.windows(2).all(|w| w[1] > w[0]), "{distances:?}");

        let jupiter_node = built.registry.get(jupiter).unwrap().node;
        let pivots = built
            .scene
            .children(jupiter_node)
            .iter()
            .filter(|c| built.scene.get(**c).unwrap().kind == NodeKind::Pivot)
            .count();
        assert_eq!(pivots, 4);
    }

    #[test]
    fn moon_layout_is_reproducible() {
        let cfg = OrreryConfig::default();
        let a = MoonOrbit::for_index(2, 3.0, &cfg);
        let b = MoonOrbit::for_index(2, 3.0, &cfg);
        assert_eq!(a, b);
        assert!(a.tilt.abs() <= cfg.moon_max_tilt);
        assert!((a.speed - cfg.moon_base_speed / 1.8).abs() < 1e-6);
        let first = MoonOrbit::for_index(0, 3.0, &cfg);
        assert_eq!(first.distance, 3.0 * 1.8 + cfg.moon_gap);
        assert_eq!(first.phase, 0.0);
    }

    #[test]
    fn missing_fields_fall_back() {
        let cfg = OrreryConfig::default();
        let built = build(r#"{ "bodies": [ { "id": "mystery" } ] }"#, &cfg);
        let body = built.registry.by_name("mystery").unwrap();
        assert_eq!(body.visual_radius, cfg.fallback_radius);
        assert_eq!(body.orbit_distance, cfg.fallback_distance * cfg.distance_scale);
        let mesh = built.scene.get(body.node).unwrap().mesh.as_ref().unwrap();
        assert_eq!(mesh.color, cfg.fallback_color);
        assert_eq!(mesh.shape, Shape::Sphere { radius: cfg.fallback_radius });
    }

    #[test]
    fn star_has_no_pivot() {
        let cfg = OrreryConfig::default();
        let built = build(r#"{ "bodies": [ { "id": "sun", "raioKm": 696340, "distanciaMediaAoSol": 0 } ] }"#, &cfg);
        let sun = built.registry.by_name("sun").unwrap();
        assert!(sun.kind.is_star());
        assert!(sun.pivot.is_none());
        assert_eq!(built.scene.parent(sun.node), Some(built.scene.root()));
        assert_eq!(sun.visual_radius, cfg.star_radius);
        assert_eq!(built.scene.world_position(sun.node), Some(Vec3::ZERO));
    }

    #[test]
    fn hitbox_has_a_floor_and_highlight_is_hidden() {
        let cfg = OrreryConfig::default();
        let built = build(
            r#"{ "bodies": [ { "id": "earth", "raioKm": 6371, "distanciaMediaAoSol": 150,
                 "luas": [ { "id": "moon", "raioKm": 1737 } ] } ] }"#,
            &cfg,
        );
        let moon = built.registry.by_name("moon").unwrap();
        let hitbox = built.scene.get(moon.hitbox).unwrap();
        assert_eq!(hitbox.kind, NodeKind::Hitbox(built.registry.id_of("moon").unwrap()));
        assert!(!hitbox.visible);
        assert_eq!(hitbox.mesh.as_ref().unwrap().shape, Shape::Sphere { radius: cfg.hitbox_min });
        assert_eq!(built.scene.parent(moon.hitbox), Some(moon.node));

        let highlight = built.scene.get(moon.highlight).unwrap();
        assert!(!highlight.visible);
        assert_eq!(built.scene.parent(moon.highlight), Some(moon.node));
    }

    #[test]
    fn ringed_planet_gets_annulus_bands() {
        let cfg = OrreryConfig::default();
        let built = build(
            r#"{ "bodies": [ { "id": "saturn", "raioKm": 58232, "distanciaMediaAoSol": 1430,
                 "temAneis": true, "axial_tilt_deg": 26.7 } ] }"#,
            &cfg,
        );
        let saturn = built.registry.by_name("saturn").unwrap();
        let group = built
            .scene
            .children(saturn.node)
            .iter()
            .copied()
            .find(|c| built.scene.get(*c).unwrap().kind == NodeKind::Rings)
            .expect("ring group");
        let bands = built.scene.children(group);
        assert_eq!(bands.len(), 3);
        for band in bands {
            match built.scene.get(*band).unwrap().mesh.as_ref().unwrap().shape {
                Shape::Annulus { inner, outer } => assert!(inner > saturn.visual_radius && outer > inner),
                other => panic!("unexpected ring shape {other:?}"),
            }
        }
    }

    #[test]
    fn probe_is_a_compound_body() {
        let cfg = OrreryConfig::default();
        let built = build(r#"{ "bodies": [ { "id": "voyager", "kind": "probe", "distance": 500 } ] }"#, &cfg);
        let probe = built.registry.by_name("voyager").unwrap();
        let id = built.registry.id_of("voyager").unwrap();
        let body = built.scene.get(probe.node).unwrap();
        assert!(body.mesh.is_none());

        let parts = built
            .scene
            .children(probe.node)
            .iter()
            .filter(|c| built.scene.get(**c).unwrap().kind == NodeKind::Part(id))
            .count();
        assert_eq!(parts, 4);
        let hitbox = built.scene.get(probe.hitbox).unwrap().mesh.as_ref().unwrap().shape;
        assert_eq!(hitbox, Shape::Sphere { radius: probe.visual_radius * PROBE_SPAN * cfg.hitbox_scale });
    }

    #[test]
    fn textures_are_requested_once_per_mesh() {
        let cfg = OrreryConfig::default();
        let built = build(
            r#"{ "bodies": [ { "id": "earth", "distance": 150, "textura": "earth.jpg",
                 "luas": [ { "id": "moon", "textura": "moon.jpg" }, { "id": "bare" } ] } ] }"#,
            &cfg,
        );
        let paths: Vec<&str> = built.textures.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, ["earth.jpg", "moon.jpg"]);
        let earth = built.registry.by_name("earth").unwrap();
        assert_eq!(built.textures[0].node, earth.node);
        // Textured meshes keep a solid placeholder color.
        let mesh = built.scene.get(earth.node).unwrap().mesh.as_ref().unwrap();
        assert_eq!(mesh.color, Rgb::WHITE);
    }

    #[test]
    fn comets_are_registered_bodies() {
        let cfg = OrreryConfig::default();
        let built = build(r#"{ "comets": [ { "id": "halley", "perihelion": 100, "aphelion": 7000 } ] }"#, &cfg);
        let halley = built.registry.by_name("halley").unwrap();
        assert_eq!(halley.kind, BodyKind::Comet);
        assert_eq!(built.comets.len(), 1);
        let pos = built.scene.world_position(halley.node).unwrap();
        assert!((pos - built.comets[0].position).length() < 1e-3);
        assert!((pos.length() - 100.0).abs() < 0.1);
    }

    #[test]
    fn belt_and_starfield_are_attached() {
        let cfg = OrreryConfig { starfield_count: 10, ..OrreryConfig::default() };
        let built = build("{}", &cfg);
        assert_eq!(built.belt.cloud.len(), cfg.belt_count);
        assert_eq!(built.starfield.cloud.len(), 10);
        assert_eq!(built.scene.get(built.belt.node).unwrap().kind, NodeKind::Belt);
        assert_eq!(built.scene.get(built.starfield.node).unwrap().kind, NodeKind::Starfield);
    }

    #[test]
    fn orbit_paths_follow_the_orbit_radius() {
        let cfg = OrreryConfig::default();
        let built = build(r#"{ "bodies": [ { "id": "venus", "distance": 108 } ] }"#, &cfg);
        let path = &built.orbit_paths[0];
        assert_eq!(path.points.len(), ORBIT_SEGMENTS + 1);
        assert!(path.points.iter().all(|p| (p.length() - 216.0).abs() < 1e-2));
    }
}
