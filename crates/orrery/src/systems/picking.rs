//! Ray picking against the scene graph.

use glam::Vec3;

use crate::api::types::{BodyId, NodeId};
use crate::components::mesh::Shape;
use crate::core::scene::{NodeKind, SceneGraph, SceneNode};
use crate::renderer::camera::Ray;

/// Nearest body under a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub body: BodyId,
    /// Node actually hit (body mesh, part, or hitbox).
    pub node: NodeId,
    /// Distance along the ray, in world units.
    pub distance: f32,
}

/// Intersect `ray` with every pickable node and return the body under it.
///
/// Pickable nodes are sphere or cuboid meshes owned by a body. Visible
/// geometry (body meshes and compound parts) wins by depth. When the ray
/// only crosses hitboxes, the body whose centre lies closest to the ray
/// wins, since a planet's hitbox may enclose its inner moons. Highlight
/// shells, rings and point clouds never count.
pub fn pick(scene: &SceneGraph, ray: &Ray) -> Option<Pick> {
    let mut solid: Option<Pick> = None;
    let mut loose: Option<(f32, Pick)> = None;
    for (id, node) in scene.iter() {
        let Some(body) = pickable_owner(node) else {
            continue;
        };
        let Some(distance) = intersect_node(node, ray) else {
            continue;
        };
        let hit = Pick { body, node: id, distance };
        if matches!(node.kind, NodeKind::Hitbox(_)) {
            let miss = miss_distance(ray, node.world_position());
            let closer = loose.map_or(true, |(m, b)| miss < m || (miss == m && distance < b.distance));
            if closer {
                loose = Some((miss, hit));
            }
        } else if solid.map_or(true, |b| distance < b.distance) {
            solid = Some(hit);
        }
    }
    solid.or(loose.map(|(_, hit)| hit))
}

/// Perpendicular distance from `point` to the ray's line.
fn miss_distance(ray: &Ray, point: Vec3) -> f32 {
    let to_point = point - ray.origin;
    (to_point - ray.dir * to_point.dot(ray.dir)).length()
}

fn pickable_owner(node: &SceneNode) -> Option<BodyId> {
    let pickable = match node.kind {
        NodeKind::Hitbox(_) => true,
        NodeKind::Body(_) | NodeKind::Part(_) => node.visible,
        _ => false,
    };
    if !pickable {
        return None;
    }
    match node.mesh.as_ref()?.shape {
        Shape::Sphere { .. } | Shape::Cuboid { .. } => node.kind.owner(),
        Shape::Annulus { .. } | Shape::Points => None,
    }
}

/// Hit distance in world units, tested in the node's local frame.
fn intersect_node(node: &SceneNode, ray: &Ray) -> Option<f32> {
    let inv = node.world.inverse();
    let origin = inv.transform_point3(ray.origin);
    // Not renormalized: `t` stays in world units.
    let dir = inv.transform_vector3(ray.dir);
    if !origin.is_finite() || !dir.is_finite() {
        return None;
    }
    match node.mesh.as_ref()?.shape {
        Shape::Sphere { radius } => ray_sphere(origin, dir, radius),
        Shape::Cuboid { half_extents } => ray_box(origin, dir, half_extents),
        _ => None,
    }
}

/// Ray against an origin-centered sphere. A ray starting inside hits the far side.
pub fn ray_sphere(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    let a = dir.dot(dir);
    if a <= 0.0 {
        return None;
    }
    let b = origin.dot(dir);
    let c = origin.dot(origin) - radius * radius;
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t1 = (-b - sq) / a;
    let t2 = (-b + sq) / a;
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Ray against an origin-centered axis-aligned box (slab method).
pub fn ray_box(origin: Vec3, dir: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, h) = (origin[axis], dir[axis], half_extents[axis]);
        if d.abs() < 1e-12 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t0 = (-h - o) / d;
        let t1 = (h - o) / d;
        t_min = t_min.max(t0.min(t1));
        t_max = t_max.min(t0.max(t1));
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        None
    } else {
        Some(t_min.max(0.0))
    }
}
