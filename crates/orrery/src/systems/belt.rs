//! Static point clouds: the asteroid belt and the background starfield.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::config::OrreryConfig;
use crate::components::mesh::Rgb;
use crate::systems::effects::Rng;

/// Bounding volume declared for a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn contains(&self, p: Vec3) -> bool {
        p.distance(self.center) <= self.radius
    }
}

/// Immutable point cloud sharing one color and point size.
///
/// `bounds` is set from the generator parameters at creation and never
/// recomputed from the points.
#[derive(Debug, Clone)]
pub struct PointCloud {
    pub points: Vec<Vec3>,
    pub color: Rgb,
    pub size: f32,
    pub bounds: BoundingSphere,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as a flat `[x, y, z, x, y, z, ...]` slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }
}

/// Scatter `belt_count` points in the annulus `[inner, inner + width]` on the
/// XZ plane with a small vertical jitter.
pub fn asteroid_belt(cfg: &OrreryConfig, rng: &mut Rng) -> PointCloud {
    let inner = cfg.belt_inner_radius.max(0.0);
    let outer = inner + cfg.belt_width.max(0.0);
    let half_jitter = cfg.belt_jitter.max(0.0) * 0.5;

    let points = (0..cfg.belt_count)
        .map(|_| {
            let angle = rng.next_f32() * TAU;
            let radius = rng.range(inner, outer);
            let y = rng.range(-half_jitter, half_jitter);
            Vec3::new(radius * angle.cos(), y, radius * angle.sin())
        })
        .collect();

    PointCloud {
        points,
        color: cfg.belt_color,
        size: 1.2,
        bounds: BoundingSphere {
            center: Vec3::ZERO,
            radius: (outer * outer + half_jitter * half_jitter).sqrt(),
        },
    }
}

/// Background stars, uniformly distributed over directions, at distances in
/// `[starfield_radius, 2 * starfield_radius]`.
pub fn starfield(cfg: &OrreryConfig, rng: &mut Rng) -> PointCloud {
    let r_min = cfg.starfield_radius.max(0.0);
    let r_max = r_min * 2.0;

    let points = (0..cfg.starfield_count)
        .map(|_| {
            let z = rng.signed();
            let phi = rng.next_f32() * TAU;
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let dir = Vec3::new(ring * phi.cos(), z, ring * phi.sin());
            dir * rng.range(r_min, r_max)
        })
        .collect();

    PointCloud {
        points,
        color: Rgb::WHITE,
        size: 2.0,
        bounds: BoundingSphere {
            center: Vec3::ZERO,
            radius: r_max,
        },
    }
}
