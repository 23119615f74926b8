//! Comet tail particles: parallel position/color/size arrays driven by a
//! position history.

use glam::Vec3;

use super::history::HistoryBuffer;
use super::rng::Rng;
use crate::components::mesh::Rgb;

/// How far older particles bend away from the path toward the anti-solar direction.
pub const RADIAL_BLEND: f32 = 0.6;

/// Per-frame inputs for a trail rebuild.
#[derive(Debug, Clone, Copy)]
pub struct TrailParams {
    /// Current head position (world space).
    pub head: Vec3,
    /// Unit vector from the star to the head.
    pub dir_from_sun: Vec3,
    /// Distance-dependent visual scale.
    pub scale: f32,
    pub tail_length: f32,
    pub jitter: f32,
    pub size: f32,
    pub color: Rgb,
}

/// Trail particle arrays, one entry per history sample.
#[derive(Debug, Clone)]
pub struct TrailParticles {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Rgb>,
    pub sizes: Vec<f32>,
}

impl TrailParticles {
    pub fn new(count: usize, start: Vec3) -> Self {
        Self {
            positions: vec![start; count],
            colors: vec![Rgb::new(0.0, 0.0, 0.0); count],
            sizes: vec![0.0; count],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Recompute every particle from the history.
    ///
    /// Particle `i` sits at normalized trail position `t = i / (n - 1)`. It is
    /// a blend of the historical path sample and a point pushed straight out
    /// from the star, weighted `t * RADIAL_BLEND` toward the latter, plus
    /// jitter growing with `t`. Non-finite results are written as zero.
    pub fn update(&mut self, history: &HistoryBuffer, params: &TrailParams, rng: &mut Rng) {
        let n = self.positions.len();
        let denom = n.saturating_sub(1).max(1) as f32;
        for i in 0..n {
            let t = i as f32 / denom;
            let path = history.get(i);
            let radial = params.head + params.dir_from_sun * (t * params.tail_length * params.scale);
            let jitter = Vec3::new(rng.signed(), rng.signed(), rng.signed()) * (params.jitter * t);
            let p = path.lerp(radial, t * RADIAL_BLEND) + jitter;

            self.positions[i] = finite_or_zero(p);
            self.colors[i] = params.color.scaled(1.0 - t);
            let size = params.size * (1.0 - t) * params.scale;
            self.sizes[i] = if size.is_finite() { size } else { 0.0 };
        }
    }
}

/// Replace each non-finite component with zero.
pub fn finite_or_zero(v: Vec3) -> Vec3 {
    let fix = |c: f32| if c.is_finite() { c } else { 0.0 };
    Vec3::new(fix(v.x), fix(v.y), fix(v.z))
}
