//! Comets on bound conic orbits around the central star, each dragging a
//! particle tail built from its recent positions.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::api::config::OrreryConfig;
use crate::api::types::{BodyId, NodeId};
use crate::assets::catalog::CometDescriptor;
use crate::components::mesh::Rgb;
use crate::systems::effects::{finite_or_zero, HistoryBuffer, Rng, TrailParams, TrailParticles};

/// Denominators of the conic equation below this use `r = a`.
const MIN_DENOMINATOR: f32 = 1e-6;

/// Shape of a bound orbit, derived once from perihelion and aphelion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometOrbit {
    pub perihelion: f32,
    pub aphelion: f32,
    /// Semi-major axis `a = (q + Q) / 2`.
    pub semi_major: f32,
    /// Eccentricity `e = (Q - q) / (Q + q)`, always in `[0, 1)`.
    pub eccentricity: f32,
}

impl CometOrbit {
    /// Build an orbit, repairing input that would not describe a bound ellipse.
    ///
    /// Reversed distances are swapped, a non-positive perihelion is replaced
    /// by a tenth of the aphelion, and unusable values fall back to a unit
    /// circle.
    pub fn new(perihelion: f32, aphelion: f32) -> Self {
        let valid = |d: f32| d.is_finite() && d > 0.0;
        let (mut q, mut big_q) = (perihelion, aphelion);
        if valid(q) && valid(big_q) && q > big_q {
            std::mem::swap(&mut q, &mut big_q);
        }
        if !valid(big_q) {
            big_q = if valid(q) { q } else { 1.0 };
        }
        if !valid(q) || q > big_q {
            q = big_q * 0.1;
        }
        if q != perihelion || big_q != aphelion {
            log::warn!(
                "comet orbit q={} Q={} is not a bound ellipse, using q={} Q={}",
                perihelion,
                aphelion,
                q,
                big_q
            );
        }

        Self {
            perihelion: q,
            aphelion: big_q,
            semi_major: (q + big_q) * 0.5,
            eccentricity: (big_q - q) / (big_q + q),
        }
    }

    /// Distance from the star at orbital angle `angle` (0 = perihelion),
    /// always within `[0.5 q, 2 Q]`.
    pub fn radius_at(&self, angle: f32) -> f32 {
        let a = self.semi_major;
        let e = self.eccentricity;
        let denom = 1.0 + e * angle.cos();
        let r = if denom.abs() < MIN_DENOMINATOR || !denom.is_finite() {
            a
        } else {
            a * (1.0 - e * e) / denom
        };
        let r = if r.is_finite() { r } else { a };
        r.clamp(self.perihelion * 0.5, self.aphelion * 2.0)
    }

    /// Point on the uninclined orbit, in the XZ plane. Angles advance in the
    /// same sense as pivot yaw.
    pub fn point_at(&self, angle: f32) -> Vec3 {
        let r = self.radius_at(angle);
        Vec3::new(r * angle.cos(), 0.0, -r * angle.sin())
    }
}

/// Runtime state of one comet.
#[derive(Debug, Clone)]
pub struct Comet {
    pub body: BodyId,
    /// Scene node whose offset follows the nucleus.
    pub node: NodeId,
    pub orbit: CometOrbit,
    /// Orbital angle accumulator (radians, wrapped to `[0, 2pi)`).
    pub angle: f32,
    /// Angular speed at the semi-major-axis distance.
    pub speed: f32,
    /// Fixed tilt of the orbital plane.
    pub inclination: Quat,
    pub color: Rgb,
    pub history: HistoryBuffer,
    pub trail: TrailParticles,
    pub position: Vec3,
    /// Distance-dependent trail scale as of the last step.
    pub trail_scale: f32,
}

impl Comet {
    pub fn new(body: BodyId, node: NodeId, desc: &CometDescriptor, color: Rgb, cfg: &OrreryConfig) -> Self {
        let orbit = CometOrbit::new(desc.perihelion, desc.aphelion);
        let inclination = Quat::from_rotation_x(finite_or(desc.inclination_deg, 0.0).to_radians());
        let angle = finite_or(desc.phase, 0.0).rem_euclid(TAU);
        let position = inclination * orbit.point_at(angle);
        let samples = cfg.trail_length.max(1);

        let mut comet = Self {
            body,
            node,
            orbit,
            angle,
            speed: finite_or(desc.speed, 0.0),
            inclination,
            color,
            history: HistoryBuffer::new(samples, position),
            trail: TrailParticles::new(samples, position),
            position,
            trail_scale: 1.0,
        };
        comet.trail_scale = comet.scale_for(orbit.radius_at(angle), cfg);
        comet
    }

    /// World position (relative to the star) at orbital angle `angle`.
    pub fn position_at(&self, angle: f32) -> Vec3 {
        self.inclination * self.orbit.point_at(angle)
    }

    /// Current distance from the star.
    pub fn radius(&self) -> f32 {
        self.orbit.radius_at(self.angle)
    }

    fn scale_for(&self, r: f32, cfg: &OrreryConfig) -> f32 {
        let lo = cfg.trail_scale_min.min(cfg.trail_scale_max);
        (self.orbit.semi_major / r).clamp(lo, cfg.trail_scale_max)
    }

    /// Advance the comet by `dt` seconds and rebuild its trail.
    ///
    /// The angular step is `speed * (a / r) * dt` with `r` taken at the
    /// current angle, so the comet sweeps faster near perihelion.
    pub fn advance(&mut self, dt: f32, cfg: &OrreryConfig, rng: &mut Rng) -> Vec3 {
        let r = self.radius();
        let step = self.speed * (self.orbit.semi_major / r) * dt;
        if step.is_finite() {
            self.angle = (self.angle + step).rem_euclid(TAU);
        }

        self.position = finite_or_zero(self.position_at(self.angle));
        self.history.push(self.position);

        let r = self.radius();
        self.trail_scale = self.scale_for(r, cfg);
        let params = TrailParams {
            head: self.position,
            dir_from_sun: self.position.normalize_or_zero(),
            scale: self.trail_scale,
            tail_length: cfg.tail_length,
            jitter: cfg.trail_jitter,
            size: cfg.trail_size,
            color: self.color,
        };
        self.trail.update(&self.history, &params, rng);
        self.position
    }

    /// Closed polyline of the full orbit, for line rendering.
    pub fn orbit_path(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| self.position_at(i as f32 / segments as f32 * TAU))
            .collect()
    }
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(q: f32, big_q: f32) -> CometDescriptor {
        CometDescriptor {
            id: "halley".into(),
            perihelion: q,
            aphelion: big_q,
            inclination_deg: 0.0,
            speed: 0.02,
            phase: 0.0,
            color: None,
            radius_km: None,
        }
    }

    fn comet(q: f32, big_q: f32) -> Comet {
        Comet::new(BodyId(0), NodeId(1), &descriptor(q, big_q), Rgb::WHITE, &OrreryConfig::default())
    }

    #[test]
    fn semi_major_axis_and_eccentricity() {
        let orbit = CometOrbit::new(100.0, 7000.0);
        assert_eq!(orbit.semi_major, 3550.0);
        assert!((orbit.eccentricity - 0.971).abs() < 1e-3, "e = {}", orbit.eccentricity);
        assert!((orbit.radius_at(0.0) - 100.0).abs() < 0.05, "r(0) = {}", orbit.radius_at(0.0));
        assert!((orbit.radius_at(std::f32::consts::PI) - 7000.0).abs() < 1.0);
    }

    #[test]
    fn eccentricity_stays_bound() {
        for (q, big_q) in [(1.0, 2.0), (10.0, 10.0), (0.5, 90_000.0), (300.0, 301.0)] {
            let e = CometOrbit::new(q, big_q).eccentricity;
            assert!((0.0..1.0).contains(&e), "e = {e} for q={q} Q={big_q}");
        }
    }

    #[test]
    fn invalid_input_is_repaired() {
        let swapped = CometOrbit::new(7000.0, 100.0);
        assert_eq!((swapped.perihelion, swapped.aphelion), (100.0, 7000.0));

        let zero_q = CometOrbit::new(0.0, 500.0);
        assert!(zero_q.perihelion > 0.0);
        assert!(zero_q.eccentricity < 1.0);

        let garbage = CometOrbit::new(f32::NAN, -3.0);
        assert!(garbage.perihelion > 0.0 && garbage.aphelion >= garbage.perihelion);
        assert!(garbage.radius_at(1.0).is_finite());
    }

    #[test]
    fn radius_is_clamped_at_every_angle() {
        let orbit = CometOrbit::new(100.0, 7000.0);
        for i in 0..=720 {
            let angle = i as f32 / 720.0 * TAU;
            let r = orbit.radius_at(angle);
            assert!(r >= 50.0 && r <= 14_000.0, "r({angle}) = {r}");
        }
    }

    #[test]
    fn moves_faster_near_perihelion() {
        let cfg = OrreryConfig::default();
        let mut rng = Rng::new(1);

        let mut near = comet(100.0, 7000.0);
        let before = near.angle;
        near.advance(0.016, &cfg, &mut rng);
        let near_step = near.angle - before;

        let mut far = comet(100.0, 7000.0);
        far.angle = std::f32::consts::PI;
        far.advance(0.016, &cfg, &mut rng);
        let far_step = far.angle - std::f32::consts::PI;

        assert!(near_step > far_step * 10.0, "near {near_step} far {far_step}");
    }

    #[test]
    fn advance_pushes_history_and_rebuilds_trail() {
        let cfg = OrreryConfig::default();
        let mut rng = Rng::new(3);
        let mut c = comet(100.0, 7000.0);
        let start = c.position;

        let pos = c.advance(0.5, &cfg, &mut rng);
        assert_eq!(c.history.newest(), pos);
        assert_eq!(c.history.get(1), start);
        assert_eq!(c.trail.positions[0], pos);
        assert_eq!(c.trail.len(), cfg.trail_length);
        assert!(c.trail.positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn trail_scale_grows_near_the_star() {
        let cfg = OrreryConfig::default();
        let near = comet(100.0, 7000.0);
        let mut far = comet(100.0, 7000.0);
        far.angle = std::f32::consts::PI;
        far.advance(0.0, &cfg, &mut Rng::new(1));

        assert!(near.trail_scale > far.trail_scale);
        assert!(near.trail_scale <= cfg.trail_scale_max);
        assert!(far.trail_scale >= cfg.trail_scale_min);
    }

    #[test]
    fn inclination_tilts_the_orbit_plane() {
        let desc = CometDescriptor { inclination_deg: 90.0, phase: 1.0, ..descriptor(100.0, 200.0) };
        let c = Comet::new(BodyId(0), NodeId(1), &desc, Rgb::WHITE, &OrreryConfig::default());
        // Rotating the XZ plane 90 degrees about X moves -Z onto +Y.
        assert!(c.position.y > 0.0);
        assert!(c.position.z.abs() < 1e-3);
    }

    #[test]
    fn orbit_path_is_closed() {
        let c = comet(100.0, 700.0);
        let path = c.orbit_path(64);
        assert_eq!(path.len(), 65);
        assert!((path[0] - path[64]).length() < 1e-2);
    }
}
