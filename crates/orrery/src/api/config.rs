use serde::Deserialize;

use crate::components::mesh::Rgb;

/// Tuning constants for scene construction and animation.
///
/// Every field has a default; a catalog may override any subset through its
/// optional `"config"` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Multiplier from catalog distance units to scene units.
    pub distance_scale: f32,
    /// Kilometres represented by one scene unit when sizing bodies.
    pub km_per_unit: f32,
    /// Visual radius used for the central star instead of its true size.
    pub star_radius: f32,
    /// Radius used when a descriptor carries no usable `radius_km`.
    pub fallback_radius: f32,
    /// Catalog distance used when a non-star descriptor carries none.
    pub fallback_distance: f32,
    /// Color used when a descriptor carries no color.
    pub fallback_color: Rgb,

    /// Orbit speed numerator: `speed = orbit_speed_factor / scene_distance`.
    pub orbit_speed_factor: f32,
    /// Global rate constant applied to every pivot's yaw step.
    pub rotation_rate: f32,
    /// Self-rotation applied to every body per second.
    pub spin_speed: f32,
    /// Simulation speed multiplier (1.0 = real-time pacing).
    pub time_scale: f32,

    /// Hitbox radius as a multiple of the visual radius.
    pub hitbox_scale: f32,
    /// Minimum hitbox radius, regardless of visual size.
    pub hitbox_min: f32,
    /// Highlight shell radius as a multiple of the visual radius.
    pub highlight_scale: f32,

    /// Angular speed of the innermost moon.
    pub moon_base_speed: f32,
    /// Constant gap added to moon base distance and spacing.
    pub moon_gap: f32,
    /// Largest one-time orbital-plane tilt for moons (radians).
    pub moon_max_tilt: f32,

    /// Number of asteroid belt points.
    pub belt_count: usize,
    /// Inner radius of the belt annulus (scene units).
    pub belt_inner_radius: f32,
    /// Radial width of the belt annulus (scene units).
    pub belt_width: f32,
    /// Total vertical spread of belt points (scene units).
    pub belt_jitter: f32,
    /// Belt rigid-body rotation per second (radians).
    pub belt_speed: f32,
    pub belt_color: Rgb,

    /// Number of background stars.
    pub starfield_count: usize,
    /// Inner radius of the starfield shell; stars lie within `[r, 2r]`.
    pub starfield_radius: f32,

    /// History samples kept per comet (also the trail particle count).
    pub trail_length: usize,
    /// Length of a fully radial tail at unit scale (scene units).
    pub tail_length: f32,
    /// Per-particle jitter at the tail end (scene units).
    pub trail_jitter: f32,
    /// Head particle size at unit scale.
    pub trail_size: f32,
    /// Bounds for the distance-dependent trail scale.
    pub trail_scale_min: f32,
    pub trail_scale_max: f32,
    /// Visual radius of a comet nucleus without `radius_km`.
    pub comet_radius: f32,

    /// Seed for procedural generation and trail jitter.
    pub seed: u64,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            distance_scale: 2.0,
            km_per_unit: 6371.0,
            star_radius: 20.0,
            fallback_radius: 1.0,
            fallback_distance: 100.0,
            fallback_color: Rgb::new(0.6, 0.6, 0.6),

            orbit_speed_factor: 50.0,
            rotation_rate: 0.5,
            spin_speed: 0.5,
            time_scale: 1.0,

            hitbox_scale: 1.5,
            hitbox_min: 1.5,
            highlight_scale: 1.15,

            moon_base_speed: 2.0,
            moon_gap: 0.6,
            moon_max_tilt: 0.15,

            belt_count: 2000,
            belt_inner_radius: 660.0,
            belt_width: 300.0,
            belt_jitter: 12.0,
            belt_speed: 0.01,
            belt_color: Rgb::new(0.55, 0.5, 0.45),

            starfield_count: 4000,
            starfield_radius: 20_000.0,

            trail_length: 60,
            tail_length: 120.0,
            trail_jitter: 1.5,
            trail_size: 4.0,
            trail_scale_min: 0.3,
            trail_scale_max: 3.0,
            comet_radius: 0.8,

            seed: 42,
        }
    }
}
