use std::f32::consts::TAU;

use crate::api::config::OrreryConfig;
use crate::systems::builder::BuiltScene;

/// Largest accepted simulation speed multiplier.
pub const MAX_TIME_SCALE: f32 = 1000.0;

/// Per-frame driver: revolution, belt rotation, comets, spin.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    pub paused: bool,
    time_scale: f32,
    /// Simulated seconds since construction (after time scaling).
    pub elapsed: f64,
    pub frames: u64,
}

impl AnimationDriver {
    pub fn new(cfg: &OrreryConfig) -> Self {
        let mut driver = Self {
            paused: false,
            time_scale: 1.0,
            elapsed: 0.0,
            frames: 0,
        };
        driver.set_time_scale(cfg.time_scale);
        driver
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the speed multiplier. Negative or non-finite values are ignored.
    pub fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale >= 0.0 {
            self.time_scale = scale.min(MAX_TIME_SCALE);
        } else {
            log::warn!("ignoring time scale {}", scale);
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Advance the scene by `dt` seconds and propagate world transforms.
    /// Returns false when nothing moved (paused or unusable `dt`).
    pub fn step(&mut self, dt: f32, cfg: &OrreryConfig, world: &mut BuiltScene) -> bool {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        let dt = dt * self.time_scale;
        let BuiltScene {
            scene,
            registry,
            comets,
            belt,
            rng,
            ..
        } = world;

        for (_, body) in registry.iter() {
            let Some(pivot) = body.pivot else { continue };
            if let Some(local) = scene.local_mut(pivot) {
                local.yaw = turn(local.yaw, body.orbit_speed * dt * cfg.rotation_rate);
            }
        }

        if let Some(local) = scene.local_mut(belt.node) {
            local.yaw = turn(local.yaw, cfg.belt_speed * dt);
        }

        for comet in comets.iter_mut() {
            let position = comet.advance(dt, cfg, rng);
            if let Some(local) = scene.local_mut(comet.node) {
                local.offset = position;
            }
        }

        for (_, body) in registry.iter() {
            if let Some(local) = scene.local_mut(body.node) {
                local.yaw = turn(local.yaw, cfg.spin_speed * dt);
            }
        }

        scene.propagate();
        self.elapsed += dt as f64;
        self.frames += 1;
        true
    }
}

/// Add `by` to an angle, wrapped into [0, TAU).
fn turn(yaw: f32, by: f32) -> f32 {
    (yaw + by).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::Catalog;
    use crate::systems::builder::SceneBuilder;

    fn world(cfg: &OrreryConfig) -> BuiltScene {
        let catalog = Catalog::from_json(
            r#"{ "bodies": [
                { "id": "sun", "distance": 0 },
                { "id": "earth", "distance": 150, "luas": [ { "id": "moon" } ] }
            ], "comets": [ { "id": "halley", "perihelion": 100, "aphelion": 7000 } ] }"#,
        )
        .unwrap();
        SceneBuilder::build(&catalog, cfg)
    }

    #[test]
    fn paused_driver_changes_nothing() {
        let cfg = OrreryConfig::default();
        let mut w = world(&cfg);
        let mut driver = AnimationDriver::new(&cfg);
        assert!(driver.toggle_pause());

        let earth = w.registry.by_name("earth").unwrap().node;
        let before = w.scene.world_position(earth);
        assert!(!driver.step(0.5, &cfg, &mut w));
        assert_eq!(w.scene.world_position(earth), before);
        assert_eq!(driver.frames, 0);
    }

    #[test]
    fn bad_dt_is_ignored() {
        let cfg = OrreryConfig::default();
        let mut w = world(&cfg);
        let mut driver = AnimationDriver::new(&cfg);
        assert!(!driver.step(f32::NAN, &cfg, &mut w));
        assert!(!driver.step(-1.0, &cfg, &mut w));
        assert!(driver.step(0.016, &cfg, &mut w));
    }

    #[test]
    fn time_scale_multiplies_the_step() {
        let cfg = OrreryConfig::default();
        let mut slow = world(&cfg);
        let mut fast = world(&cfg);
        let mut d1 = AnimationDriver::new(&cfg);
        let mut d2 = AnimationDriver::new(&cfg);
        d2.set_time_scale(3.0);
        d2.set_time_scale(-2.0);
        assert_eq!(d2.time_scale(), 3.0);

        d1.step(0.3, &cfg, &mut slow);
        d2.step(0.1, &cfg, &mut fast);

        let pivot = slow.registry.by_name("earth").unwrap().pivot.unwrap();
        let a = slow.scene.get(pivot).unwrap().local.yaw;
        let b = fast.scene.get(pivot).unwrap().local.yaw;
        let diff = (a - b).rem_euclid(TAU);
        assert!(diff < 1e-5 || TAU - diff < 1e-5);
    }

    #[test]
    fn belt_spin_and_comet_move() {
        let cfg = OrreryConfig::default();
        let mut w = world(&cfg);
        let mut driver = AnimationDriver::new(&cfg);
        let halley = w.registry.by_name("halley").unwrap().node;
        let sun = w.registry.by_name("sun").unwrap().node;
        let comet_before = w.scene.world_position(halley).unwrap();

        driver.step(1.0, &cfg, &mut w);

        assert!((w.scene.get(w.belt.node).unwrap().local.yaw - cfg.belt_speed).abs() < 1e-6);
        assert!((w.scene.get(sun).unwrap().local.yaw - cfg.spin_speed).abs() < 1e-6);
        let comet_after = w.scene.world_position(halley).unwrap();
        assert_ne!(comet_before, comet_after);
        assert_eq!(comet_after, w.comets[0].position);
    }

    #[test]
    fn angles_stay_wrapped_at_top_speed() {
        let cfg = OrreryConfig::default();
        let mut w = world(&cfg);
        let mut driver = AnimationDriver::new(&cfg);
        driver.set_time_scale(MAX_TIME_SCALE);
        for _ in 0..600 {
            driver.step(1.0 / 60.0, &cfg, &mut w);
        }
        for (_, body) in w.registry.iter() {
            for node in [Some(body.node), body.pivot].into_iter().flatten() {
                let yaw = w.scene.get(node).unwrap().local.yaw;
                assert!((0.0..TAU).contains(&yaw), "{} yaw {}", body.name, yaw);
            }
        }
        let belt = w.scene.get(w.belt.node).unwrap().local.yaw;
        assert!((0.0..TAU).contains(&belt));
    }

    #[test]
    fn turn_wraps_both_ways() {
        assert!((turn(TAU - 0.1, 0.3) - 0.2).abs() < 1e-5);
        assert!((turn(0.1, -0.3) - (TAU - 0.2)).abs() < 1e-5);
        assert_eq!(turn(1.0, 0.5), 1.5);
    }
}
