//! Particle-style effects: comet history buffers and trails.

mod history;
mod rng;
mod trail;

pub use history::HistoryBuffer;
pub use rng::Rng;
pub use trail::{finite_or_zero, TrailParams, TrailParticles, RADIAL_BLEND};
