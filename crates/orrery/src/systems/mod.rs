pub mod animation;
pub mod belt;
pub mod builder;
pub mod comet;
pub mod effects;
pub mod picking;
pub mod render;
