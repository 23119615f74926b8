use serde::Deserialize;

use crate::api::config::OrreryConfig;
use crate::components::body::DescriptorKind;
use crate::components::mesh::ColorValue;
use crate::components::ring::RingSpec;

/// Static body data the scene is built from.
/// Loaded from JSON supplied by the host page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Bodies in construction order. Every non-star body orbits the root frame.
    #[serde(default)]
    pub bodies: Vec<BodyDescriptor>,
    #[serde(default)]
    pub comets: Vec<CometDescriptor>,
    /// Optional overrides for scene tuning constants.
    #[serde(default)]
    pub config: Option<OrreryConfig>,
}

/// One body as described by the data layer. Every field except `id` may be
/// missing or malformed; construction substitutes defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BodyDescriptor {
    pub id: String,
    #[serde(default, alias = "raioKm")]
    pub radius_km: Option<f32>,
    /// Mean distance from the parent, in catalog units (scaled by `distance_scale`).
    #[serde(default, alias = "distanciaMediaAoSol")]
    pub distance: Option<f32>,
    #[serde(default, alias = "cor")]
    pub color: Option<ColorValue>,
    #[serde(default, alias = "textura")]
    pub texture: Option<String>,
    #[serde(default)]
    pub kind: Option<DescriptorKind>,
    #[serde(default, alias = "temAneis")]
    pub has_rings: bool,
    #[serde(default, alias = "ehPlanetoAnao")]
    pub dwarf: bool,
    #[serde(default, alias = "aneis")]
    pub rings: Option<RingSpec>,
    /// Equatorial tilt of the body (degrees); rings share this plane.
    #[serde(default)]
    pub axial_tilt_deg: Option<f32>,
    /// Fixed tilt of the orbital plane (degrees).
    #[serde(default)]
    pub inclination_deg: Option<f32>,
    #[serde(default, alias = "luas")]
    pub moons: Vec<MoonDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoonDescriptor {
    pub id: String,
    #[serde(default, alias = "raioKm")]
    pub radius_km: Option<f32>,
    #[serde(default, alias = "cor")]
    pub color: Option<ColorValue>,
    #[serde(default, alias = "textura")]
    pub texture: Option<String>,
}

/// A comet on a bound, eccentric orbit around the root star.
#[derive(Debug, Clone, Deserialize)]
pub struct CometDescriptor {
    pub id: String,
    /// Closest approach to the star (scene units).
    pub perihelion: f32,
    /// Farthest distance from the star (scene units).
    pub aphelion: f32,
    #[serde(default)]
    pub inclination_deg: f32,
    /// Angular speed at the semi-major-axis distance (radians per second).
    #[serde(default = "default_comet_speed")]
    pub speed: f32,
    /// Starting orbital angle (radians, 0 = perihelion).
    #[serde(default)]
    pub phase: f32,
    #[serde(default, alias = "cor")]
    pub color: Option<ColorValue>,
    #[serde(default, alias = "raioKm")]
    pub radius_km: Option<f32>,
}

fn default_comet_speed() -> f32 {
    0.02
}

impl Catalog {
    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
