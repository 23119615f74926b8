//! Planetary ring systems: band presets and descriptor types.

use serde::Deserialize;

use crate::components::mesh::{ColorValue, Rgb};

/// Named band configuration. Presets differ only in band count, width and opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingPreset {
    /// Broad, opaque bands (Saturn-like).
    #[default]
    Bright,
    /// Narrow, dim bands (Uranus-like).
    Dark,
    /// A single wide, nearly transparent band (Jupiter/Neptune-like).
    Faint,
}

/// One concentric band. Radii are ratios of the body's visual radius.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RingBand {
    pub inner: f32,
    pub outer: f32,
    #[serde(default)]
    pub color: Option<ColorValue>,
    #[serde(default = "default_band_opacity")]
    pub opacity: f32,
}

fn default_band_opacity() -> f32 {
    0.6
}

/// Ring system attached to a planet.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RingSpec {
    #[serde(default, rename = "type", alias = "preset")]
    pub preset: RingPreset,
    /// Explicit bands; when absent the preset's bands are used.
    #[serde(default)]
    pub bands: Option<Vec<RingBand>>,
}

/// A band resolved to concrete values, ready for mesh construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBand {
    pub inner: f32,
    pub outer: f32,
    pub color: Rgb,
    pub opacity: f32,
}

const BRIGHT_COLOR: Rgb = Rgb::new(0.85, 0.78, 0.62);
const DARK_COLOR: Rgb = Rgb::new(0.45, 0.47, 0.5);
const FAINT_COLOR: Rgb = Rgb::new(0.7, 0.68, 0.65);

impl RingPreset {
    pub fn bands(self) -> Vec<ResolvedBand> {
        let band = |inner, outer, color, opacity| ResolvedBand { inner, outer, color, opacity };
        match self {
            RingPreset::Bright => vec![
                band(1.24, 1.52, BRIGHT_COLOR, 0.45),
                band(1.53, 1.95, BRIGHT_COLOR, 0.85),
                band(2.03, 2.27, BRIGHT_COLOR, 0.6),
            ],
            RingPreset::Dark => vec![
                band(1.6, 1.66, DARK_COLOR, 0.35),
                band(1.9, 1.98, DARK_COLOR, 0.4),
            ],
            RingPreset::Faint => vec![band(1.4, 2.2, FAINT_COLOR, 0.12)],
        }
    }
}

impl RingSpec {
    pub fn from_preset(preset: RingPreset) -> Self {
        Self { preset, bands: None }
    }

    /// Resolve explicit bands (falling back to the preset color per band) or the preset.
    ///
    /// Bands with non-positive width or non-finite radii are dropped.
    pub fn resolve(&self) -> Vec<ResolvedBand> {
        let Some(bands) = &self.bands else {
            return self.preset.bands();
        };
        let preset_color = self.preset.bands()[0].color;
        bands
            .iter()
            .filter(|b| b.inner.is_finite() && b.outer.is_finite() && b.inner > 0.0 && b.outer > b.inner)
            .map(|b| ResolvedBand {
                inner: b.inner,
                outer: b.outer,
                color: b.color.as_ref().and_then(ColorValue::to_rgb).unwrap_or(preset_color),
                opacity: b.opacity.clamp(0.0, 1.0),
            })
            .collect()
    }
}
