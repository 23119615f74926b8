use glam::Vec3;
use serde::Deserialize;

/// Linear RGB color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ColorValue")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` integer.
    pub fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as f32 / 255.0,
            g: ((packed >> 8) & 0xff) as f32 / 255.0,
            b: (packed & 0xff) as f32 / 255.0,
        }
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Color as written in catalog data: `"#rrggbb"`, `0xRRGGBB` or `[r, g, b]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hex(String),
    Packed(u32),
    Triple([f32; 3]),
}

impl ColorValue {
    /// Resolve to an [`Rgb`], or `None` if the value is malformed.
    pub fn to_rgb(&self) -> Option<Rgb> {
        match self {
            ColorValue::Hex(s) => {
                let digits = s
                    .strip_prefix('#')
                    .or_else(|| s.strip_prefix("0x"))
                    .unwrap_or(s);
                if digits.len() != 6 {
                    return None;
                }
                u32::from_str_radix(digits, 16).ok().map(Rgb::from_packed)
            }
            ColorValue::Packed(p) if *p <= 0xff_ffff => Some(Rgb::from_packed(*p)),
            ColorValue::Packed(_) => None,
            ColorValue::Triple([r, g, b]) => {
                let valid = |c: f32| c.is_finite() && (0.0..=1.0).contains(&c);
                (valid(*r) && valid(*g) && valid(*b)).then(|| Rgb::new(*r, *g, *b))
            }
        }
    }
}

impl TryFrom<ColorValue> for Rgb {
    type Error = String;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        value
            .to_rgb()
            .ok_or_else(|| format!("invalid color value: {value:?}"))
    }
}

/// Geometry primitive attached to a scene node, in the node's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Flat ring in the local XZ plane.
    Annulus { inner: f32, outer: f32 },
    Cuboid { half_extents: Vec3 },
    /// Point cloud; the points themselves live in a [`crate::systems::belt::PointCloud`].
    Points,
}

impl Shape {
    /// Shape code written into render instances.
    pub fn code(&self) -> f32 {
        match self {
            Shape::Sphere { .. } => 0.0,
            Shape::Annulus { .. } => 1.0,
            Shape::Cuboid { .. } => 2.0,
            Shape::Points => 3.0,
        }
    }

    /// Up to three shape parameters for render instances.
    pub fn params(&self) -> [f32; 3] {
        match *self {
            Shape::Sphere { radius } => [radius, 0.0, 0.0],
            Shape::Annulus { inner, outer } => [inner, outer, 0.0],
            Shape::Cuboid { half_extents } => half_extents.to_array(),
            Shape::Points => [0.0; 3],
        }
    }
}

/// Renderable surface of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    /// Solid color; also the placeholder while a texture is loading.
    pub color: Rgb,
    pub opacity: f32,
    /// Glow multiplier (stars, comet heads).
    pub emissive: f32,
    /// Texture requested for this mesh, if any.
    pub texture: Option<String>,
}

impl MeshComponent {
    pub fn new(shape: Shape, color: Rgb) -> Self {
        Self {
            shape,
            color,
            opacity: 1.0,
            emissive: 0.0,
            texture: None,
        }
    }

    pub fn sphere(radius: f32, color: Rgb) -> Self {
        Self::new(Shape::Sphere { radius }, color)
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_texture(mut self, texture: Option<String>) -> Self {
        self.texture = texture;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_packed_agree() {
        let hex = ColorValue::Hex("#3366ff".into()).to_rgb().unwrap();
        let packed = ColorValue::Packed(0x3366ff).to_rgb().unwrap();
        assert_eq!(hex, packed);
        assert_eq!(hex.b, 1.0);
    }

    #[test]
    fn malformed_colors_resolve_to_none() {
        assert!(ColorValue::Hex("#12345".into()).to_rgb().is_none());
        assert!(ColorValue::Hex("blue".into()).to_rgb().is_none());
        assert!(ColorValue::Packed(0x1_000_000).to_rgb().is_none());
        assert!(ColorValue::Triple([0.5, 2.0, 0.0]).to_rgb().is_none());
    }

    #[test]
    fn untagged_deserialize() {
        let v: Vec<ColorValue> = serde_json::from_str(r##"["#ffffff", 255, [0.1, 0.2, 0.3]]"##).unwrap();
        assert_eq!(v[0].to_rgb(), Some(Rgb::WHITE));
        assert_eq!(v[1].to_rgb(), Some(Rgb::new(0.0, 0.0, 1.0)));
        assert_eq!(v[2].to_rgb(), Some(Rgb::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn builder_pattern() {
        let m = MeshComponent::sphere(2.0, Rgb::WHITE)
            .with_opacity(0.5)
            .with_emissive(3.0)
            .with_texture(Some("earth.jpg".into()));
        assert_eq!(m.shape, Shape::Sphere { radius: 2.0 });
        assert_eq!(m.opacity, 0.5);
        assert_eq!(m.emissive, 3.0);
        assert_eq!(m.texture.as_deref(), Some("earth.jpg"));
    }
}
