use serde::Deserialize;

use crate::assets::catalog::BodyDescriptor;
use crate::components::ring::{RingPreset, RingSpec};

/// Explicit kind tag a descriptor may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    Star,
    Planet,
    #[serde(alias = "dwarf_planet")]
    Dwarf,
    Probe,
}

/// Closed set of body kinds, resolved once when the catalog is loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Star,
    Planet { rings: Option<RingSpec> },
    DwarfPlanet,
    Moon,
    Probe,
    Comet,
}

impl BodyKind {
    /// Resolve a top-level descriptor's kind.
    ///
    /// An explicit `kind` wins. Otherwise a zero distance means the central
    /// star, ring data means a ringed planet, and the dwarf flag a dwarf planet.
    pub fn resolve(desc: &BodyDescriptor) -> Self {
        let rings = || {
            desc.rings
                .clone()
                .or_else(|| desc.has_rings.then(|| RingSpec::from_preset(RingPreset::Bright)))
        };
        match desc.kind {
            Some(DescriptorKind::Star) => BodyKind::Star,
            Some(DescriptorKind::Planet) => BodyKind::Planet { rings: rings() },
            Some(DescriptorKind::Dwarf) => BodyKind::DwarfPlanet,
            Some(DescriptorKind::Probe) => BodyKind::Probe,
            None if desc.distance == Some(0.0) => BodyKind::Star,
            None if desc.dwarf => BodyKind::DwarfPlanet,
            None => BodyKind::Planet { rings: rings() },
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self, BodyKind::Star)
    }

    pub fn rings(&self) -> Option<&RingSpec> {
        match self {
            BodyKind::Planet { rings } => rings.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc() -> BodyDescriptor {
        BodyDescriptor {
            id: "x".into(),
            distance: Some(100.0),
            ..Default::default()
        }
    }

    #[test]
    fn zero_distance_is_star() {
        let d = BodyDescriptor { distance: Some(0.0), ..desc() };
        assert_eq!(BodyKind::resolve(&d), BodyKind::Star);
    }

    #[test]
    fn ring_flag_gives_bright_preset() {
        let d = BodyDescriptor { has_rings: true, ..desc() };
        let kind = BodyKind::resolve(&d);
        assert_eq!(kind.rings().map(|r| r.preset), Some(RingPreset::Bright));
    }

    #[test]
    fn explicit_rings_keep_their_preset() {
        let d = BodyDescriptor {
            has_rings: true,
            rings: Some(RingSpec::from_preset(RingPreset::Faint)),
            ..desc()
        };
        assert_eq!(BodyKind::resolve(&d).rings().map(|r| r.preset), Some(RingPreset::Faint));
    }

    #[test]
    fn dwarf_flag_and_explicit_kind() {
        let d = BodyDescriptor { dwarf: true, ..desc() };
        assert_eq!(BodyKind::resolve(&d), BodyKind::DwarfPlanet);

        let d = BodyDescriptor { kind: Some(DescriptorKind::Probe), dwarf: true, ..desc() };
        assert_eq!(BodyKind::resolve(&d), BodyKind::Probe);
    }

    #[test]
    fn plain_planet_has_no_rings() {
        assert_eq!(BodyKind::resolve(&desc()), BodyKind::Planet { rings: None });
    }
}
