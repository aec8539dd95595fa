use crate::catalog::PlanetRecord;

/// Body that gets the animated banded shader when it has no generated texture
pub const GAS_GIANT_ID: &str = "jupiter";
/// Body wrapped in a cloud shell
pub const CLOUDED_ID: &str = "earth";
/// Body carrying a flat ring system
pub const RINGED_ID: &str = "saturn";

/// Stripe color mixed into the gas giant bands
pub const GAS_GIANT_STRIPE: &str = "#6b4a3a";
/// UV center and radius of the fixed storm blemish on the gas giant
pub const STORM_CENTER: [f32; 2] = [0.7, 0.4];
pub const STORM_RADIUS: f32 = 0.05;

/// Material variant of a body surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Self-lit star
    Emissive,
    /// Generated image mapped onto the sphere
    Textured,
    /// Time-animated bands with a storm spot
    ProceduralBanded,
    /// Flat shaded base color
    FlatShaded,
}

impl SurfaceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Emissive => "emissive",
            Self::Textured => "textured",
            Self::ProceduralBanded => "procedural-banded",
            Self::FlatShaded => "flat-shaded",
        }
    }
}

/// Pick the surface material. Sun first, then a generated texture, then the
/// gas giant shader, then the flat fallback. Never returns an empty surface.
pub fn surface_kind(record: &PlanetRecord, is_sun: bool, has_override: bool) -> SurfaceKind {
    if is_sun {
        SurfaceKind::Emissive
    } else if has_override {
        SurfaceKind::Textured
    } else if record.id == GAS_GIANT_ID {
        SurfaceKind::ProceduralBanded
    } else {
        SurfaceKind::FlatShaded
    }
}

/// Rim-lit atmosphere parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereGlow {
    pub color: &'static str,
    pub power: f32,
    pub multiplier: f32,
}

impl AtmosphereGlow {
    const fn new(color: &'static str) -> Self {
        Self {
            color,
            power: 5.0,
            multiplier: 1.5,
        }
    }

    /// Glow strength for the cosine between surface normal and view direction.
    /// Zero when facing the viewer, rising toward the silhouette.
    pub fn intensity(&self, n_dot_v: f32) -> f32 {
        (1.0 - n_dot_v.max(0.0)).powf(self.power) * self.multiplier
    }
}

/// Optional sub-geometry attached around a body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decorations {
    pub orbit_path: bool,
    pub clouds: bool,
    pub atmosphere: Option<AtmosphereGlow>,
    pub rings: bool,
}

pub fn decorations(record: &PlanetRecord, is_sun: bool) -> Decorations {
    if is_sun {
        return Decorations::default();
    }
    let atmosphere = match record.id {
        "venus" => Some(AtmosphereGlow::new("#ffd8a8")),
        "earth" => Some(AtmosphereGlow::new("#91d5ff")),
        "neptune" => Some(AtmosphereGlow::new("#8099ff")),
        _ => None,
    };
    Decorations {
        orbit_path: true,
        clouds: record.id == CLOUDED_ID,
        atmosphere,
        rings: record.id == RINGED_ID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, PLANETS, SUN};

    #[test]
    fn sun_is_always_emissive() {
        assert_eq!(surface_kind(&SUN, true, false), SurfaceKind::Emissive);
        assert_eq!(surface_kind(&SUN, true, true), SurfaceKind::Emissive);
    }

    #[test]
    fn texture_beats_procedural() {
        let jupiter = catalog::find("jupiter").unwrap();
        assert_eq!(surface_kind(jupiter, false, false), SurfaceKind::ProceduralBanded);
        assert_eq!(surface_kind(jupiter, false, true), SurfaceKind::Textured);
    }

    #[test]
    fn everything_else_falls_back_to_flat() {
        for p in PLANETS.iter().filter(|p| p.id != GAS_GIANT_ID) {
            assert_eq!(surface_kind(p, false, false), SurfaceKind::FlatShaded);
            assert_eq!(surface_kind(p, false, true), SurfaceKind::Textured);
        }
    }

    #[test]
    fn decorations_by_identity() {
        let clouds: Vec<_> = PLANETS.iter().filter(|p| decorations(p, false).clouds).collect();
        let rings: Vec<_> = PLANETS.iter().filter(|p| decorations(p, false).rings).collect();
        let glow: Vec<_> = PLANETS
            .iter()
            .filter(|p| decorations(p, false).atmosphere.is_some())
            .map(|p| p.id)
            .collect();

        assert_eq!(clouds.len(), 1);
        assert_eq!(clouds[0].id, "earth");
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].id, "saturn");
        assert_eq!(glow, vec!["venus", "earth", "neptune"]);
        assert!(PLANETS.iter().all(|p| decorations(p, false).orbit_path));
        assert_eq!(decorations(&SUN, true), Decorations::default());
    }

    #[test]
    fn rim_glow_rises_toward_silhouette() {
        let glow = AtmosphereGlow::new("#ffffff");
        assert_eq!(glow.intensity(1.0), 0.0);
        assert!((glow.intensity(0.0) - 1.5).abs() < 1e-6);
        // back-facing normals clamp to the edge value
        assert_eq!(glow.intensity(-0.5), glow.intensity(0.0));

        let mut prev = glow.intensity(1.0);
        for step in (0..10).rev() {
            let v = glow.intensity(step as f32 / 10.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
