//! Shading models and the per-surface shading helpers they share.

use std::fmt;
use std::str::FromStr;

use glint_math::{inverse_lerp01, Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::primitive::Primitive;

/// Distance secondary rays are pushed off the surface they start on.
pub const SHADOW_EPSILON: f32 = 0.001;

/// Algorithm used to turn a primary hit into a pixel color.
///
/// Editors select the model by index; indices outside the known range are
/// kept as [`ShadingModel::Unknown`] and shade as magenta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ShadingModelRepr", into = "ShadingModelRepr")]
pub enum ShadingModel {
    /// Lambert shading, no shadows
    Lambert,
    /// Lambert shading with a hard shadow ray toward the light
    LambertShadow,
    /// Lambert plus one bounce along the surface normal
    GiNormal,
    /// Lambert plus one bounce along the mirror direction
    #[default]
    GiReflect,
    Unknown(u32),
}

impl ShadingModel {
    /// The known models, in editor order.
    pub const ALL: [ShadingModel; 4] = [
        ShadingModel::Lambert,
        ShadingModel::LambertShadow,
        ShadingModel::GiNormal,
        ShadingModel::GiReflect,
    ];

    pub fn index(self) -> u32 {
        match self {
            ShadingModel::Lambert => 0,
            ShadingModel::LambertShadow => 1,
            ShadingModel::GiNormal => 2,
            ShadingModel::GiReflect => 3,
            ShadingModel::Unknown(index) => index,
        }
    }

    /// Human-readable name for UI.
    pub fn label(self) -> &'static str {
        match self {
            ShadingModel::Lambert => "Lambert",
            ShadingModel::LambertShadow => "Lambert + Shadow",
            ShadingModel::GiNormal => "GI (normal bounce)",
            ShadingModel::GiReflect => "GI (reflect bounce)",
            ShadingModel::Unknown(_) => "Unknown",
        }
    }

    /// Name used on the command line and in scene files.
    pub fn slug(self) -> Option<&'static str> {
        match self {
            ShadingModel::Lambert => Some("lambert"),
            ShadingModel::LambertShadow => Some("lambert-shadow"),
            ShadingModel::GiNormal => Some("gi-normal"),
            ShadingModel::GiReflect => Some("gi-reflect"),
            ShadingModel::Unknown(_) => None,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, ShadingModel::Unknown(_))
    }
}

impl From<u32> for ShadingModel {
    fn from(index: u32) -> Self {
        ShadingModel::ALL
            .get(index as usize)
            .copied()
            .unwrap_or(ShadingModel::Unknown(index))
    }
}

impl FromStr for ShadingModel {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ShadingModel::ALL
            .into_iter()
            .find(|model| model.slug() == Some(normalized.as_str()))
            .ok_or_else(|| SceneError::UnknownShadingModel(s.to_string()))
    }
}

impl fmt::Display for ShadingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slug() {
            Some(slug) => f.write_str(slug),
            None => write!(f, "unknown({})", self.index()),
        }
    }
}

/// Scene files accept either a name or a raw editor index.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ShadingModelRepr {
    Index(u32),
    Name(String),
}

impl TryFrom<ShadingModelRepr> for ShadingModel {
    type Error = SceneError;

    fn try_from(repr: ShadingModelRepr) -> Result<Self, Self::Error> {
        match repr {
            ShadingModelRepr::Index(index) => Ok(ShadingModel::from(index)),
            ShadingModelRepr::Name(name) => name.parse(),
        }
    }
}

impl From<ShadingModel> for ShadingModelRepr {
    fn from(model: ShadingModel) -> Self {
        match model.slug() {
            Some(slug) => ShadingModelRepr::Name(slug.to_string()),
            None => ShadingModelRepr::Index(model.index()),
        }
    }
}

/// Lambert shade of a primitive at a hit point, without shadowing.
///
/// Flat primitives return their color untouched. Otherwise the light/normal
/// cosine is remapped from [-1, 1] to [0, 1] and used to blend from black to
/// the primitive color, so surfaces facing away from the light still get
/// some fill.
pub fn surface_shade(primitive: &Primitive, light: Vec3, position: Vec3, normal: Vec3) -> Color {
    if primitive.flat {
        return primitive.color;
    }

    let to_light = (light - position).normalize_or_zero();
    let t = inverse_lerp01(-1.0, 1.0, to_light.dot(normal));
    Color::BLACK.lerp(primitive.color, t)
}

/// Blend a base shade toward the color of a bounce hit.
///
/// Hits at distance 0 replace the base color, hits at `max_distance` or
/// beyond leave it unchanged. Alpha always comes from `base`.
pub fn bounce_blend(base: Color, bounced: Color, distance: f32, max_distance: f32) -> Color {
    let t = inverse_lerp01(max_distance, 0.0, distance);
    base.lerp(bounced, t).with_alpha(base.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Axis;

    #[test]
    fn test_model_from_index() {
        assert_eq!(ShadingModel::from(0), ShadingModel::Lambert);
        assert_eq!(ShadingModel::from(1), ShadingModel::LambertShadow);
        assert_eq!(ShadingModel::from(2), ShadingModel::GiNormal);
        assert_eq!(ShadingModel::from(3), ShadingModel::GiReflect);
        assert_eq!(ShadingModel::from(9), ShadingModel::Unknown(9));
        assert_eq!(ShadingModel::from(9).index(), 9);
    }

    #[test]
    fn test_model_from_str() {
        assert_eq!("lambert".parse::<ShadingModel>().unwrap(), ShadingModel::Lambert);
        assert_eq!("Lambert_Shadow".parse::<ShadingModel>().unwrap(), ShadingModel::LambertShadow);
        assert_eq!("gi-normal".parse::<ShadingModel>().unwrap(), ShadingModel::GiNormal);
        assert!(matches!(
            "phong".parse::<ShadingModel>(),
            Err(SceneError::UnknownShadingModel(_))
        ));
    }

    #[test]
    fn test_model_serde() {
        let json = serde_json::to_string(&ShadingModel::GiNormal).unwrap();
        assert_eq!(json, "\"gi-normal\"");

        let unknown = serde_json::to_string(&ShadingModel::Unknown(7)).unwrap();
        assert_eq!(unknown, "7");

        let parsed: ShadingModel = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, ShadingModel::LambertShadow);
        let parsed: ShadingModel = serde_json::from_str("\"gi-reflect\"").unwrap();
        assert_eq!(parsed, ShadingModel::GiReflect);
        assert!(serde_json::from_str::<ShadingModel>("\"toon\"").is_err());
    }

    #[test]
    fn test_surface_shade_flat_ignores_light() {
        let plane = Primitive::plane("p", Axis::Y, -2.0, Color::new(0.2, 0.4, 0.6, 0.8)).with_flat(true);
        let position = Vec3::new(0.0, -2.0, 0.0);

        for light in [Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -10.0, 0.0), Vec3::ZERO] {
            assert_eq!(surface_shade(&plane, light, position, Vec3::Y), plane.color);
        }
    }

    #[test]
    fn test_surface_shade_remaps_cosine() {
        let plane = Primitive::plane("p", Axis::Y, -2.0, Color::WHITE);
        let position = Vec3::new(0.0, -2.0, 0.0);

        // Facing the light: full color
        let lit = surface_shade(&plane, Vec3::new(0.0, 5.0, 0.0), position, Vec3::Y);
        assert_eq!(lit, Color::WHITE);

        // Grazing: half
        let grazing = surface_shade(&plane, Vec3::new(5.0, -2.0, 0.0), position, Vec3::Y);
        assert!((grazing.r - 0.5).abs() < 1e-6);

        // Facing away: black, alpha stays opaque
        let dark = surface_shade(&plane, Vec3::new(0.0, -9.0, 0.0), position, Vec3::Y);
        assert_eq!(dark, Color::BLACK);
    }

    #[test]
    fn test_surface_shade_monotonic() {
        let sphere = Primitive::sphere("s", Vec3::ZERO, 1.0, Color::rgb(0.9, 0.6, 0.3));
        let position = Vec3::Y;
        let mut previous = -1.0;

        // Sweep the light from below the surface to straight above it
        for step in 0..=32 {
            let angle = std::f32::consts::PI * step as f32 / 32.0;
            let light = position + Vec3::new(angle.sin(), -angle.cos(), 0.0) * 10.0;
            let color = surface_shade(&sphere, light, position, Vec3::Y);

            assert!(color.r >= previous - 1e-6, "step {step}: {} < {previous}", color.r);
            assert!(color.r <= sphere.color.r + 1e-6);
            assert!((color.g / sphere.color.g - color.r / sphere.color.r).abs() < 1e-5);
            previous = color.r;
        }
        assert!((previous - sphere.color.r).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_blend_boundaries() {
        let base = Color::new(0.2, 0.2, 0.2, 0.5);
        let bounced = Color::new(1.0, 0.0, 0.0, 1.0);

        let full = bounce_blend(base, bounced, 0.0, 4.0);
        assert!((full.r - 1.0).abs() < 1e-6);
        assert!(full.g.abs() < 1e-6 && full.b.abs() < 1e-6);
        assert_eq!(full.a, 0.5);
        assert_eq!(bounce_blend(base, bounced, 4.0, 4.0), base);
        assert_eq!(bounce_blend(base, bounced, 10.0, 4.0), base);

        let half = bounce_blend(base, bounced, 2.0, 4.0);
        assert!((half.r - 0.6).abs() < 1e-6);
        assert!((half.g - 0.1).abs() < 1e-6);
        assert_eq!(half.a, 0.5);
    }
}
