//! Analytic primitives: spheres and axis-aligned planes.
//!
//! Primitives are plain data. The shape is a tagged variant and every
//! shape-dependent operation matches on it.

use glint_math::{Color, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::intersect::{intersect_plane, intersect_sphere};

/// A world axis, used to orient planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[serde(alias = "X")]
    X,
    #[serde(alias = "Y")]
    Y,
    #[serde(alias = "Z")]
    Z,
}

impl Axis {
    /// Unit vector along the positive axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Normal of the plane `axis = offset`.
///
/// Depends only on the sign of the offset: the normal points back toward the
/// origin, and a plane through the origin faces down its axis. The zero test
/// is exact.
pub fn plane_normal(axis: Axis, offset: f32) -> Vec3 {
    if offset == 0.0 {
        -axis.unit()
    } else {
        // Unit length along one axis, so this is -sign(offset) * axis
        (axis.unit() * -offset).normalize_or_zero()
    }
}

/// Shape-specific geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { center: Vec3, radius: f32 },
    Plane { axis: Axis, offset: f32 },
}

/// A renderable primitive: a shape plus its surface attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Display name shown by editors
    pub name: String,
    /// Base color (used raw for flat surfaces and bounce light)
    pub color: Color,
    /// Flat surfaces skip lighting entirely
    pub flat: bool,
    pub shape: Shape,
}

impl Primitive {
    /// Create a lit sphere.
    pub fn sphere(name: impl Into<String>, center: Vec3, radius: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            flat: false,
            shape: Shape::Sphere { center, radius },
        }
    }

    /// Create a lit axis-aligned plane at `axis = offset`.
    pub fn plane(name: impl Into<String>, axis: Axis, offset: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            flat: false,
            shape: Shape::Plane { axis, offset },
        }
    }

    /// Set the flat flag.
    pub fn with_flat(mut self, flat: bool) -> Self {
        self.flat = flat;
        self
    }

    /// Test the ray against this primitive, shrinking `t` on a closer hit.
    ///
    /// Returns false and leaves `t` untouched when the primitive is missed,
    /// behind the ray, or farther than `t`.
    #[inline]
    pub fn intersect(&self, ray: &Ray, t: &mut f32) -> bool {
        match self.shape {
            Shape::Sphere { center, radius } => intersect_sphere(t, ray, center, radius),
            Shape::Plane { axis, offset } => intersect_plane(t, ray, axis, offset),
        }
    }

    /// Surface normal at a point on the primitive.
    ///
    /// Planes ignore the point; their normal is fixed by axis and offset.
    pub fn normal_at(&self, position: Vec3) -> Vec3 {
        match self.shape {
            Shape::Sphere { center, .. } => (position - center).normalize_or_zero(),
            Shape::Plane { axis, offset } => plane_normal(axis, offset),
        }
    }

    /// Reject geometry that would feed NaNs into shading.
    pub fn validate(&self) -> SceneResult<()> {
        let color = self.color.to_array();
        if color.iter().any(|c| !c.is_finite()) {
            return Err(SceneError::invalid_geometry(&self.name, "color is not finite"));
        }

        match self.shape {
            Shape::Sphere { center, radius } => {
                if !center.is_finite() {
                    return Err(SceneError::invalid_geometry(&self.name, "center is not finite"));
                }
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(SceneError::invalid_geometry(
                        &self.name,
                        format!("radius must be positive, got {radius}"),
                    ));
                }
            }
            Shape::Plane { offset, .. } => {
                if !offset.is_finite() {
                    return Err(SceneError::invalid_geometry(&self.name, "offset is not finite"));
                }
            }
        }

        Ok(())
    }
}
