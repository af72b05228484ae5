use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Distances reported by the intersection routines are Euclidean only when
/// `direction` is unit length. [`Ray::towards`] always produces such a ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is taken as given.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from `origin` pointing at `target`, with a unit direction.
    ///
    /// A target equal to the origin yields a zero direction rather than NaNs.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize_or_zero())
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at distance t.
    ///
    /// Returns: origin + direction * t
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Offset the origin a small distance along the direction.
    ///
    /// Used for secondary rays so they do not re-hit the surface they leave.
    pub fn nudged(self, epsilon: f32) -> Self {
        Self::new(self.at(epsilon), self.direction)
    }
}
