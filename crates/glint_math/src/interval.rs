/// A closed range of floats, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: f32,
    max: f32,
}

impl Interval {
    /// The unit interval [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create the interval spanning two values in either order.
    pub fn spanning(a: f32, b: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
