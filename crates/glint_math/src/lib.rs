// Re-export glam for convenience
pub use glam::*;

// glint math types
mod color;
mod interval;
mod ray;
mod scalar;

pub use color::Color;
pub use interval::Interval;
pub use ray::Ray;
pub use scalar::{clamp01, inverse_lerp, inverse_lerp01, lerp, reflect};
