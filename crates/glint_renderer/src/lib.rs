//! glint renderer - turns a scene into an RGBA8 frame.
//!
//! One primary ray per pixel, shaded by the scene's current model. Frames can
//! be rendered serially or row by row in parallel with rayon; both paths
//! produce identical pixels.

mod error;
mod frame;
mod renderer;

pub use error::{RenderError, RenderResult};
pub use frame::{FrameBuffer, Rgba8};
pub use renderer::{camera_ray, color_to_rgba, render, render_pixel, RenderConfig, Renderer};

/// Re-export the scene types renderers are driven with
pub use glint_core::{Scene, ShadingModel};
pub use glint_math::{Color, Ray, Vec3};
