//! Frame rendering.
//!
//! Each pixel casts one ray from the camera through a unit-distance image
//! plane and stores the scene's shade for it. Pixel (0, 0) of the image
//! plane is bottom-left, while the frame buffer stores the top row first.

use std::time::Instant;

use glint_core::Scene;
use glint_math::{clamp01, Color, Ray, Vec3};
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::frame::{FrameBuffer, Rgba8};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Render rows on the rayon pool instead of a single loop
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Default settings at the given resolution.
    pub fn with_resolution(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Reject empty frames and frames too large to address.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if FrameBuffer::byte_len(self.width, self.height).is_none() {
            return Err(RenderError::ResolutionTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Primary ray for image-plane pixel (ix, iy), iy = 0 at the bottom.
///
/// The image plane spans [-0.5, 0.5) on both axes and sits at
/// `camera.z + 1`, so moving the camera sideways keeps it aimed at the plane
/// rather than translating the view.
pub fn camera_ray(camera: Vec3, ix: u32, iy: u32, width: u32, height: u32) -> Ray {
    let x = ix as f32 / width as f32 - 0.5;
    let y = iy as f32 / height as f32 - 0.5;
    Ray::towards(camera, Vec3::new(x, y, camera.z + 1.0))
}

/// Quantize a color to 8 bits per channel.
///
/// Channels saturate at 0 and 255; out-of-range shades never wrap.
pub fn color_to_rgba(color: Color) -> Rgba8 {
    let quantize = |c: f32| (clamp01(c) * 255.0).round() as u8;
    Rgba8::new(
        quantize(color.r),
        quantize(color.g),
        quantize(color.b),
        quantize(color.a),
    )
}

/// Render the frame-buffer pixel at (x, row), row 0 being the top.
pub fn render_pixel(scene: &Scene, x: u32, row: u32, width: u32, height: u32) -> Rgba8 {
    let iy = height - 1 - row;
    let ray = camera_ray(scene.camera, x, iy, width, height);
    color_to_rgba(scene.shade(&ray))
}

fn render_row(scene: &Scene, row: u32, pixels: &mut [Rgba8], width: u32, height: u32) {
    for (x, pixel) in pixels.iter_mut().enumerate() {
        *pixel = render_pixel(scene, x as u32, row, width, height);
    }
}

/// Owns the output frame and re-renders it on demand.
///
/// The renderer keeps no scene state: callers mutate the scene and call
/// [`Renderer::render`] again.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    frame: FrameBuffer,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let frame = FrameBuffer::new(config.width, config.height);
        Ok(Self { config, frame })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Change the output size, reallocating the frame if it differs.
    pub fn set_resolution(&mut self, width: u32, height: u32) -> RenderResult<()> {
        let config = RenderConfig {
            width,
            height,
            ..self.config.clone()
        };
        config.validate()?;

        if self.frame.resize(width, height) {
            log::debug!("Frame reallocated at {}x{}", width, height);
        }
        self.config = config;
        Ok(())
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn into_frame(self) -> FrameBuffer {
        self.frame
    }

    /// Render the whole scene into the frame buffer.
    ///
    /// Every pixel is written before this returns.
    pub fn render(&mut self, scene: &Scene) -> &FrameBuffer {
        let start = Instant::now();

        if !scene.shading_model.is_known() {
            log::warn!(
                "Unrecognized shading model {}, rendering diagnostic color",
                scene.shading_model
            );
        }

        if self.config.parallel {
            self.render_rows(scene);
        } else {
            self.render_serial(scene);
        }

        log::debug!(
            "Rendered {}x{} ({}, {} primitives) in {:?}",
            self.config.width,
            self.config.height,
            scene.shading_model,
            scene.primitive_count(),
            start.elapsed()
        );
        &self.frame
    }

    fn render_serial(&mut self, scene: &Scene) {
        let (width, height) = (self.config.width, self.config.height);

        for (row, pixels) in self.frame.pixels_mut().chunks_exact_mut(width as usize).enumerate() {
            render_row(scene, row as u32, pixels, width, height);
        }
    }

    /// One rayon task per row; each task owns a disjoint slice of the frame.
    fn render_rows(&mut self, scene: &Scene) {
        let (width, height) = (self.config.width, self.config.height);

        self.frame
            .pixels_mut()
            .par_chunks_exact_mut(width as usize)
            .enumerate()
            .for_each(|(row, pixels)| render_row(scene, row as u32, pixels, width, height));
    }
}

/// Render a scene once into a fresh frame buffer.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<FrameBuffer> {
    let mut renderer = Renderer::new(config.clone())?;
    renderer.render(scene);
    Ok(renderer.into_frame())
}
