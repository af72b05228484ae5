//! PNG export of rendered frames.

use std::path::Path;

use anyhow::{Context, Result};
use glint_renderer::FrameBuffer;
use image::RgbaImage;

/// Encode the frame as an RGBA PNG.
pub fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .context("Frame buffer size does not match its dimensions")?;

    image
        .save(path)
        .with_context(|| format!("Failed to write PNG to {}", path.display()))
}
