//! Output pixel buffer.

use bytemuck::{Pod, Zeroable};

/// One 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// A width x height grid of RGBA8 pixels, row-major, top row first.
///
/// The byte layout (4 bytes per pixel, no row padding) is what display and
/// export consumers read through [`FrameBuffer::as_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl FrameBuffer {
    /// Create a transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Size in bytes of a `width` x `height` frame, or `None` when it does
    /// not fit in a single allocation.
    pub fn byte_len(width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(std::mem::size_of::<Rgba8>())
            .filter(|&len| len <= isize::MAX as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for a new size. Does nothing if the size is unchanged.
    ///
    /// Returns true when the buffer was reallocated.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        *self = Self::new(width, height);
        true
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y), y = 0 being the top row.
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba8) {
        let offset = self.offset(x, y);
        self.pixels[offset] = pixel;
    }

    /// One row of pixels, top row first.
    pub fn row(&self, y: u32) -> &[Rgba8] {
        let start = self.offset(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Tightly packed R,G,B,A bytes for texture upload or image encoding.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
