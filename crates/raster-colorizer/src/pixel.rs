//! RGBA output buffers.

use std::path::Path;

use crate::error::{ColorizeError, ColorizeResult};
use crate::png;

/// A `height x width` RGBA image, 4 bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    pub(crate) fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap existing RGBA bytes. The length must equal `width * height * 4`.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> ColorizeResult<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .unwrap_or(usize::MAX);
        if pixels.len() != expected {
            return Err(ColorizeError::ShapeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::new(width, height, pixels))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// RGBA value at (row, col), if inside the image.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 4]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let offset = (row * self.width + col) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(rgba)
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> ColorizeResult<Vec<u8>> {
        png::encode_png(self)
    }

    /// Write as a PNG file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> ColorizeResult<()> {
        png::save_png(self, path)
    }
}
