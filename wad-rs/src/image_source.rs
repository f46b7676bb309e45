//! Interface to the external image decoder.
//!
//! This crate never reads image files itself. A collaborator turns a PNG (or any other
//! raster format) into a [`DecodedImage`], and the flat and sprite codecs consume that
//! buffer.

use crate::error::WadError;
use std::path::Path;

/// Layout of the bytes in [`DecodedImage::pixels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One palette index per pixel.
    Indexed,
    /// Four bytes per pixel: red, green, blue, alpha.
    Rgba,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Indexed => 1,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A decoded raster image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Creates an image, checking that the buffer matches the declared dimensions.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, WadError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(WadError::format(format!(
                "{width}x{height} {format:?} image needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }
}

/// Turns image files into pixel buffers.
pub trait ImageDecoder {
    /// Decodes the file at `path` into RGBA pixels, for sprite conversion.
    fn decode_rgba(&self, path: &Path) -> Result<DecodedImage, WadError>;

    /// Decodes the file at `path` into palette indices, for flat conversion.
    fn decode_indexed(&self, path: &Path) -> Result<DecodedImage, WadError>;
}
