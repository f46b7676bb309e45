use crate::error::WadError;
use crate::image_source::{DecodedImage, PixelFormat};
use std::fmt;

/// Edge length of a flat in pixels.
pub const FLAT_DIMENSION: usize = 64;
/// Size of a flat lump in bytes.
pub const FLAT_SIZE: usize = FLAT_DIMENSION * FLAT_DIMENSION;

/// A 64x64 floor or ceiling texture of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flat {
    pixels: Vec<u8>,
}

impl Flat {
    pub fn decode(bytes: &[u8]) -> Result<Self, WadError> {
        if bytes.len() != FLAT_SIZE {
            return Err(WadError::format(format!(
                "flat size {} is not {FLAT_SIZE}",
                bytes.len()
            )));
        }
        Ok(Self {
            pixels: bytes.to_vec(),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Builds a flat from a 64x64 palette-indexed image.
    pub fn from_image(image: &DecodedImage) -> Result<Self, WadError> {
        if image.format != PixelFormat::Indexed {
            return Err(WadError::format("flats need a palette-indexed image"));
        }
        if image.width as usize != FLAT_DIMENSION || image.height as usize != FLAT_DIMENSION {
            return Err(WadError::format(format!(
                "flat image is {}x{}, expected {FLAT_DIMENSION}x{FLAT_DIMENSION}",
                image.width, image.height
            )));
        }
        Self::decode(&image.pixels)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Palette index at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= FLAT_DIMENSION || y >= FLAT_DIMENSION {
            return None;
        }
        self.pixels.get(y * FLAT_DIMENSION + x).copied()
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, flat: &Flat) -> fmt::Result {
    let mut used = [false; 256];
    for &p in flat.pixels() {
        used[p as usize] = true;
    }
    writeln!(f, "  Flat Data:")?;
    writeln!(
        f,
        "  {FLAT_DIMENSION}x{FLAT_DIMENSION}, {} distinct colors",
        used.iter().filter(|u| **u).count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_4096_bytes_is_a_flat() {
        assert!(Flat::decode(&[7u8; FLAT_SIZE]).is_ok());
        assert!(matches!(
            Flat::decode(&[7u8; FLAT_SIZE - 1]),
            Err(WadError::Format(_))
        ));
        assert!(matches!(
            Flat::decode(&[7u8; FLAT_SIZE + 1]),
            Err(WadError::Format(_))
        ));
    }

    #[test]
    fn from_indexed_image() {
        let pixels: Vec<u8> = (0..FLAT_SIZE).map(|i| (i % 251) as u8).collect();
        let image = DecodedImage::new(64, 64, PixelFormat::Indexed, pixels.clone()).unwrap();
        let flat = Flat::from_image(&image).unwrap();
        assert_eq!(flat.encode(), pixels);
        assert_eq!(flat.pixel(1, 1), Some(65));
        assert_eq!(flat.pixel(64, 0), None);
    }

    #[test]
    fn rgba_or_wrong_size_images_are_rejected() {
        let rgba = DecodedImage::new(64, 64, PixelFormat::Rgba, vec![0; FLAT_SIZE * 4]).unwrap();
        assert!(Flat::from_image(&rgba).is_err());
        let small = DecodedImage::new(32, 32, PixelFormat::Indexed, vec![0; 1024]).unwrap();
        assert!(Flat::from_image(&small).is_err());
    }
}
