use crate::error::WadError;
use crate::image_source::DecodedImage;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;

/// Size of the sprite header in bytes.
pub const HEADER_SIZE: usize = 10;

/// A sprite lump: a small header followed by a raw pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u16,
    pub height: u16,
    pub left_offset: u16,
    pub top_offset: u16,
    /// Pixel count as declared in the header.
    pub pixel_count: u16,
    pub pixels: Vec<u8>,
}

impl Sprite {
    /// Decodes a sprite without checking the pixel buffer against the header.
    pub fn decode(bytes: &[u8]) -> Result<Self, WadError> {
        if bytes.len() < HEADER_SIZE {
            return Err(WadError::format(format!(
                "sprite size {} is smaller than its {HEADER_SIZE}-byte header",
                bytes.len()
            )));
        }
        let mut reader = bytes;
        Ok(Self {
            width: reader.read_u16::<LittleEndian>()?,
            height: reader.read_u16::<LittleEndian>()?,
            left_offset: reader.read_u16::<LittleEndian>()?,
            top_offset: reader.read_u16::<LittleEndian>()?,
            pixel_count: reader.read_u16::<LittleEndian>()?,
            pixels: reader.to_vec(),
        })
    }

    /// Decodes a sprite and requires `width * height == pixel_count` and a pixel buffer
    /// of one (indexed) or four (RGBA) bytes per declared pixel.
    pub fn decode_strict(bytes: &[u8]) -> Result<Self, WadError> {
        let sprite = Self::decode(bytes)?;
        let area = sprite.width as usize * sprite.height as usize;
        let count = sprite.pixel_count as usize;
        if area != count {
            return Err(WadError::format(format!(
                "sprite is {}x{} but declares {count} pixels",
                sprite.width, sprite.height
            )));
        }
        let len = sprite.pixels.len();
        if len != count && len != count * 4 {
            return Err(WadError::format(format!(
                "sprite declares {count} pixels but carries {len} bytes"
            )));
        }
        Ok(sprite)
    }

    pub fn encode(&self) -> Result<Vec<u8>, WadError> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.pixels.len());
        out.write_u16::<LittleEndian>(self.width)?;
        out.write_u16::<LittleEndian>(self.height)?;
        out.write_u16::<LittleEndian>(self.left_offset)?;
        out.write_u16::<LittleEndian>(self.top_offset)?;
        out.write_u16::<LittleEndian>(self.pixel_count)?;
        out.extend_from_slice(&self.pixels);
        Ok(out)
    }

    /// Builds a sprite from a decoded image, keeping its pixel buffer as is.
    pub fn from_image(
        image: &DecodedImage,
        left_offset: u16,
        top_offset: u16,
    ) -> Result<Self, WadError> {
        let too_large = || {
            WadError::format(format!(
                "sprite image {}x{} is too large",
                image.width, image.height
            ))
        };
        let width = u16::try_from(image.width).map_err(|_| too_large())?;
        let height = u16::try_from(image.height).map_err(|_| too_large())?;
        let pixel_count = width.checked_mul(height).ok_or_else(too_large)?;
        Ok(Self {
            width,
            height,
            left_offset,
            top_offset,
            pixel_count,
            pixels: image.pixels.clone(),
        })
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, sprite: &Sprite) -> fmt::Result {
    writeln!(f, "  Sprite Data:")?;
    writeln!(f, "  Width  Height Left   Top    Pixels Bytes")?;
    writeln!(f, "  {}", "-".repeat(44))?;
    writeln!(
        f,
        "  {:6} {:6} {:6} {:6} {:6} {:6}",
        sprite.width,
        sprite.height,
        sprite.left_offset,
        sprite.top_offset,
        sprite.pixel_count,
        sprite.pixels.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_source::PixelFormat;

    fn header(width: u16, height: u16, count: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        for v in [width, height, 4, 8, count] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn lenient_decode_accepts_short_pixel_buffer() {
        let mut bytes = header(4, 4, 16);
        bytes.extend_from_slice(&[1, 2, 3]);
        let sprite = Sprite::decode(&bytes).unwrap();
        assert_eq!(sprite.width, 4);
        assert_eq!(sprite.left_offset, 4);
        assert_eq!(sprite.top_offset, 8);
        assert_eq!(sprite.pixels, vec![1, 2, 3]);
        assert_eq!(sprite.encode().unwrap(), bytes);

        assert!(matches!(
            Sprite::decode_strict(&bytes),
            Err(WadError::Format(_))
        ));
    }

    #[test]
    fn strict_decode_checks_dimensions() {
        let mut bytes = header(2, 3, 6);
        bytes.extend_from_slice(&[9; 6]);
        assert!(Sprite::decode_strict(&bytes).is_ok());

        let mut bytes = header(2, 3, 5);
        bytes.extend_from_slice(&[9; 5]);
        assert!(Sprite::decode_strict(&bytes).is_err());
    }

    #[test]
    fn strict_decode_accepts_one_or_four_bytes_per_pixel() {
        let mut indexed = header(2, 2, 4);
        indexed.extend_from_slice(&[1; 4]);
        assert_eq!(Sprite::decode_strict(&indexed).unwrap().pixels.len(), 4);

        let mut rgba = header(2, 2, 4);
        rgba.extend_from_slice(&[1; 16]);
        assert_eq!(Sprite::decode_strict(&rgba).unwrap().pixels.len(), 16);

        for len in [0, 3, 5, 8, 12, 15, 17] {
            let mut bytes = header(2, 2, 4);
            bytes.extend(std::iter::repeat(1).take(len));
            assert!(
                matches!(Sprite::decode_strict(&bytes), Err(WadError::Format(_))),
                "{len} pixel bytes"
            );
        }
    }

    #[test]
    fn header_is_required() {
        assert!(matches!(Sprite::decode(&[0; 9]), Err(WadError::Format(_))));
    }

    #[test]
    fn from_rgba_image() {
        let image = DecodedImage::new(2, 2, PixelFormat::Rgba, vec![0xFF; 16]).unwrap();
        let sprite = Sprite::from_image(&image, 1, 2).unwrap();
        assert_eq!(sprite.pixel_count, 4);
        let bytes = sprite.encode().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 16);
        assert_eq!(Sprite::decode_strict(&bytes).unwrap(), sprite);

        let huge = DecodedImage::new(300, 300, PixelFormat::Indexed, vec![0; 90_000]).unwrap();
        assert!(Sprite::from_image(&huge, 0, 0).is_err());
    }
}
