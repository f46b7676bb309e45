use crate::error::WadError;
use crate::ext::io_ext::{NameReadExt, NameWriteExt, SeekExt, NAME_WIDTH};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Cursor, Seek, SeekFrom};

/// Size of a texture header block: name, masked flag, width, height,
/// column directory and patch count.
pub const TEXTURE_HEADER_SIZE: usize = 22;
/// Size of one patch placement inside a texture block.
pub const PATCH_SIZE: usize = 12;

/// A placement of a PNAMES patch inside a composite texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexturePatch {
    pub origin_x: i16,
    pub origin_y: i16,
    /// Index into the PNAMES lump.
    pub patch_index: u16,
    pub stepdir: u16,
    pub colormap: u16,
}

/// A composite texture from a TEXTURE1/TEXTURE2 lump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub patches: Vec<TexturePatch>,
}

impl Texture {
    /// Bytes this texture occupies once serialized.
    pub fn encoded_size(&self) -> usize {
        TEXTURE_HEADER_SIZE + self.patches.len() * PATCH_SIZE
    }
}

/// Offsets, relative to the start of the lump, at which [`encode`] places each texture.
///
/// The first block follows the count and offset table; every later block starts where
/// the blocks already placed before it end.
pub fn offsets(textures: &[Texture]) -> Vec<usize> {
    let mut next = 4 + 4 * textures.len();
    textures
        .iter()
        .map(|texture| {
            let offset = next;
            next += texture.encoded_size();
            offset
        })
        .collect()
}

/// Decodes a TEXTURE1/TEXTURE2 lump.
///
/// Each entry of the offset table is an absolute position inside `bytes`. Blocks may be
/// stored in any order and with gaps between them.
pub fn decode(bytes: &[u8]) -> Result<Vec<Texture>, WadError> {
    if bytes.len() < 4 {
        return Err(WadError::format(format!(
            "texture lump size {} is smaller than its count field",
            bytes.len()
        )));
    }
    let mut reader = Cursor::new(bytes);
    let count = reader.read_u32::<LittleEndian>()? as usize;
    let table_end = count
        .checked_mul(4)
        .and_then(|n| n.checked_add(4))
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| {
            WadError::format(format!(
                "texture lump declares {count} textures but is only {} bytes",
                bytes.len()
            ))
        })?;

    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        offsets.push(reader.read_u32::<LittleEndian>()? as usize);
    }
    debug_assert_eq!(reader.position() as usize, table_end);

    offsets
        .into_iter()
        .enumerate()
        .map(|(index, offset)| read_texture(&mut reader, index, offset))
        .collect()
}

fn read_texture(
    reader: &mut Cursor<&[u8]>,
    index: usize,
    offset: usize,
) -> Result<Texture, WadError> {
    let len = reader.get_ref().len();
    if offset + TEXTURE_HEADER_SIZE > len {
        return Err(WadError::format(format!(
            "texture #{index} offset {offset} leaves no room for its header in {len} bytes"
        )));
    }
    reader.seek(SeekFrom::Start(offset as u64))?;
    let name = reader.read_name(NAME_WIDTH)?;
    reader.skip(4u32)?;
    let width = reader.read_u16::<LittleEndian>()?;
    let height = reader.read_u16::<LittleEndian>()?;
    reader.skip(4u32)?;
    let patch_count = reader.read_u16::<LittleEndian>()? as usize;

    if offset + TEXTURE_HEADER_SIZE + patch_count * PATCH_SIZE > len {
        return Err(WadError::format(format!(
            "texture {name} at offset {offset} declares {patch_count} patches past the end of the lump"
        )));
    }
    let mut patches = Vec::with_capacity(patch_count);
    for _ in 0..patch_count {
        patches.push(TexturePatch {
            origin_x: reader.read_i16::<LittleEndian>()?,
            origin_y: reader.read_i16::<LittleEndian>()?,
            patch_index: reader.read_u16::<LittleEndian>()?,
            stepdir: reader.read_u16::<LittleEndian>()?,
            colormap: reader.read_u16::<LittleEndian>()?,
        });
        reader.skip(2u32)?;
    }

    Ok(Texture {
        name,
        width,
        height,
        patches,
    })
}

/// Encodes textures in order, each block immediately after the previous one.
/// Ignored fields are written as zero.
pub fn encode(textures: &[Texture]) -> Result<Vec<u8>, WadError> {
    let count = u32::try_from(textures.len())
        .map_err(|_| WadError::format(format!("too many textures: {}", textures.len())))?;
    let offsets = offsets(textures);
    let total = offsets
        .last()
        .zip(textures.last())
        .map_or(4, |(offset, texture)| offset + texture.encoded_size());
    if u32::try_from(total).is_err() {
        return Err(WadError::format(format!(
            "texture lump of {total} bytes does not fit 32-bit offsets"
        )));
    }

    let mut out = Vec::with_capacity(total);
    out.write_u32::<LittleEndian>(count)?;
    for offset in &offsets {
        out.write_u32::<LittleEndian>(*offset as u32)?;
    }
    for (texture, offset) in textures.iter().zip(&offsets) {
        debug_assert_eq!(out.len(), *offset);
        let patch_count = u16::try_from(texture.patches.len()).map_err(|_| {
            WadError::format(format!(
                "texture {} has {} patches",
                texture.name,
                texture.patches.len()
            ))
        })?;
        out.write_name(&texture.name, NAME_WIDTH)?;
        out.write_u32::<LittleEndian>(0)?;
        out.write_u16::<LittleEndian>(texture.width)?;
        out.write_u16::<LittleEndian>(texture.height)?;
        out.write_u32::<LittleEndian>(0)?;
        out.write_u16::<LittleEndian>(patch_count)?;
        for patch in &texture.patches {
            out.write_i16::<LittleEndian>(patch.origin_x)?;
            out.write_i16::<LittleEndian>(patch.origin_y)?;
            out.write_u16::<LittleEndian>(patch.patch_index)?;
            out.write_u16::<LittleEndian>(patch.stepdir)?;
            out.write_u16::<LittleEndian>(patch.colormap)?;
            out.write_u16::<LittleEndian>(0)?;
        }
    }
    Ok(out)
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, textures: &[Texture]) -> fmt::Result {
    writeln!(f, "  Texture Data:")?;
    writeln!(f, "  Name     Width  Height Patches")?;
    writeln!(f, "  {}", "-".repeat(40))?;
    for texture in textures {
        writeln!(
            f,
            "  {:<8} {:6} {:6} {:6}",
            texture.name,
            texture.width,
            texture.height,
            texture.patches.len()
        )?;
        for patch in &texture.patches {
            writeln!(
                f,
                "    patch {:5} at ({}, {})",
                patch.patch_index, patch.origin_x, patch.origin_y
            )?;
        }
    }
    Ok(())
}
