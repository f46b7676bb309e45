use crate::error::WadError;
use crate::ext::io_ext::{NameReadExt, NameWriteExt, NAME_WIDTH};
use crate::lumps::fixed_record::FixedRecord;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

/// An entry of the SIDEDEFS lump: the textures of one side of a linedef.
///
/// Texture names are at most 8 ASCII characters; `-` means no texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidedef {
    pub x_offset: i16,
    pub y_offset: i16,
    pub upper_texture: String,
    pub lower_texture: String,
    pub middle_texture: String,
    pub sector: u16,
}

impl FixedRecord for Sidedef {
    const SIZE: usize = 30;
    const LUMP: &'static str = "SIDEDEFS";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            x_offset: reader.read_i16::<LittleEndian>()?,
            y_offset: reader.read_i16::<LittleEndian>()?,
            upper_texture: reader.read_name(NAME_WIDTH)?,
            lower_texture: reader.read_name(NAME_WIDTH)?,
            middle_texture: reader.read_name(NAME_WIDTH)?,
            sector: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_i16::<LittleEndian>(self.x_offset)?;
        writer.write_i16::<LittleEndian>(self.y_offset)?;
        writer.write_name(&self.upper_texture, NAME_WIDTH)?;
        writer.write_name(&self.lower_texture, NAME_WIDTH)?;
        writer.write_name(&self.middle_texture, NAME_WIDTH)?;
        writer.write_u16::<LittleEndian>(self.sector)?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, sidedefs: &[Sidedef]) -> fmt::Result {
    writeln!(f, "  Sidedef Data:")?;
    writeln!(f, "  X-Off  Y-Off  Upper    Lower    Middle   Sector")?;
    writeln!(f, "  {}", "-".repeat(60))?;
    for side in sidedefs {
        writeln!(
            f,
            "  {:6} {:6} {:<8} {:<8} {:<8} {:6}",
            side.x_offset,
            side.y_offset,
            side.upper_texture,
            side.lower_texture,
            side.middle_texture,
            side.sector
        )?;
    }
    Ok(())
}
