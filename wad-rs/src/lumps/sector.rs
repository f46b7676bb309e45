use crate::error::WadError;
use crate::ext::io_ext::{NameReadExt, NameWriteExt, NAME_WIDTH};
use crate::lumps::fixed_record::FixedRecord;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

/// An entry of the SECTORS lump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    pub floor_height: i16,
    pub ceiling_height: i16,
    pub floor_texture: String,
    pub ceiling_texture: String,
    pub light: u16,
    pub special: u16,
    pub tag: u16,
}

impl FixedRecord for Sector {
    const SIZE: usize = 26;
    const LUMP: &'static str = "SECTORS";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            floor_height: reader.read_i16::<LittleEndian>()?,
            ceiling_height: reader.read_i16::<LittleEndian>()?,
            floor_texture: reader.read_name(NAME_WIDTH)?,
            ceiling_texture: reader.read_name(NAME_WIDTH)?,
            light: reader.read_u16::<LittleEndian>()?,
            special: reader.read_u16::<LittleEndian>()?,
            tag: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_i16::<LittleEndian>(self.floor_height)?;
        writer.write_i16::<LittleEndian>(self.ceiling_height)?;
        writer.write_name(&self.floor_texture, NAME_WIDTH)?;
        writer.write_name(&self.ceiling_texture, NAME_WIDTH)?;
        writer.write_u16::<LittleEndian>(self.light)?;
        writer.write_u16::<LittleEndian>(self.special)?;
        writer.write_u16::<LittleEndian>(self.tag)?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, sectors: &[Sector]) -> fmt::Result {
    writeln!(f, "  Sector Data:")?;
    writeln!(f, "  Floor  Ceil   FloorTex CeilTex  Light  Special Tag")?;
    writeln!(f, "  {}", "-".repeat(56))?;
    for sector in sectors {
        writeln!(
            f,
            "  {:6} {:6} {:<8} {:<8} {:6} {:7} {:6}",
            sector.floor_height,
            sector.ceiling_height,
            sector.floor_texture,
            sector.ceiling_texture,
            sector.light,
            sector.special,
            sector.tag
        )?;
    }
    Ok(())
}
