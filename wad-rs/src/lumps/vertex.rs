use crate::error::WadError;
use crate::lumps::fixed_record::FixedRecord;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

/// A map vertex from the VERTEXES lump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

impl FixedRecord for Vertex {
    const SIZE: usize = 4;
    const LUMP: &'static str = "VERTEXES";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            x: reader.read_i16::<LittleEndian>()?,
            y: reader.read_i16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_i16::<LittleEndian>(self.x)?;
        writer.write_i16::<LittleEndian>(self.y)?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, vertexes: &[Vertex]) -> fmt::Result {
    writeln!(f, "  Vertex Data:")?;
    writeln!(f, "  X      Y")?;
    writeln!(f, "  {}", "-".repeat(20))?;
    for vertex in vertexes {
        writeln!(f, "  {:6} {:6}", vertex.x, vertex.y)?;
    }
    Ok(())
}
