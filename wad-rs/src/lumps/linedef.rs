use crate::error::WadError;
use crate::lumps::fixed_record::FixedRecord;
use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

bitflags! {
    /// Behaviour flags of a linedef.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LinedefFlags: u16 {
        const IMPASSABLE = 0x0001;
        const BLOCK_MONSTERS = 0x0002;
        const TWO_SIDED = 0x0004;
        const UPPER_UNPEGGED = 0x0008;
        const LOWER_UNPEGGED = 0x0010;
        /// Drawn as one-sided on the automap.
        const SECRET = 0x0020;
        const BLOCK_SOUND = 0x0040;
        const NOT_ON_MAP = 0x0080;
        const ALREADY_ON_MAP = 0x0100;
    }
}

/// Sentinel sidedef index for a linedef without a left side.
pub const NO_SIDEDEF: u16 = 0xFFFF;

/// An entry of the LINEDEFS lump connecting two vertexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linedef {
    pub start: u16,
    pub end: u16,
    pub flags: LinedefFlags,
    pub special: u16,
    pub tag: u16,
    pub right_side: u16,
    /// [`NO_SIDEDEF`] for one-sided lines.
    pub left_side: u16,
}

impl Linedef {
    /// Returns true if the line has a sidedef on its left.
    pub fn is_two_sided(&self) -> bool {
        self.left_side != NO_SIDEDEF
    }
}

impl FixedRecord for Linedef {
    const SIZE: usize = 14;
    const LUMP: &'static str = "LINEDEFS";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            start: reader.read_u16::<LittleEndian>()?,
            end: reader.read_u16::<LittleEndian>()?,
            flags: LinedefFlags::from_bits_retain(reader.read_u16::<LittleEndian>()?),
            special: reader.read_u16::<LittleEndian>()?,
            tag: reader.read_u16::<LittleEndian>()?,
            right_side: reader.read_u16::<LittleEndian>()?,
            left_side: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_u16::<LittleEndian>(self.start)?;
        writer.write_u16::<LittleEndian>(self.end)?;
        writer.write_u16::<LittleEndian>(self.flags.bits())?;
        writer.write_u16::<LittleEndian>(self.special)?;
        writer.write_u16::<LittleEndian>(self.tag)?;
        writer.write_u16::<LittleEndian>(self.right_side)?;
        writer.write_u16::<LittleEndian>(self.left_side)?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, linedefs: &[Linedef]) -> fmt::Result {
    writeln!(f, "  Linedef Data:")?;
    writeln!(f, "  Start  End    Flags  Special Tag    Right  Left")?;
    writeln!(f, "  {}", "-".repeat(50))?;
    for line in linedefs {
        writeln!(
            f,
            "  {:6} {:6} {:6} {:7} {:6} {:6} {:6}",
            line.start,
            line.end,
            line.flags.bits(),
            line.special,
            line.tag,
            line.right_side,
            line.left_side
        )?;
    }
    Ok(())
}
