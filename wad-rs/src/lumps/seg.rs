use crate::error::WadError;
use crate::lumps::fixed_record::FixedRecord;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

/// An entry of the SEGS lump: a linedef fragment bounding a subsector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seg {
    pub start_vertex: u16,
    pub end_vertex: u16,
    /// Binary angle, 0x10000 is a full turn.
    pub angle: u16,
    pub linedef: u16,
    pub side: u16,
    pub direction: u16,
    pub offset: u16,
}

impl FixedRecord for Seg {
    const SIZE: usize = 14;
    const LUMP: &'static str = "SEGS";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            start_vertex: reader.read_u16::<LittleEndian>()?,
            end_vertex: reader.read_u16::<LittleEndian>()?,
            angle: reader.read_u16::<LittleEndian>()?,
            linedef: reader.read_u16::<LittleEndian>()?,
            side: reader.read_u16::<LittleEndian>()?,
            direction: reader.read_u16::<LittleEndian>()?,
            offset: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_u16::<LittleEndian>(self.start_vertex)?;
        writer.write_u16::<LittleEndian>(self.end_vertex)?;
        writer.write_u16::<LittleEndian>(self.angle)?;
        writer.write_u16::<LittleEndian>(self.linedef)?;
        writer.write_u16::<LittleEndian>(self.side)?;
        writer.write_u16::<LittleEndian>(self.direction)?;
        writer.write_u16::<LittleEndian>(self.offset)?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, segs: &[Seg]) -> fmt::Result {
    writeln!(f, "  Seg Data:")?;
    writeln!(f, "  Start  End    Angle  Line   Side   Dir    Offset")?;
    writeln!(f, "  {}", "-".repeat(50))?;
    for seg in segs {
        writeln!(
            f,
            "  {:6} {:6} {:6} {:6} {:6} {:6} {:6}",
            seg.start_vertex,
            seg.end_vertex,
            seg.angle,
            seg.linedef,
            seg.side,
            seg.direction,
            seg.offset
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lumps::fixed_record::{decode_records, encode_records};

    #[test]
    fn round_trips_every_field() {
        let segs = vec![
            Seg {
                start_vertex: 0,
                end_vertex: 1,
                angle: 0x4000,
                linedef: 12,
                side: 0,
                direction: 0,
                offset: 0,
            },
            Seg {
                start_vertex: 65535,
                end_vertex: 7,
                angle: 0xC000,
                linedef: 3,
                side: 1,
                direction: 1,
                offset: 48,
            },
        ];
        let bytes = encode_records(&segs).unwrap();
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[4..6], &[0x00, 0x40]);
        assert_eq!(decode_records::<Seg>(&bytes).unwrap(), segs);
    }

    #[test]
    fn partial_record_is_rejected() {
        assert!(matches!(
            decode_records::<Seg>(&[0u8; 20]),
            Err(WadError::Format(_))
        ));
    }
}
