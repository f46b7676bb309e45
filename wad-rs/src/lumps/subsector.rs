use crate::error::WadError;
use crate::lumps::fixed_record::FixedRecord;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

/// An entry of the SSECTORS lump: a convex run of segs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subsector {
    pub seg_count: u16,
    pub first_seg: u16,
}

impl FixedRecord for Subsector {
    const SIZE: usize = 4;
    const LUMP: &'static str = "SSECTORS";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            seg_count: reader.read_u16::<LittleEndian>()?,
            first_seg: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_u16::<LittleEndian>(self.seg_count)?;
        writer.write_u16::<LittleEndian>(self.first_seg)?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, subsectors: &[Subsector]) -> fmt::Result {
    writeln!(f, "  Subsector Data:")?;
    writeln!(f, "  Count  First")?;
    writeln!(f, "  {}", "-".repeat(20))?;
    for subsector in subsectors {
        writeln!(f, "  {:6} {:6}", subsector.seg_count, subsector.first_seg)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lumps::fixed_record::{decode_records, encode_records};

    #[test]
    fn round_trips_seg_runs() {
        let subsectors = vec![
            Subsector {
                seg_count: 4,
                first_seg: 0,
            },
            Subsector {
                seg_count: 3,
                first_seg: 4,
            },
        ];
        let bytes = encode_records(&subsectors).unwrap();
        assert_eq!(bytes, [4, 0, 0, 0, 3, 0, 4, 0]);
        assert_eq!(decode_records::<Subsector>(&bytes).unwrap(), subsectors);
    }

    #[test]
    fn partial_record_is_rejected() {
        assert!(matches!(
            decode_records::<Subsector>(&[0u8; 6]),
            Err(WadError::Format(_))
        ));
    }
}
