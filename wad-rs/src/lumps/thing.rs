use crate::error::WadError;
use crate::lumps::fixed_record::FixedRecord;
use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{Read, Write};

bitflags! {
    /// Spawn flags of a map thing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ThingFlags: u16 {
        /// Present on skill levels 1 and 2.
        const EASY = 0x0001;
        /// Present on skill level 3.
        const MEDIUM = 0x0002;
        /// Present on skill levels 4 and 5.
        const HARD = 0x0004;
        /// Waits for the player instead of reacting to sound.
        const DEAF = 0x0008;
        /// Only spawned in multiplayer games.
        const MULTIPLAYER = 0x0010;
    }
}

/// An entry of the THINGS lump: a monster, item or player start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thing {
    pub x: i16,
    pub y: i16,
    /// Facing in degrees, 0 is east.
    pub angle: u16,
    /// The editor number selecting what is spawned.
    pub kind: u16,
    pub flags: ThingFlags,
}

impl FixedRecord for Thing {
    const SIZE: usize = 10;
    const LUMP: &'static str = "THINGS";

    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        Ok(Self {
            x: reader.read_i16::<LittleEndian>()?,
            y: reader.read_i16::<LittleEndian>()?,
            angle: reader.read_u16::<LittleEndian>()?,
            kind: reader.read_u16::<LittleEndian>()?,
            // Unknown bits are kept so the record writes back unchanged.
            flags: ThingFlags::from_bits_retain(reader.read_u16::<LittleEndian>()?),
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_i16::<LittleEndian>(self.x)?;
        writer.write_i16::<LittleEndian>(self.y)?;
        writer.write_u16::<LittleEndian>(self.angle)?;
        writer.write_u16::<LittleEndian>(self.kind)?;
        writer.write_u16::<LittleEndian>(self.flags.bits())?;
        Ok(())
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, things: &[Thing]) -> fmt::Result {
    writeln!(f, "  Thing Data:")?;
    writeln!(f, "  X      Y      Angle  Type   Flags")?;
    writeln!(f, "  {}", "-".repeat(40))?;
    for thing in things {
        writeln!(
            f,
            "  {:6} {:6} {:6} {:6} {:6}",
            thing.x,
            thing.y,
            thing.angle,
            thing.kind,
            thing.flags.bits()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lumps::fixed_record::{decode_records, encode_records};

    #[test]
    fn decodes_player_start() {
        // x=-32, y=64, angle=90, type=1 (player 1 start), flags=7
        let bytes = [0xE0, 0xFF, 0x40, 0x00, 0x5A, 0x00, 0x01, 0x00, 0x07, 0x00];
        let things = decode_records::<Thing>(&bytes).unwrap();
        assert_eq!(things.len(), 1);
        assert_eq!(things[0].x, -32);
        assert_eq!(things[0].y, 64);
        assert_eq!(things[0].angle, 90);
        assert_eq!(things[0].kind, 1);
        assert_eq!(
            things[0].flags,
            ThingFlags::EASY | ThingFlags::MEDIUM | ThingFlags::HARD
        );
        assert_eq!(encode_records(&things).unwrap(), bytes);
    }

    #[test]
    fn unknown_flag_bits_survive() {
        let thing = Thing {
            x: 0,
            y: 0,
            angle: 0,
            kind: 3004,
            flags: ThingFlags::from_bits_retain(0x0120),
        };
        let bytes = encode_records(&[thing]).unwrap();
        assert_eq!(decode_records::<Thing>(&bytes).unwrap(), vec![thing]);
    }

    #[test]
    fn rejects_partial_record() {
        assert!(matches!(
            decode_records::<Thing>(&[0u8; 15]),
            Err(WadError::Format(_))
        ));
    }
}
