use crate::error::WadError;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;

/// Size of the blockmap header in bytes.
pub const HEADER_SIZE: usize = 8;

/// The BLOCKMAP lump. Only the grid header is decoded; the offset table and the
/// per-block line lists that follow are kept as an opaque tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blockmap {
    pub origin_x: u16,
    pub origin_y: u16,
    pub blocks_width: u16,
    pub blocks_height: u16,
    pub tail: Vec<u8>,
}

impl Blockmap {
    /// The grid origin as map coordinates. Origins are usually negative and are stored
    /// with the same bits as a signed 16-bit value.
    pub fn origin(&self) -> (i16, i16) {
        (self.origin_x as i16, self.origin_y as i16)
    }

    /// Number of grid cells.
    pub fn block_count(&self) -> usize {
        self.blocks_width as usize * self.blocks_height as usize
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WadError> {
        if bytes.len() < HEADER_SIZE {
            return Err(WadError::format(format!(
                "BLOCKMAP lump size {} is smaller than its {HEADER_SIZE}-byte header",
                bytes.len()
            )));
        }
        let mut reader = bytes;
        Ok(Self {
            origin_x: reader.read_u16::<LittleEndian>()?,
            origin_y: reader.read_u16::<LittleEndian>()?,
            blocks_width: reader.read_u16::<LittleEndian>()?,
            blocks_height: reader.read_u16::<LittleEndian>()?,
            tail: reader.to_vec(),
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, WadError> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.tail.len());
        out.write_u16::<LittleEndian>(self.origin_x)?;
        out.write_u16::<LittleEndian>(self.origin_y)?;
        out.write_u16::<LittleEndian>(self.blocks_width)?;
        out.write_u16::<LittleEndian>(self.blocks_height)?;
        out.extend_from_slice(&self.tail);
        Ok(out)
    }
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, blockmap: &Blockmap) -> fmt::Result {
    let (x, y) = blockmap.origin();
    writeln!(f, "  Blockmap Data:")?;
    writeln!(f, "  Origin   ({x}, {y})")?;
    writeln!(
        f,
        "  Grid     {} x {} ({} blocks)",
        blockmap.blocks_width,
        blockmap.blocks_height,
        blockmap.block_count()
    )?;
    writeln!(f, "  Tail     {} bytes", blockmap.tail.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_is_kept_verbatim() {
        let mut bytes = vec![0x80, 0xFF, 0x00, 0xFE, 0x02, 0x00, 0x03, 0x00];
        bytes.extend_from_slice(&[0x0A, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xDE, 0xAD]);
        let blockmap = Blockmap::decode(&bytes).unwrap();
        assert_eq!(blockmap.origin(), (-128, -512));
        assert_eq!(blockmap.block_count(), 6);
        assert_eq!(blockmap.tail.len(), 8);
        assert_eq!(blockmap.encode().unwrap(), bytes);
    }

    #[test]
    fn short_header_is_a_format_error() {
        assert!(matches!(
            Blockmap::decode(&[0u8; 7]),
            Err(WadError::Format(_))
        ));
    }
}
