use crate::error::WadError;
use crate::ext::io_ext::{decode_directory_name, NameWriteExt, NAME_WIDTH};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Size of the archive header in bytes.
pub const HEADER_SIZE: usize = 12;
/// Size of one directory entry in bytes.
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

/// Tag of a game's main data archive.
pub const IWAD: [u8; 4] = *b"IWAD";
/// Tag of a patch archive layered over an IWAD.
pub const PWAD: [u8; 4] = *b"PWAD";

/// The 12-byte header at the start of every WAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WadHeader {
    /// Four ASCII bytes, `IWAD` or `PWAD` in practice.
    pub tag: [u8; 4],
    pub lump_count: u32,
    pub directory_offset: u32,
}

impl WadHeader {
    /// Header of an empty archive with the given tag.
    pub fn empty(tag: [u8; 4]) -> Self {
        Self {
            tag,
            lump_count: 0,
            directory_offset: HEADER_SIZE as u32,
        }
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        let mut tag = [0u8; 4];
        reader.read_exact(&mut tag)?;
        Ok(Self {
            tag,
            lump_count: reader.read_u32::<LittleEndian>()?,
            directory_offset: reader.read_u32::<LittleEndian>()?,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_all(&self.tag)?;
        writer.write_u32::<LittleEndian>(self.lump_count)?;
        writer.write_u32::<LittleEndian>(self.directory_offset)?;
        Ok(())
    }

    /// Returns true for `IWAD` and `PWAD`.
    pub fn is_known_tag(&self) -> bool {
        self.tag == IWAD || self.tag == PWAD
    }

    /// The tag as text, with non-printable bytes replaced.
    pub fn tag_str(&self) -> String {
        self.tag
            .iter()
            .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '?' })
            .collect()
    }
}

/// One 16-byte entry of the lump directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub offset: u32,
    pub size: u32,
    pub name: String,
}

impl DirectoryEntry {
    /// Reads one entry. The name ends at its first zero byte.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, WadError> {
        let offset = reader.read_u32::<LittleEndian>()?;
        let size = reader.read_u32::<LittleEndian>()?;
        let mut raw = [0u8; NAME_WIDTH];
        reader.read_exact(&mut raw)?;
        Ok(Self {
            offset,
            size,
            name: decode_directory_name(&raw)?,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError> {
        writer.write_u32::<LittleEndian>(self.offset)?;
        writer.write_u32::<LittleEndian>(self.size)?;
        writer.write_name(&self.name, NAME_WIDTH)?;
        Ok(())
    }
}
