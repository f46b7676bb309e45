use crate::error::WadError;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;

/// Width of every fixed-size name field in the format (lump names, texture names, flats).
pub const NAME_WIDTH: usize = 8;

/// Checks that `name` is printable ASCII and fits in a field of `width` bytes.
pub fn check_name(name: &str, width: usize) -> Result<(), WadError> {
    if name.len() > width {
        return Err(WadError::NameTooLong {
            name: name.to_string(),
            max: width,
        });
    }
    if let Some(c) = name.bytes().find(|b| !is_printable(*b)) {
        return Err(WadError::format(format!(
            "name {name:?} contains non-printable byte {c:#04x}"
        )));
    }
    Ok(())
}

/// Decodes a zero-padded name field: trailing zero bytes are stripped and the
/// remainder must be printable ASCII.
pub fn decode_name(raw: &[u8]) -> Result<String, WadError> {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let trimmed = &raw[..end];
    if let Some(c) = trimmed.iter().find(|b| !is_printable(**b)) {
        return Err(WadError::format(format!(
            "name field {} contains non-printable byte {c:#04x}",
            hex::encode(raw)
        )));
    }
    // Printable ASCII is always valid UTF-8.
    Ok(trimmed.iter().map(|&b| b as char).collect())
}

/// Decodes a directory entry name the way the engine reads it: everything up to the
/// first zero byte. Bytes after the terminator are ignored.
pub fn decode_directory_name(raw: &[u8]) -> Result<String, WadError> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    if end < raw.len() && raw[end..].iter().any(|&b| b != 0) {
        tracing::debug!(
            "ignoring bytes after the terminator of directory name {}",
            hex::encode(raw)
        );
    }
    decode_name(&raw[..end])
}

fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// Reads fixed-width name fields.
pub trait NameReadExt: Read {
    /// Reads a `width`-byte zero-padded name.
    fn read_name(&mut self, width: usize) -> Result<String, WadError>;
}

impl<T> NameReadExt for T
where
    T: Read,
{
    fn read_name(&mut self, width: usize) -> Result<String, WadError> {
        let mut raw = vec![0u8; width];
        self.read_exact(&mut raw)?;
        decode_name(&raw)
    }
}

/// Writes fixed-width name fields.
pub trait NameWriteExt: Write {
    /// Writes `name` zero-padded to `width` bytes, failing if it does not fit.
    fn write_name(&mut self, name: &str, width: usize) -> Result<(), WadError>;
}

impl<T> NameWriteExt for T
where
    T: Write,
{
    fn write_name(&mut self, name: &str, width: usize) -> Result<(), WadError> {
        check_name(name, width)?;
        self.write_all(name.as_bytes())?;
        for _ in name.len()..width {
            self.write_all(&[0])?;
        }
        Ok(())
    }
}

/// Utility methods for working with seekable streams.
pub trait SeekExt: Seek {
    /// Skips over the given number of bytes from the current position.
    fn skip<P: Copy + 'static>(&mut self, size: P) -> io::Result<u64>
    where
        u64: TryFrom<P>;
}

impl<T> SeekExt for T
where
    T: Seek,
{
    fn skip<P: Copy + 'static>(&mut self, size: P) -> io::Result<u64>
    where
        u64: TryFrom<P>,
    {
        let size = u64::try_from(size).map_err(|_| io::Error::from(io::ErrorKind::InvalidData))?;

        self.seek(SeekFrom::Current(size as i64))
    }
}
