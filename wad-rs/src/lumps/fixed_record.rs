use crate::error::WadError;
use std::io::{Read, Write};

/// A record with a fixed on-disk size, stored back to back in its lump.
pub trait FixedRecord: Sized {
    /// Size of one record in bytes.
    const SIZE: usize;
    /// Lump name used in error messages.
    const LUMP: &'static str;

    /// Reads one record from the reader.
    fn read<R: Read>(reader: &mut R) -> Result<Self, WadError>;

    /// Writes one record to the writer.
    fn write<W: Write>(&self, writer: &mut W) -> Result<(), WadError>;
}

/// Decodes a lump made of `T` records. The payload length must be a multiple of `T::SIZE`.
pub fn decode_records<T: FixedRecord>(bytes: &[u8]) -> Result<Vec<T>, WadError> {
    if bytes.len() % T::SIZE != 0 {
        return Err(WadError::format(format!(
            "{} lump size {} is not a multiple of {}",
            T::LUMP,
            bytes.len(),
            T::SIZE
        )));
    }
    let mut reader = bytes;
    (0..bytes.len() / T::SIZE)
        .map(|_| T::read(&mut reader))
        .collect()
}

/// Encodes `records` back to back.
pub fn encode_records<T: FixedRecord>(records: &[T]) -> Result<Vec<u8>, WadError> {
    let mut out = Vec::with_capacity(records.len() * T::SIZE);
    for record in records {
        record.write(&mut out)?;
    }
    Ok(out)
}
