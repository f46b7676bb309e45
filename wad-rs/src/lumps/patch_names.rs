use crate::error::WadError;
use crate::ext::io_ext::{NameReadExt, NameWriteExt, NAME_WIDTH};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;

/// Decodes a PNAMES lump: a `u32` count followed by that many 8-byte patch names.
pub fn decode(bytes: &[u8]) -> Result<Vec<String>, WadError> {
    if bytes.len() < 4 {
        return Err(WadError::format(format!(
            "PNAMES lump size {} is smaller than its count field",
            bytes.len()
        )));
    }
    let mut reader = bytes;
    let count = reader.read_u32::<LittleEndian>()? as usize;
    let needed = count
        .checked_mul(NAME_WIDTH)
        .filter(|n| *n <= reader.len())
        .ok_or_else(|| {
            WadError::format(format!(
                "PNAMES declares {count} names but holds only {} bytes of names",
                reader.len()
            ))
        })?;
    if reader.len() > needed {
        tracing::warn!(
            "PNAMES has {} trailing bytes after {count} names",
            reader.len() - needed
        );
    }
    (0..count).map(|_| reader.read_name(NAME_WIDTH)).collect()
}

pub fn encode(names: &[String]) -> Result<Vec<u8>, WadError> {
    let count = u32::try_from(names.len())
        .map_err(|_| WadError::format(format!("too many patch names: {}", names.len())))?;
    let mut out = Vec::with_capacity(4 + names.len() * NAME_WIDTH);
    out.write_u32::<LittleEndian>(count)?;
    for name in names {
        out.write_name(name, NAME_WIDTH)?;
    }
    Ok(out)
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    writeln!(f, "  Patch Names:")?;
    writeln!(f, "  Index  Name")?;
    writeln!(f, "  {}", "-".repeat(20))?;
    for (index, name) in names.iter().enumerate() {
        writeln!(f, "  {index:5}  {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn round_trips_names() {
        let list = names(&["WALL00_3", "DOOR2_1", "SW1"]);
        let bytes = encode(&list).unwrap();
        assert_eq!(bytes.len(), 4 + 3 * 8);
        assert_eq!(&bytes[..4], &[3, 0, 0, 0]);
        assert_eq!(decode(&bytes).unwrap(), list);
    }

    #[test]
    fn count_larger_than_payload_is_rejected() {
        let mut bytes = encode(&names(&["SW1"])).unwrap();
        bytes[0] = 2;
        assert!(matches!(decode(&bytes), Err(WadError::Format(_))));
        assert!(matches!(decode(&[1, 0]), Err(WadError::Format(_))));
    }

    #[test]
    fn huge_count_does_not_overflow() {
        assert!(matches!(
            decode(&[0xFF, 0xFF, 0xFF, 0xFF]),
            Err(WadError::Format(_))
        ));
    }
}
