//! The REJECT lump is a sector-by-sector visibility bit array. It is carried as
//! opaque bytes; decode and encode are both the identity.

use std::fmt;

pub fn decode(bytes: &[u8]) -> Vec<u8> {
    bytes.to_vec()
}

pub fn encode(reject: &[u8]) -> Vec<u8> {
    reject.to_vec()
}

pub(crate) fn fmt_table(f: &mut fmt::Formatter<'_>, reject: &[u8]) -> fmt::Result {
    let set_bits: u32 = reject.iter().map(|b| b.count_ones()).sum();
    writeln!(f, "  Reject Data:")?;
    writeln!(
        f,
        "  {} bytes, {} of {} bits set",
        reject.len(),
        set_bits,
        reject.len() * 8
    )
}
