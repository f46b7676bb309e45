/// Number of bytes rendered on each hex dump line.
pub const BYTES_PER_LINE: usize = 16;

/// Renders up to `limit` bytes of `data` as a hex dump, 16 bytes per line.
///
/// Each line carries the offset, the bytes in hex and their printable ASCII
/// rendering (`.` for anything else). Lines are newline-terminated.
pub fn hex_dump(data: &[u8], limit: usize) -> String {
    let shown = &data[..data.len().min(limit)];
    let mut out = String::new();
    for (line, chunk) in shown.chunks(BYTES_PER_LINE).enumerate() {
        let hex_pairs: Vec<String> = chunk.iter().map(|b| hex::encode([*b])).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '.' })
            .collect();
        out.push_str(&format!(
            "{:08x}  {:<width$}  {}\n",
            line * BYTES_PER_LINE,
            hex_pairs.join(" "),
            ascii,
            width = BYTES_PER_LINE * 3 - 1
        ));
    }
    out
}
