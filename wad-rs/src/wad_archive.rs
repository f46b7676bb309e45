use crate::{
    codec_registry::{self, DecodeOptions, LumpData, LumpKind},
    error::WadError,
    ext::io_ext::{check_name, NAME_WIDTH},
    marker_section::Section,
    utility::hex_dump::hex_dump,
    wad_config::WadConfig,
    wad_header::{DirectoryEntry, WadHeader, DIRECTORY_ENTRY_SIZE, HEADER_SIZE},
    wad_lump::{Lump, LumpLocation},
};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

/// Lumps that make up a map, in the order they follow the map marker.
pub const MAP_LUMPS: [&str; 10] = [
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS",
    "REJECT", "BLOCKMAP",
];

/// An in-memory WAD archive: a header and an ordered list of lumps.
///
/// `WadArchive` is the main entry point of the crate. Every lump payload is read into
/// memory on load; edits are direct changes to the lump list and nothing touches the
/// disk again until [`WadArchive::save`].
///
/// # Usage
///
/// ```rust,no_run
/// use wad_rs::wad_archive::WadArchive;
///
/// let mut wad = WadArchive::load("path/to/doom.wad").unwrap();
/// let index = wad.find_index("PLAYPAL").unwrap();
/// println!("PLAYPAL is {} bytes", wad.lumps()[index].size());
///
/// wad.import_flat("MYFLAT", vec![0u8; 4096]).unwrap();
/// wad.save("path/to/out.wad").unwrap();
/// ```
///
/// # Layout on Save
///
/// The header is followed by every payload back to back in lump order, then by the
/// directory. Offsets are always recomputed from the current lump list, so an archive
/// saved by this crate loads and saves back byte for byte.
#[derive(Debug, Clone)]
pub struct WadArchive {
    /// Header as last read from or written to disk.
    header: WadHeader,
    /// Lumps in on-disk order.
    lumps: Vec<Lump>,
    config: WadConfig,
}

/// The outcome of decoding one lump during [`WadArchive::decode_all`].
#[derive(Debug)]
pub struct DecodedLump<'a> {
    pub index: usize,
    pub lump: &'a Lump,
    /// `Ok(None)` when no codec applies to the lump or it is empty.
    pub result: Result<Option<LumpData>, WadError>,
}

impl Default for WadArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl WadArchive {
    /// Creates an empty archive with the default configuration.
    pub fn new() -> Self {
        Self::with_config(WadConfig::default())
    }

    /// Creates an empty archive tagged as `config.tag`.
    pub fn with_config(config: WadConfig) -> Self {
        WadArchive {
            header: WadHeader::empty(config.tag),
            lumps: Vec::new(),
            config,
        }
    }

    /// Creates an archive holding the empty `MAP01` map and the flat, texture and
    /// sprite marker pairs.
    pub fn with_default_layout() -> Result<Self, WadError> {
        Self::with_default_layout_config(WadConfig::default())
    }

    /// [`with_default_layout`](Self::with_default_layout) tagged as `config.tag`.
    pub fn with_default_layout_config(config: WadConfig) -> Result<Self, WadError> {
        let mut wad = Self::with_config(config);
        wad.create_empty_map("MAP01")?;
        for marker in ["F_START", "F_END", "T_START", "T_END", "S_START", "S_END"] {
            wad.add_lump(marker, Vec::new())?;
        }
        tracing::info!("Initialized an empty WAD");
        Ok(wad)
    }

    /// Appends a map marker followed by empty map lumps.
    pub fn create_empty_map(&mut self, map_name: &str) -> Result<(), WadError> {
        check_name(map_name, NAME_WIDTH)?;
        self.add_lump(map_name, Vec::new())?;
        for lump in MAP_LUMPS {
            self.add_lump(lump, Vec::new())?;
        }
        tracing::info!("Created empty map: {map_name}");
        Ok(())
    }

    /// Loads the archive at `path` if it exists, otherwise starts from the default layout.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self, WadError> {
        Self::open_or_create_with_config(path, WadConfig::default())
    }

    /// [`open_or_create`](Self::open_or_create) with options. A newly created archive
    /// is tagged as `config.tag`; an existing file keeps its own tag.
    pub fn open_or_create_with_config<P: AsRef<Path>>(
        path: P,
        config: WadConfig,
    ) -> Result<Self, WadError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_with_config(path, config)
        } else {
            tracing::info!("Creating new WAD file: {}", path.display());
            Self::with_default_layout_config(config)
        }
    }

    /// Loads the archive at `path` with the default configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WadError> {
        Self::load_with_config(path, WadConfig::default())
    }

    /// Loads the archive at `path`, decoding its lumps according to `config`.
    pub fn load_with_config<P: AsRef<Path>>(path: P, config: WadConfig) -> Result<Self, WadError> {
        let path = path.as_ref();
        tracing::info!("Reading WAD file: {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader, config)
    }

    /// Reads a whole archive from a seekable stream.
    ///
    /// Any read outside the stream, including a short header, aborts the load.
    pub fn read_from<R: Read + Seek>(reader: &mut R, config: WadConfig) -> Result<Self, WadError> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        if stream_len < HEADER_SIZE as u64 {
            return Err(WadError::format(format!(
                "truncated header: {stream_len} bytes"
            )));
        }

        let header = WadHeader::read(reader)?;
        if !header.is_known_tag() {
            tracing::warn!("Unexpected WAD tag {:?}", header.tag_str());
        }

        let directory_end =
            header.directory_offset as u64 + header.lump_count as u64 * DIRECTORY_ENTRY_SIZE as u64;
        if directory_end > stream_len {
            return Err(WadError::format(format!(
                "directory of {} entries at offset {} extends past end of file ({stream_len} bytes)",
                header.lump_count, header.directory_offset
            )));
        }

        reader.seek(SeekFrom::Start(header.directory_offset as u64))?;
        let entries = (0..header.lump_count)
            .map(|_| DirectoryEntry::read(reader))
            .collect::<Result<Vec<_>, _>>()?;

        let mut lumps = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.offset as u64 + entry.size as u64 > stream_len {
                return Err(WadError::format(format!(
                    "lump {} (#{index}) at {}+{} extends past end of file ({stream_len} bytes)",
                    entry.name, entry.offset, entry.size
                )));
            }
            reader.seek(SeekFrom::Start(entry.offset as u64))?;
            let mut data = vec![0u8; entry.size as usize];
            reader.read_exact(&mut data)?;
            let location = LumpLocation {
                offset: entry.offset,
                size: entry.size,
            };
            lumps.push(Lump::with_location(entry.name, data, location));
        }

        tracing::debug!("Loaded {} lumps from WAD file", lumps.len());
        Ok(WadArchive {
            header,
            lumps,
            config,
        })
    }

    /// Writes the archive to `path`, replacing any existing file.
    ///
    /// A failed save leaves the file in an undefined state; the in-memory archive is
    /// unchanged and can be saved again.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), WadError> {
        let path = path.as_ref();
        tracing::info!("Saving WAD file: {}", path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        tracing::debug!("WAD file saved successfully");
        Ok(())
    }

    /// Serializes the header, every payload and the directory, refreshing the stored
    /// header and lump locations to match what was written.
    pub fn write_to<W: Write>(&mut self, writer: &mut W) -> Result<(), WadError> {
        let too_large = || WadError::format("archive does not fit 32-bit offsets");
        let lump_count = u32::try_from(self.lumps.len()).map_err(|_| too_large())?;

        let mut next = HEADER_SIZE as u32;
        let mut locations = Vec::with_capacity(self.lumps.len());
        for lump in &self.lumps {
            let size = u32::try_from(lump.size()).map_err(|_| too_large())?;
            locations.push(LumpLocation { offset: next, size });
            next = next.checked_add(size).ok_or_else(too_large)?;
        }
        let header = WadHeader {
            tag: self.header.tag,
            lump_count,
            directory_offset: next,
        };

        header.write(writer)?;
        for lump in &self.lumps {
            writer.write_all(lump.data())?;
        }
        for (lump, location) in self.lumps.iter().zip(&locations) {
            DirectoryEntry {
                offset: location.offset,
                size: location.size,
                name: lump.name().to_string(),
            }
            .write(writer)?;
        }

        self.header = header;
        for (lump, location) in self.lumps.iter_mut().zip(locations) {
            lump.set_location(location);
        }
        Ok(())
    }

    /// Serializes the archive into a new buffer.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, WadError> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Header as last read from or written to disk.
    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    /// Options this archive was created or loaded with.
    pub fn config(&self) -> &WadConfig {
        &self.config
    }

    /// All lumps in directory order.
    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    /// Number of lumps currently in the archive.
    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    /// Returns true if the archive holds no lumps.
    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    /// Appends a lump. Names longer than 8 bytes are rejected, never truncated.
    pub fn add_lump(&mut self, name: &str, data: Vec<u8>) -> Result<usize, WadError> {
        let lump = Lump::new(name, data)?;
        tracing::debug!("Added lump: {name}, size: {} bytes", lump.size());
        self.lumps.push(lump);
        Ok(self.lumps.len() - 1)
    }

    /// Position of the first lump named exactly `name`.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.lumps.iter().position(|lump| lump.name() == name)
    }

    /// Inserts a lump at `index`, shifting the lumps after it.
    pub fn insert_at(&mut self, index: usize, name: &str, data: Vec<u8>) -> Result<(), WadError> {
        if index > self.lumps.len() {
            return Err(WadError::IndexOutOfRange {
                index,
                len: self.lumps.len(),
            });
        }
        let lump = Lump::new(name, data)?;
        tracing::debug!(
            "Inserted lump: {name} at index: {index}, size: {} bytes",
            lump.size()
        );
        self.lumps.insert(index, lump);
        self.forget_layout();
        Ok(())
    }

    /// Removes and returns the lump at `index`.
    pub fn remove_lump(&mut self, index: usize) -> Result<Lump, WadError> {
        if index >= self.lumps.len() {
            return Err(WadError::IndexOutOfRange {
                index,
                len: self.lumps.len(),
            });
        }
        let mut lump = self.lumps.remove(index);
        lump.clear_location();
        self.forget_layout();
        tracing::debug!("Removed lump: {} at index: {index}", lump.name());
        Ok(lump)
    }

    /// Drops every lump's on-disk location after an edit that moves lumps around.
    fn forget_layout(&mut self) {
        for lump in &mut self.lumps {
            lump.clear_location();
        }
    }

    /// Whether the stored header and lump locations still describe the lump list.
    fn layout_is_current(&self) -> bool {
        self.header.lump_count as usize == self.lumps.len()
            && self.lumps.iter().all(|lump| lump.location().is_some())
    }

    /// Replaces the whole payload of the lump at `index`.
    pub fn replace_data(&mut self, index: usize, data: Vec<u8>) -> Result<(), WadError> {
        let len = self.lumps.len();
        let lump = self
            .lumps
            .get_mut(index)
            .ok_or(WadError::IndexOutOfRange { index, len })?;
        tracing::debug!(
            "Replaced lump: {} at index: {index}, size: {} bytes",
            lump.name(),
            data.len()
        );
        lump.replace_data(data);
        Ok(())
    }

    /// Encodes structured records and appends them under `name`, which must be a
    /// registered lump name of the same kind.
    pub fn add_records(&mut self, name: &str, records: &LumpData) -> Result<usize, WadError> {
        let kind = codec_registry::lookup(name)
            .ok_or_else(|| WadError::UnknownLumpKind(name.to_string()))?;
        if kind != records.kind() {
            return Err(WadError::KindMismatch {
                name: name.to_string(),
                expected: kind.name(),
                found: records.kind().name(),
            });
        }
        self.add_lump(name, records.encode()?)
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict_sprites: self.config.strict_sprites,
        }
    }

    fn kind_in(&self, index: usize, sections: &[(Section, usize, usize)]) -> Option<LumpKind> {
        let lump = self.lumps.get(index)?;
        codec_registry::lookup(lump.name()).or_else(|| {
            sections
                .iter()
                .find(|(_, start, end)| *start < index && index < *end)
                .and_then(|(section, _, _)| section.kind())
        })
    }

    /// The codec that applies to the lump at `index`: by name for map and texture lumps,
    /// by enclosing marker section for flats and sprites.
    pub fn kind_of(&self, index: usize) -> Option<LumpKind> {
        self.kind_in(index, &self.section_ranges())
    }

    /// Decodes the lump at `index`. The result is not cached.
    pub fn decode_lump(&self, index: usize) -> Result<LumpData, WadError> {
        let lump = self.lumps.get(index).ok_or(WadError::IndexOutOfRange {
            index,
            len: self.lumps.len(),
        })?;
        let kind = self
            .kind_of(index)
            .ok_or_else(|| WadError::UnknownLumpKind(lump.name().to_string()))?;
        kind.decode(lump.data(), self.decode_options())
    }

    /// Decodes every non-empty lump that has a codec, collecting a result per lump.
    ///
    /// A lump that fails to decode yields a [`WadError::DecodeFailure`] entry and the
    /// traversal carries on with the next lump.
    pub fn decode_all(&self) -> Vec<DecodedLump<'_>> {
        let sections = self.section_ranges();
        let options = self.decode_options();
        self.lumps.iter().enumerate().fold(
            Vec::with_capacity(self.lumps.len()),
            |mut decoded, (index, lump)| {
                let result = match self.kind_in(index, &sections) {
                    Some(kind) if !lump.data().is_empty() => kind
                        .decode(lump.data(), options)
                        .map(Some)
                        .map_err(|source| WadError::DecodeFailure {
                            index,
                            name: lump.name().to_string(),
                            source: Box::new(source),
                        }),
                    _ => Ok(None),
                };
                if let Err(err) = &result {
                    tracing::error!("{err}");
                }
                decoded.push(DecodedLump {
                    index,
                    lump,
                    result,
                });
                decoded
            },
        )
    }

    /// Writes a description of the archive to `out` and returns the decode failures.
    ///
    /// * verbosity 0 lists index and name
    /// * 1 adds on-disk offset and size
    /// * 2 adds the decoded records of every lump with a codec
    /// * 3 adds a hex dump of the start of each payload
    pub fn dump<W: Write>(&self, out: &mut W, verbosity: u8) -> Result<Vec<WadError>, WadError> {
        writeln!(out, "=== WAD HEADER ===")?;
        writeln!(out, "Type: {}", self.header.tag_str())?;
        let count = self.lumps.len();
        writeln!(out, "Lump count: {count} (0x{count:08x})")?;
        let offset = self.header.directory_offset;
        let stale = if self.layout_is_current() {
            ""
        } else {
            " (as last saved)"
        };
        writeln!(out, "Directory offset: {offset} (0x{offset:08x}){stale}")?;
        writeln!(out)?;
        writeln!(out, "=== LUMPS ===")?;

        if verbosity == 0 {
            writeln!(out, "IDX  NAME")?;
            writeln!(out, "{}", "-".repeat(20))?;
            for (index, lump) in self.lumps.iter().enumerate() {
                writeln!(out, "{index:03} {:<10}", lump.name())?;
            }
            return Ok(Vec::new());
        }

        writeln!(out, "IDX  NAME       OFFSET                  SIZE")?;
        writeln!(out, "{}", "-".repeat(60))?;
        let decoded = if verbosity >= 2 {
            self.decode_all()
        } else {
            Vec::new()
        };

        let mut failures = Vec::new();
        for (index, lump) in self.lumps.iter().enumerate() {
            let size = lump.size();
            match lump.location() {
                Some(location) => writeln!(
                    out,
                    "{index:03} {:<10} {:10} (0x{:08x}) {size:10} (0x{size:08x})",
                    lump.name(),
                    location.offset,
                    location.offset
                )?,
                None => writeln!(
                    out,
                    "{index:03} {:<10} {:>10} {:12} {size:10} (0x{size:08x})",
                    lump.name(),
                    "-",
                    ""
                )?,
            }
        }

        for entry in decoded {
            let show_hex = verbosity >= 3 && !entry.lump.data().is_empty();
            if entry.result.as_ref().is_ok_and(Option::is_none) && !show_hex {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "--- {:03} {} ---", entry.index, entry.lump.name())?;
            match entry.result {
                Ok(Some(data)) => write!(out, "{data}")?,
                Ok(None) => {}
                Err(err) => {
                    writeln!(out, "  !! {err}")?;
                    failures.push(err);
                }
            }
            if show_hex {
                write!(out, "{}", hex_dump(entry.lump.data(), self.config.hex_dump_limit))?;
            }
        }
        Ok(failures)
    }

    /// Checks marker ordering and that every lump with a codec decodes.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), WadError> {
        for lump in &self.lumps {
            check_name(lump.name(), NAME_WIDTH)?;
        }
        for section in Section::ALL {
            let start = self.find_index(section.start());
            let end = self.find_index(section.end());
            if let (Some(start_index), Some(end_index)) = (start, end) {
                if start_index > end_index {
                    return Err(WadError::Ordering {
                        start: section.start().to_string(),
                        end: section.end().to_string(),
                        start_index,
                        end_index,
                    });
                }
            }
        }
        match self
            .decode_all()
            .into_iter()
            .find_map(|entry| entry.result.err())
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lumps::flat::FLAT_SIZE;
    use crate::lumps::thing::{Thing, ThingFlags};
    use crate::lumps::vertex::Vertex;
    use std::io::Cursor;

    fn vertex_bytes() -> Vec<u8> {
        LumpData::Vertexes(vec![Vertex { x: 1, y: 2 }, Vertex { x: -3, y: 4 }])
            .encode()
            .unwrap()
    }

    #[test]
    fn add_lump_checks_name_length() {
        let mut wad = WadArchive::new();
        assert!(matches!(
            wad.add_lump("TOOLONGNAME", vec![1]),
            Err(WadError::NameTooLong { .. })
        ));
        assert_eq!(wad.add_lump("OK8CHAR1", vec![1]).unwrap(), 0);
        assert_eq!(wad.len(), 1);
    }

    #[test]
    fn find_index_returns_first_exact_match() {
        let mut wad = WadArchive::new();
        wad.add_lump("THINGS", vec![]).unwrap();
        wad.add_lump("things", vec![]).unwrap();
        wad.add_lump("THINGS", vec![]).unwrap();
        assert_eq!(wad.find_index("THINGS"), Some(0));
        assert_eq!(wad.find_index("things"), Some(1));
        assert_eq!(wad.find_index("Things"), None);
    }

    #[test]
    fn insert_remove_and_replace() {
        let mut wad = WadArchive::new();
        wad.add_lump("A", vec![]).unwrap();
        wad.add_lump("C", vec![]).unwrap();
        wad.insert_at(1, "B", vec![7]).unwrap();
        wad.insert_at(3, "D", vec![]).unwrap();
        let names: Vec<_> = wad.lumps().iter().map(Lump::name).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);

        assert!(matches!(
            wad.insert_at(9, "E", vec![]),
            Err(WadError::IndexOutOfRange { index: 9, len: 4 })
        ));
        assert_eq!(wad.remove_lump(0).unwrap().name(), "A");
        assert!(wad.remove_lump(3).is_err());

        wad.replace_data(0, vec![8, 9]).unwrap();
        assert_eq!(wad.lumps()[0].data(), &[8, 9]);
        assert!(wad.replace_data(5, vec![]).is_err());
    }

    #[test]
    fn add_records_goes_through_the_registry() {
        let mut wad = WadArchive::new();
        let things = LumpData::Things(vec![Thing {
            x: 10,
            y: 20,
            angle: 0,
            kind: 1,
            flags: ThingFlags::EASY,
        }]);
        let index = wad.add_records("THINGS", &things).unwrap();
        assert_eq!(wad.lumps()[index].size(), 10);
        assert_eq!(wad.decode_lump(index).unwrap(), things);

        assert!(matches!(
            wad.add_records("MYTHINGS", &things),
            Err(WadError::UnknownLumpKind(_))
        ));
        assert!(matches!(
            wad.add_records("VERTEXES", &things),
            Err(WadError::KindMismatch { .. })
        ));
    }

    #[test]
    fn decode_lump_dispatches_by_name_and_section() {
        let mut wad = WadArchive::new();
        wad.add_lump("VERTEXES", vertex_bytes()).unwrap();
        wad.import_flat("FLAT1", vec![3; FLAT_SIZE]).unwrap();
        wad.add_lump("DEMO1", vec![1, 2, 3]).unwrap();

        assert!(matches!(
            wad.decode_lump(0).unwrap(),
            LumpData::Vertexes(v) if v.len() == 2
        ));
        assert_eq!(wad.kind_of(2), Some(LumpKind::Flat));
        assert!(matches!(wad.decode_lump(2).unwrap(), LumpData::Flat(_)));
        assert!(matches!(
            wad.decode_lump(4),
            Err(WadError::UnknownLumpKind(name)) if name == "DEMO1"
        ));
        assert!(matches!(
            wad.decode_lump(10),
            Err(WadError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn decode_all_continues_past_failures() {
        let mut wad = WadArchive::new();
        wad.add_lump("VERTEXES", vec![0; 5]).unwrap();
        wad.add_lump("THINGS", vec![0; 10]).unwrap();
        wad.add_lump("LINEDEFS", vec![]).unwrap();
        wad.add_lump("PLAYPAL", vec![0; 768]).unwrap();

        let decoded = wad.decode_all();
        assert_eq!(decoded.len(), 4);
        assert!(matches!(
            &decoded[0].result,
            Err(WadError::DecodeFailure { index: 0, name, .. }) if name == "VERTEXES"
        ));
        assert!(matches!(&decoded[1].result, Ok(Some(LumpData::Things(t))) if t.len() == 1));
        assert!(matches!(decoded[2].result, Ok(None)));
        assert!(matches!(decoded[3].result, Ok(None)));
    }

    #[test]
    fn dump_verbosity_levels() {
        let mut wad = WadArchive::new();
        wad.add_lump("VERTEXES", vertex_bytes()).unwrap();
        wad.add_lump("SEGS", vec![0; 3]).unwrap();
        wad.to_bytes().unwrap();

        let mut out = Vec::new();
        assert!(wad.dump(&mut out, 0).unwrap().is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Type: PWAD"));
        assert!(text.contains("000 VERTEXES"));
        assert!(!text.contains("OFFSET"));

        let mut out = Vec::new();
        wad.dump(&mut out, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("OFFSET"));
        assert!(text.contains("(0x0000000c)"));
        assert!(!text.contains("Vertex Data"));

        let mut out = Vec::new();
        let failures = wad.dump(&mut out, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Vertex Data"));
        assert!(text.contains("!! Failed to decode lump SEGS (#1)"));
        assert_eq!(failures.len(), 1);
        assert!(!text.contains("00000000  01 00"));

        let mut out = Vec::new();
        wad.dump(&mut out, 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("00000000  01 00 02 00 fd ff 04 00"));
    }

    #[test]
    fn validate_reports_ordering_and_decode_problems() {
        let mut wad = WadArchive::with_default_layout().unwrap();
        assert!(wad.validate().is_ok());

        let start = wad.find_index("S_START").unwrap();
        let marker = wad.remove_lump(start).unwrap();
        wad.insert_at(wad.len(), marker.name(), vec![]).unwrap();
        assert!(matches!(wad.validate(), Err(WadError::Ordering { .. })));
        wad.ensure_markers("S_START", "S_END").unwrap();
        assert!(wad.validate().is_ok());

        wad.import_flat("BADFLAT", vec![0; 10]).unwrap();
        assert!(matches!(
            wad.validate(),
            Err(WadError::DecodeFailure { name, .. }) if name == "BADFLAT"
        ));
    }

    #[test]
    fn default_layout_matches_empty_map_scaffold() {
        let wad = WadArchive::with_default_layout().unwrap();
        let names: Vec<_> = wad.lumps().iter().map(Lump::name).collect();
        assert_eq!(names[0], "MAP01");
        assert_eq!(&names[1..11], &MAP_LUMPS[..]);
        assert_eq!(
            &names[11..],
            ["F_START", "F_END", "T_START", "T_END", "S_START", "S_END"]
        );
        assert!(wad.lumps().iter().all(Lump::is_marker));
        assert!(WadArchive::new().create_empty_map("TOOLONGMAP").is_err());
    }

    #[test]
    fn write_then_read_is_byte_exact() {
        let mut config = WadConfig::new();
        config.tag = *b"IWAD";
        let mut wad = WadArchive::with_config(config.clone());
        wad.add_lump("VERTEXES", vertex_bytes()).unwrap();
        wad.add_lump("S_START", vec![]).unwrap();
        wad.add_lump("DATA", vec![9; 33]).unwrap();

        let bytes = wad.to_bytes().unwrap();
        assert_eq!(&bytes[..4], b"IWAD");
        assert_eq!(wad.header().lump_count, 3);
        assert_eq!(wad.header().directory_offset, 12 + 8 + 33);
        assert_eq!(bytes.len(), 12 + 8 + 33 + 3 * 16);
        assert_eq!(
            wad.lumps()[2].location(),
            Some(LumpLocation {
                offset: 20,
                size: 33
            })
        );

        let mut loaded = WadArchive::read_from(&mut Cursor::new(&bytes), config).unwrap();
        assert_eq!(loaded.lumps(), wad.lumps());
        assert_eq!(loaded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn structural_edits_forget_stale_locations() {
        let mut wad = WadArchive::new();
        wad.add_lump("A", vec![1; 4]).unwrap();
        wad.add_lump("B", vec![2; 4]).unwrap();
        let bytes = wad.to_bytes().unwrap();
        let mut loaded = WadArchive::read_from(&mut Cursor::new(bytes), WadConfig::new()).unwrap();
        assert!(loaded.lumps().iter().all(|lump| lump.location().is_some()));

        let mut out = Vec::new();
        loaded.dump(&mut out, 1).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("as last saved"));

        loaded.insert_at(0, "C", vec![3; 2]).unwrap();
        assert!(loaded.lumps().iter().all(|lump| lump.location().is_none()));
        let mut out = Vec::new();
        loaded.dump(&mut out, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Directory offset: 20 (0x00000014) (as last saved)"));
        assert!(!text.contains("(0x0000000c)"));

        loaded.to_bytes().unwrap();
        let removed = loaded.remove_lump(1).unwrap();
        assert_eq!(removed.location(), None);
        assert!(loaded.lumps().iter().all(|lump| lump.location().is_none()));

        loaded.to_bytes().unwrap();
        loaded.add_lump("D", vec![]).unwrap();
        let mut out = Vec::new();
        loaded.dump(&mut out, 0).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(as last saved)"));
    }

    #[test]
    fn default_layout_takes_the_configured_tag() {
        let mut config = WadConfig::new();
        config.parse("tag = IWAD").unwrap();
        let mut wad = WadArchive::with_default_layout_config(config).unwrap();
        assert_eq!(&wad.to_bytes().unwrap()[..4], b"IWAD");
        assert_eq!(wad.find_index("MAP01"), Some(0));
    }

    #[test]
    fn read_accepts_garbage_after_name_terminator() {
        let mut wad = WadArchive::new();
        wad.add_lump("E1M1", Vec::new()).unwrap();
        wad.add_lump("THINGS", vec![0; 10]).unwrap();
        let mut bytes = wad.to_bytes().unwrap();

        // Name field of the first directory entry, after the 10-byte payload.
        let name = 12 + 10 + 8;
        bytes[name..name + 8].copy_from_slice(b"E1M1\0\x01\0\0");
        let loaded = WadArchive::read_from(&mut Cursor::new(bytes), WadConfig::new()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.lumps()[0].name(), "E1M1");
        assert_eq!(loaded.find_index("THINGS"), Some(1));
    }

    #[test]
    fn read_rejects_out_of_range_data() {
        assert!(matches!(
            WadArchive::read_from(&mut Cursor::new(b"PWAD\0\0".to_vec()), WadConfig::new()),
            Err(WadError::Format(_))
        ));

        let mut wad = WadArchive::new();
        wad.add_lump("DATA", vec![1; 8]).unwrap();
        let bytes = wad.to_bytes().unwrap();

        let mut bad_directory = bytes.clone();
        bad_directory[4] = 2;
        assert!(matches!(
            WadArchive::read_from(&mut Cursor::new(bad_directory), WadConfig::new()),
            Err(WadError::Format(_))
        ));

        let mut bad_lump = bytes;
        // Size field of the only directory entry.
        bad_lump[20 + 4] = 0xFF;
        assert!(matches!(
            WadArchive::read_from(&mut Cursor::new(bad_lump), WadConfig::new()),
            Err(WadError::Format(_))
        ));
    }
}
