//! Marker-delimited sections of an archive.
//!
//! Patches, sprites and flats live between zero-length `X_START`/`X_END` marker lumps.
//! Imports keep those pairs present and correctly ordered, and place each new lump
//! directly before the end marker.

use crate::codec_registry::LumpKind;
use crate::error::WadError;
use crate::ext::io_ext::{check_name, NAME_WIDTH};
use crate::wad_archive::WadArchive;

/// A logical section bounded by a pair of marker lumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `P_START`/`P_END`: wall patches.
    Patches,
    /// `S_START`/`S_END`: sprites.
    Sprites,
    /// `F_START`/`F_END`: flats.
    Flats,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Patches, Section::Sprites, Section::Flats];

    pub fn start(self) -> &'static str {
        match self {
            Section::Patches => "P_START",
            Section::Sprites => "S_START",
            Section::Flats => "F_START",
        }
    }

    pub fn end(self) -> &'static str {
        match self {
            Section::Patches => "P_END",
            Section::Sprites => "S_END",
            Section::Flats => "F_END",
        }
    }

    /// Codec for the lumps inside this section. Patches use the picture format, which
    /// this crate does not decode.
    pub fn kind(self) -> Option<LumpKind> {
        match self {
            Section::Patches => None,
            Section::Sprites => Some(LumpKind::Sprite),
            Section::Flats => Some(LumpKind::Flat),
        }
    }
}

impl WadArchive {
    /// Makes sure both markers exist with `start` before `end`, and returns their indices.
    ///
    /// A missing marker is appended. If the start marker then comes after the end marker,
    /// both are removed and appended again in order; lumps that sat between them stay
    /// where they are. The indices are only valid until the next structural edit.
    pub fn ensure_markers(&mut self, start: &str, end: &str) -> Result<(usize, usize), WadError> {
        check_name(start, NAME_WIDTH)?;
        check_name(end, NAME_WIDTH)?;
        if start == end {
            return Err(WadError::format(format!(
                "start and end marker are both {start}"
            )));
        }

        let start_index = match self.find_index(start) {
            Some(index) => index,
            None => self.add_lump(start, Vec::new())?,
        };
        let end_index = match self.find_index(end) {
            Some(index) => index,
            None => self.add_lump(end, Vec::new())?,
        };
        if start_index < end_index {
            return Ok((start_index, end_index));
        }

        let problem = WadError::Ordering {
            start: start.to_string(),
            end: end.to_string(),
            start_index,
            end_index,
        };
        tracing::warn!("{problem}, moving both markers to the end");
        // start_index > end_index, so removing start first keeps end_index valid.
        self.remove_lump(start_index)?;
        self.remove_lump(end_index)?;
        let start_index = self.add_lump(start, Vec::new())?;
        let end_index = self.add_lump(end, Vec::new())?;
        Ok((start_index, end_index))
    }

    /// [`ensure_markers`](Self::ensure_markers) for a known section.
    pub fn ensure_section(&mut self, section: Section) -> Result<(usize, usize), WadError> {
        self.ensure_markers(section.start(), section.end())
    }

    /// Inserts a lump directly before the section's end marker, creating or repairing the
    /// markers first. Returns the index of the new lump.
    pub fn import_into(
        &mut self,
        section: Section,
        name: &str,
        data: Vec<u8>,
    ) -> Result<usize, WadError> {
        // Reject a bad name before the markers are touched.
        check_name(name, NAME_WIDTH)?;
        let (_, end_index) = self.ensure_section(section)?;
        self.insert_at(end_index, name, data)?;
        Ok(end_index)
    }

    /// Imports a wall patch between `P_START` and `P_END`.
    pub fn import_patch(&mut self, name: &str, data: Vec<u8>) -> Result<usize, WadError> {
        self.import_into(Section::Patches, name, data)
    }

    /// Imports a sprite between `S_START` and `S_END`.
    pub fn import_sprite(&mut self, name: &str, data: Vec<u8>) -> Result<usize, WadError> {
        self.import_into(Section::Sprites, name, data)
    }

    /// Imports a flat between `F_START` and `F_END`.
    pub fn import_flat(&mut self, name: &str, data: Vec<u8>) -> Result<usize, WadError> {
        self.import_into(Section::Flats, name, data)
    }

    /// The well-ordered sections present in the archive with their marker indices.
    pub(crate) fn section_ranges(&self) -> Vec<(Section, usize, usize)> {
        Section::ALL
            .iter()
            .filter_map(|section| {
                let start = self.find_index(section.start())?;
                let end = self.find_index(section.end())?;
                (start < end).then_some((*section, start, end))
            })
            .collect()
    }

    /// The section whose markers enclose the lump at `index`.
    pub fn section_of(&self, index: usize) -> Option<Section> {
        self.section_ranges()
            .into_iter()
            .find(|(_, start, end)| *start < index && index < *end)
            .map(|(section, _, _)| section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(wad: &WadArchive) -> Vec<&str> {
        wad.lumps().iter().map(|lump| lump.name()).collect()
    }

    #[test]
    fn missing_markers_are_appended() {
        let mut wad = WadArchive::new();
        wad.add_lump("PLAYPAL", vec![0; 4]).unwrap();
        assert_eq!(wad.ensure_markers("S_START", "S_END").unwrap(), (1, 2));
        assert_eq!(names(&wad), ["PLAYPAL", "S_START", "S_END"]);
    }

    #[test]
    fn ensure_markers_is_idempotent() {
        let mut wad = WadArchive::new();
        wad.add_lump("S_START", vec![]).unwrap();
        wad.add_lump("TROOA1", vec![1]).unwrap();
        wad.add_lump("S_END", vec![]).unwrap();
        let before = wad.lumps().to_vec();

        assert_eq!(wad.ensure_markers("S_START", "S_END").unwrap(), (0, 2));
        assert_eq!(wad.ensure_markers("S_START", "S_END").unwrap(), (0, 2));
        assert_eq!(wad.lumps(), &before[..]);
    }

    #[test]
    fn misordered_markers_are_moved_to_the_end() {
        let mut wad = WadArchive::new();
        wad.add_lump("S_END", vec![]).unwrap();
        wad.add_lump("TROOA1", vec![1]).unwrap();
        wad.add_lump("S_START", vec![]).unwrap();
        wad.add_lump("PLAYPAL", vec![2]).unwrap();

        assert_eq!(wad.ensure_markers("S_START", "S_END").unwrap(), (2, 3));
        assert_eq!(names(&wad), ["TROOA1", "PLAYPAL", "S_START", "S_END"]);
    }

    #[test]
    fn lone_end_marker_gets_a_start_before_it() {
        let mut wad = WadArchive::new();
        wad.add_lump("F_END", vec![]).unwrap();
        wad.add_lump("COLORMAP", vec![0]).unwrap();
        let (start, end) = wad.ensure_section(Section::Flats).unwrap();
        assert!(start < end);
        assert_eq!(names(&wad), ["COLORMAP", "F_START", "F_END"]);
    }

    #[test]
    fn sprite_imports_keep_call_order() {
        let mut wad = WadArchive::new();
        wad.add_lump("S_START", vec![]).unwrap();
        wad.add_lump("S_END", vec![]).unwrap();
        wad.add_lump("ENDOOM", vec![0]).unwrap();
        for name in ["SPR1", "SPR2", "SPR3"] {
            wad.import_sprite(name, vec![0; 10]).unwrap();
        }
        assert_eq!(
            names(&wad),
            ["S_START", "SPR1", "SPR2", "SPR3", "S_END", "ENDOOM"]
        );
    }

    #[test]
    fn imports_create_their_sections() {
        let mut wad = WadArchive::new();
        assert_eq!(wad.import_patch("WALL00_1", vec![1]).unwrap(), 1);
        assert_eq!(wad.import_flat("FLOOR0_1", vec![0; 4096]).unwrap(), 4);
        assert_eq!(
            names(&wad),
            ["P_START", "WALL00_1", "P_END", "F_START", "FLOOR0_1", "F_END"]
        );
        assert_eq!(wad.section_of(1), Some(Section::Patches));
        assert_eq!(wad.section_of(4), Some(Section::Flats));
        assert_eq!(wad.section_of(3), None);
    }

    #[test]
    fn bad_import_name_leaves_archive_untouched() {
        let mut wad = WadArchive::new();
        assert!(matches!(
            wad.import_sprite("TOOLONGNAME", vec![]),
            Err(WadError::NameTooLong { .. })
        ));
        assert!(wad.is_empty());
    }
}
