use crate::error::WadError;
use crate::ext::io_ext::{check_name, NAME_WIDTH};

/// Where a lump was stored in the file it was last loaded from or saved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LumpLocation {
    pub offset: u32,
    pub size: u32,
}

/// A named binary record of the archive.
///
/// Names are at most 8 printable ASCII bytes, case-sensitive, and need not be unique.
/// The payload is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lump {
    name: String,
    data: Vec<u8>,
    location: Option<LumpLocation>,
}

impl Lump {
    /// Creates a lump, rejecting names longer than 8 bytes.
    pub fn new(name: &str, data: Vec<u8>) -> Result<Self, WadError> {
        check_name(name, NAME_WIDTH)?;
        Ok(Self {
            name: name.to_string(),
            data,
            location: None,
        })
    }

    pub(crate) fn with_location(name: String, data: Vec<u8>, location: LumpLocation) -> Self {
        Self {
            name,
            data,
            location: Some(location),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Offset and size on disk, if the lump was loaded or saved since its last change.
    pub fn location(&self) -> Option<LumpLocation> {
        self.location
    }

    /// Returns true for zero-length lumps such as section markers.
    pub fn is_marker(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn set_location(&mut self, location: LumpLocation) {
        self.location = Some(location);
    }

    pub(crate) fn clear_location(&mut self) {
        self.location = None;
    }

    /// Replaces the whole payload. The on-disk location no longer applies.
    pub fn replace_data(&mut self, data: Vec<u8>) {
        self.data = data;
        self.location = None;
    }
}
