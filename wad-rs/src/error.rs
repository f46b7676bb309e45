use thiserror::Error;

/// Represents all possible errors that can occur in the WAD library.
///
/// This enum is used throughout the crate to provide detailed error information for
/// operations that may fail, such as archive access, lump decoding and I/O operations.
#[derive(Debug, Error)]
pub enum WadError {
    /// Malformed binary data: a size mismatch, a truncated header or directory, or an
    /// offset that points outside the data it indexes.
    #[error("Invalid format: {0}")]
    Format(String),
    /// A lump or texture name does not fit in its fixed-width field.
    #[error("Name too long: {name:?} exceeds {max} bytes")]
    NameTooLong { name: String, max: usize },
    /// No codec is registered for the named lump.
    #[error("Unknown lump kind: {0}")]
    UnknownLumpKind(String),
    /// A marker pair where the start marker comes after the end marker.
    #[error("Marker {start} (#{start_index}) is after {end} (#{end_index})")]
    Ordering {
        start: String,
        end: String,
        start_index: usize,
        end_index: usize,
    },
    /// Wraps the codec error of a single lump during a bulk traversal.
    #[error("Failed to decode lump {name} (#{index}): {source}")]
    DecodeFailure {
        index: usize,
        name: String,
        source: Box<WadError>,
    },
    /// A lump index past the end of the lump list.
    #[error("Lump index {index} out of range (lump count {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Structured records of one kind were supplied for a lump registered as another.
    #[error("Lump {name} holds {expected} records, got {found}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Represents an error that occurs during I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WadError {
    /// Shorthand for a [`WadError::Format`] built from anything printable.
    pub(crate) fn format(message: impl Into<String>) -> Self {
        WadError::Format(message.into())
    }
}
