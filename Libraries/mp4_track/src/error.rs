//! Error types for parsing and patching (thiserror-based).

use thiserror::Error;

use crate::format_fourcc;

/// Everything that can go wrong while reading or patching a file.
#[derive(Error, Debug)]
pub enum Mp4Error {
    /// A read ran past the end of the source. The file is shorter than its
    /// own box sizes claim.
    #[error("Truncated input: needed {needed} bytes at offset {offset}")]
    TruncatedInput { offset: u64, needed: usize },

    /// A declared box size is smaller than the header that declares it.
    #[error("Malformed box '{}' at offset {offset}: size {size} is smaller than its header", format_fourcc(.box_type))]
    MalformedBox { offset: u64, box_type: [u8; 4], size: u64 },

    /// A box end that cannot be represented as a 64-bit offset.
    #[error("Box at offset {offset} declares size {size}, which overflows a 64-bit offset")]
    SizeOverflow { offset: u64, size: u64 },

    #[error("Track {0} not found")]
    TrackNotFound(u32),

    #[error("Track {0} has no sample description box")]
    NoSampleDescription(u32),

    /// The entry count is zero, or the box is too short to hold the header
    /// of its first sample entry.
    #[error("Sample description at offset {offset} has no sample entry to patch")]
    NoSampleEntry { offset: u64 },

    /// A patch offset that does not point at the payload of the expected box.
    #[error("No '{}' box payload starts at offset {offset}", format_fourcc(.box_type))]
    BoxNotFound { offset: u64, box_type: [u8; 4] },

    /// The forced flag cannot be cleared because the sample entry tag it
    /// replaced was never recorded.
    #[error("Cannot clear forced flag at offset {offset}: original sample entry tag of '{}' is unknown", format_fourcc(.tag))]
    UnsupportedDowngrade { offset: u64, tag: [u8; 4] },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Mp4Error>;
