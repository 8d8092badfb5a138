use std::io::{Read, Seek};

use tracing::debug;

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::format_fourcc;

use super::generic::Mp4Box;
use super::header::BoxHeader;
use super::STSD;

/// Tag written over the first sample entry type to mark a track as forced.
pub const FORCED_TAG: [u8; 4] = *b"fcd ";

/// Offset of the entry count, relative to the stsd payload.
pub const ENTRY_COUNT_OFFSET: u64 = 4;

/// Offset of the first sample entry type tag, relative to the stsd payload:
/// version/flags (4) + entry count (4) + entry size (4).
pub const SAMPLE_ENTRY_TAG_OFFSET: u64 = 12;

// The `StsdBox` struct represents a Sample Description Box in the MP4 file format.
// Only the first sample entry is looked at; tables with more entries are not supported.
//
// Fields:
// - `payload_offset`: Absolute offset of the stsd payload, used later to patch the entry tag.
// - `entry_count`: Number of sample entries declared by the box.
// - `first_entry_tag`: The type tag of the first sample entry (e.g., `b"mp4a"`), if there is one.
#[derive(Clone)]
pub struct StsdBox { // Sample Description Box
    pub payload_offset: u64,
    pub entry_count: u32,
    pub first_entry_tag: Option<[u8; 4]>,
}

impl StsdBox {
    pub fn is_forced(&self) -> bool {
        self.first_entry_tag.as_ref().map_or(false, is_forced_tag)
    }
}

/// The forced-track convention: the sample entry tag contains `fcd`, in any
/// case. This is a heuristic, not a field defined by ISO 14496-12.
pub fn is_forced_tag(tag: &[u8; 4]) -> bool {
    tag.windows(3).any(|w| w.eq_ignore_ascii_case(b"fcd"))
}

impl std::fmt::Debug for StsdBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StsdBox")
            .field("box_type", &format_fourcc(&Self::box_type()))
            .field("payload_offset", &self.payload_offset)
            .field("entry_count", &self.entry_count)
            .field("first_entry_tag", &self.first_entry_tag.as_ref().map(format_fourcc))
            .finish()
    }
}

impl Mp4Box for StsdBox {
    fn box_type() -> [u8; 4] { STSD }

    fn read_box<R: Read + Seek>(cursor: &mut ByteCursor<R>, header: &BoxHeader) -> Result<Self> {
        let payload_offset = header.payload_offset();
        let entry_count = cursor.read_u32_at(payload_offset + ENTRY_COUNT_OFFSET)?;

        // The first entry header (size + type) must fit inside this box.
        let has_entry_header = header.payload_size() >= SAMPLE_ENTRY_TAG_OFFSET + 4;
        let first_entry_tag = if entry_count > 0 && has_entry_header {
            Some(cursor.read_tag_at(payload_offset + SAMPLE_ENTRY_TAG_OFFSET)?)
        } else {
            debug!(
                "stsd at offset {} has no readable sample entry (entry_count = {})",
                header.offset, entry_count
            );
            None
        };

        Ok(StsdBox {
            payload_offset,
            entry_count,
            first_entry_tag,
        })
    }
}
