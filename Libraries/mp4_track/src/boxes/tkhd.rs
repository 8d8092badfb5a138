use std::io::{Read, Seek};

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::format_fourcc;

use super::generic::{read_version_and_flags, Mp4Box};
use super::header::BoxHeader;
use super::TKHD;

/// Bit 0 of the track header flags: the track is enabled for automatic
/// selection.
pub const DEFAULT_TRACK_FLAG: u32 = 0x000001;

// The `TkhdBox` struct represents a Track Header Box in the MP4 file format.
// Only the part of the header needed to identify the track and patch its flags is decoded.
//
// Fields:
// - `version`: 0 (32-bit timestamps) or 1 (64-bit timestamps).
// - `flags`: The 24-bit flags field. Bit 0 marks the default track.
// - `track_id`: The unique ID of the track. 0 is reserved and means "unset".
// - `flags_offset`: Absolute offset of the first of the 3 flag bytes (payload + 1).
#[derive(Clone)]
pub struct TkhdBox { // Track Header Box
    pub version: u8,
    pub flags: u32,
    pub track_id: u32,
    pub flags_offset: u64,
}

impl TkhdBox {
    pub fn is_default(&self) -> bool {
        self.flags & DEFAULT_TRACK_FLAG != 0
    }
}

impl std::fmt::Debug for TkhdBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TkhdBox")
            .field("box_type", &format_fourcc(&Self::box_type()))
            .field("version", &self.version)
            .field("flags", &format!("0x{:06X}", self.flags))
            .field("track_id", &self.track_id)
            .field("flags_offset", &self.flags_offset)
            .finish()
    }
}

impl Mp4Box for TkhdBox {
    fn box_type() -> [u8; 4] { TKHD }

    // Payload layout:
    // - 1 byte version, 3 bytes flags.
    // - 8|16 bytes for `creation_time` and `modification_time` (v0|v1).
    // - 4 bytes for `track_id`.
    fn read_box<R: Read + Seek>(cursor: &mut ByteCursor<R>, header: &BoxHeader) -> Result<Self> {
        let payload = header.payload_offset();
        let (version, flags) = read_version_and_flags(cursor, header)?;

        let timestamps = if version == 1 { 8 + 8 } else { 4 + 4 };
        let track_id = cursor.read_u32_at(payload + 4 + timestamps)?;

        Ok(TkhdBox {
            version,
            flags,
            track_id,
            flags_offset: payload + 1,
        })
    }
}
