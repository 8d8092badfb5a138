use std::io::{Read, Seek};

use tracing::warn;

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::{format_fourcc, split_version_and_flags};

use super::header::BoxHeader;

// The `Mp4Box` trait defines a generic interface for the boxes this library decodes.
// Each decoder reads only the fields it needs, directly from the source at the
// absolute offsets implied by the resolved header, so nothing is buffered.
//
// Required Methods:
// - `box_type`: Returns the 4-byte type identifier of the box.
// - `read_box`: Decodes the box whose header has already been resolved.
pub trait Mp4Box: Sized {
    fn box_type() -> [u8; 4];

    fn read_box<R: Read + Seek>(cursor: &mut ByteCursor<R>, header: &BoxHeader) -> Result<Self>;
}

/// Reads the version/flags word at the start of a full box payload.
///
/// Only versions 0 and 1 are defined for the boxes decoded here; any other
/// version is logged and then decoded with the version 0 layout.
pub fn read_version_and_flags<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    header: &BoxHeader,
) -> Result<(u8, u32)> {
    let (version, flags) = split_version_and_flags(cursor.read_u32_at(header.payload_offset())?);
    if version > 1 {
        warn!(
            "Box '{}' at offset {} has unknown version {}, reading as version 0",
            format_fourcc(&header.box_type),
            header.offset,
            version
        );
    }
    Ok((version, flags))
}
