use std::io::{Read, Seek};

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::format_fourcc;

use super::generic::Mp4Box;
use super::header::BoxHeader;
use super::HDLR;

// The `HdlrBox` struct represents a Handler Reference Box in the MP4 file format.
// It contains the following fields:
// - `handler_type`: A 4-byte array indicating the type of media (e.g., "vide" for video).
// The handler name that follows is not read.
#[derive(Clone)]
pub struct HdlrBox {
    pub handler_type: [u8; 4],
}

impl std::fmt::Debug for HdlrBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdlrBox")
            .field("box_type", &format_fourcc(&Self::box_type()))
            .field("handler_type", &format_fourcc(&self.handler_type))
            .finish()
    }
}

impl Mp4Box for HdlrBox {
    fn box_type() -> [u8; 4] { HDLR }

    fn read_box<R: Read + Seek>(cursor: &mut ByteCursor<R>, header: &BoxHeader) -> Result<Self> {
        // version/flags (4) + pre_defined (4)
        let handler_type = cursor.read_tag_at(header.payload_offset() + 8)?;
        Ok(HdlrBox { handler_type })
    }
}
