use std::io::{Read, Seek};

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::format_fourcc;

use super::generic::{read_version_and_flags, Mp4Box};
use super::header::BoxHeader;
use super::MDHD;

// The `MdhdBox` struct represents a Media Header Box in the MP4 file format.
// Only the language is kept; timestamps, timescale and duration are skipped.
//
// Fields:
// - `version`: 0 or 1, selects 32-bit or 64-bit time fields.
// - `packed_language`: The raw 16-bit field (1 pad bit + three 5-bit letters).
// - `language`: The decoded ISO 639-2/T code (e.g., "und"), absent when the field is 0.
#[derive(Clone)]
pub struct MdhdBox { // Media Header Box
    pub version: u8,
    pub packed_language: u16,
    pub language: Option<String>,
}

impl std::fmt::Debug for MdhdBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MdhdBox")
            .field("box_type", &format_fourcc(&Self::box_type()))
            .field("version", &self.version)
            .field("packed_language", &format!("0x{:04X}", self.packed_language))
            .field("language", &self.language)
            .finish()
    }
}

impl Mp4Box for MdhdBox {
    fn box_type() -> [u8; 4] { MDHD }

    // Payload layout after the version/flags word:
    // - v1: creation (8), modification (8), timescale (4), duration (8).
    // - v0: creation (4), modification (4), timescale (4), duration (4).
    // - then 2 bytes of packed language.
    fn read_box<R: Read + Seek>(cursor: &mut ByteCursor<R>, header: &BoxHeader) -> Result<Self> {
        let (version, _flags) = read_version_and_flags(cursor, header)?;

        let skip = if version == 1 { 8 + 8 + 4 + 8 } else { 4 + 4 + 4 + 4 };
        let packed_language = cursor.read_u16_at(header.payload_offset() + 4 + skip)?;

        Ok(MdhdBox {
            version,
            packed_language,
            language: decode_language(packed_language),
        })
    }
}

/// Decodes the packed ISO 639-2/T language code: three 5-bit letters, each
/// stored as `letter - 0x60`. Only the low 15 bits are the code: the pad bit
/// is masked off before anything else, so `0x8000` decodes to no language
/// rather than to three backticks. A zero code means no language was recorded.
pub fn decode_language(packed: u16) -> Option<String> {
    let code = packed & 0x7FFF;
    if code == 0 {
        return None;
    }
    let letter = |shift: u16| (((code >> shift) & 0x1F) as u8 + 0x60) as char;
    Some([letter(10), letter(5), letter(0)].iter().collect())
}
