//! Track records produced by a parse.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::format_fourcc;

/// Media type classified from the `hdlr` subtype. Subtypes without a mapping
/// are kept verbatim in `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Video,
    Audio,
    Subtitle,
    /// No `hdlr` box was found for the track.
    Unknown,
    Other([u8; 4]),
}

impl MediaType {
    pub fn from_handler(handler_type: &[u8; 4]) -> Self {
        match handler_type {
            b"vide" => MediaType::Video,
            b"soun" => MediaType::Audio,
            b"subt" | b"sbtl" | b"text" => MediaType::Subtitle,
            other => MediaType::Other(*other),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Video => f.write_str("video"),
            MediaType::Audio => f.write_str("audio"),
            MediaType::Subtitle => f.write_str("subtitle"),
            MediaType::Unknown => f.write_str("unknown"),
            MediaType::Other(tag) => f.write_str(&format_fourcc(tag)),
        }
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One track found under `moov`. Records are snapshots: patching the file
/// does not update them, and the offsets are only valid until the file
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackRecord {
    #[serde(rename = "id")]
    track_id: u32,
    #[serde(rename = "type")]
    media_type: MediaType,
    #[serde(rename = "lang")]
    language: Option<String>,
    #[serde(rename = "default")]
    is_default: bool,
    #[serde(rename = "forced")]
    is_forced: bool,
    #[serde(skip)]
    track_header_flags_offset: u64,
    #[serde(skip)]
    sample_description_offset: Option<u64>,
    #[serde(skip)]
    sample_entry_tag: Option<[u8; 4]>,
}

impl TrackRecord {
    pub fn track_id(&self) -> u32 {
        self.track_id
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Heuristic: the first sample entry tag contains `fcd`.
    pub fn is_forced(&self) -> bool {
        self.is_forced
    }

    /// Absolute offset of the 3-byte `tkhd` flags field.
    pub fn track_header_flags_offset(&self) -> u64 {
        self.track_header_flags_offset
    }

    /// Absolute offset of the `stsd` payload, if the track has one.
    pub fn sample_description_offset(&self) -> Option<u64> {
        self.sample_description_offset
    }

    pub fn sample_entry_tag(&self) -> Option<[u8; 4]> {
        self.sample_entry_tag
    }
}

/// Collects the pieces of a track while its `trak` box is walked.
#[derive(Default, Debug)]
pub(crate) struct TrackBuilder {
    pub track_id: Option<u32>,
    pub is_default: bool,
    pub flags_offset: Option<u64>,
    pub media_type: Option<MediaType>,
    pub language: Option<String>,
    pub is_forced: bool,
    pub sample_description_offset: Option<u64>,
    pub sample_entry_tag: Option<[u8; 4]>,
}

impl TrackBuilder {
    /// Returns `None` when the track has no `tkhd` or its id is 0.
    pub fn build(self) -> Option<TrackRecord> {
        let track_id = self.track_id.filter(|&id| id != 0)?;
        let track_header_flags_offset = self.flags_offset?;
        Some(TrackRecord {
            track_id,
            media_type: self.media_type.unwrap_or(MediaType::Unknown),
            language: self.language,
            is_default: self.is_default,
            is_forced: self.is_forced,
            track_header_flags_offset,
            sample_description_offset: self.sample_description_offset,
            sample_entry_tag: self.sample_entry_tag,
        })
    }
}
