//! # MP4 Track Flags
//!
//! This library inspects and edits the track selection flags of MP4 files
//! (ISO base media file format) in place, without rewriting or re-encoding
//! anything.
//!
//! ## Structure of an MP4 File
//! An MP4 file is a tree of **boxes** (also called atoms). Every box starts
//! with a header that holds its size and a 4-character type, followed by a
//! payload that is either raw data or more boxes.
//!
//! ### Box Header
//! - **Size**: 32-bit big-endian, covering the header and the payload.
//!   - `1` means a 64-bit size follows the type (16-byte header).
//!   - `0` means the box runs to the end of its parent region.
//! - **Type**: a 4-character code such as `moov`, `trak` or `tkhd`.
//!
//! ### Boxes Used Here
//! ```text
//! moov
//! └── trak                      one per track
//!     ├── tkhd                  track id, flags (bit 0 = default track)
//!     └── mdia
//!         ├── mdhd              packed ISO 639-2 language
//!         ├── hdlr              handler subtype (vide, soun, subt, ...)
//!         └── minf
//!             └── stbl
//!                 └── stsd      first sample entry tag ("fcd " = forced)
//! ```
//!
//! ## Implementation in This Library
//! - `cursor`: absolute-offset big-endian reads over any `Read + Seek` source.
//! - `boxes`: the box header resolver and the per-box decoders.
//! - `walker`: the generic region walk shared by every container level.
//! - `reader`: extracts one `TrackRecord` per valid `trak`.
//! - `writer`: patches the default bit and the forced tag in place.
//! - `editor`: parse, look up and patch a track through a single file handle.
//!
//! The forced flag is a convention, not a standard field: a track is treated
//! as forced when its first sample entry tag contains `fcd`.

pub mod boxes;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod reader;
pub mod track;
pub mod walker;
pub mod writer;

pub use editor::{apply_track_flag, set_track_flag, ParseTrackFlagError, TrackFlag};
pub use error::{Mp4Error, Result};
pub use reader::{parse, read_tracks};
pub use track::{MediaType, TrackRecord};
pub use writer::{patch_default, patch_forced, set_default_flag, set_forced_tag};

/// Renders a 4-character code for logs and listings, replacing anything that
/// is not printable ASCII with `?`.
pub fn format_fourcc(fourcc: &[u8; 4]) -> String {
    fourcc
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
        .collect()
}

/// Splits the 4-byte version/flags word that starts every full box.
pub fn split_version_and_flags(word: u32) -> (u8, u32) {
    ((word >> 24) as u8, word & 0x00FF_FFFF)
}
