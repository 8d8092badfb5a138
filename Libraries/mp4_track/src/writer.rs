//! In-place patches for the default flag and the forced tag.
//!
//! Offsets come from a previous parse of the same, unmodified file. Each
//! patch is one bounded read-modify-write; when the bytes already hold the
//! requested value nothing is written.

use byteorder::{BigEndian, WriteBytesExt};
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::boxes::header::{resolve_header, BoxHeader};
use crate::boxes::stsd::{is_forced_tag, ENTRY_COUNT_OFFSET, FORCED_TAG, SAMPLE_ENTRY_TAG_OFFSET};
use crate::boxes::tkhd::DEFAULT_TRACK_FLAG;
use crate::boxes::STSD;
use crate::cursor::ByteCursor;
use crate::error::{Mp4Error, Result};
use crate::format_fourcc;

/// Sets or clears bit 0 of the 3-byte `tkhd` flags field at `flags_offset`.
/// The version byte before the field and the other 23 flag bits are kept.
pub fn set_default_flag<F: Read + Write + Seek>(file: &mut F, flags_offset: u64, enable: bool) -> Result<()> {
    let mut cursor = ByteCursor::new(&mut *file)?;
    let flags = cursor.read_u24_at(flags_offset)?;
    let patched = if enable {
        flags | DEFAULT_TRACK_FLAG
    } else {
        flags & !DEFAULT_TRACK_FLAG
    };

    if patched == flags {
        debug!("Default flag at offset {} already {}, nothing to write", flags_offset, enable);
        return Ok(());
    }

    let out = cursor.get_mut();
    out.seek(SeekFrom::Start(flags_offset))?;
    out.write_u24::<BigEndian>(patched)?;
    out.flush()?;
    info!(
        "Patched tkhd flags at offset {}: 0x{:06X} -> 0x{:06X}",
        flags_offset, flags, patched
    );
    Ok(())
}

/// Marks the first sample entry of the `stsd` whose payload starts at
/// `stsd_offset` as forced by overwriting its type tag with `"fcd "`.
///
/// The write stays inside the `stsd` box: `stsd_offset` must be the payload
/// start of an `stsd` header, and that payload must hold at least one entry
/// header, else `NoSampleEntry` is returned and nothing is written.
///
/// Clearing is only possible when the entry is not forced (a no-op): the
/// tag that `"fcd "` replaced is not stored anywhere, so clearing a forced
/// entry fails with `UnsupportedDowngrade`.
pub fn set_forced_tag<F: Read + Write + Seek>(file: &mut F, stsd_offset: u64, enable: bool) -> Result<()> {
    let mut cursor = ByteCursor::new(&mut *file)?;
    let stsd = stsd_header(&mut cursor, stsd_offset)?;
    if stsd.payload_size() < SAMPLE_ENTRY_TAG_OFFSET + 4
        || cursor.read_u32_at(stsd_offset + ENTRY_COUNT_OFFSET)? == 0
    {
        return Err(Mp4Error::NoSampleEntry { offset: stsd_offset });
    }

    let tag_offset = stsd_offset + SAMPLE_ENTRY_TAG_OFFSET;
    let tag = cursor.read_tag_at(tag_offset)?;
    let forced = is_forced_tag(&tag);

    match (enable, forced) {
        (true, false) => {
            let out = cursor.get_mut();
            out.seek(SeekFrom::Start(tag_offset))?;
            out.write_all(&FORCED_TAG)?;
            out.flush()?;
            info!(
                "Patched sample entry tag at offset {}: '{}' -> '{}'",
                tag_offset,
                format_fourcc(&tag),
                format_fourcc(&FORCED_TAG)
            );
            Ok(())
        }
        (false, true) => Err(Mp4Error::UnsupportedDowngrade { offset: tag_offset, tag }),
        _ => {
            debug!(
                "Sample entry tag '{}' at offset {} already {}, nothing to write",
                format_fourcc(&tag),
                tag_offset,
                if forced { "forced" } else { "not forced" }
            );
            Ok(())
        }
    }
}

/// Resolves the `stsd` header whose payload starts at `payload_offset`,
/// trying the compact header first and then the 64-bit one.
fn stsd_header<R: Read + Seek>(cursor: &mut ByteCursor<R>, payload_offset: u64) -> Result<BoxHeader> {
    let region_end = cursor.len();
    for header_len in [8u64, 16] {
        if payload_offset < header_len || payload_offset > region_end {
            continue;
        }
        let start = payload_offset - header_len;
        if cursor.read_tag_at(start + 4)? != STSD {
            continue;
        }
        let header = resolve_header(cursor, start, region_end)?;
        if header.payload_offset() == payload_offset {
            return Ok(header);
        }
    }
    Err(Mp4Error::BoxNotFound {
        offset: payload_offset,
        box_type: STSD,
    })
}

/// Opens `path` read-write and applies [`set_default_flag`].
pub fn patch_default<P: AsRef<Path>>(path: P, flags_offset: u64, enable: bool) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    set_default_flag(&mut file, flags_offset, enable)
}

/// Opens `path` read-write and applies [`set_forced_tag`].
pub fn patch_forced<P: AsRef<Path>>(path: P, stsd_offset: u64, enable: bool) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    set_forced_tag(&mut file, stsd_offset, enable)
}
