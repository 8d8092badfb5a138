//! Generic walk over the boxes of one region.
//!
//! Every container level (file, `moov`, `trak`, `mdia`, `minf`, `stbl`) is
//! walked by the same loop; only the handler that matches on the box type
//! changes. Boxes the handler ignores are skipped using their declared size.

use std::io::{Read, Seek};

use tracing::{trace, warn};

use crate::boxes::header::{resolve_header, BoxHeader};
use crate::cursor::ByteCursor;
use crate::error::{Mp4Error, Result};
use crate::format_fourcc;

/// Visits each box in `[region_start, region_start + region_size)`.
///
/// The walk stops without error at the first malformed box (size smaller
/// than its header), so trailing garbage does not fail a parse. Any other
/// error, from the resolver or from `on_box`, aborts the walk.
pub fn walk<R, F>(
    cursor: &mut ByteCursor<R>,
    region_start: u64,
    region_size: u64,
    mut on_box: F,
) -> Result<()>
where
    R: Read + Seek,
    F: FnMut(&mut ByteCursor<R>, &BoxHeader) -> Result<()>,
{
    let region_end = region_start
        .checked_add(region_size)
        .ok_or(Mp4Error::SizeOverflow {
            offset: region_start,
            size: region_size,
        })?;

    let mut pos = region_start;
    while pos.checked_add(8).map_or(false, |header_end| header_end <= region_end) {
        let header = match resolve_header(cursor, pos, region_end) {
            Ok(header) => header,
            Err(Mp4Error::MalformedBox { offset, box_type, size }) => {
                warn!(
                    "Stopping walk at malformed box '{}' (offset {}, size {})",
                    format_fourcc(&box_type),
                    offset,
                    size
                );
                break;
            }
            Err(e) => return Err(e),
        };

        trace!(
            "Box '{}' at offset {}, size {}",
            format_fourcc(&header.box_type),
            header.offset,
            header.size
        );

        on_box(cursor, &header)?;
        pos = header.end_offset();
    }

    Ok(())
}

/// Walks the payload of `parent` as a region of child boxes.
pub fn walk_children<R, F>(cursor: &mut ByteCursor<R>, parent: &BoxHeader, on_box: F) -> Result<()>
where
    R: Read + Seek,
    F: FnMut(&mut ByteCursor<R>, &BoxHeader) -> Result<()>,
{
    walk(cursor, parent.payload_offset(), parent.payload_size(), on_box)
}
