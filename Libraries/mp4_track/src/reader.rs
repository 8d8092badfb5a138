use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::boxes::generic::Mp4Box;
use crate::boxes::hdlr::HdlrBox;
use crate::boxes::header::BoxHeader;
use crate::boxes::mdhd::MdhdBox;
use crate::boxes::stsd::StsdBox;
use crate::boxes::tkhd::TkhdBox;
use crate::boxes::{HDLR, MDHD, MDIA, MINF, MOOV, STBL, STSD, TKHD, TRAK};
use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::track::{MediaType, TrackBuilder, TrackRecord};
use crate::walker::{walk, walk_children};

/// Opens `path` read-only and returns one record per valid track.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Vec<TrackRecord>> {
    let file = File::open(path.as_ref())?;
    debug!("Parsing {}", path.as_ref().display());
    read_tracks(file)
}

/// Reads the track records from any seekable source.
///
/// Any read failure aborts the parse; no partial list is returned.
pub fn read_tracks<R: Read + Seek>(reader: R) -> Result<Vec<TrackRecord>> {
    let mut cursor = ByteCursor::new(reader)?;
    extract_tracks(&mut cursor)
}

pub(crate) fn extract_tracks<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<Vec<TrackRecord>> {
    let mut tracks = Vec::new();
    let len = cursor.len();
    walk(cursor, 0, len, |cursor, header| {
        if header.box_type == MOOV {
            read_moov(cursor, header, &mut tracks)?;
        }
        Ok(())
    })?;
    debug!("Found {} track(s)", tracks.len());
    Ok(tracks)
}

fn read_moov<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    moov: &BoxHeader,
    tracks: &mut Vec<TrackRecord>,
) -> Result<()> {
    walk_children(cursor, moov, |cursor, header| {
        if header.box_type == TRAK {
            if let Some(track) = read_trak(cursor, header)? {
                tracks.push(track);
            }
        }
        Ok(())
    })
}

fn read_trak<R: Read + Seek>(cursor: &mut ByteCursor<R>, trak: &BoxHeader) -> Result<Option<TrackRecord>> {
    let mut builder = TrackBuilder::default();

    walk_children(cursor, trak, |cursor, header| {
        match header.box_type {
            TKHD => {
                let tkhd = TkhdBox::read_box(cursor, header)?;
                builder.track_id = Some(tkhd.track_id);
                builder.is_default = tkhd.is_default();
                builder.flags_offset = Some(tkhd.flags_offset);
            }
            MDIA => read_mdia(cursor, header, &mut builder)?,
            _ => {}
        }
        Ok(())
    })?;

    let record = builder.build();
    match &record {
        Some(track) => debug!(
            "Track {}: type {}, lang {:?}, default {}, forced {}",
            track.track_id(),
            track.media_type(),
            track.language(),
            track.is_default(),
            track.is_forced()
        ),
        None => debug!("Discarding trak at offset {}: no tkhd or track id 0", trak.offset),
    }
    Ok(record)
}

fn read_mdia<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    mdia: &BoxHeader,
    builder: &mut TrackBuilder,
) -> Result<()> {
    walk_children(cursor, mdia, |cursor, header| {
        match header.box_type {
            MDHD => builder.language = MdhdBox::read_box(cursor, header)?.language,
            HDLR => {
                let hdlr = HdlrBox::read_box(cursor, header)?;
                builder.media_type = Some(MediaType::from_handler(&hdlr.handler_type));
            }
            MINF => walk_children(cursor, header, |cursor, header| {
                if header.box_type == STBL {
                    read_stbl(cursor, header, builder)?;
                }
                Ok(())
            })?,
            _ => {}
        }
        Ok(())
    })
}

fn read_stbl<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    stbl: &BoxHeader,
    builder: &mut TrackBuilder,
) -> Result<()> {
    walk_children(cursor, stbl, |cursor, header| {
        if header.box_type == STSD {
            let stsd = StsdBox::read_box(cursor, header)?;
            builder.is_forced = stsd.is_forced();
            builder.sample_description_offset = Some(stsd.payload_offset);
            builder.sample_entry_tag = stsd.first_entry_tag;
        }
        Ok(())
    })
}
