//! Parse, look up and patch one track through a single file handle.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{Read, Seek, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::cursor::ByteCursor;
use crate::error::{Mp4Error, Result};
use crate::reader::extract_tracks;
use crate::writer::{set_default_flag, set_forced_tag};

/// The track selection flags this library can change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackFlag {
    /// Bit 0 of the `tkhd` flags.
    Default,
    /// The `"fcd "` sample entry tag convention.
    Forced,
}

impl fmt::Display for TrackFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackFlag::Default => f.write_str("default"),
            TrackFlag::Forced => f.write_str("forced"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown flag '{0}', expected 'default' or 'forced'")]
pub struct ParseTrackFlagError(String);

impl FromStr for TrackFlag {
    type Err = ParseTrackFlagError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "default" => Ok(TrackFlag::Default),
            "forced" => Ok(TrackFlag::Forced),
            other => Err(ParseTrackFlagError(other.to_string())),
        }
    }
}

/// Opens `path` read-write, finds `track_id` and sets or clears `flag`.
///
/// The parse and the write share one handle, so the offsets used for the
/// write come from the exact bytes that are being patched.
pub fn set_track_flag<P: AsRef<Path>>(path: P, track_id: u32, flag: TrackFlag, enable: bool) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;
    info!(
        "{} {} on track {} of {}",
        if enable { "Setting" } else { "Clearing" },
        flag,
        track_id,
        path.as_ref().display()
    );
    apply_track_flag(&mut file, track_id, flag, enable)
}

/// Same as [`set_track_flag`] for any readable, writable, seekable source.
pub fn apply_track_flag<F: Read + Write + Seek>(
    file: &mut F,
    track_id: u32,
    flag: TrackFlag,
    enable: bool,
) -> Result<()> {
    let tracks = extract_tracks(&mut ByteCursor::new(&mut *file)?)?;
    let track = tracks
        .iter()
        .find(|t| t.track_id() == track_id)
        .ok_or(Mp4Error::TrackNotFound(track_id))?;

    match flag {
        TrackFlag::Default => set_default_flag(file, track.track_header_flags_offset(), enable),
        TrackFlag::Forced => {
            let stsd_offset = track
                .sample_description_offset()
                .ok_or(Mp4Error::NoSampleDescription(track_id))?;
            set_forced_tag(file, stsd_offset, enable)
        }
    }
}
