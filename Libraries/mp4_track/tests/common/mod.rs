// Builders for small synthetic MP4 files, shared by the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn make_box(fourcc: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + payload.len());
    buf.extend_from_slice(&(8 + payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(fourcc);
    buf.extend_from_slice(payload);
    buf
}

/// Same as `make_box` but with a size field of 1 and a 64-bit size.
pub fn make_large_box(fourcc: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(16 + payload.len());
    buf.extend_from_slice(&1u32.to_be_bytes());
    buf.extend_from_slice(fourcc);
    buf.extend_from_slice(&(16 + payload.len() as u64).to_be_bytes());
    buf.extend_from_slice(payload);
    buf
}

pub fn ftyp() -> Vec<u8> {
    let mut payload = b"isom".to_vec();
    payload.extend_from_slice(&0x200u32.to_be_bytes());
    payload.extend_from_slice(b"isomiso2mp41");
    make_box(b"ftyp", &payload)
}

pub fn tkhd(version: u8, flags: u32, track_id: u32) -> Vec<u8> {
    let mut payload = vec![version];
    payload.extend_from_slice(&flags.to_be_bytes()[1..]);
    if version == 1 {
        payload.extend_from_slice(&0x0000_0001_0000_0000u64.to_be_bytes()); // creation_time
        payload.extend_from_slice(&0x0000_0001_0000_0001u64.to_be_bytes()); // modification_time
        payload.extend_from_slice(&track_id.to_be_bytes());
        payload.extend_from_slice(&[0u8; 4]); // reserved
        payload.extend_from_slice(&90_000u64.to_be_bytes()); // duration
    } else {
        payload.extend_from_slice(&1u32.to_be_bytes());
        payload.extend_from_slice(&2u32.to_be_bytes());
        payload.extend_from_slice(&track_id.to_be_bytes());
        payload.extend_from_slice(&[0u8; 4]);
        payload.extend_from_slice(&90_000u32.to_be_bytes());
    }
    payload.extend_from_slice(&[0u8; 8]); // reserved
    payload.extend_from_slice(&[0u8; 8]); // layer, alternate_group, volume, reserved
    payload.extend_from_slice(&[0u8; 36]); // matrix
    payload.extend_from_slice(&(1920u32 << 16).to_be_bytes());
    payload.extend_from_slice(&(1080u32 << 16).to_be_bytes());
    make_box(b"tkhd", &payload)
}

pub fn mdhd(version: u8, packed_language: u16) -> Vec<u8> {
    let mut payload = vec![version, 0, 0, 0];
    if version == 1 {
        payload.extend_from_slice(&[0x11; 16]); // creation + modification
        payload.extend_from_slice(&48_000u32.to_be_bytes());
        payload.extend_from_slice(&[0x22; 8]);
    } else {
        payload.extend_from_slice(&[0x11; 8]);
        payload.extend_from_slice(&48_000u32.to_be_bytes());
        payload.extend_from_slice(&[0x22; 4]);
    }
    payload.extend_from_slice(&packed_language.to_be_bytes());
    payload.extend_from_slice(&[0, 0]); // pre_defined
    make_box(b"mdhd", &payload)
}

pub fn hdlr(subtype: &[u8; 4]) -> Vec<u8> {
    let mut payload = vec![0u8; 8];
    payload.extend_from_slice(subtype);
    payload.extend_from_slice(&[0u8; 12]);
    payload.extend_from_slice(b"Handler\0");
    make_box(b"hdlr", &payload)
}

pub fn stsd(entry_tag: &[u8; 4]) -> Vec<u8> {
    let mut payload = vec![0u8; 4];
    payload.extend_from_slice(&1u32.to_be_bytes());
    payload.extend(make_box(entry_tag, &[0x33; 20]));
    make_box(b"stsd", &payload)
}

/// One `trak` worth of fields.
pub struct TrackSpec {
    pub tkhd_version: u8,
    pub flags: u32,
    pub track_id: u32,
    pub mdhd_version: u8,
    pub language: u16,
    pub handler: [u8; 4],
    pub entry_tag: Option<[u8; 4]>,
}

impl Default for TrackSpec {
    fn default() -> Self {
        TrackSpec {
            tkhd_version: 0,
            flags: 0,
            track_id: 1,
            mdhd_version: 0,
            language: 0x55C4,
            handler: *b"soun",
            entry_tag: Some(*b"mp4a"),
        }
    }
}

pub fn trak(spec: &TrackSpec) -> Vec<u8> {
    let mut stbl = Vec::new();
    if let Some(tag) = &spec.entry_tag {
        stbl.extend(stsd(tag));
    }
    stbl.extend(make_box(b"stts", &[0u8; 8]));
    trak_with_stbl(spec, &stbl)
}

/// A `trak` whose `stbl` children are given as raw bytes; `entry_tag` is unused.
pub fn trak_with_stbl(spec: &TrackSpec, stbl: &[u8]) -> Vec<u8> {
    let mut minf = make_box(b"smhd", &[0u8; 8]);
    minf.extend(make_box(b"stbl", stbl));

    let mut mdia = mdhd(spec.mdhd_version, spec.language);
    mdia.extend(hdlr(&spec.handler));
    mdia.extend(make_box(b"minf", &minf));

    let mut trak = tkhd(spec.tkhd_version, spec.flags, spec.track_id);
    trak.extend(make_box(b"edts", &[0u8; 4]));
    trak.extend(make_box(b"mdia", &mdia));
    make_box(b"trak", &trak)
}

pub fn moov(tracks: &[TrackSpec]) -> Vec<u8> {
    let mut payload = make_box(b"mvhd", &[0u8; 100]);
    for spec in tracks {
        payload.extend(trak(spec));
    }
    make_box(b"moov", &payload)
}

/// `ftyp` + `moov` + a small `mdat`.
pub fn mp4_file(tracks: &[TrackSpec]) -> Vec<u8> {
    let mut file = ftyp();
    file.extend(moov(tracks));
    file.extend(make_box(b"mdat", &[0xAB; 64]));
    file
}

/// A file in the system temp directory, removed on drop.
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub fn with_contents(contents: &[u8]) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let name = format!(
            "mp4_track_test_{}_{}.mp4",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        );
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).expect("failed to write temp file");
        TempFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("failed to read temp file")
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
