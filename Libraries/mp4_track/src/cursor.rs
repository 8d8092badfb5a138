//! Positioned big-endian reads at absolute offsets.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::{Mp4Error, Result};

/// Wraps a random-access source and reads fixed-width fields at absolute
/// offsets. Every read is exact: a short read is `TruncatedInput`.
pub struct ByteCursor<R> {
    inner: R,
    len: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self { inner, len })
    }

    /// Total length of the source, measured once at construction.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn read_u8_at(&mut self, offset: u64) -> Result<u8> {
        self.seek_for(offset, 1)?;
        self.inner.read_u8().map_err(|e| truncated(e, offset, 1))
    }

    pub fn read_u16_at(&mut self, offset: u64) -> Result<u16> {
        self.seek_for(offset, 2)?;
        self.inner
            .read_u16::<BigEndian>()
            .map_err(|e| truncated(e, offset, 2))
    }

    /// Reads the 24-bit flags field of a full box.
    pub fn read_u24_at(&mut self, offset: u64) -> Result<u32> {
        self.seek_for(offset, 3)?;
        self.inner
            .read_u24::<BigEndian>()
            .map_err(|e| truncated(e, offset, 3))
    }

    pub fn read_u32_at(&mut self, offset: u64) -> Result<u32> {
        self.seek_for(offset, 4)?;
        self.inner
            .read_u32::<BigEndian>()
            .map_err(|e| truncated(e, offset, 4))
    }

    pub fn read_u64_at(&mut self, offset: u64) -> Result<u64> {
        self.seek_for(offset, 8)?;
        self.inner
            .read_u64::<BigEndian>()
            .map_err(|e| truncated(e, offset, 8))
    }

    pub fn read_tag_at(&mut self, offset: u64) -> Result<[u8; 4]> {
        self.seek_for(offset, 4)?;
        let mut tag = [0u8; 4];
        self.inner
            .read_exact(&mut tag)
            .map_err(|e| truncated(e, offset, 4))?;
        Ok(tag)
    }

    // Rejects reads that would end past the source length before touching it.
    fn seek_for(&mut self, offset: u64, needed: usize) -> Result<()> {
        match offset.checked_add(needed as u64) {
            Some(end) if end <= self.len => {}
            _ => return Err(Mp4Error::TruncatedInput { offset, needed }),
        }
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }
}

fn truncated(err: std::io::Error, offset: u64, needed: usize) -> Mp4Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Mp4Error::TruncatedInput { offset, needed }
    } else {
        Mp4Error::Io(err)
    }
}
