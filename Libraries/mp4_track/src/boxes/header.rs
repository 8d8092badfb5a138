use std::io::{Read, Seek};

use crate::cursor::ByteCursor;
use crate::error::{Mp4Error, Result};
use crate::format_fourcc;

/// A resolved box header. `size` always covers header and payload, with the
/// size sentinels already expanded.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoxHeader {
    pub box_type: [u8; 4],
    /// Absolute offset of the first header byte.
    pub offset: u64,
    pub size: u64,
    /// 8, or 16 when a 64-bit size follows the type.
    pub header_len: u8,
}

impl BoxHeader {
    pub fn payload_offset(&self) -> u64 {
        self.offset + u64::from(self.header_len)
    }

    pub fn payload_size(&self) -> u64 {
        self.size - u64::from(self.header_len)
    }

    /// Offset of the first byte after this box.
    pub fn end_offset(&self) -> u64 {
        self.offset + self.size
    }
}

impl std::fmt::Debug for BoxHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxHeader")
            .field("box_type", &format_fourcc(&self.box_type))
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("header_len", &self.header_len)
            .finish()
    }
}

/// Reads the header at `offset`. A size of `0` makes the box run to
/// `region_end`; a size of `1` means a 64-bit size follows the type.
///
/// Returns `MalformedBox` when the resolved size is smaller than the header,
/// and `SizeOverflow` when the box end is not representable.
pub fn resolve_header<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    offset: u64,
    region_end: u64,
) -> Result<BoxHeader> {
    let size32 = cursor.read_u32_at(offset)?;
    let box_type = cursor.read_tag_at(offset + 4)?;

    let (size, header_len) = match size32 {
        0 => (region_end.saturating_sub(offset), 8u8),
        1 => (cursor.read_u64_at(offset + 8)?, 16u8),
        _ => (u64::from(size32), 8u8),
    };

    if size < u64::from(header_len) {
        return Err(Mp4Error::MalformedBox { offset, box_type, size });
    }
    if offset.checked_add(size).is_none() {
        return Err(Mp4Error::SizeOverflow { offset, size });
    }

    Ok(BoxHeader {
        box_type,
        offset,
        size,
        header_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(bytes: Vec<u8>) -> ByteCursor<Cursor<Vec<u8>>> {
        ByteCursor::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_resolve_compact_header() {
        // 00 00 00 18  24
        // 66 74 79 70  ftyp
        let mut bytes = vec![0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p'];
        bytes.resize(24, 0);
        let mut c = cursor(bytes);
        let header = resolve_header(&mut c, 0, 24).unwrap();
        assert_eq!(&header.box_type, b"ftyp");
        assert_eq!(header.size, 24);
        assert_eq!(header.header_len, 8);
        assert_eq!(header.payload_offset(), 8);
        assert_eq!(header.payload_size(), 16);
        assert_eq!(header.end_offset(), 24);
    }

    #[test]
    fn test_resolve_extended_size() {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x01, b'm', b'd', b'a', b't'];
        bytes.extend_from_slice(&5000u64.to_be_bytes());
        let mut c = cursor(bytes);
        let header = resolve_header(&mut c, 0, 5000).unwrap();
        assert_eq!(header.size, 5000);
        assert_eq!(header.header_len, 16);
        assert_eq!(header.payload_offset(), 16);
    }

    #[test]
    fn test_resolve_size_zero_takes_region_remainder() {
        let mut bytes = vec![0u8; 4];
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, b'f', b'r', b'e', b'e']);
        bytes.resize(40, 0);
        let mut c = cursor(bytes);
        let header = resolve_header(&mut c, 4, 40).unwrap();
        assert_eq!(header.size, 36);
        assert_eq!(header.end_offset(), 40);
    }

    #[test]
    fn test_resolve_malformed_size() {
        let mut c = cursor(vec![0x00, 0x00, 0x00, 0x04, b'j', b'u', b'n', b'k']);
        match resolve_header(&mut c, 0, 8) {
            Err(Mp4Error::MalformedBox { offset, box_type, size }) => {
                assert_eq!(offset, 0);
                assert_eq!(&box_type, b"junk");
                assert_eq!(size, 4);
            }
            other => panic!("expected MalformedBox, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_extended_size_smaller_than_header() {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x01, b'm', b'd', b'a', b't'];
        bytes.extend_from_slice(&12u64.to_be_bytes());
        let mut c = cursor(bytes);
        assert!(matches!(
            resolve_header(&mut c, 0, 16),
            Err(Mp4Error::MalformedBox { size: 12, .. })
        ));
    }

    #[test]
    fn test_resolve_overflowing_size() {
        let mut bytes = vec![0u8; 8];
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01, b'm', b'd', b'a', b't']);
        bytes.extend_from_slice(&u64::MAX.to_be_bytes());
        let mut c = cursor(bytes);
        assert!(matches!(
            resolve_header(&mut c, 8, 24),
            Err(Mp4Error::SizeOverflow { offset: 8, .. })
        ));
    }

    #[test]
    fn test_resolve_header_past_end() {
        let mut c = cursor(vec![0x00, 0x00, 0x00, 0x10, b'm', b'o']);
        assert!(matches!(
            resolve_header(&mut c, 0, 16),
            Err(Mp4Error::TruncatedInput { offset: 4, needed: 4 })
        ));
    }
}
