// This module contains the box decoders used to locate and read track flags.
// Only the fields needed for listing and patching are decoded; everything else
// inside a box is skipped by offset arithmetic.
//
// The following submodules are included:
//
// - `generic`: Contains the `Mp4Box` trait and the full box version/flags helper.
// - `header`: Resolves box headers, including the 64-bit and to-end-of-region size forms.
// - `hdlr`: Defines the Handler Reference Box, which specifies the type of media.
// - `mdhd`: Defines the Media Header Box, which carries the packed language code.
// - `stsd`: Defines the Sample Description Box, whose first entry tag marks forced tracks.
// - `tkhd`: Defines the Track Header Box, which carries the track id and the default flag.

pub mod generic;
pub mod hdlr;
pub mod header;
pub mod mdhd;
pub mod stsd;
pub mod tkhd;

pub const MOOV: [u8; 4] = *b"moov";
pub const TRAK: [u8; 4] = *b"trak";
pub const TKHD: [u8; 4] = *b"tkhd";
pub const MDIA: [u8; 4] = *b"mdia";
pub const MDHD: [u8; 4] = *b"mdhd";
pub const HDLR: [u8; 4] = *b"hdlr";
pub const MINF: [u8; 4] = *b"minf";
pub const STBL: [u8; 4] = *b"stbl";
pub const STSD: [u8; 4] = *b"stsd";
