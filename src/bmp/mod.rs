//! BMP codec (internal).
//!
//! Reading accepts every historical header variant, bit depth, and the
//! RLE/bitfields compressions. Writing always emits the canonical layout.
//! Use [`crate::decode_bmp`], [`crate::encode_bmp`], [`crate::inspect_bmp`]
//! or [`crate::DecodeRequest`].

mod decode;
mod encode;
mod header;
mod utils;

pub use decode::BmpPermissiveness;
pub use header::{BmpInfo, BmpMagic, ColorSpace, Compression, DibVersion, Os2Extension};

use alloc::vec::Vec;
use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;
use crate::limits::Limits;

/// Bytes per stored row, including the padding to a 4-byte boundary.
pub fn row_stride(width: u32, bit_depth: u16) -> usize {
    (width as usize * usize::from(bit_depth)).div_ceil(32) * 4
}

/// Parse and validate headers only.
pub(crate) fn inspect(
    data: &[u8],
    permissiveness: BmpPermissiveness,
) -> Result<BmpInfo, BitmapError> {
    let header = header::parse_headers(data, permissiveness)?;
    Ok(BmpInfo::from(&header))
}

/// Decode to RGBA.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let header = header::parse_headers(data, permissiveness)?;
    if let Some(limits) = limits {
        limits.check_image(header.width, header.height)?;
    }
    stop.check()?;
    decode::decode_pixels(data, &header, permissiveness, stop)
}

/// Encode to the canonical 32-bit layout.
pub(crate) fn encode(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(image, stop)
}
