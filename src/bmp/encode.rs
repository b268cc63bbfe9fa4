//! Canonical BMP encoder: `BM`, 40-byte header, uncompressed 32-bit BGRA, bottom-up.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::BitmapError;
use crate::image::Image;

const HEADERS_SIZE: usize = 14 + 40;
/// 72 DPI.
const PIXELS_PER_METER: u32 = 2835;

pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (image.width(), image.height());
    let too_large = BitmapError::DimensionsTooLarge { width, height };
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(too_large);
    }

    let row_stride = super::row_stride(width, 32);
    let pixel_data_size = row_stride
        .checked_mul(height as usize)
        .filter(|&n| n <= u32::MAX as usize - HEADERS_SIZE)
        .ok_or(too_large)?;
    let file_size = pixel_data_size + HEADERS_SIZE;

    stop.check()?;

    let mut out = Vec::with_capacity(file_size);
    write_headers(&mut out, file_size as u32, pixel_data_size as u32, width, height);

    let pad = row_stride - width as usize * 4;
    for (n, y) in (0..height as usize).rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        for px in image.row(y).chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
        out.extend(core::iter::repeat_n(0u8, pad));
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}

fn write_headers(out: &mut Vec<u8>, file_size: u32, pixel_data_size: u32, width: u32, height: u32) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(HEADERS_SIZE as u32).to_le_bytes());

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
