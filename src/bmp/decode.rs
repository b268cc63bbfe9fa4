//! BMP pixel decoder: palettes, 16/24/32-bit, bitfields, RLE4/RLE8/RLE24.
//!
//! Every path writes straight into a top-down RGBA8 buffer.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::header::{BmpHeader, Compression};
use super::utils::{Bitfield, expand_bits_to_byte};
use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::Color;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Also reject a wrong file size field, negative resolution, and an
    /// image size field that disagrees with the geometry.
    Strict,

    /// Accept cosmetic deviations. Reject planes != 1, RLE + top-down,
    /// oversized palette counts, out-of-range palette indices, RLE
    /// overruns, RLE streams too short for the declared size, and
    /// truncated pixel data.
    #[default]
    Standard,

    /// Accept as much as possible: zero-fill truncated data, map bad
    /// palette indices to black, drop RLE overruns, ignore planes.
    Permissive,
}

// ── Cursor ──────────────────────────────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    /// Reads past EOF yield zeros instead of errors.
    permissive: bool,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], pos: usize, permissive: bool) -> Self {
        Self {
            data,
            pos,
            permissive,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn read_u8(&mut self) -> Result<u8, BitmapError> {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(b)
            }
            None if self.permissive => Ok(0),
            None => Err(BitmapError::TruncatedData),
        }
    }

    fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), BitmapError> {
        let available = self.data.len().saturating_sub(self.pos).min(buf.len());
        if available < buf.len() && !self.permissive {
            return Err(BitmapError::TruncatedData);
        }
        if available > 0 {
            buf[..available].copy_from_slice(&self.data[self.pos..self.pos + available]);
        }
        buf[available..].fill(0);
        self.pos = self.pos.saturating_add(buf.len());
        Ok(())
    }
}

// ── Palette ─────────────────────────────────────────────────────────

struct Palette {
    entries: Vec<Color>,
    validate: bool,
}

impl Palette {
    fn read(data: &[u8], header: &BmpHeader, permissive: bool) -> Result<Self, BitmapError> {
        let entry_size = header.palette_entry_size();
        let mut cursor = Cursor::new(data, header.palette_offset, permissive);
        let mut entries = Vec::with_capacity(header.palette_len);
        let mut raw = [0u8; 4];
        for _ in 0..header.palette_len {
            cursor.read_exact_bytes(&mut raw[..entry_size])?;
            // Stored B, G, R(, reserved); the reserved byte is not alpha.
            entries.push([raw[2], raw[1], raw[0], 255]);
        }
        Ok(Self {
            entries,
            validate: !permissive,
        })
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn lookup(&self, idx: u8) -> Result<Color, BitmapError> {
        match self.entries.get(usize::from(idx)) {
            Some(&c) => Ok(c),
            None if self.validate => Err(BitmapError::InvalidData(alloc::format!(
                "palette index {idx} out of range (palette has {} entries)",
                self.entries.len()
            ))),
            None => Ok([0, 0, 0, 255]),
        }
    }
}

// ── Entry point ─────────────────────────────────────────────────────

/// Decode the pixel data described by `header` into an RGBA image.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BmpHeader,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let permissive = permissiveness == BmpPermissiveness::Permissive;
    let width = header.width as usize;
    let height = header.height as usize;
    let out_size = width
        .checked_mul(height)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;

    // Reject short uncompressed data before allocating for it.
    if !permissive && !header.compression.is_rle() {
        let needed = (super::row_stride(header.width, header.bit_depth) as u64)
            .saturating_mul(u64::from(header.height))
            .saturating_add(u64::from(header.data_offset));
        if (data.len() as u64) < needed {
            return Err(BitmapError::TruncatedData);
        }
    }

    // One opcode pair codes at most 255 pixels; a stream too short to cover
    // the declared area is rejected before the output is allocated.
    if !permissive && header.compression.is_rle() {
        let pairs = (data.len() as u64).saturating_sub(u64::from(header.data_offset)) / 2;
        let area = u64::from(header.width) * u64::from(header.height);
        if pairs.saturating_mul(255) < area {
            log::debug!("RLE stream of {pairs} opcode pairs cannot cover {area} pixels");
            return Err(BitmapError::TruncatedData);
        }
    }

    let palette = Palette::read(data, header, permissive)?;
    let mut buf = vec![0u8; out_size];
    let mut cursor = Cursor::new(data, header.data_offset as usize, permissive);

    match header.compression {
        Compression::Rle4 | Compression::Rle8 | Compression::Rle24 => {
            let mut rle = RleDecoder::new(header, permissive);
            rle.run(&mut cursor, stop)?;
            rle.write_rgba(&palette, &mut buf)?;
        }
        _ => decode_rows(&mut cursor, header, &palette, &mut buf, stop)?,
    }

    Ok(Image::from_parts(header.width, header.height, buf))
}

/// Destination row for the `i`-th row stored in the file.
#[inline]
fn dest_row(header: &BmpHeader, i: usize) -> usize {
    if header.top_down {
        i
    } else {
        header.height as usize - 1 - i
    }
}

// ── Uncompressed and bitfields ──────────────────────────────────────

fn decode_rows(
    cursor: &mut Cursor<'_>,
    header: &BmpHeader,
    palette: &Palette,
    buf: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let width = header.width as usize;
    let depth = header.bit_depth;
    let stride = super::row_stride(header.width, depth);
    let out_stride = width * 4;
    let mut row = vec![0u8; stride];
    let mut indices = vec![0u8; if depth < 8 { width } else { 0 }];

    let fields = if matches!(
        header.compression,
        Compression::Bitfields | Compression::AlphaBitfields
    ) {
        Some(header.masks.map(Bitfield::new))
    } else if depth == 16 {
        // Implicit RGB555 for uncompressed 16-bit.
        Some([0x7C00, 0x03E0, 0x001F, 0].map(Bitfield::new))
    } else {
        None
    };

    let mut any_alpha = false;
    for i in 0..header.height as usize {
        if i % 16 == 0 {
            stop.check()?;
        }
        cursor.read_exact_bytes(&mut row)?;
        let y = dest_row(header, i);
        let out = &mut buf[y * out_stride..(y + 1) * out_stride];

        match (depth, fields) {
            (1 | 2 | 4, _) => {
                expand_bits_to_byte(depth, !palette.is_empty(), &row, &mut indices);
                write_indexed(&indices, palette, out)?;
            }
            (8, _) => write_indexed(&row[..width], palette, out)?,
            (24, _) => {
                for (px, bgr) in out.chunks_exact_mut(4).zip(row.chunks_exact(3)) {
                    px.copy_from_slice(&[bgr[2], bgr[1], bgr[0], 255]);
                }
            }
            (16, Some(f)) => {
                for (px, raw) in out.chunks_exact_mut(4).zip(row.chunks_exact(2)) {
                    let v = u32::from(u16::from_le_bytes([raw[0], raw[1]]));
                    write_bitfields(v, &f, px);
                }
            }
            (32, Some(f)) => {
                for (px, raw) in out.chunks_exact_mut(4).zip(row.chunks_exact(4)) {
                    let v = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
                    write_bitfields(v, &f, px);
                }
            }
            (32, None) => {
                for (px, bgra) in out.chunks_exact_mut(4).zip(row.chunks_exact(4)) {
                    px.copy_from_slice(&[bgra[2], bgra[1], bgra[0], bgra[3]]);
                    any_alpha |= bgra[3] != 0;
                }
            }
            (d, _) => return Err(BitmapError::UnsupportedBitDepth(d)),
        }
    }

    // 32-bit BI_RGB: a fourth byte that is zero everywhere is padding, not alpha.
    if depth == 32 && fields.is_none() && !any_alpha {
        log::trace!("bmp: 32-bit data carries no alpha, treating as opaque");
        for px in buf.chunks_exact_mut(4) {
            px[3] = 255;
        }
    }
    Ok(())
}

fn write_indexed(indices: &[u8], palette: &Palette, out: &mut [u8]) -> Result<(), BitmapError> {
    for (px, &idx) in out.chunks_exact_mut(4).zip(indices) {
        let color = if palette.is_empty() {
            [idx, idx, idx, 255]
        } else {
            palette.lookup(idx)?
        };
        px.copy_from_slice(&color);
    }
    Ok(())
}

#[inline]
fn write_bitfields(v: u32, f: &[Bitfield; 4], px: &mut [u8]) {
    px[0] = f[0].extract(v);
    px[1] = f[1].extract(v);
    px[2] = f[2].extract(v);
    px[3] = if f[3].is_empty() { 255 } else { f[3].extract(v) };
}

// ── RLE ─────────────────────────────────────────────────────────────

/// RLE state. Samples land in a top-down buffer: one palette index per pixel
/// for RLE4/RLE8, three BGR bytes per pixel for RLE24.
struct RleDecoder<'h> {
    header: &'h BmpHeader,
    permissive: bool,
    /// Bytes per decoded sample (1 for indices, 3 for BGR).
    sample: usize,
    samples: Vec<u8>,
    /// File row currently being written (0 = first stored row).
    row: usize,
    col: usize,
}

impl<'h> RleDecoder<'h> {
    fn new(header: &'h BmpHeader, permissive: bool) -> Self {
        let sample = if header.compression == Compression::Rle24 {
            3
        } else {
            1
        };
        Self {
            header,
            permissive,
            sample,
            samples: vec![0u8; header.width as usize * header.height as usize * sample],
            row: 0,
            col: 0,
        }
    }

    fn overrun(&self, what: &str) -> Result<bool, BitmapError> {
        if self.permissive {
            Ok(false)
        } else {
            Err(BitmapError::InvalidData(alloc::format!(
                "RLE {what} at row {} column {}",
                self.row,
                self.col
            )))
        }
    }

    /// Store one sample at the current position. `Ok(false)` means the
    /// sample fell outside the image and was dropped.
    fn put(&mut self, sample: &[u8]) -> Result<bool, BitmapError> {
        let (width, height) = (self.header.width as usize, self.header.height as usize);
        if self.row >= height {
            return self.overrun("data past last row");
        }
        if self.col >= width {
            return self.overrun("run past end of row");
        }
        let y = dest_row(self.header, self.row);
        let at = (y * width + self.col) * self.sample;
        self.samples[at..at + self.sample].copy_from_slice(sample);
        self.col += 1;
        Ok(true)
    }

    fn run(&mut self, cursor: &mut Cursor<'_>, stop: &dyn Stop) -> Result<(), BitmapError> {
        let mut ops = 0u32;
        // A stream that ends without an end-of-bitmap marker is accepted as finished.
        while !cursor.eof() {
            ops = ops.wrapping_add(1);
            if ops % 1024 == 0 {
                stop.check()?;
            }
            let count = cursor.read_u8()?;
            let value = cursor.read_u8()?;
            if count > 0 {
                self.encoded_run(cursor, count, value)?;
                continue;
            }
            match value {
                0 => {
                    self.row += 1;
                    self.col = 0;
                }
                1 => {
                    log::trace!("bmp: RLE end of bitmap at row {}", self.row);
                    return Ok(());
                }
                2 => {
                    let dx = cursor.read_u8()?;
                    let dy = cursor.read_u8()?;
                    self.col += usize::from(dx);
                    self.row += usize::from(dy);
                }
                n => self.absolute_run(cursor, n)?,
            }
        }
        Ok(())
    }

    fn encoded_run(
        &mut self,
        cursor: &mut Cursor<'_>,
        count: u8,
        value: u8,
    ) -> Result<(), BitmapError> {
        match self.header.compression {
            Compression::Rle8 => {
                for _ in 0..count {
                    if !self.put(&[value])? {
                        break;
                    }
                }
            }
            Compression::Rle4 => {
                let nibbles = [value >> 4, value & 0x0F];
                for i in 0..usize::from(count) {
                    if !self.put(&[nibbles[i & 1]])? {
                        break;
                    }
                }
            }
            _ => {
                // RLE24: `value` is the blue byte of the repeated pixel.
                let bgr = [value, cursor.read_u8()?, cursor.read_u8()?];
                for _ in 0..count {
                    if !self.put(&bgr)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn absolute_run(&mut self, cursor: &mut Cursor<'_>, count: u8) -> Result<(), BitmapError> {
        let count = usize::from(count);
        let mut keep = true;
        let bytes = match self.header.compression {
            Compression::Rle8 => {
                for _ in 0..count {
                    let idx = cursor.read_u8()?;
                    keep = keep && self.put(&[idx])?;
                }
                count
            }
            Compression::Rle4 => {
                let mut byte = 0u8;
                for i in 0..count {
                    if i % 2 == 0 {
                        byte = cursor.read_u8()?;
                    }
                    let idx = if i % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                    keep = keep && self.put(&[idx])?;
                }
                count.div_ceil(2)
            }
            _ => {
                for _ in 0..count {
                    let bgr = [cursor.read_u8()?, cursor.read_u8()?, cursor.read_u8()?];
                    keep = keep && self.put(&bgr)?;
                }
                count * 3
            }
        };
        // Absolute runs are padded to a 16-bit boundary.
        if bytes % 2 == 1 {
            cursor.skip(1);
        }
        Ok(())
    }

    fn write_rgba(&self, palette: &Palette, buf: &mut [u8]) -> Result<(), BitmapError> {
        if self.sample == 3 {
            for (px, bgr) in buf.chunks_exact_mut(4).zip(self.samples.chunks_exact(3)) {
                px.copy_from_slice(&[bgr[2], bgr[1], bgr[0], 255]);
            }
            return Ok(());
        }
        // Palette-less RLE4 indices scale to gray the same way packed 4-bit data does.
        let scale = if self.header.bit_depth == 4 { 0x11 } else { 1 };
        for (px, &idx) in buf.chunks_exact_mut(4).zip(&self.samples) {
            let color = if palette.is_empty() {
                let g = idx.wrapping_mul(scale);
                [g, g, g, 255]
            } else {
                palette.lookup(idx)?
            };
            px.copy_from_slice(&color);
        }
        Ok(())
    }
}
