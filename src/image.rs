use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BitmapError;
use crate::pixel::{Channel, Color};

/// Owned RGBA8 image, row-major, top-down.
///
/// `data.len() == width * height * 4` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Allocate a `width`×`height` image filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        let mut data = vec![0u8; len];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&fill);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        if data.len() != len {
            return Err(BitmapError::BufferTooSmall {
                needed: len,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height * 4` and non-zero dimensions.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// One row of RGBA bytes. `y` must be in range.
    pub(crate) fn row(&self, y: usize) -> &[u8] {
        let stride = self.width as usize * 4;
        &self.data[y * stride..(y + 1) * stride]
    }

    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<usize, BitmapError> {
        if x >= self.width || y >= self.height {
            return Err(BitmapError::OutOfBounds {
                x: i64::from(x),
                y: i64::from(y),
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.offset(x, y))
    }

    /// Read the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Result<Color, BitmapError> {
        let off = self.check_bounds(x, y)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[off..off + 4]);
        Ok(px)
    }

    /// Overwrite the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<(), BitmapError> {
        let off = self.check_bounds(x, y)?;
        self.data[off..off + 4].copy_from_slice(&color);
        Ok(())
    }

    /// Overwrite one channel at (x, y). [`Channel::All`] writes all four.
    pub fn set_channel(
        &mut self,
        x: u32,
        y: u32,
        channel: Channel,
        value: u8,
    ) -> Result<(), BitmapError> {
        let off = self.check_bounds(x, y)?;
        match channel.index() {
            Some(c) => self.data[off + c] = value,
            None => self.data[off..off + 4].fill(value),
        }
        Ok(())
    }

    /// Copy out the half-open rectangle `[x0, x1) × [y0, y1)`.
    pub fn crop(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<Image, BitmapError> {
        if x1 <= x0 || y1 <= y0 {
            return Err(BitmapError::InvalidDimensions {
                width: i64::from(x1) - i64::from(x0),
                height: i64::from(y1) - i64::from(y0),
            });
        }
        if x1 > self.width || y1 > self.height {
            return Err(BitmapError::OutOfBounds {
                x: i64::from(x1),
                y: i64::from(y1),
                width: self.width,
                height: self.height,
            });
        }
        let w = x1 - x0;
        let h = y1 - y0;
        let mut data = Vec::with_capacity(w as usize * h as usize * 4);
        for y in y0..y1 {
            let start = self.offset(x0, y);
            data.extend_from_slice(&self.data[start..start + w as usize * 4]);
        }
        Ok(Image::from_parts(w, h, data))
    }

    /// Copy `src` into `self` with its top-left corner at (x0, y0), clipped
    /// to this image's extents.
    pub fn paste(&mut self, src: &Image, x0: u32, y0: u32) -> Result<(), BitmapError> {
        self.check_bounds(x0, y0)?;
        let w = src.width.min(self.width - x0) as usize;
        let h = src.height.min(self.height - y0);
        for sy in 0..h {
            let dst = self.offset(x0, y0 + sy);
            let s = src.offset(0, sy);
            self.data[dst..dst + w * 4].copy_from_slice(&src.data[s..s + w * 4]);
        }
        Ok(())
    }

    /// Typed view of the pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgba_pixels(&self) -> &[rgb::RGBA8] {
        self.data.as_pixels()
    }

    /// Zero-copy 2D view.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(
            self.as_rgba_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}
