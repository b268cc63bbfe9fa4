//! Kernel convolution over RGBA images.
//!
//! - Full convolution keeps the image size and resolves samples outside the
//!   image through a [`Border`] policy.
//! - Raw convolution applies no padding; the output loses the kernel radius
//!   on every side. Pair it with [`make_border`] for explicit padding.
//!
//! Both read only from the source and write a fresh image. Channels not
//! selected by the [`Channel`] argument are copied through unchanged.

mod kernel;

pub use kernel::Core;

use alloc::vec;
use alloc::vec::Vec;

use enough::{Stop, Unstoppable};

use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::Channel;

/// How samples outside the image are supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Border {
    /// Every channel of an outside sample is 0.
    Empty,
    /// Outside coordinates clamp to the nearest edge pixel.
    #[default]
    Replicate,
}

impl Border {
    /// Map a possibly-outside coordinate onto `0..len`.
    #[inline]
    fn resolve(self, v: i64, len: u32) -> Option<usize> {
        if (0..i64::from(len)).contains(&v) {
            return Some(v as usize);
        }
        match self {
            Self::Empty => None,
            Self::Replicate => Some(v.clamp(0, i64::from(len) - 1) as usize),
        }
    }
}

/// Builder for a convolution.
///
/// ```
/// use zenbmp::{Border, Channel, ConvolveRequest, Core, Image, Unstoppable};
///
/// let gray = Image::new(5, 4, [90, 90, 90, 255])?;
/// let core = Core::standard();
/// let out = ConvolveRequest::new(&core)
///     .channel(Channel::All)
///     .border(Border::Replicate)
///     .apply(&gray, Unstoppable)?;
/// assert_eq!(out, gray);
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConvolveRequest<'a> {
    core: &'a Core,
    channel: Channel,
    border: Border,
}

impl<'a> ConvolveRequest<'a> {
    /// All channels, [`Border::Replicate`].
    pub fn new(core: &'a Core) -> Self {
        Self {
            core,
            channel: Channel::All,
            border: Border::default(),
        }
    }

    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Same-size output with implicit border handling.
    pub fn apply(&self, image: &Image, stop: impl Stop) -> Result<Image, BitmapError> {
        convolve_full(image, self.core, self.channel, self.border, &stop)
    }

    /// Output shrinks by the kernel radius on each side; the border policy is unused.
    pub fn apply_raw(&self, image: &Image, stop: impl Stop) -> Result<Image, BitmapError> {
        convolve_valid(image, self.core, self.channel, &stop)
    }
}

/// Same-size convolution. See [`ConvolveRequest::apply`].
pub fn convolve(
    image: &Image,
    core: &Core,
    channel: Channel,
    border: Border,
) -> Result<Image, BitmapError> {
    convolve_full(image, core, channel, border, &Unstoppable)
}

/// Unpadded convolution. See [`ConvolveRequest::apply_raw`].
pub fn convolve_raw(image: &Image, core: &Core, channel: Channel) -> Result<Image, BitmapError> {
    convolve_valid(image, core, channel, &Unstoppable)
}

/// Pad `image` by `size` pixels on all four sides according to `border`.
pub fn make_border(image: &Image, size: u32, border: Border) -> Result<Image, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: image.width(),
        height: image.height(),
    };
    let pad = size.checked_mul(2).ok_or_else(too_large)?;
    let width = image.width().checked_add(pad).ok_or_else(too_large)?;
    let height = image.height().checked_add(pad).ok_or_else(too_large)?;
    let mut out = Image::new(width, height, [0; 4])?;

    let src = image.as_bytes();
    let cols: Vec<Option<usize>> = (0..width)
        .map(|x| border.resolve(i64::from(x) - i64::from(size), image.width()))
        .collect();
    let out_stride = width as usize * 4;
    for (y, out_row) in out.as_bytes_mut().chunks_exact_mut(out_stride).enumerate() {
        let Some(sy) = border.resolve(y as i64 - i64::from(size), image.height()) else {
            continue;
        };
        for (px, col) in out_row.chunks_exact_mut(4).zip(&cols) {
            if let Some(sx) = col {
                let off = image.offset(*sx as u32, sy as u32);
                px.copy_from_slice(&src[off..off + 4]);
            }
        }
    }
    Ok(out)
}

/// Round half away from zero, clamp to 0..=255; NaN maps to 0.
#[inline]
fn to_channel(v: f64) -> u8 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= 254.5 {
        255
    } else {
        (v + 0.5) as u8
    }
}

fn selected_channels(channel: Channel) -> Vec<usize> {
    (0..4).filter(|&c| channel.selects(c)).collect()
}

fn convolve_full(
    image: &Image,
    core: &Core,
    channel: Channel,
    border: Border,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let (width, height) = (image.width(), image.height());
    let k = core.size();
    let r = core.radius() as i64;
    log::debug!(
        "convolve: {width}x{height}, {k}x{k} core, {channel:?}, {border:?} border"
    );

    let src = image.as_bytes();
    let weights = core.weights();
    let channels = selected_channels(channel);
    // Unselected channels carry over from the source.
    let mut out = src.to_vec();
    let out_stride = width as usize * 4;

    // Resolved source column for every output column and kernel column.
    let mut cols = vec![None; width as usize * k];
    for x in 0..width as usize {
        for j in 0..k {
            cols[x * k + j] = border.resolve(x as i64 + j as i64 - r, width);
        }
    }
    let mut rows = vec![None; k];

    for (y, out_row) in out.chunks_exact_mut(out_stride).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (i, row) in rows.iter_mut().enumerate() {
            *row = border.resolve(y as i64 + i as i64 - r, height);
        }
        for (x, px) in out_row.chunks_exact_mut(4).enumerate() {
            let mut acc = [0f64; 4];
            for (i, sy) in rows.iter().enumerate() {
                let Some(sy) = *sy else { continue };
                let src_row = image.row(sy);
                for (j, sx) in cols[x * k..(x + 1) * k].iter().enumerate() {
                    let Some(sx) = *sx else { continue };
                    let w = weights[i * k + j];
                    for &c in &channels {
                        acc[c] += w * f64::from(src_row[sx * 4 + c]);
                    }
                }
            }
            for &c in &channels {
                px[c] = to_channel((acc[c] + core.bias()) / core.divisor());
            }
        }
    }

    Ok(Image::from_parts(width, height, out))
}

fn convolve_valid(
    image: &Image,
    core: &Core,
    channel: Channel,
    stop: &dyn Stop,
) -> Result<Image, BitmapError> {
    let k = core.size();
    let r = core.radius();
    let shrink = 2 * r as u64;
    let (in_w, in_h) = (u64::from(image.width()), u64::from(image.height()));
    if in_w <= shrink || in_h <= shrink {
        return Err(BitmapError::InvalidDimensions {
            width: in_w as i64 - shrink as i64,
            height: in_h as i64 - shrink as i64,
        });
    }
    let (width, height) = ((in_w - shrink) as u32, (in_h - shrink) as u32);
    log::debug!(
        "convolve (raw): {in_w}x{in_h} -> {width}x{height}, {k}x{k} core, {channel:?}"
    );

    let weights = core.weights();
    let channels = selected_channels(channel);
    let src = image.as_bytes();
    let mut out = vec![0u8; width as usize * height as usize * 4];
    let out_stride = width as usize * 4;

    for (y, out_row) in out.chunks_exact_mut(out_stride).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (x, px) in out_row.chunks_exact_mut(4).enumerate() {
            let center = image.offset((x + r) as u32, (y + r) as u32);
            px.copy_from_slice(&src[center..center + 4]);

            let mut acc = [0f64; 4];
            for i in 0..k {
                let src_row = &image.row(y + i)[x * 4..(x + k) * 4];
                for (j, sample) in src_row.chunks_exact(4).enumerate() {
                    let w = weights[i * k + j];
                    for &c in &channels {
                        acc[c] += w * f64::from(sample[c]);
                    }
                }
            }
            for &c in &channels {
                px[c] = to_channel((acc[c] + core.bias()) / core.divisor());
            }
        }
    }

    Ok(Image::from_parts(width, height, out))
}
