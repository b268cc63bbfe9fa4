use crate::error::BitmapError;
use crate::image::Image;
use crate::pixel::{Channel, Color, luma};

/// Side length of rendered histogram images.
pub const HISTOGRAM_SIZE: u32 = 256;

/// Frequency of each value 0..=255 in `channel`. [`Channel::All`] counts luma.
pub fn channel_counts(image: &Image, channel: Channel) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for px in image.as_bytes().chunks_exact(4) {
        let v = match channel.index() {
            Some(c) => px[c],
            None => luma([px[0], px[1], px[2], px[3]]),
        };
        counts[usize::from(v)] += 1;
    }
    counts
}

/// Bar height for each value, scaled so the most frequent value fills the image.
fn bar_heights(counts: &[u64; 256]) -> [u32; 256] {
    let max = counts.iter().copied().max().unwrap_or(0);
    let mut heights = [0u32; 256];
    if max == 0 {
        return heights;
    }
    let full = u64::from(HISTOGRAM_SIZE);
    for (h, &n) in heights.iter_mut().zip(counts) {
        *h = ((n * full + max / 2) / max) as u32;
    }
    heights
}

/// Render the histogram of one channel as a 256×256 bar chart.
///
/// Column `v` holds a bar for value `v`, drawn upward from the bottom row in
/// the channel's color on an opaque black background. Alpha and
/// [`Channel::All`] (luma) bars are white.
pub fn histogram_channel(image: &Image, channel: Channel) -> Result<Image, BitmapError> {
    let color: Color = match channel {
        Channel::Red => [255, 0, 0, 255],
        Channel::Green => [0, 255, 0, 255],
        Channel::Blue => [0, 0, 255, 255],
        _ => [255, 255, 255, 255],
    };
    let mut out = Image::new(HISTOGRAM_SIZE, HISTOGRAM_SIZE, [0, 0, 0, 255])?;
    let heights = bar_heights(&channel_counts(image, channel));
    for (x, &h) in heights.iter().enumerate() {
        for t in 0..h {
            out.set_pixel(x as u32, HISTOGRAM_SIZE - 1 - t, color)?;
        }
    }
    Ok(out)
}

/// Render the red, green and blue histograms on one 256×256 canvas.
///
/// Each channel's bars are written into that channel only, so overlapping
/// bars mix (red + green bars show yellow, all three show white).
pub fn histogram(image: &Image) -> Result<Image, BitmapError> {
    let mut out = Image::new(HISTOGRAM_SIZE, HISTOGRAM_SIZE, [0, 0, 0, 255])?;
    for (c, channel) in [Channel::Red, Channel::Green, Channel::Blue]
        .into_iter()
        .enumerate()
    {
        let heights = bar_heights(&channel_counts(image, channel));
        for (x, &h) in heights.iter().enumerate() {
            for t in 0..h {
                let off = out.offset(x as u32, HISTOGRAM_SIZE - 1 - t);
                out.as_bytes_mut()[off + c] = 255;
            }
        }
    }
    Ok(out)
}
