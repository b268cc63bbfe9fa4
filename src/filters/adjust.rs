use crate::image::Image;
use crate::pixel::{Channel, Color, luma};

/// Invert the color channels in place; alpha is unchanged.
pub fn invert(image: &mut Image) {
    for px in image.as_bytes_mut().chunks_exact_mut(4) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
}

/// Replace R, G and B with the pixel's luma in place.
pub fn grayscale(image: &mut Image) {
    for px in image.as_bytes_mut().chunks_exact_mut(4) {
        let y = luma([px[0], px[1], px[2], px[3]]);
        px[..3].fill(y);
    }
}

/// Luma at or above `threshold` becomes white, below becomes black. Alpha is unchanged.
pub fn binarize(image: &mut Image, threshold: u8) {
    for px in image.as_bytes_mut().chunks_exact_mut(4) {
        let y = luma([px[0], px[1], px[2], px[3]]);
        px[..3].fill(if y >= threshold { 255 } else { 0 });
    }
}

/// Replace every pixel exactly equal to `find`. Returns how many changed.
pub fn replace_color(image: &mut Image, find: Color, replace: Color) -> usize {
    let mut n = 0;
    for px in image.as_bytes_mut().chunks_exact_mut(4) {
        if px[..] == find[..] {
            px.copy_from_slice(&replace);
            n += 1;
        }
    }
    n
}

/// Isolate one channel into a new opaque image.
///
/// Red, green and blue keep the selected channel and zero the other two.
/// [`Channel::Alpha`] renders alpha as gray and [`Channel::All`] renders luma.
pub fn extract_channel(image: &Image, channel: Channel) -> Image {
    let mut out = image.clone();
    for px in out.as_bytes_mut().chunks_exact_mut(4) {
        let src: Color = [px[0], px[1], px[2], px[3]];
        let new = match channel {
            Channel::Red => [src[0], 0, 0, 255],
            Channel::Green => [0, src[1], 0, 255],
            Channel::Blue => [0, 0, src[2], 255],
            Channel::Alpha => [src[3], src[3], src[3], 255],
            Channel::All => {
                let y = luma(src);
                [y, y, y, 255]
            }
        };
        px.copy_from_slice(&new);
    }
    out
}
