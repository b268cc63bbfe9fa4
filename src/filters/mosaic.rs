use crate::error::BitmapError;
use crate::image::Image;

/// Pixelate the whole image with `granularity`×`granularity` blocks.
pub fn mosaic(image: &Image, granularity: u32) -> Result<Image, BitmapError> {
    block_mosaic(image, 0, 0, image.width(), image.height(), granularity)
}

/// Pixelate only the `length_x`×`length_y` region at (`offset_x`, `offset_y`).
///
/// The region is tiled into non-overlapping blocks starting at its top-left
/// corner; blocks on the right and bottom edges are clipped to the region.
/// Every pixel of a block gets the block's per-channel rounded mean.
pub fn block_mosaic(
    image: &Image,
    offset_x: u32,
    offset_y: u32,
    length_x: u32,
    length_y: u32,
    granularity: u32,
) -> Result<Image, BitmapError> {
    if granularity == 0 {
        return Err(BitmapError::InvalidCore("mosaic granularity must be non-zero".into()));
    }
    let end_x = offset_x.checked_add(length_x);
    let end_y = offset_y.checked_add(length_y);
    let (Some(end_x), Some(end_y)) = (end_x, end_y) else {
        return Err(out_of_bounds(image, u32::MAX, u32::MAX));
    };
    if length_x == 0 || length_y == 0 || end_x > image.width() || end_y > image.height() {
        return Err(out_of_bounds(image, end_x, end_y));
    }

    let mut out = image.clone();
    let mut by = offset_y;
    while by < end_y {
        let bh = granularity.min(end_y - by);
        let mut bx = offset_x;
        while bx < end_x {
            let bw = granularity.min(end_x - bx);
            let mean = block_mean(image, bx, by, bw, bh);
            for y in by..by + bh {
                let start = out.offset(bx, y);
                for px in out.as_bytes_mut()[start..start + bw as usize * 4].chunks_exact_mut(4) {
                    px.copy_from_slice(&mean);
                }
            }
            bx += bw;
        }
        by += bh;
    }
    Ok(out)
}

fn block_mean(image: &Image, x: u32, y: u32, w: u32, h: u32) -> [u8; 4] {
    let mut sums = [0u64; 4];
    for row in y..y + h {
        let start = image.offset(x, row);
        for px in image.as_bytes()[start..start + w as usize * 4].chunks_exact(4) {
            for (s, &v) in sums.iter_mut().zip(px) {
                *s += u64::from(v);
            }
        }
    }
    let n = u64::from(w) * u64::from(h);
    sums.map(|s| ((s + n / 2) / n) as u8)
}

fn out_of_bounds(image: &Image, x: u32, y: u32) -> BitmapError {
    BitmapError::OutOfBounds {
        x: i64::from(x),
        y: i64::from(y),
        width: image.width(),
        height: image.height(),
    }
}
