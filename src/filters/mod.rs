//! Filters built on the pixel buffer: histograms, mosaic, and per-pixel adjustments.

mod adjust;
mod histogram;
mod mosaic;

pub use adjust::{binarize, extract_channel, grayscale, invert, replace_color};
pub use histogram::{HISTOGRAM_SIZE, channel_counts, histogram, histogram_channel};
pub use mosaic::{block_mosaic, mosaic};
