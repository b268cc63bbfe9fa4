use crate::BitmapError;

/// Caps on what a decode may allocate, checked once the headers are parsed
/// and before the RGBA buffer exists.
///
/// `None` means unbounded; the default bounds nothing.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Cap on `width * height`.
    pub max_pixels: Option<u64>,
    /// Cap on the decoded buffer, which is always four bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

fn enforce(what: &str, value: u64, cap: Option<u64>) -> Result<(), BitmapError> {
    match cap {
        Some(cap) if value > cap => Err(BitmapError::LimitExceeded(alloc::format!(
            "{what} {value} is over the limit of {cap}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Validate a `width` x `height` RGBA image against every cap.
    pub(crate) fn check_image(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        enforce("width", width.into(), self.max_width)?;
        enforce("height", height.into(), self.max_height)?;
        enforce("pixel count", pixels, self.max_pixels)?;
        enforce("RGBA buffer size", pixels.saturating_mul(4), self.max_memory_bytes)
    }
}
