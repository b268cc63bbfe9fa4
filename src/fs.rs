//! Path-based wrappers over the in-memory codec.

use std::path::Path;

use enough::Unstoppable;

use crate::bmp::BmpInfo;
use crate::error::BitmapError;
use crate::image::Image;

/// Read and decode a BMP file.
pub fn load_bmp(path: impl AsRef<Path>) -> Result<Image, BitmapError> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let data = std::fs::read(path)?;
    crate::decode_bmp(&data, Unstoppable)
}

/// Encode `image` canonically and write it to `path`.
pub fn save_bmp(image: &Image, path: impl AsRef<Path>) -> Result<(), BitmapError> {
    let path = path.as_ref();
    let data = crate::encode_bmp(image, Unstoppable)?;
    log::debug!("writing {} bytes to {}", data.len(), path.display());
    std::fs::write(path, data)?;
    Ok(())
}

/// Header summary of a BMP file; print it with `{}` for a readable report.
pub fn bmp_info(path: impl AsRef<Path>) -> Result<BmpInfo, BitmapError> {
    let data = std::fs::read(path)?;
    crate::inspect_bmp(&data)
}
