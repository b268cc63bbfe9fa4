//! # zenbmp
//!
//! BMP decoder/encoder and kernel convolution over an RGBA8 pixel buffer.
//!
//! ## BMP
//! - Reads all DIB header versions: core (12), OS/2 2.x (16, 64),
//!   `BITMAPINFOHEADER` (40), V2 (52), V3 (56), V4 (108), V5 (124)
//! - Magic codes `BM`, `BA`, `CI`, `CP`, `IC`, `PT`
//! - 1/2/4/8-bit palette, 16/32-bit bitfields, 24/32-bit RGB, RLE4/RLE8, OS/2 RLE24
//! - Top-down (negative height) and bottom-up row order
//! - Writes one canonical layout: `BM`, 40-byte header, uncompressed 32-bit
//!
//! ## Convolution
//! - Odd-sized square [`Core`] kernels with bias and divisor
//! - [`Border::Empty`] (zero padding) or [`Border::Replicate`] (edge clamping)
//! - Per-channel or all-channel application, same-size or unpadded ("raw") output
//!
//! ## Non-Goals
//!
//! - Other image formats
//! - Embedded JPEG/PNG and CMYK BMP payloads
//! - Color management
//!
//! ## Usage
//!
//! ```
//! use zenbmp::{Border, Channel, Core, Image, Unstoppable};
//!
//! let image = Image::new(8, 8, [200, 40, 40, 255])?;
//! let bytes = zenbmp::encode_bmp(&image, Unstoppable)?;
//!
//! // Probe without decoding pixels
//! let info = zenbmp::inspect_bmp(&bytes)?;
//! assert_eq!((info.width, info.height, info.bit_depth), (8, 8, 32));
//!
//! let decoded = zenbmp::decode_bmp(&bytes, Unstoppable)?;
//! let blurred = zenbmp::convolve(&decoded, &Core::standard(), Channel::All, Border::Replicate)?;
//! assert_eq!(blurred, image);
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;
pub mod convolve;
pub mod draw;
pub mod filters;

#[cfg(feature = "std")]
mod fs;

use alloc::vec::Vec;

// Re-exports
pub use bmp::{BmpInfo, BmpPermissiveness, row_stride};
pub use convolve::{Border, ConvolveRequest, Core, convolve, convolve_raw, make_border};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
#[cfg(feature = "std")]
pub use fs::{bmp_info, load_bmp, save_bmp};
pub use image::Image;
pub use limits::Limits;
pub use pixel::{Channel, Color, rgb, rgba};

/// Decode a BMP file held in memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode with resource limits.
pub fn decode_bmp_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).with_limits(limits).decode(stop)
}

/// Encode as `BM` / `BITMAPINFOHEADER` / uncompressed 32-bit BGRA, bottom-up.
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(image, &stop)
}

/// Parse and validate BMP headers without decoding pixels.
pub fn inspect_bmp(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    DecodeRequest::new(data).inspect()
}
