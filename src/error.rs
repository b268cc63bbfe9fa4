use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding/encoding, pixel access, and convolution.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unrecognized BMP magic bytes")]
    UnsupportedFormat,

    #[error("unsupported DIB header size: {0}")]
    UnsupportedHeaderVersion(u32),

    #[error("unsupported BMP compression: {0}")]
    UnsupportedCompression(u32),

    #[error("unsupported BMP bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    TruncatedData,

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("invalid convolution core: {0}")]
    InvalidCore(String),

    #[error("coordinate ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
