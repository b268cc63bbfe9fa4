use enough::Stop;

use crate::bmp::{self, BmpInfo, BmpPermissiveness};
use crate::error::BitmapError;
use crate::image::Image;
use crate::limits::Limits;

/// Builder for a BMP decode.
///
/// ```
/// use zenbmp::{BmpPermissiveness, DecodeRequest, Image, Limits, Unstoppable};
///
/// let bytes = zenbmp::encode_bmp(&Image::new(2, 2, [1, 2, 3, 255])?, Unstoppable)?;
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let image = DecodeRequest::new(&bytes)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Strict)
///     .decode(Unstoppable)?;
/// assert_eq!(image.pixel(1, 1)?, [1, 2, 3, 255]);
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Decode the whole image to RGBA. No partial image is returned on error.
    pub fn decode(self, stop: impl Stop) -> Result<Image, BitmapError> {
        bmp::decode(self.data, self.limits, self.permissiveness, &stop)
    }

    /// Parse and validate the headers without touching pixel data.
    pub fn inspect(&self) -> Result<BmpInfo, BitmapError> {
        bmp::inspect(self.data, self.permissiveness)
    }
}
