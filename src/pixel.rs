/// One RGBA pixel, channel order R, G, B, A.
pub type Color = [u8; 4];

/// Pack four channel values into a [`Color`].
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    [r, g, b, a]
}

/// Opaque color from three channel values.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r, g, b, 255]
}

/// Channel selector for per-channel operations.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    /// Every channel, each processed independently.
    All,
}

impl Channel {
    /// Byte offset within an RGBA pixel, `None` for [`Channel::All`].
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Red => Some(0),
            Self::Green => Some(1),
            Self::Blue => Some(2),
            Self::Alpha => Some(3),
            Self::All => None,
        }
    }

    /// Whether channel byte `c` (0..4) is selected.
    #[inline]
    pub fn selects(self, c: usize) -> bool {
        match self.index() {
            Some(i) => i == c,
            None => c < 4,
        }
    }
}

/// Rec. 601 luma with integer rounding.
#[inline]
pub(crate) fn luma(px: Color) -> u8 {
    let y = 299 * u32::from(px[0]) + 587 * u32::from(px[1]) + 114 * u32::from(px[2]);
    ((y + 500) / 1000) as u8
}
