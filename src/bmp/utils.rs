//! Sub-byte unpacking and bitfield extraction.

/// Unpack 1/2/4-bit samples (MSB first) into one byte each.
///
/// With `indices` the raw values are kept (palette lookups); otherwise they
/// are scaled to 0..=255 so a palette-less image reads as grayscale.
pub(crate) fn expand_bits_to_byte(depth: u16, indices: bool, input: &[u8], out: &mut [u8]) {
    let (mask, scale): (u8, u8) = match depth {
        1 => (0x01, 0xFF),
        2 => (0x03, 0x55),
        4 => (0x0F, 0x11),
        _ => return,
    };
    let scale = if indices { 1 } else { scale };
    let per_byte = 8 / depth as usize;

    for (i, o) in out.iter_mut().enumerate() {
        let Some(&byte) = input.get(i / per_byte) else {
            break;
        };
        let shift = 8 - depth as usize * (i % per_byte + 1);
        *o = ((byte >> shift) & mask).wrapping_mul(scale);
    }
}

/// Multiplier that replicates an N-bit value across 8 bits (before `SHIFT_TABLE`).
const MUL_TABLE: [u32; 9] = [0, 0xff, 0x55, 0x49, 0x11, 0x21, 0x41, 0x81, 0x01];

const SHIFT_TABLE: [u32; 9] = [0, 0, 0, 1, 0, 2, 4, 6, 0];

/// One channel mask of a bitfields image, precomputed for extraction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Bitfield {
    mask: u32,
    /// Position of the mask's top bit minus 8 (negative for narrow low masks).
    shift: i32,
    bits: u32,
}

impl Bitfield {
    pub(crate) fn new(mask: u32) -> Self {
        Self {
            mask,
            shift: (32 - mask.leading_zeros() as i32) - 8,
            bits: mask.count_ones().min(8),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Scale the masked field of `v` to 0..=255.
    #[inline]
    pub(crate) fn extract(&self, v: u32) -> u8 {
        if self.bits == 0 {
            return 0;
        }
        let mut v = v & self.mask;
        if self.shift < 0 {
            v <<= -self.shift;
        } else {
            v >>= self.shift;
        }
        v >>= 8 - self.bits;
        ((v * MUL_TABLE[self.bits as usize]) >> SHIFT_TABLE[self.bits as usize]) as u8
    }
}
