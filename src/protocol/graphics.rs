//! # Bitmap Packing
//!
//! The print data command carries the raster as a packed bitmap: one bit
//! per dot, eight consecutive dots per byte.
//!
//! ## Bit Order
//!
//! Dots are taken in row-major order and packed **least-significant bit
//! first**:
//! - Bit 0 (LSB) = first dot of the group
//! - Bit 7 (MSB) = eighth dot of the group
//! - 1 = ink (print), 0 = background
//!
//! ```text
//! dots:  █ █ █ █ ░ ░ ░ ░   → 0x0F
//! dots:  ░ ░ ░ ░ █ █ █ █   → 0xF0
//! dots:  █ ░ █ ░ █ ░ █ ░   → 0x55
//! ```
//!
//! This is the reverse of the MSB-first layout most ESC/POS printers use.
//!
//! ## Padding
//!
//! If the dot count is not a multiple of 8, the final byte is zero-padded in
//! its unused high bits. The print data command refuses such bitmaps (see
//! [`CommandBlock::PrintData`](super::commands::CommandBlock::PrintData)),
//! which is why the print head width is a multiple of 8.

/// A raster packed 8 dots per byte, LSB first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBitmap {
    bytes: Vec<u8>,
}

impl PackedBitmap {
    /// Wrap bytes that are already packed.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bits the bitmap carries, padding included.
    #[inline]
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8
    }
}

/// # Pack Dots Into Bytes
///
/// Packs a row-major sequence of dots (`true` = ink) into a
/// [`PackedBitmap`] of `ceil(dots.len() / 8)` bytes.
///
/// ## Example
///
/// ```
/// use letratag::protocol::graphics;
///
/// let dots = [true, true, true, true, false, false, false, false, true];
/// let bitmap = graphics::pack(&dots);
///
/// assert_eq!(bitmap.as_bytes(), &[0x0F, 0x01]);
/// ```
pub fn pack(dots: &[bool]) -> PackedBitmap {
    let bytes = dots
        .chunks(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (bit, &ink)| byte | ((ink as u8) << bit))
        })
        .collect();

    PackedBitmap { bytes }
}

// ============================================================================
// TESTS
// ============================================================================
