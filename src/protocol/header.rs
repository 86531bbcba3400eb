//! # Job Header
//!
//! The header is the first block written for every job. It announces the
//! length of the body that the chunks will carry.
//!
//! ## Layout
//!
//! ```text
//! ┌──────┬──────┬───────┬──────────────────┬──────────┐
//! │  FF  │  F0  │ 12 34 │ len (u32, LE)    │ checksum │
//! └──────┴──────┴───────┴──────────────────┴──────────┘
//!  preamble flags  magic   4 bytes            1 byte
//! ```
//!
//! The length is that of the whole **un-chunked** body; chunk indices and the
//! trailer are not counted.
//!
//! ## Checksum
//!
//! The checksum is the sum of the eight preceding bytes, modulo 256.

use super::commands::u32_le;
use crate::error::EncodeError;

/// Header preamble byte
pub const PREAMBLE: u8 = 0xFF;

/// Header flags, always this value
pub const FLAGS: u8 = 0xF0;

/// Header magic
pub const MAGIC: [u8; 2] = [0x12, 0x34];

/// Serialized header length
pub const HEADER_LEN: usize = 9;

/// # Job Header
///
/// Computed once from the finished body, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    body_len: u32,
}

impl Header {
    /// Header for a body of `body_len` bytes.
    ///
    /// ## Errors
    ///
    /// [`EncodeError::LengthOverflow`] if the length does not fit in 32 bits.
    ///
    /// ## Example
    ///
    /// ```
    /// use letratag::protocol::header::Header;
    ///
    /// let header = Header::for_body_len(717).unwrap();
    /// assert_eq!(
    ///     header.to_bytes(),
    ///     [0xFF, 0xF0, 0x12, 0x34, 0xCD, 0x02, 0x00, 0x00, 0x04]
    /// );
    /// ```
    pub fn for_body_len(body_len: usize) -> Result<Self, EncodeError> {
        let body_len =
            u32::try_from(body_len).map_err(|_| EncodeError::LengthOverflow(body_len))?;
        Ok(Self { body_len })
    }

    #[inline]
    pub fn body_len(&self) -> u32 {
        self.body_len
    }

    /// Additive checksum over preamble, flags, magic and length
    pub fn checksum(&self) -> u8 {
        let fixed = [PREAMBLE, FLAGS, MAGIC[0], MAGIC[1]];
        checksum(fixed.iter().chain(u32_le(self.body_len).iter()))
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let [l0, l1, l2, l3] = u32_le(self.body_len);
        [
            PREAMBLE,
            FLAGS,
            MAGIC[0],
            MAGIC[1],
            l0,
            l1,
            l2,
            l3,
            self.checksum(),
        ]
    }
}

/// Sum of bytes modulo 256
fn checksum<'a>(bytes: impl IntoIterator<Item = &'a u8>) -> u8 {
    bytes.into_iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

// ============================================================================
// TESTS
// ============================================================================
