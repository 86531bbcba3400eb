//! # LetraTag Job Commands
//!
//! This module implements the command blocks that make up the body of a
//! LetraTag print job.
//!
//! ## Body Layout
//!
//! Every job body is the same five commands, always in this order:
//!
//! | # | Command | Bytes |
//! |---|---------|-------|
//! | 1 | Start job | `1B 73 9A 02 00 00` |
//! | 2 | Print data | `1B 44 01 02 <width:u32> <height:u32> <bitmap>` |
//! | 3 | Form feed | `1B 45` |
//! | 4 | Status | `1B 41` |
//! | 5 | End | `1B 51` |
//!
//! The printer does not accept the commands in any other order, so the body
//! is only ever built through [`JobBody::build`].
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u32` value 0x0000_0120 is sent as bytes `[0x20, 0x01, 0x00, 0x00]`

use super::graphics::PackedBitmap;
use crate::error::EncodeError;

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// Command type: start job
pub const START_JOB: u8 = 0x73;

/// Command type: print data
pub const PRINT_DATA: u8 = 0x44;

/// Command type: form feed
pub const FORM_FEED: u8 = 0x45;

/// Command type: status
pub const STATUS: u8 = 0x41;

/// Command type: end
pub const END: u8 = 0x51;

/// Job id sent with every start job command. The printer only accepts this one.
const JOB_ID: [u8; 4] = [0x9A, 0x02, 0x00, 0x00];

/// Bits per pixel of the print data (monochrome)
const BITS_PER_PIXEL: u8 = 0x01;

/// Alignment of the print data
const ALIGNMENT: u8 = 0x02;

/// Length of the print data command before the bitmap
pub const PRINT_DATA_HEADER_LEN: usize = 12;

// ============================================================================
// COMMAND BLOCKS
// ============================================================================

/// # A Single Job Command
///
/// Each variant owns its serialization. `PrintData` borrows the bitmap so a
/// body can be built without copying the raster twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandBlock<'a> {
    /// Start a new job (ESC s)
    StartJob,

    /// Raster to print (ESC D). Build with [`CommandBlock::print_data`],
    /// which checks that the declared area matches the bitmap.
    PrintData {
        width: u32,
        height: u32,
        bitmap: &'a PackedBitmap,
    },

    /// Feed the printed label out (ESC E)
    FormFeed,

    /// Status request (ESC A)
    Status,

    /// End of job (ESC Q)
    End,
}

impl<'a> CommandBlock<'a> {
    /// # Print Data (ESC D 01 02 width height data)
    ///
    /// ## Protocol Details
    ///
    /// | Format | Bytes |
    /// |--------|-------|
    /// | Hex | 1B 44 01 02 w0 w1 w2 w3 h0 h1 h2 h3 d1...dk |
    ///
    /// - `01`: bits per pixel
    /// - `02`: alignment
    /// - `w0..w3`, `h0..h3`: width and height in dots, little-endian
    /// - `d1...dk`: packed bitmap, k = width × height / 8
    ///
    /// ## Errors
    ///
    /// [`EncodeError::DimensionMismatch`] unless
    /// `width * height == bitmap.len() * 8`. Nothing is truncated or padded
    /// to make them agree.
    ///
    /// ## Example
    ///
    /// ```
    /// use letratag::protocol::{commands::CommandBlock, graphics};
    ///
    /// let bitmap = graphics::pack(&[true; 32 * 2]);
    /// let block = CommandBlock::print_data(32, 2, &bitmap).unwrap();
    ///
    /// assert_eq!(&block.to_bytes()[..4], &[0x1B, 0x44, 0x01, 0x02]);
    /// assert!(CommandBlock::print_data(32, 3, &bitmap).is_err());
    /// ```
    pub fn print_data(
        width: u32,
        height: u32,
        bitmap: &'a PackedBitmap,
    ) -> Result<Self, EncodeError> {
        if width as u64 * height as u64 != bitmap.bit_len() {
            return Err(EncodeError::DimensionMismatch {
                width,
                height,
                bits: bitmap.bit_len(),
            });
        }

        Ok(Self::PrintData {
            width,
            height,
            bitmap,
        })
    }

    /// Serialized length in bytes
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::StartJob => 2 + JOB_ID.len(),
            Self::PrintData { bitmap, .. } => PRINT_DATA_HEADER_LEN + bitmap.len(),
            Self::FormFeed | Self::Status | Self::End => 2,
        }
    }

    /// Append the serialized command to `buf`
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        match self {
            Self::StartJob => {
                buf.push(ESC);
                buf.push(START_JOB);
                buf.extend_from_slice(&JOB_ID);
            }
            Self::PrintData {
                width,
                height,
                bitmap,
            } => {
                buf.push(ESC);
                buf.push(PRINT_DATA);
                buf.push(BITS_PER_PIXEL);
                buf.push(ALIGNMENT);
                buf.extend_from_slice(&u32_le(*width));
                buf.extend_from_slice(&u32_le(*height));
                buf.extend_from_slice(bitmap.as_bytes());
            }
            Self::FormFeed => buf.extend_from_slice(&[ESC, FORM_FEED]),
            Self::Status => buf.extend_from_slice(&[ESC, STATUS]),
            Self::End => buf.extend_from_slice(&[ESC, END]),
        }
    }

    /// Serialize the command into a new buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buf);
        buf
    }
}

// ============================================================================
// JOB BODY
// ============================================================================

/// # Job Body
///
/// The five commands of a job, serialized back to back. Once built the body
/// is immutable; the header and the chunks are both derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobBody {
    bytes: Vec<u8>,
}

impl JobBody {
    /// Build the body for one label.
    ///
    /// ## Example
    ///
    /// ```
    /// use letratag::protocol::{commands::JobBody, graphics};
    ///
    /// let bitmap = graphics::pack(&[false; 32]);
    /// let body = JobBody::build(32, 1, &bitmap).unwrap();
    ///
    /// // 6 start + 12 print header + 4 bitmap + 2 + 2 + 2
    /// assert_eq!(body.len(), 28);
    /// assert_eq!(&body.as_bytes()[body.len() - 2..], &[0x1B, 0x51]);
    /// ```
    pub fn build(width: u32, height: u32, bitmap: &PackedBitmap) -> Result<Self, EncodeError> {
        let blocks = [
            CommandBlock::StartJob,
            CommandBlock::print_data(width, height, bitmap)?,
            CommandBlock::FormFeed,
            CommandBlock::Status,
            CommandBlock::End,
        ];

        let mut bytes = Vec::with_capacity(blocks.iter().map(CommandBlock::encoded_len).sum());
        for block in &blocks {
            block.write_to(&mut bytes);
        }

        Ok(Self { bytes })
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
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u32 value as little-endian bytes
///
/// ## Example
///
/// ```
/// use letratag::protocol::commands::u32_le;
///
/// assert_eq!(u32_le(0x0000_02CD), [0xCD, 0x02, 0x00, 0x00]);
/// assert_eq!(u32_le(32), [0x20, 0x00, 0x00, 0x00]);
/// ```
#[inline]
pub const fn u32_le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

// ============================================================================
// TESTS
// ============================================================================
