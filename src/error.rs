//! # Error Types
//!
//! This module defines the error types used throughout the letratag library.
//!
//! [`EncodeError`] covers the packet-encoding core only. Everything around it
//! (loading images, Bluetooth, the CLI) reports [`LetraTagError`], which wraps
//! an `EncodeError` when encoding is what failed.

use thiserror::Error;

/// Errors raised while turning a bitmap into a print job.
///
/// All of these are detected synchronously and abort the job; nothing is
/// partially encoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The source (or derived) raster has no area
    #[error("Invalid geometry: {width}x{height} image has no printable area")]
    InvalidGeometry { width: u32, height: u32 },

    /// Declared raster area does not match the number of pixels or packed bits
    #[error("Dimension mismatch: {width}*{height} != {bits} bits of pixel data")]
    DimensionMismatch { width: u32, height: u32, bits: u64 },

    /// Body is too long for the 32-bit length field of the header
    #[error("Length overflow: body of {0} bytes does not fit a 32-bit length")]
    LengthOverflow(usize),

    /// Body would need more chunks than a one-byte index can number
    #[error("Too many chunks: body needs {0} chunks, at most 256 are addressable")]
    TooManyChunks(usize),

    /// Chunk size of zero cannot carry any payload
    #[error("Invalid chunk size: {0} bytes per chunk")]
    InvalidChunkSize(usize),
}

/// Main error type for letratag operations
#[derive(Debug, Error)]
pub enum LetraTagError {
    /// The encoding core rejected the input
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Image loading or saving failed
    #[error("Image error: {0}")]
    Image(String),

    /// Transport-level errors (discovery, lookup, write)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Bluetooth stack error
    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] btleplug::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
