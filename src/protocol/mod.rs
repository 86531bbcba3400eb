//! # LetraTag Protocol Implementation
//!
//! This module provides the byte-level encoding of a LetraTag print job.
//!
//! ## Module Structure
//!
//! - [`graphics`]: Packing a monochrome raster into bytes (LSB first)
//! - [`commands`]: The five job commands and the job body
//! - [`header`]: The 9-byte header announcing the body length
//! - [`chunking`]: Splitting the body into indexed transmission chunks
//!
//! ## Usage Example
//!
//! ```
//! use letratag::protocol::{chunking, commands::JobBody, graphics, header::Header};
//!
//! // A 32x8 label, all ink
//! let bitmap = graphics::pack(&[true; 32 * 8]);
//! let body = JobBody::build(32, 8, &bitmap)?;
//!
//! let header = Header::for_body_len(body.len())?;
//! let chunks = chunking::split(body.as_bytes(), 500)?;
//!
//! assert_eq!(header.body_len(), 6 + 12 + 32 + 6);
//! assert_eq!(chunks.len(), 1);
//!
//! // Send header, then chunks in index order, via a transport...
//! # Ok::<(), letratag::EncodeError>(())
//! ```

pub mod chunking;
pub mod commands;
pub mod graphics;
pub mod header;
