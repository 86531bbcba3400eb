//! # Body Chunking
//!
//! The printer accepts the body in bounded writes. The body is cut into
//! slices of at most `chunk_size` bytes (500 for the LetraTag), and each
//! slice is sent as one chunk:
//!
//! ```text
//! chunk 0:   00 <body[0..500]>
//! chunk 1:   01 <body[500..1000]>
//! ...
//! chunk N:   NN <body[N*500..len]> 12 34
//! ```
//!
//! ## Index
//!
//! The first byte of a chunk is its index. It is a single byte on the wire,
//! so a body can span at most 256 chunks (128,000 bytes at 500 bytes per
//! chunk). Longer bodies are rejected rather than letting the index wrap.
//!
//! ## Trailer
//!
//! The last chunk always ends with `12 34`, even when its payload is a full
//! `chunk_size` bytes. It marks the end of the stream, not a remainder.

use crate::error::EncodeError;
use crate::printer::PrinterConfig;

/// Trailer appended to the last chunk
pub const TRAILER: [u8; 2] = [0x12, 0x34];

/// # One Transmission Chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    index: u8,
    payload: Vec<u8>,
    last: bool,
}

impl Chunk {
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// The slice of the body this chunk carries, without index or trailer
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Whether this chunk carries the trailer
    #[inline]
    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Serialized length in bytes
    pub fn encoded_len(&self) -> usize {
        1 + self.payload.len() + if self.last { TRAILER.len() } else { 0 }
    }

    /// Serialize as `<index> <payload> [12 34]`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.push(self.index);
        buf.extend_from_slice(&self.payload);
        if self.last {
            buf.extend_from_slice(&TRAILER);
        }
        buf
    }
}

/// # Split a Body Into Chunks
///
/// Cuts `body` into chunks of at most `chunk_size` payload bytes, indexed
/// from 0. An empty body still produces one chunk (index 0, no payload,
/// trailer) so the stream is always terminated.
///
/// ## Errors
///
/// [`EncodeError::InvalidChunkSize`] if `chunk_size` is zero.
///
/// [`EncodeError::TooManyChunks`] if the body needs more than
/// [`PrinterConfig::MAX_CHUNKS`] chunks.
///
/// ## Example
///
/// ```
/// use letratag::protocol::chunking;
///
/// let body = vec![0xAB; 501];
/// let chunks = chunking::split(&body, 500).unwrap();
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].to_bytes().len(), 1 + 500);
/// assert_eq!(chunks[1].to_bytes(), vec![0x01, 0xAB, 0x12, 0x34]);
/// ```
pub fn split(body: &[u8], chunk_size: usize) -> Result<Vec<Chunk>, EncodeError> {
    if chunk_size == 0 {
        return Err(EncodeError::InvalidChunkSize(chunk_size));
    }

    let count = body.len().div_ceil(chunk_size).max(1);
    if count > PrinterConfig::MAX_CHUNKS {
        return Err(EncodeError::TooManyChunks(count));
    }

    let mut chunks: Vec<Chunk> = body
        .chunks(chunk_size)
        .zip(0..=u8::MAX)
        .map(|(payload, index)| Chunk {
            index,
            payload: payload.to_vec(),
            last: false,
        })
        .collect();

    match chunks.last_mut() {
        Some(last) => last.last = true,
        None => chunks.push(Chunk {
            index: 0,
            payload: Vec::new(),
            last: true,
        }),
    }

    Ok(chunks)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn body(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn reassemble(chunks: &[Chunk]) -> Vec<u8> {
        chunks.iter().flat_map(|c| c.payload().to_vec()).collect()
    }

    #[test]
    fn test_reassembles_body() {
        for len in [0usize, 1, 499, 500, 501, 1000, 1001, 2500] {
            let data = body(len);
            let chunks = split(&data, 500).unwrap();
            assert_eq!(reassemble(&chunks), data, "len {}", len);
        }
    }

    #[test]
    fn test_reassembles_from_wire_bytes() {
        let data = body(1234);
        let chunks = split(&data, 500).unwrap();
        let mut rebuilt = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let bytes = chunk.to_bytes();
            assert_eq!(bytes[0] as usize, i);
            let end = if chunk.is_last() {
                bytes.len() - TRAILER.len()
            } else {
                bytes.len()
            };
            rebuilt.extend_from_slice(&bytes[1..end]);
        }
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn test_full_chunk_still_gets_trailer() {
        let data = body(500);
        let chunks = split(&data, 500).unwrap();

        assert_eq!(chunks.len(), 1);
        let bytes = chunks[0].to_bytes();
        assert_eq!(bytes.len(), 1 + 500 + 2);
        assert_eq!(bytes[0], 0);
        assert_eq!(&bytes[501..], &TRAILER);
    }

    #[test]
    fn test_only_last_chunk_has_trailer() {
        let chunks = split(&body(1000), 500).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(!chunks[0].is_last());
        assert_eq!(chunks[0].to_bytes().len(), 501);
        assert!(chunks[1].is_last());
        assert_eq!(chunks[1].to_bytes().len(), 503);
    }

    #[test]
    fn test_chunk_boundaries() {
        let data = body(1001);
        let chunks = split(&data, 500).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].payload(), &data[0..500]);
        assert_eq!(chunks[1].payload(), &data[500..1000]);
        assert_eq!(chunks[2].payload(), &data[1000..]);
        assert_eq!(chunks[2].to_bytes(), vec![0x02, data[1000], 0x12, 0x34]);
    }

    #[test]
    fn test_empty_body() {
        let chunks = split(&[], 500).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].to_bytes(), vec![0x00, 0x12, 0x34]);
    }

    #[test]
    fn test_256_chunks_is_the_limit() {
        let data = vec![0u8; 256 * 500];
        let chunks = split(&data, 500).unwrap();
        assert_eq!(chunks.len(), 256);
        assert_eq!(chunks.last().unwrap().index(), 255);
    }

    #[test]
    fn test_too_many_chunks() {
        let data = vec![0u8; 256 * 500 + 1];
        assert_eq!(split(&data, 500), Err(EncodeError::TooManyChunks(257)));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert_eq!(split(&body(10), 0), Err(EncodeError::InvalidChunkSize(0)));
        assert_eq!(split(&[], 0), Err(EncodeError::InvalidChunkSize(0)));
    }

    #[test]
    fn test_encoded_len_matches_bytes() {
        for chunk in split(&body(1001), 500).unwrap() {
            assert_eq!(chunk.encoded_len(), chunk.to_bytes().len());
        }
    }
}
