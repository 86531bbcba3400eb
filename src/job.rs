//! # Print Jobs
//!
//! A [`Job`] is everything the printer needs for one label, as the ordered
//! list of blocks to write:
//!
//! ```text
//! [ header ][ chunk 0 ][ chunk 1 ] ... [ chunk N + trailer ]
//! ```
//!
//! Building a job is pure: the same source image always yields the same
//! bytes, and nothing is sent anywhere. Hand the job to
//! [`transport::send_job`](crate::transport::send_job) to print it.

use image::DynamicImage;
use log::debug;

use crate::error::EncodeError;
use crate::printer::PrinterConfig;
use crate::protocol::{
    chunking::{self, Chunk},
    commands::JobBody,
    graphics,
    header::Header,
};
use crate::render::{self, RasterImage};

/// # Print Job
///
/// Header plus chunks, ready for transmission in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    header: Header,
    chunks: Vec<Chunk>,
}

impl Job {
    /// Build a job from a raster that is already normalized.
    ///
    /// ## Errors
    ///
    /// [`EncodeError::DimensionMismatch`] if the raster's pixel count is not
    /// a whole number of bytes, plus the errors of [`Job::from_body`].
    pub fn from_raster(raster: &RasterImage, config: &PrinterConfig) -> Result<Self, EncodeError> {
        let bitmap = graphics::pack(raster.pixels());
        let body = JobBody::build(raster.width(), raster.height(), &bitmap)?;
        debug!(
            "Encoded {}x{} raster: {} bitmap bytes, {} body bytes",
            raster.width(),
            raster.height(),
            bitmap.len(),
            body.len()
        );

        Self::from_body(&body, config)
    }

    /// Frame an encoded body: header from its length, then chunks.
    ///
    /// ## Errors
    ///
    /// [`EncodeError::LengthOverflow`] or [`EncodeError::TooManyChunks`] if
    /// the body is too large for the wire format.
    pub fn from_body(body: &JobBody, config: &PrinterConfig) -> Result<Self, EncodeError> {
        let header = Header::for_body_len(body.len())?;
        let chunks = chunking::split(body.as_bytes(), config.chunk_size)?;
        debug!(
            "Framed {} body bytes into {} chunks (checksum {:#04x})",
            body.len(),
            chunks.len(),
            header.checksum()
        );

        Ok(Self { header, chunks })
    }

    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[inline]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of blocks to write (header + chunks)
    #[inline]
    pub fn block_count(&self) -> usize {
        1 + self.chunks.len()
    }

    /// Serialized blocks in transmission order: header first, then chunks
    /// by ascending index.
    pub fn blocks(&self) -> Vec<Vec<u8>> {
        std::iter::once(self.header.to_bytes().to_vec())
            .chain(self.chunks.iter().map(Chunk::to_bytes))
            .collect()
    }

    /// The body reassembled from the chunk payloads
    pub fn body(&self) -> Vec<u8> {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.payload().iter().copied())
            .collect()
    }
}

/// # Encode an Image for the Default Printer
///
/// Normalize → pack → encode → header → chunks, for the LetraTag 200B.
///
/// ## Example
///
/// ```
/// use image::{DynamicImage, GrayImage, Luma};
///
/// let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 20, Luma([255])));
/// let job = letratag::encode(&source)?;
///
/// let blocks = job.blocks();
/// assert_eq!(&blocks[0][..4], &[0xFF, 0xF0, 0x12, 0x34]);
/// assert_eq!(blocks.len(), job.block_count());
/// # Ok::<(), letratag::EncodeError>(())
/// ```
pub fn encode(image: &DynamicImage) -> Result<Job, EncodeError> {
    encode_with_config(image, &PrinterConfig::default())
}

/// Encode an image for a specific printer profile
pub fn encode_with_config(image: &DynamicImage, config: &PrinterConfig) -> Result<Job, EncodeError> {
    let raster = render::normalize(image, config)?;
    Job::from_raster(&raster, config)
}

/// Format a block as space-separated lowercase hex, e.g. `1b 45`
pub fn hex_line(block: &[u8]) -> String {
    block
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::chunking::TRAILER;
    use image::{GrayImage, Luma};

    const CONFIG: PrinterConfig = PrinterConfig::LETRATAG_200B;

    fn raster(height: u32, ink: bool) -> RasterImage {
        RasterImage::from_pixels(32, height, vec![ink; 32 * height as usize]).unwrap()
    }

    #[test]
    fn test_header_reports_unchunked_length() {
        let job = Job::from_raster(&raster(128, true), &CONFIG).unwrap();
        // 6 + 12 + 512 + 2 + 2 + 2
        assert_eq!(job.header().body_len(), 536);
        assert_eq!(job.body().len(), 536);
    }

    #[test]
    fn test_blocks_order() {
        let job = Job::from_raster(&raster(128, false), &CONFIG).unwrap();
        let blocks = job.blocks();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], job.header().to_bytes().to_vec());
        assert_eq!(blocks[1][0], 0);
        assert_eq!(blocks[2][0], 1);
        assert_eq!(&blocks[2][blocks[2].len() - 2..], &TRAILER);
    }

    #[test]
    fn test_body_starts_and_ends_with_fixed_commands() {
        let job = Job::from_raster(&raster(8, true), &CONFIG).unwrap();
        let body = job.body();

        assert_eq!(&body[..6], &[0x1B, 0x73, 0x9A, 0x02, 0x00, 0x00]);
        assert_eq!(&body[body.len() - 6..], &[0x1B, 0x45, 0x1B, 0x41, 0x1B, 0x51]);
    }

    #[test]
    fn test_raster_not_byte_aligned() {
        let odd = RasterImage::from_pixels(3, 3, vec![true; 9]).unwrap();
        assert!(matches!(
            Job::from_raster(&odd, &CONFIG),
            Err(EncodeError::DimensionMismatch {
                width: 3,
                height: 3,
                bits: 16
            })
        ));
    }

    #[test]
    fn test_raster_too_long_for_chunk_index() {
        // 32 dots = 4 bytes per row; 32,000 rows is well past 128,000 bytes
        let long = raster(32_000, false);
        assert!(matches!(
            Job::from_raster(&long, &CONFIG),
            Err(EncodeError::TooManyChunks(_))
        ));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let source = DynamicImage::ImageLuma8(GrayImage::from_fn(50, 20, |x, y| {
            Luma([if (x + y) % 3 == 0 { 0 } else { 255 }])
        }));
        assert_eq!(encode(&source).unwrap(), encode(&source).unwrap());
    }

    #[test]
    fn test_encode_rejects_empty_image() {
        let source = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(matches!(
            encode(&source),
            Err(EncodeError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_zero_chunk_size_is_an_error() {
        let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0])));
        let config = PrinterConfig {
            chunk_size: 0,
            ..PrinterConfig::LETRATAG_200B
        };
        assert_eq!(
            encode_with_config(&source, &config),
            Err(EncodeError::InvalidChunkSize(0))
        );
    }

    #[test]
    fn test_hex_line() {
        assert_eq!(hex_line(&[0xFF, 0xF0, 0x12, 0x0A]), "ff f0 12 0a");
        assert_eq!(hex_line(&[]), "");
    }
}
