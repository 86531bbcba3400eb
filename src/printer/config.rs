//! # Printer Configuration
//!
//! This module defines the hardware profile of supported label printers.
//!
//! ## Supported Printers
//!
//! | Model | Head width (dots) | Chunk size | BLE service prefix |
//! |-------|-------------------|------------|--------------------|
//! | DYMO LetraTag 200B | 32 | 500 bytes | `be3dd650` |
//!
//! ## Usage
//!
//! ```
//! use letratag::printer::PrinterConfig;
//!
//! let config = PrinterConfig::LETRATAG_200B;
//! println!("Print head: {} dots, chunks of {} bytes",
//!          config.width_dots,
//!          config.chunk_size);
//! ```

/// # Printer Configuration
///
/// Defines the characteristics of a label printer that the encoder and the
/// Bluetooth transport depend on.
///
/// ## Raster Geometry
///
/// - **width_dots**: Width of the print head; every raster is resized to it
/// - **height_scale**: Label length in dots for a square (rotated) source
/// - **threshold**: Luminance below which a pixel is printed
///
/// ## Transport
///
/// - **chunk_size**: Maximum body bytes carried by one chunk
/// - **service_prefix**: First group of the vendor service UUID
/// - **characteristic_prefix** / **characteristic_suffix**: Template of the
///   write characteristic UUID; the middle group is copied from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Raster width in dots (pixels)
    pub width_dots: u32,

    /// Height multiplier applied to the rotated aspect ratio
    pub height_scale: u32,

    /// Luminance threshold (0-255); darker pixels become ink
    pub threshold: u8,

    /// Maximum payload bytes per chunk
    pub chunk_size: usize,

    /// First 8 hex digits of the printer's vendor service UUID
    pub service_prefix: &'static str,

    /// First 8 hex digits of the write characteristic UUID
    pub characteristic_prefix: &'static str,

    /// Last three groups of the write characteristic UUID
    pub characteristic_suffix: &'static str,
}

impl PrinterConfig {
    /// # DYMO LetraTag 200B Configuration
    ///
    /// 12mm tape label maker with a 32-dot thermal head, driven over
    /// Bluetooth Low Energy.
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ┌── 32 dots ──┐
    /// │             │  ← tape feed direction is down;
    /// │   label     │    landscape sources are rotated
    /// │   content   │    so they run along the tape
    /// │             │
    /// └─────────────┘
    /// ```
    pub const LETRATAG_200B: Self = Self {
        name: "DYMO LetraTag 200B",
        width_dots: 32,
        height_scale: 64,
        threshold: 128,
        chunk_size: 500,
        service_prefix: "be3dd650",
        characteristic_prefix: "be3dd651",
        characteristic_suffix: "42f1-99c1-f0f749dd0678",
    };

    /// Number of chunks a job can hold (the index is a single byte).
    pub const MAX_CHUNKS: usize = u8::MAX as usize + 1;
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::LETRATAG_200B
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letratag_geometry() {
        let config = PrinterConfig::LETRATAG_200B;
        assert_eq!(config.width_dots, 32);
        assert_eq!(config.height_scale, 64);
        // Width must pack into whole bytes per row
        assert_eq!(config.width_dots % 8, 0);
    }

    #[test]
    fn test_uuid_template_lengths() {
        let config = PrinterConfig::LETRATAG_200B;
        assert_eq!(config.service_prefix.len(), 8);
        assert_eq!(config.characteristic_prefix.len(), 8);
        assert_eq!(config.characteristic_suffix.split('-').count(), 3);
    }

    #[test]
    fn test_default_is_letratag() {
        assert_eq!(PrinterConfig::default(), PrinterConfig::LETRATAG_200B);
    }
}
