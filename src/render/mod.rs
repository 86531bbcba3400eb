//! # Rendering Module
//!
//! This module turns source images into printable monochrome rasters.
//!
//! ## Modules
//!
//! - [`raster`]: Threshold, rotate and resize to the print head geometry
//!
//! ## Usage Example
//!
//! ```
//! use image::{DynamicImage, RgbImage, Rgb};
//! use letratag::{printer::PrinterConfig, render};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 40, Rgb([20, 20, 20])));
//! let raster = render::normalize(&source, &PrinterConfig::LETRATAG_200B)?;
//!
//! // 32 dots wide, 64 * 120 / 40 rows long
//! assert_eq!((raster.width(), raster.height()), (32, 192));
//! # Ok::<(), letratag::EncodeError>(())
//! ```

pub mod raster;

pub use raster::{RasterImage, normalize};
