//! # Raster Normalization
//!
//! Converts an arbitrary source image into the fixed-geometry monochrome
//! raster the print head expects.
//!
//! ## Pipeline
//!
//! ```text
//! source (W×H, any color type)
//!    │  threshold at 128, no dithering     ink = darker than threshold
//!    ▼
//! mask (W×H, binary)
//!    │  rotate 90° clockwise, canvas grows  the head scans in portrait
//!    ▼
//! mask (H×W)
//!    │  nearest-neighbour resize
//!    ▼
//! raster (32 × floor(64·W/H))
//! ```
//!
//! ## Height Rule
//!
//! The raster height is `floor(height_scale × rotated_height / rotated_width)`
//! with `height_scale = 64`, computed from the **rotated** mask. The width is
//! fixed at 32 dots regardless of the source, so the label is stretched along
//! the tape by a factor of two relative to the source aspect ratio; this is
//! what the printer's dot pitch needs to print undistorted.
//!
//! | Source | Rotated | Raster |
//! |--------|---------|--------|
//! | 100×50 | 50×100 | 32×128 |
//! | 200×30 | 30×200 | 32×426 |
//! | 30×200 | 200×30 | 32×9 |
//!
//! ## Transparency
//!
//! Alpha is flattened onto white before thresholding, so transparent areas
//! of a PNG come out as background instead of ink.

use image::{
    DynamicImage, GrayImage, Luma,
    imageops::{self, FilterType},
};

use crate::error::EncodeError;
use crate::printer::PrinterConfig;

/// Mask value for an ink pixel
pub const INK: u8 = 0;

/// Mask value for a background pixel
pub const BACKGROUND: u8 = 255;

/// # Monochrome Raster
///
/// `width * height` pixels in row-major order, `true` for ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl RasterImage {
    /// Build a raster from explicit pixels.
    ///
    /// ## Errors
    ///
    /// [`EncodeError::DimensionMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<bool>) -> Result<Self, EncodeError> {
        if width as u64 * height as u64 != pixels.len() as u64 {
            return Err(EncodeError::DimensionMismatch {
                width,
                height,
                bits: pixels.len() as u64,
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels, `true` for ink
    #[inline]
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Whether the pixel at (x, y) is ink
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Render back to grayscale (ink = black) for previews
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_ink(x, y) {
                Luma([INK])
            } else {
                Luma([BACKGROUND])
            }
        })
    }
}

/// # Normalize a Source Image
///
/// Runs the full pipeline described in the module docs.
///
/// ## Errors
///
/// [`EncodeError::InvalidGeometry`] if the source has zero area, or is so
/// tall relative to its width that the raster height rounds down to zero.
///
/// ## Example
///
/// ```
/// use image::{DynamicImage, GrayImage, Luma};
/// use letratag::{printer::PrinterConfig, render::raster};
///
/// let source = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 50, Luma([0])));
/// let raster = raster::normalize(&source, &PrinterConfig::LETRATAG_200B).unwrap();
///
/// assert_eq!((raster.width(), raster.height()), (32, 128));
/// assert!(raster.pixels().iter().all(|&ink| ink));
/// ```
pub fn normalize(image: &DynamicImage, config: &PrinterConfig) -> Result<RasterImage, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidGeometry { width, height });
    }

    let mask = threshold(image, config.threshold);
    let rotated = imageops::rotate90(&mask);

    let raster_height = scaled_height(rotated.width(), rotated.height(), config.height_scale);
    if raster_height == 0 {
        return Err(EncodeError::InvalidGeometry {
            width: config.width_dots,
            height: 0,
        });
    }

    let resized = imageops::resize(
        &rotated,
        config.width_dots,
        raster_height,
        FilterType::Nearest,
    );
    let pixels = resized.pixels().map(|p| p[0] < config.threshold).collect();

    RasterImage::from_pixels(config.width_dots, raster_height, pixels)
}

/// Raster height for a rotated mask: `floor(scale * height / width)`.
///
/// `rotated_width` must be non-zero.
pub fn scaled_height(rotated_width: u32, rotated_height: u32, scale: u32) -> u32 {
    let height = scale as u64 * rotated_height as u64 / rotated_width as u64;
    height.min(u32::MAX as u64) as u32
}

/// Classify every pixel as [`INK`] or [`BACKGROUND`] without dithering.
///
/// Luminance uses the ITU-R 601-2 weights (`L = R*299/1000 + G*587/1000 +
/// B*114/1000`), the conversion the reference labels were printed with.
pub fn threshold(image: &DynamicImage, level: u8) -> GrayImage {
    let source = image.to_rgba8();
    GrayImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, alpha] = source.get_pixel(x, y).0;
        if flatten_on_white(luma_601(r, g, b), alpha) < level {
            Luma([INK])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// ITU-R 601-2 luma of an RGB pixel
#[inline]
fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Composite a luma/alpha pair over a white background
#[inline]
fn flatten_on_white(luma: u8, alpha: u8) -> u8 {
    let (l, a) = (luma as u32, alpha as u32);
    ((l * a + 255 * (255 - a)) / 255) as u8
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{LumaA, Rgb, RgbImage};

    const CONFIG: PrinterConfig = PrinterConfig::LETRATAG_200B;

    fn solid(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    #[test]
    fn test_canonical_height_rule() {
        assert_eq!(normalize(&solid(100, 50, 0), &CONFIG).unwrap().height(), 128);
        assert_eq!(normalize(&solid(200, 30, 0), &CONFIG).unwrap().height(), 426);
        assert_eq!(normalize(&solid(30, 200, 0), &CONFIG).unwrap().height(), 9);
        assert_eq!(normalize(&solid(1, 1, 0), &CONFIG).unwrap().height(), 64);
        assert_eq!(normalize(&solid(3, 1, 0), &CONFIG).unwrap().height(), 192);
    }

    #[test]
    fn test_scaled_height_truncates() {
        // 64 * 200 / 30 = 426.67
        assert_eq!(scaled_height(30, 200, 64), 426);
        assert_eq!(scaled_height(200, 30, 64), 9);
        assert_eq!(scaled_height(64, 64, 64), 64);
        assert_eq!(scaled_height(1000, 1, 64), 0);
    }

    #[test]
    fn test_width_is_fixed() {
        for (w, h) in [(1, 1), (7, 3), (640, 480), (33, 500)] {
            let raster = normalize(&solid(w, h, 255), &CONFIG).unwrap();
            assert_eq!(raster.width(), 32);
            assert_eq!(
                raster.pixels().len(),
                32 * raster.height() as usize,
                "{}x{}",
                w,
                h
            );
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let raster = normalize(&solid(4, 4, 127), &CONFIG).unwrap();
        assert!(raster.pixels().iter().all(|&ink| ink));

        let raster = normalize(&solid(4, 4, 128), &CONFIG).unwrap();
        assert!(raster.pixels().iter().all(|&ink| !ink));
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // Landscape 64x32 source, left half black
        let source = GrayImage::from_fn(64, 32, |x, _| Luma([if x < 32 { 0 } else { 255 }]));
        let raster = normalize(&DynamicImage::ImageLuma8(source), &CONFIG).unwrap();

        assert_eq!(raster.height(), 128);
        // Source left edge runs along the top of the label
        for x in 0..32 {
            assert!(raster.is_ink(x, 0));
            assert!(raster.is_ink(x, 60));
            assert!(!raster.is_ink(x, 68));
            assert!(!raster.is_ink(x, 127));
        }

        // Top half black: source top edge ends up on the right of the head
        let source = GrayImage::from_fn(64, 32, |_, y| Luma([if y < 16 { 0 } else { 255 }]));
        let raster = normalize(&DynamicImage::ImageLuma8(source), &CONFIG).unwrap();
        for y in 0..raster.height() {
            assert!(raster.is_ink(31, y));
            assert!(!raster.is_ink(0, y));
        }
    }

    #[test]
    fn test_color_source() {
        let mut source = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        source.put_pixel(0, 0, Rgb([0, 0, 0]));
        let mask = threshold(&DynamicImage::ImageRgb8(source), 128);

        assert_eq!(mask.get_pixel(0, 0)[0], INK);
        assert_eq!(mask.get_pixel(1, 0)[0], BACKGROUND);
    }

    #[test]
    fn test_color_uses_601_luma() {
        // 100*0.299 + 150*0.587 = 117, ink. Rec. 709 weights give 128.
        assert_eq!(luma_601(100, 150, 0), 117);
        let source = RgbImage::from_pixel(4, 4, Rgb([100, 150, 0]));
        let raster = normalize(&DynamicImage::ImageRgb8(source), &CONFIG).unwrap();
        assert!(raster.pixels().iter().all(|&ink| ink));

        // Saturated blue: 29
        let mask = threshold(&DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([0, 0, 255]))), 128);
        assert_eq!(mask.get_pixel(0, 0)[0], INK);

        // Pure green: 149
        let mask = threshold(&DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([0, 255, 0]))), 128);
        assert_eq!(mask.get_pixel(0, 0)[0], BACKGROUND);
    }

    #[test]
    fn test_transparent_is_background() {
        let source = image::GrayAlphaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                LumaA([0, 0]) // transparent black
            } else {
                LumaA([0, 255]) // opaque black
            }
        });
        let mask = threshold(&DynamicImage::ImageLumaA8(source), 128);

        assert_eq!(mask.get_pixel(0, 0)[0], BACKGROUND);
        assert_eq!(mask.get_pixel(1, 0)[0], INK);
    }

    #[test]
    fn test_zero_area_rejected() {
        assert_eq!(
            normalize(&solid(0, 10, 0), &CONFIG),
            Err(EncodeError::InvalidGeometry {
                width: 0,
                height: 10
            })
        );
        assert!(normalize(&solid(10, 0, 0), &CONFIG).is_err());
    }

    #[test]
    fn test_zero_height_rejected() {
        // Rotated 1000x1 gives 64 * 1 / 1000 = 0 rows
        assert!(matches!(
            normalize(&solid(1, 1000, 0), &CONFIG),
            Err(EncodeError::InvalidGeometry { height: 0, .. })
        ));
    }

    #[test]
    fn test_from_pixels_checks_count() {
        assert!(RasterImage::from_pixels(32, 2, vec![false; 64]).is_ok());
        assert_eq!(
            RasterImage::from_pixels(32, 2, vec![false; 63]),
            Err(EncodeError::DimensionMismatch {
                width: 32,
                height: 2,
                bits: 63
            })
        );
    }

    #[test]
    fn test_gray_preview() {
        let pixels = (0..64).map(|i| i % 2 == 0).collect();
        let raster = RasterImage::from_pixels(32, 2, pixels).unwrap();
        let preview = raster.to_gray_image();

        assert_eq!(preview.dimensions(), (32, 2));
        assert_eq!(preview.get_pixel(0, 0)[0], INK);
        assert_eq!(preview.get_pixel(1, 0)[0], BACKGROUND);
    }
}
