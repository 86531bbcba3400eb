//! # LetraTag - Bluetooth Label Printer Library
//!
//! letratag is a Rust library for printing images on DYMO LetraTag 200B
//! label printers over Bluetooth Low Energy. It provides:
//!
//! - **Rendering**: Threshold, rotate and resize images to the 32-dot head
//! - **Protocol implementation**: Job commands, header, chunk framing
//! - **Transport**: Ordered block writes over BLE GATT
//!
//! ## Quick Start
//!
//! ```no_run
//! use btleplug::api::BDAddr;
//! use letratag::{
//!     printer::PrinterConfig,
//!     transport::{self, BleDiscovery, Discover},
//! };
//!
//! # async fn run() -> Result<(), letratag::LetraTagError> {
//! // Encode the label (pure, no I/O)
//! let image = image::open("label.png").map_err(|e| letratag::LetraTagError::Image(e.to_string()))?;
//! let job = letratag::encode(&image)?;
//!
//! // Connect to the printer
//! let address = BDAddr::from_str_delim("AA:BB:CC:DD:EE:FF").unwrap();
//! let mut link = BleDiscovery::new(address, PrinterConfig::LETRATAG_200B)
//!     .discover()
//!     .await?;
//!
//! // Header first, then chunks in order
//! transport::send_job(&mut link, &job).await?;
//! link.disconnect().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Source image to monochrome raster |
//! | [`protocol`] | Bit packing, commands, header, chunks |
//! | [`job`] | Assembling the ordered blocks of one label |
//! | [`transport`] | Sending jobs to the printer |
//! | [`printer`] | Printer configurations |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Currently tested with:
//! - DYMO LetraTag 200B (12mm tape, 32-dot head, BLE)

pub mod error;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::{EncodeError, LetraTagError};
pub use job::{Job, encode, encode_with_config};
pub use printer::PrinterConfig;
