//! # Printer Transport Layer
//!
//! This module moves encoded jobs to the printer. The encoding core never
//! touches it; a caller builds a [`Job`] and then hands it to [`send_job`]
//! together with a [`Transport`].
//!
//! ## Available Transports
//!
//! - [`ble`]: Bluetooth Low Energy GATT writes (btleplug)
//!
//! ## Ordering
//!
//! The printer rebuilds the body by concatenating chunk payloads in the order
//! it receives them, so a job is written strictly in sequence over one
//! exclusively borrowed link: header first, then chunks by ascending index.
//! If a write fails the job is abandoned; no block is retried or resent.
//!
//! ## Discovery
//!
//! The write characteristic is not fixed across devices. The printer exposes
//! a vendor service `be3dd650-XXXX-…`, and the characteristic to write is
//! `be3dd651-XXXX-42f1-99c1-f0f749dd0678` with the same `XXXX` group
//! ([`characteristic_uuid`]). Finding it is the job of a [`Discover`]
//! implementation.

pub mod ble;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use crate::error::LetraTagError;
use crate::job::{Job, hex_line};
use crate::printer::PrinterConfig;

pub use ble::{BleDiscovery, BleTransport};

/// A connection that accepts one opaque block per write
#[async_trait]
pub trait Transport: Send {
    /// Write one block. Either the whole block is accepted or an error is
    /// returned.
    async fn write_block(&mut self, block: &[u8]) -> Result<(), LetraTagError>;
}

/// Capability that locates the printer and yields a connected [`Transport`]
#[async_trait]
pub trait Discover {
    type Link: Transport;

    async fn discover(&mut self) -> Result<Self::Link, LetraTagError>;
}

/// # Send a Job
///
/// Writes every block of `job` in order, one at a time. Stops at the first
/// failed write and returns its error.
pub async fn send_job<T>(transport: &mut T, job: &Job) -> Result<(), LetraTagError>
where
    T: Transport + ?Sized,
{
    let blocks = job.blocks();
    let total = blocks.len();

    for (i, block) in blocks.iter().enumerate() {
        debug!("Block {}/{} ({} bytes): {}", i + 1, total, block.len(), hex_line(block));
        transport.write_block(block).await?;
    }

    Ok(())
}

/// Derive the write characteristic UUID from a service UUID.
///
/// Returns `None` unless the service's first group matches the printer's
/// service prefix.
///
/// ## Example
///
/// ```
/// use letratag::{printer::PrinterConfig, transport::characteristic_uuid};
/// use uuid::Uuid;
///
/// let service = Uuid::parse_str("be3dd650-2b3d-42f1-99c1-f0f749dd0678").unwrap();
/// let characteristic = characteristic_uuid(&service, &PrinterConfig::LETRATAG_200B).unwrap();
///
/// assert_eq!(
///     characteristic.to_string(),
///     "be3dd651-2b3d-42f1-99c1-f0f749dd0678"
/// );
/// ```
pub fn characteristic_uuid(service: &Uuid, config: &PrinterConfig) -> Option<Uuid> {
    let service = service.hyphenated().to_string();
    let mut groups = service.split('-');

    let first = groups.next()?;
    let second = groups.next()?;
    if !first.eq_ignore_ascii_case(config.service_prefix) {
        return None;
    }

    Uuid::parse_str(&format!(
        "{}-{}-{}",
        config.characteristic_prefix, second, config.characteristic_suffix
    ))
    .ok()
}

// ============================================================================
// TESTS
// ============================================================================
