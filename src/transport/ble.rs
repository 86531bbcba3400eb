//! # Bluetooth Low Energy Transport
//!
//! This module talks to the printer over BLE GATT using btleplug.
//!
//! ## Connection Sequence
//!
//! 1. Open the first Bluetooth adapter of the host
//! 2. Scan until a peripheral with the requested MAC address shows up
//! 3. Connect and discover its services
//! 4. Resolve the write characteristic from the vendor service UUID
//!    (see [`characteristic_uuid`](super::characteristic_uuid))
//! 5. Write each block of the job as one GATT write
//!
//! ## Linux Setup
//!
//! BlueZ must be running and the user needs access to the system D-Bus.
//! The printer does not need to be paired.
//!
//! ```bash
//! # Find the printer's address
//! $ bluetoothctl
//! [bluetooth]# scan on
//! # Look for "Letratag"
//! ```

use std::time::Duration;

use async_trait::async_trait;
use btleplug::api::{
    BDAddr, Central, CharPropFlags, Characteristic, Manager as _, Peripheral as _, ScanFilter,
    WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use log::{debug, info};
use tokio::time::{self, Instant};

use super::{Discover, Transport, characteristic_uuid};
use crate::error::LetraTagError;
use crate::printer::PrinterConfig;

/// Default time to wait for the printer to be seen while scanning
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the adapter's peripheral list is polled during a scan
const SCAN_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// # BLE Printer Discovery
///
/// Finds one printer by MAC address and connects to it.
///
/// ## Example
///
/// ```no_run
/// use btleplug::api::BDAddr;
/// use letratag::printer::PrinterConfig;
/// use letratag::transport::{self, BleDiscovery, Discover};
///
/// # async fn run(job: letratag::Job) -> Result<(), letratag::LetraTagError> {
/// let address = BDAddr::from_str_delim("AA:BB:CC:DD:EE:FF").unwrap();
/// let mut link = BleDiscovery::new(address, PrinterConfig::LETRATAG_200B)
///     .discover()
///     .await?;
///
/// transport::send_job(&mut link, &job).await?;
/// link.disconnect().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BleDiscovery {
    address: BDAddr,
    config: PrinterConfig,
    scan_timeout: Duration,
}

impl BleDiscovery {
    pub fn new(address: BDAddr, config: PrinterConfig) -> Self {
        Self {
            address,
            config,
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
        }
    }

    /// Set how long to scan before giving up
    pub fn scan_timeout(self, scan_timeout: Duration) -> Self {
        Self {
            scan_timeout,
            ..self
        }
    }

    async fn find_peripheral(&self, adapter: &Adapter) -> Result<Peripheral, LetraTagError> {
        let deadline = Instant::now() + self.scan_timeout;

        loop {
            for peripheral in adapter.peripherals().await? {
                if peripheral.address() == self.address {
                    return Ok(peripheral);
                }
            }

            if Instant::now() >= deadline {
                return Err(LetraTagError::Transport(format!(
                    "Printer {} not found within {:?}",
                    self.address, self.scan_timeout
                )));
            }
            time::sleep(SCAN_POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl Discover for BleDiscovery {
    type Link = BleTransport;

    async fn discover(&mut self) -> Result<BleTransport, LetraTagError> {
        let manager = Manager::new().await?;
        let adapter = manager
            .adapters()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LetraTagError::Transport("No Bluetooth adapter found".to_string()))?;

        info!("Scanning for {}...", self.address);
        adapter.start_scan(ScanFilter::default()).await?;
        let found = self.find_peripheral(&adapter).await;
        adapter.stop_scan().await?;
        let peripheral = found?;

        info!("Connecting to {}", self.address);
        peripheral.connect().await?;
        peripheral.discover_services().await?;

        let characteristic = find_write_characteristic(&peripheral, &self.config)?;
        let write_type = write_type_for(&characteristic);
        info!(
            "Writing to characteristic {} ({:?})",
            characteristic.uuid, write_type
        );

        Ok(BleTransport {
            peripheral,
            characteristic,
            write_type,
        })
    }
}

/// # Connected BLE Printer
///
/// Writes blocks to the printer's vendor characteristic. Obtain one through
/// [`BleDiscovery`].
pub struct BleTransport {
    peripheral: Peripheral,
    characteristic: Characteristic,
    write_type: WriteType,
}

impl BleTransport {
    /// Drop the connection to the printer
    pub async fn disconnect(&self) -> Result<(), LetraTagError> {
        self.peripheral.disconnect().await?;
        debug!("Disconnected");
        Ok(())
    }
}

#[async_trait]
impl Transport for BleTransport {
    async fn write_block(&mut self, block: &[u8]) -> Result<(), LetraTagError> {
        self.peripheral
            .write(&self.characteristic, block, self.write_type)
            .await?;
        Ok(())
    }
}

/// Locate the write characteristic among the discovered services
fn find_write_characteristic(
    peripheral: &Peripheral,
    config: &PrinterConfig,
) -> Result<Characteristic, LetraTagError> {
    let uuid = peripheral
        .services()
        .iter()
        .find_map(|service| characteristic_uuid(&service.uuid, config))
        .ok_or_else(|| {
            LetraTagError::Transport(format!(
                "No service with prefix {} on this device",
                config.service_prefix
            ))
        })?;

    peripheral
        .characteristics()
        .into_iter()
        .find(|characteristic| characteristic.uuid == uuid)
        .ok_or_else(|| LetraTagError::Transport(format!("Characteristic {} not found", uuid)))
}

/// Prefer acknowledged writes when the characteristic supports them
fn write_type_for(characteristic: &Characteristic) -> WriteType {
    if characteristic.properties.contains(CharPropFlags::WRITE) {
        WriteType::WithResponse
    } else {
        WriteType::WithoutResponse
    }
}
