//! # LetraTag CLI
//!
//! Command-line interface for printing images on a LetraTag label printer.
//!
//! ## Usage
//!
//! ```bash
//! # Print an image
//! letratag print --address AA:BB:CC:DD:EE:FF --image label.png
//!
//! # Show the blocks that would be sent, without connecting
//! letratag print --image label.png --dry-run
//!
//! # Save what the print head will see as PNG
//! letratag print --image label.png --png preview.png --dry-run
//!
//! # Log every block as hex while printing
//! RUST_LOG=debug letratag print --address AA:BB:CC:DD:EE:FF --image label.png
//! ```

use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

use btleplug::api::BDAddr;
use letratag::{
    Job, LetraTagError, PrinterConfig,
    job::hex_line,
    render::{self, RasterImage},
    transport::{self, BleDiscovery, Discover},
};

/// LetraTag - Bluetooth label printer utility
#[derive(Parser, Debug)]
#[command(name = "letratag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an image on the label printer
    Print {
        /// Image file to print
        #[arg(long, value_name = "FILE")]
        image: PathBuf,

        /// MAC address of the printer (required unless --dry-run)
        #[arg(long, required_unless_present = "dry_run")]
        address: Option<String>,

        /// Print the encoded blocks as hex instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Save the normalized raster as PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,

        /// Seconds to scan for the printer before giving up
        #[arg(long, default_value = "10")]
        scan_timeout: u64,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), LetraTagError> {
    let cli = Cli::parse();
    let config = PrinterConfig::LETRATAG_200B;

    match cli.command {
        Commands::Print {
            image,
            address,
            dry_run,
            png,
            scan_timeout,
        } => {
            let source = image::open(&image).map_err(|e| {
                LetraTagError::Image(format!("Failed to open {}: {}", image.display(), e))
            })?;

            let raster = render::normalize(&source, &config)?;
            info!(
                "Normalized {} to {}x{} dots",
                image.display(),
                raster.width(),
                raster.height()
            );

            if let Some(png_path) = png {
                save_png(&png_path, &raster)?;
                println!("Saved preview to {}", png_path.display());
            }

            let job = Job::from_raster(&raster, &config)?;

            if dry_run {
                for block in job.blocks() {
                    println!("{}", hex_line(&block));
                }
                return Ok(());
            }

            // clap guarantees the address when not in dry-run mode
            let address = address.unwrap_or_default();
            let address = BDAddr::from_str_delim(&address).map_err(|e| {
                LetraTagError::Transport(format!("Invalid address '{}': {}", address, e))
            })?;

            print_to_device(address, &config, Duration::from_secs(scan_timeout), &job).await?;
            println!("Printed successfully!");
        }
    }

    Ok(())
}

/// Save the raster as a black and white PNG
fn save_png(path: &Path, raster: &RasterImage) -> Result<(), LetraTagError> {
    raster
        .to_gray_image()
        .save(path)
        .map_err(|e| LetraTagError::Image(format!("Failed to save PNG: {}", e)))
}

/// Connect to the printer, send the job in order, then disconnect
async fn print_to_device(
    address: BDAddr,
    config: &PrinterConfig,
    scan_timeout: Duration,
    job: &Job,
) -> Result<(), LetraTagError> {
    let mut link = BleDiscovery::new(address, *config)
        .scan_timeout(scan_timeout)
        .discover()
        .await?;

    info!("Sending {} blocks", job.block_count());
    let sent = transport::send_job(&mut link, job).await;
    let disconnected = link.disconnect().await;
    sent?;
    disconnected
}
