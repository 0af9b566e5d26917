//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cert_census` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use cert_census::initialization::{init_crypto_provider, init_logger_with};
use cert_census::{run_crawl, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    // Run the crawl using the library
    match run_crawl(config).await {
        Ok(report) => {
            // Print user-friendly summary
            println!(
                "✅ Crawled {} URL{} from {} seed{} ({} certificate sightings, {} distinct) in {:.1}s",
                report.fetched,
                if report.fetched == 1 { "" } else { "s" },
                report.seeds,
                if report.seeds == 1 { "" } else { "s" },
                report.sightings,
                report.distinct_keys,
                report.elapsed_seconds
            );
            if let Some(output) = report.output {
                println!("Report saved in {}", output.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("cert_census error: {:#}", e);
            process::exit(1);
        }
    }
}
