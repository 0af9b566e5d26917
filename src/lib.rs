//! cert_census library: HTTPS availability and certificate issuance census
//!
//! This library crawls a seed list of domains, probes each HTTPS endpoint for
//! the certificate chain it presents, walks plain-HTTP fallbacks when the
//! handshake fails, and scans fetched pages for further HTTPS URLs to probe.
//! The result is a deduplicated report of which certificates (and which
//! issuing organizations) were seen, and from which seed domains.
//!
//! # Example
//!
//! ```no_run
//! use cert_census::{run_crawl, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("top-1m.csv"),
//!     to: 500,
//!     ..Default::default()
//! };
//!
//! let report = run_crawl(config).await?;
//! println!("Fetched {} URLs, {} distinct certificate keys",
//!          report.fetched, report.distinct_keys);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod crawler;
pub mod discover;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod report;
pub mod seeds;
mod tls;

// Re-export public API
pub use config::{Config, FieldSeparator, LogFormat, LogLevel, SeedScheme};
pub use run::{run_crawl, CrawlReport};

// Internal run module (contains the main crawl logic)
mod run {
    use anyhow::{Context, Result};
    use std::path::PathBuf;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, print_crawl_statistics, shutdown_gracefully};
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::crawler::{CrawlCounters, Crawler};
    use crate::error_handling::CrawlStats;
    use crate::fetch::NetworkFetcher;
    use crate::initialization::{init_http_client, init_tls_config};
    use crate::report::write_report;
    use crate::seeds::load_seeds;

    /// Results of a completed crawl run.
    ///
    /// Contains summary statistics about the crawl and where the report went.
    #[derive(Debug, Clone)]
    pub struct CrawlReport {
        /// Number of seed URLs loaded from the input file
        pub seeds: usize,
        /// Total number of URLs fetched to a terminal outcome
        pub fetched: usize,
        /// Number of certificate sightings recorded (before deduplication)
        pub sightings: usize,
        /// Number of distinct (certificate URL, organization) keys in the report
        pub distinct_keys: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Report destination, if an output file was configured
        pub output: Option<PathBuf>,
    }

    /// Runs a certificate census crawl with the provided configuration.
    ///
    /// This is the main entry point for the library. It loads seed domains
    /// from the input file, crawls them concurrently, and writes the
    /// aggregated certificate report to the configured output.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the crawl (seed file, concurrency,
    ///   timeouts, report output, etc.)
    ///
    /// # Returns
    ///
    /// Returns a `CrawlReport` containing summary statistics, or an error if
    /// the crawl failed to complete.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The seed file cannot be opened
    /// - The HTTP client cannot be initialized
    /// - The report cannot be written
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cert_census::{run_crawl, Config};
    /// use std::path::PathBuf;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config {
    ///     file: PathBuf::from("domains.csv"),
    ///     ..Default::default()
    /// };
    /// let report = run_crawl(config).await?;
    /// println!("Saw {} certificates", report.sightings);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_crawl(config: Config) -> Result<CrawlReport> {
        let seeds = load_seeds(&config.file, config.seed_scheme, config.from, config.to).await?;
        let seed_count = seeds.len();

        let client = init_http_client(&config).context("Failed to initialize HTTP client")?;
        let tls_config = init_tls_config();
        let fetcher = NetworkFetcher::new(client, tls_config);

        let stats = Arc::new(CrawlStats::new());
        let counters = Arc::new(CrawlCounters::default());

        let start_time = std::time::Instant::now();

        let cancel = CancellationToken::new();
        let cancel_logging = cancel.child_token();
        let counters_for_logging = Arc::clone(&counters);
        let logging_task = Some(tokio::task::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL as u64));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &counters_for_logging);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        }));

        let crawler = Crawler::new(
            fetcher,
            config.max_concurrency,
            Arc::clone(&stats),
            Arc::clone(&counters),
        );
        let aggregator = crawler.run(seeds).await;

        shutdown_gracefully(cancel, logging_task).await;

        log_progress(start_time, &counters);
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        write_report(&aggregator, config.output.as_ref(), config.separator)
            .context("Failed to write report")?;

        print_crawl_statistics(&stats);

        Ok(CrawlReport {
            seeds: seed_count,
            fetched: counters.processed.load(Ordering::SeqCst),
            sightings: counters.sightings.load(Ordering::SeqCst),
            distinct_keys: aggregator.distinct_keys(),
            elapsed_seconds,
            output: config.output.clone(),
        })
    }
}
