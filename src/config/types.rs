//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scheme prepended to seed domains.
///
/// `Https` probes each domain's certificate directly and falls back to plain
/// HTTP on failure; `Http` starts from the plain page and reaches HTTPS
/// endpoints through the links found there.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SeedScheme {
    /// Seed as `https://www.<domain>` (default)
    Https,
    /// Seed as `http://www.<domain>`
    Http,
}

impl SeedScheme {
    /// Returns the prefix glued in front of each seed domain.
    pub fn prefix(&self) -> &'static str {
        match self {
            SeedScheme::Https => "https://www.",
            SeedScheme::Http => "http://www.",
        }
    }
}

/// Field separator used in the rendered report.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FieldSeparator {
    /// Semicolon-separated fields (default)
    Semicolon,
    /// Comma-separated fields
    Comma,
}

impl FieldSeparator {
    /// Returns the separator character.
    pub fn as_char(&self) -> char {
        match self {
            FieldSeparator::Semicolon => ';',
            FieldSeparator::Comma => ',',
        }
    }
}

/// Crawl configuration, parsed from the command line.
///
/// Can also be constructed programmatically when the crate is used as a
/// library.
///
/// # Examples
///
/// ```no_run
/// use cert_census::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("top-1m.csv"),
///     to: 500,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "cert_census", about = "HTTPS availability and certificate issuance census")]
pub struct Config {
    /// Seed list file; one `rank,domain` record per line
    pub file: PathBuf,

    /// First seed line to load, 1-indexed inclusive (0 = unrestricted)
    #[arg(long, default_value_t = 0)]
    pub from: usize,

    /// Last seed line to load, 1-indexed inclusive (0 = unrestricted)
    #[arg(long, default_value_t = 0)]
    pub to: usize,

    /// Scheme prepended to seed domains
    #[arg(long, value_enum, default_value = "https")]
    pub seed_scheme: SeedScheme,

    /// Maximum simultaneously in-flight fetches
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds for plain-HTTP fetches
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Report output path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Report field separator
    #[arg(long, value_enum, default_value = "semicolon")]
    pub separator: FieldSeparator,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.csv"),
            from: 0,
            to: 0,
            seed_scheme: SeedScheme::Https,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output: None,
            separator: FieldSeparator::Semicolon,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
