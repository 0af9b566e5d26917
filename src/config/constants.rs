//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the crawler,
//! including timeouts, size limits, and other operational parameters.

/// Maximum simultaneously in-flight fetches (concurrency cap default).
///
/// The frontier never admits a request while this many fetches are
/// outstanding; freed slots are refilled immediately. Overridable via
/// `--max-concurrency`.
pub const DEFAULT_MAX_CONCURRENCY: usize = 100;

/// Progress logging interval in seconds
pub const LOGGING_INTERVAL: usize = 5;

/// Whole-request timeout for plain-HTTP fetches in seconds
///
/// Applied by the HTTP client to the full request/response cycle. A fetch
/// that hits it is reported back as a transport failure so the fallback
/// ladder and terminal bookkeeping still run.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

// Network operation timeouts for the certificate probe
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Body bytes past this limit are dropped before link scanning to prevent
/// memory exhaustion; the request still completes normally.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;
