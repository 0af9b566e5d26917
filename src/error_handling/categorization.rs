//! Transport error categorization.
//!
//! This module maps low-level client errors onto the crawl's error taxonomy.

use super::types::ErrorType;

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Only plain-HTTP fetches surface `reqwest::Error`; the TLS probe classifies
/// its own failures stage by stage (DNS, TCP, handshake) before they ever
/// reach this function.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `ErrorType` for the error.
pub fn categorize_transport_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::RequestTimeoutError
    } else if error.is_connect() {
        ErrorType::TcpConnectError
    } else {
        ErrorType::HttpRequestError
    }
}

// Note: Constructing real reqwest::Error instances requires a live transport,
// so categorization is exercised through the fetch path rather than unit
// tests here.
