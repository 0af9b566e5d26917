//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the crawler.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Types of transport failures that can end a fetch.
///
/// Every failed fetch is classified into exactly one of these; the class is
/// carried in the fetch outcome and tallied at the end of the run. None of
/// them is fatal to the crawl: each triggers the fallback ladder and, at
/// worst, terminates a single URL with no sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum ErrorType {
    /// Hostname did not resolve
    DnsResolutionError,
    /// TCP connection refused or timed out
    TcpConnectError,
    /// TLS negotiation failed or timed out
    TlsHandshakeError,
    /// Whole-request timeout on a plain-HTTP fetch
    RequestTimeoutError,
    /// Any other transport-level request failure
    HttpRequestError,
}

/// Types of protocol anomalies observed on otherwise successful fetches.
///
/// Warnings mark servers that answered but answered strangely; the request
/// is still terminal, only the sighting is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// HTTPS handshake completed but the peer presented no certificates
    EmptyCertificateChain,
    /// URL scheme is neither http nor https
    UnsupportedScheme,
    /// Redirect status without a Location header
    MissingRedirectTarget,
    /// Location header present but not parseable as a URL
    MalformedRedirectTarget,
}

/// Types of informational metrics tracked during the crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// HTTP redirect followed (301, 302, etc.)
    HttpRedirect,
    /// Ladder rung 1: same host retried over plain HTTP
    FallbackPlainHttp,
    /// Ladder rung 2: retried against the `secure.` subdomain
    FallbackSecureSubdomain,
    /// Ladder rung 3: retried against the `login.` subdomain
    FallbackLoginSubdomain,
    /// Ladder rung 4: origin host retried over plain HTTP as a last resort
    FallbackLastResort,
    /// Certificate sighting recorded
    CertificateSighting,
    /// New candidate URL accepted from a scanned page
    LinkDiscovered,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsResolutionError => "DNS resolution error",
            ErrorType::TcpConnectError => "TCP connect error",
            ErrorType::TlsHandshakeError => "TLS handshake error",
            ErrorType::RequestTimeoutError => "Request timeout",
            ErrorType::HttpRequestError => "HTTP request error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::EmptyCertificateChain => "Empty certificate chain",
            WarningType::UnsupportedScheme => "Unsupported URL scheme",
            WarningType::MissingRedirectTarget => "Missing redirect target",
            WarningType::MalformedRedirectTarget => "Malformed redirect target",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::FallbackPlainHttp => "Fallback to plain HTTP",
            InfoType::FallbackSecureSubdomain => "Fallback to secure. subdomain",
            InfoType::FallbackLoginSubdomain => "Fallback to login. subdomain",
            InfoType::FallbackLastResort => "Last-resort fallback to origin over HTTP",
            InfoType::CertificateSighting => "Certificate sighting",
            InfoType::LinkDiscovered => "Link discovered",
        }
    }
}
