//! HTTP client and TLS configuration initialization.
//!
//! This module provides functions to initialize the HTTP client used for the
//! plain-HTTP leg of the crawl and the rustls configuration used for raw
//! certificate probes.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::tls::PermissiveServerCertVerifier;
use reqwest::ClientBuilder;
use rustls::ClientConfig;

/// Initializes the HTTP client for page fetches.
///
/// Creates a `reqwest::Client` with redirects disabled so the crawler can
/// record each `Location` hop itself and run every intermediate URL through
/// the deduplication set.
///
/// # Arguments
///
/// * `config` - Command-line options containing user-agent and timeout settings
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_http_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Builds the rustls client configuration for certificate probes.
///
/// Server certificate verification is replaced with a verifier that accepts
/// everything: the census records what sites present, including expired and
/// self-signed chains, so a handshake must not fail on validation grounds.
pub fn init_tls_config() -> Arc<ClientConfig> {
    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(PermissiveServerCertVerifier))
        .with_no_client_auth();
    Arc::new(config)
}
