//! Fetch transport.
//!
//! Routes each URL by scheme: HTTPS goes to the handshake-only TLS probe,
//! plain HTTP goes through reqwest with redirects disabled so the crawler
//! sees every hop itself. The `Fetcher` trait is the seam the orchestrator
//! is generic over; crawl simulations substitute a scripted implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tokio_rustls::rustls::ClientConfig;
use url::Url;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::categorize_transport_error;
use crate::models::FetchOutcome;
use crate::tls::probe_certificate;

/// The transport boundary between the orchestrator and the network.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches one URL and reports how it went.
    ///
    /// Implementations never return an error; a failed fetch is an outcome
    /// like any other, carrying its error class in the payload.
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// The production fetcher backed by reqwest and the TLS probe.
pub struct NetworkFetcher {
    client: Client,
    tls_config: Arc<ClientConfig>,
}

impl NetworkFetcher {
    /// Creates a fetcher from a prepared HTTP client and TLS configuration.
    pub fn new(client: Client, tls_config: Arc<ClientConfig>) -> Self {
        NetworkFetcher { client, tls_config }
    }

    /// Plain-HTTP leg: one GET with redirects disabled, capturing the
    /// status, the raw `Location` header, and a capped body for scanning.
    async fn fetch_page(&self, url: &Url) -> FetchOutcome {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                return FetchOutcome::Failed {
                    kind: categorize_transport_error(&e),
                    message: e.to_string(),
                }
            }
        };

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .map(|value| match value.to_str() {
                Ok(s) => s.to_string(),
                // Latin-1 and friends still show up in Location headers.
                Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
            });

        match read_capped_body(response).await {
            Ok(body) => FetchOutcome::Page {
                status,
                location,
                body,
            },
            Err(e) => FetchOutcome::Failed {
                kind: categorize_transport_error(&e),
                message: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl Fetcher for NetworkFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        match url.scheme() {
            "https" => probe_certificate(&self.tls_config, url).await,
            "http" => self.fetch_page(url).await,
            _ => FetchOutcome::UnsupportedScheme,
        }
    }
}

/// Reads at most `MAX_RESPONSE_BODY_SIZE` bytes of the body, discarding the
/// rest of the stream.
async fn read_capped_body(mut response: reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = MAX_RESPONSE_BODY_SIZE.saturating_sub(body.len());
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
