//! Handshake-only HTTPS probing.
//!
//! An HTTPS fetch in this crawler never asks for content: the TLS handshake
//! alone yields the peer certificate chain, which is everything the census
//! needs from a secure endpoint. The connection is dropped without writing
//! a byte.
//!
//! Uses `tokio-rustls` for async TLS connections and `x509-parser` for
//! certificate parsing.

mod extract;
mod verifier;

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::TlsConnector;
use url::Url;

use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::ErrorType;
use crate::models::{ChainSummary, FetchOutcome};

pub(crate) use extract::summarize_chain;
pub(crate) use verifier::PermissiveServerCertVerifier;

/// Probes an HTTPS URL and summarizes the certificate chain it presents.
///
/// Resolution, connection, and handshake are each bounded by their own
/// timeout and classified separately on failure. Errors never escape as
/// `Err`; they come back as a `FetchOutcome::Failed` so the caller's
/// fallback ladder and terminal bookkeeping always run.
pub(crate) async fn probe_certificate(config: &Arc<ClientConfig>, url: &Url) -> FetchOutcome {
    let host = match url.host_str() {
        Some(host) => host.to_string(),
        None => {
            return failed(
                ErrorType::DnsResolutionError,
                format!("No host in URL {}", url),
            )
        }
    };
    let port = url.port_or_known_default().unwrap_or(443);

    let server_name = match ServerName::try_from(host.clone()) {
        Ok(name) => name,
        Err(e) => {
            return failed(
                ErrorType::DnsResolutionError,
                format!("Invalid server name {}: {}", host, e),
            )
        }
    };

    let addrs = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        tokio::net::lookup_host((host.as_str(), port)),
    )
    .await
    {
        Ok(Ok(addrs)) => addrs.collect::<Vec<_>>(),
        Ok(Err(e)) => {
            return failed(
                ErrorType::DnsResolutionError,
                format!("Failed to resolve {}: {}", host, e),
            )
        }
        Err(_) => {
            return failed(
                ErrorType::DnsResolutionError,
                format!(
                    "DNS lookup timeout for {} ({}s)",
                    host, TCP_CONNECT_TIMEOUT_SECS
                ),
            )
        }
    };
    if addrs.is_empty() {
        return failed(
            ErrorType::DnsResolutionError,
            format!("No addresses for {}", host),
        );
    }

    let sock = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect(&addrs[..]),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            return failed(
                ErrorType::TcpConnectError,
                format!("Failed to connect to {}:{} - {}", host, port, e),
            )
        }
        Err(_) => {
            return failed(
                ErrorType::TcpConnectError,
                format!(
                    "TCP connection timeout for {}:{} ({}s)",
                    host, port, TCP_CONNECT_TIMEOUT_SECS
                ),
            )
        }
    };

    let connector = TlsConnector::from(Arc::clone(config));
    let tls_stream = match tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return failed(
                ErrorType::TlsHandshakeError,
                format!("TLS handshake failed for {}: {}", host, e),
            )
        }
        Err(_) => {
            return failed(
                ErrorType::TlsHandshakeError,
                format!(
                    "TLS handshake timeout for {} ({}s)",
                    host, TLS_HANDSHAKE_TIMEOUT_SECS
                ),
            )
        }
    };

    let summary = match tls_stream.get_ref().1.peer_certificates() {
        Some(certs) => summarize_chain(certs),
        None => ChainSummary::default(),
    };
    debug!(
        "Handshake with {} complete, chain length {}",
        host, summary.chain_len
    );
    FetchOutcome::TlsCertificate(summary)
}

fn failed(kind: ErrorType, message: String) -> FetchOutcome {
    FetchOutcome::Failed { kind, message }
}
