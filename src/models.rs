//! Core data types shared across the crawler.

use url::Url;

use crate::error_handling::ErrorType;

/// A URL scheduled for fetching, paired with the seed URL that led to it.
///
/// The origin never changes across redirects or fallback retries, so every
/// certificate sighting can be traced back to the seed that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// The URL to fetch.
    pub url: Url,
    /// The seed URL this request descends from.
    pub origin: Url,
}

impl CrawlRequest {
    /// Creates a request for a seed URL; the URL is its own origin.
    pub fn seed(url: Url) -> Self {
        CrawlRequest {
            origin: url.clone(),
            url,
        }
    }

    /// Creates a request that inherits this request's origin.
    pub fn follow_up(&self, url: Url) -> Self {
        CrawlRequest {
            url,
            origin: self.origin.clone(),
        }
    }

    /// The origin's host, used by the fallback ladder and the link filter.
    pub fn origin_host(&self) -> &str {
        self.origin.host_str().unwrap_or_default()
    }
}

/// Summary of a server's certificate chain, extracted at handshake time.
///
/// The chain is ordered leaf first, so "root" here means the final
/// certificate received, normally the issuing CA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainSummary {
    /// Number of certificates the peer presented.
    pub chain_len: usize,
    /// Issuer organization names from the root of the chain.
    pub organizations: Vec<String>,
    /// Subject country codes from the leaf certificate.
    pub leaf_country: String,
    /// Issuer country codes from the root of the chain.
    pub root_country: String,
}

/// One observation of a certificate at a URL, attributed to a seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSighting {
    /// The HTTPS URL where the certificate was presented.
    pub certificate_url: Url,
    /// The seed URL whose crawl reached this URL.
    pub referrer: String,
    /// Issuer organization names from the root of the chain.
    pub organizations: Vec<String>,
    /// Subject country codes from the leaf certificate.
    pub leaf_country: String,
    /// Issuer country codes from the root of the chain.
    pub root_country: String,
}

/// The result of fetching a single URL.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// An HTTPS handshake completed and the peer presented this chain.
    TlsCertificate(ChainSummary),
    /// A plain-HTTP response arrived.
    Page {
        /// HTTP status code.
        status: u16,
        /// Raw `Location` header, if any.
        location: Option<String>,
        /// Response body, truncated at the configured cap.
        body: Vec<u8>,
    },
    /// The URL's scheme is neither http nor https.
    UnsupportedScheme,
    /// The fetch failed at the transport level.
    Failed {
        /// Which stage of the transport failed.
        kind: ErrorType,
        /// Human-readable detail for logging.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_request_is_its_own_origin() {
        let url = Url::parse("https://www.example.com/").unwrap();
        let request = CrawlRequest::seed(url.clone());
        assert_eq!(request.origin, url);
        assert_eq!(request.origin_host(), "www.example.com");
    }

    #[test]
    fn test_follow_up_inherits_origin() {
        let seed = CrawlRequest::seed(Url::parse("https://example.com/").unwrap());
        let next = seed.follow_up(Url::parse("https://cdn.example.net/asset").unwrap());
        assert_eq!(next.origin.as_str(), "https://example.com/");
        assert_eq!(next.origin_host(), "example.com");
        assert_eq!(next.url.as_str(), "https://cdn.example.net/asset");
    }

    #[test]
    fn test_chain_summary_default_is_empty() {
        let summary = ChainSummary::default();
        assert_eq!(summary.chain_len, 0);
        assert!(summary.organizations.is_empty());
        assert!(summary.leaf_country.is_empty());
        assert!(summary.root_country.is_empty());
    }
}
