//! Error handling and crawl statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Crawl statistics tracking (errors, warnings, info metrics)
//!
//! Error types are categorized into:
//! - **Errors**: Transport failures that ended a fetch
//! - **Warnings**: Protocol anomalies on otherwise successful fetches
//! - **Info**: Informational metrics (redirects, fallbacks, sightings, etc.)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_transport_error;
pub use stats::CrawlStats;
pub use types::{ErrorType, InfoType, InitializationError, WarningType};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_crawl_stats_initialization() {
        let stats = CrawlStats::new();
        // All error types should be initialized to 0
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        // All warning types should be initialized to 0
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        // All info types should be initialized to 0
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_crawl_stats_increment() {
        let stats = CrawlStats::new();
        stats.increment_error(ErrorType::TlsHandshakeError);
        assert_eq!(stats.get_error_count(ErrorType::TlsHandshakeError), 1);

        stats.increment_warning(WarningType::EmptyCertificateChain);
        assert_eq!(
            stats.get_warning_count(WarningType::EmptyCertificateChain),
            1
        );

        stats.increment_info(InfoType::HttpRedirect);
        assert_eq!(stats.get_info_count(InfoType::HttpRedirect), 1);
    }

    #[test]
    fn test_crawl_stats_multiple_increments() {
        let stats = CrawlStats::new();
        stats.increment_error(ErrorType::DnsResolutionError);
        stats.increment_error(ErrorType::DnsResolutionError);
        stats.increment_error(ErrorType::DnsResolutionError);
        assert_eq!(stats.get_error_count(ErrorType::DnsResolutionError), 3);
    }

    #[test]
    fn test_crawl_stats_totals() {
        let stats = CrawlStats::new();
        stats.increment_error(ErrorType::TcpConnectError);
        stats.increment_error(ErrorType::RequestTimeoutError);
        stats.increment_warning(WarningType::UnsupportedScheme);
        stats.increment_info(InfoType::CertificateSighting);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_warnings(), 1);
        assert_eq!(stats.total_info(), 1);
    }
}
