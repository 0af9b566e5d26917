//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{CrawlStats, ErrorType, InfoType, WarningType};

/// Prints error, warning, and info statistics to the log.
///
/// This function is used internally and in tests.
pub fn print_crawl_statistics(stats: &CrawlStats) {
    let total_errors = stats.total_errors();
    let total_warnings = stats.total_warnings();
    let total_info = stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::CrawlStats;

    #[test]
    fn test_print_crawl_statistics_no_counts() {
        let stats = CrawlStats::new();
        // Should not panic when there is nothing to report
        print_crawl_statistics(&stats);
    }

    #[test]
    fn test_print_crawl_statistics_with_errors() {
        let stats = CrawlStats::new();
        stats.increment_error(ErrorType::TlsHandshakeError);
        stats.increment_error(ErrorType::TlsHandshakeError);
        stats.increment_error(ErrorType::DnsResolutionError);
        // Should not panic when there are errors
        print_crawl_statistics(&stats);
    }

    #[test]
    fn test_print_crawl_statistics_with_warnings() {
        let stats = CrawlStats::new();
        stats.increment_warning(WarningType::EmptyCertificateChain);
        stats.increment_warning(WarningType::UnsupportedScheme);
        // Should not panic when there are warnings
        print_crawl_statistics(&stats);
    }

    #[test]
    fn test_print_crawl_statistics_with_info() {
        let stats = CrawlStats::new();
        stats.increment_info(InfoType::HttpRedirect);
        stats.increment_info(InfoType::CertificateSighting);
        // Should not panic when there are info metrics
        print_crawl_statistics(&stats);
    }

    #[test]
    fn test_print_crawl_statistics_all_types() {
        let stats = CrawlStats::new();
        stats.increment_error(ErrorType::TcpConnectError);
        stats.increment_warning(WarningType::EmptyCertificateChain);
        stats.increment_info(InfoType::FallbackPlainHttp);
        // Should handle all types together
        print_crawl_statistics(&stats);
    }
}
