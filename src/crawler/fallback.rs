//! The retry ladder walked after a transport failure.

use url::Url;

use crate::error_handling::InfoType;

/// Picks the next URL to try after `failed` could not be fetched.
///
/// The rungs are ordered and the first applicable one wins:
///
/// 1. the origin itself failed over HTTPS: retry the same URL over plain
///    HTTP (some domains only serve the bare scheme, which is expected
///    rather than an error)
/// 2. the origin failed over plain HTTP too: try the `secure.` subdomain,
///    where some sites keep their only TLS endpoint
/// 3. the `secure.` guess failed: try the `login.` subdomain, the other
///    common convention
/// 4. any other HTTPS failure: retry the origin host over plain HTTP as a
///    last resort
///
/// Returns `None` once the ladder is exhausted; the caller marks the URL
/// terminal with no sighting. Each returned retry also names the info
/// metric to tally for it.
pub(super) fn next_fallback(failed: &Url, origin_host: &str) -> Option<(Url, InfoType)> {
    let failed_host = failed.host_str().unwrap_or_default();
    let is_https = failed.scheme() == "https";

    if failed_host == origin_host && is_https {
        let mut retry = failed.clone();
        if retry.set_scheme("http").is_ok() {
            return Some((retry, InfoType::FallbackPlainHttp));
        }
    }
    if failed_host == origin_host {
        let retry = Url::parse(&format!("https://secure.{}", origin_host)).ok()?;
        return Some((retry, InfoType::FallbackSecureSubdomain));
    }
    if failed_host.strip_prefix("secure.") == Some(origin_host) {
        let retry = Url::parse(&format!("https://login.{}", origin_host)).ok()?;
        return Some((retry, InfoType::FallbackLoginSubdomain));
    }
    if is_https {
        let retry = Url::parse(&format!("http://{}", origin_host)).ok()?;
        return Some((retry, InfoType::FallbackLastResort));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_https_origin_falls_back_to_plain_http() {
        let (retry, info) = next_fallback(&url("https://example.com/"), "example.com").unwrap();
        assert_eq!(retry.as_str(), "http://example.com/");
        assert_eq!(info, InfoType::FallbackPlainHttp);
    }

    #[test]
    fn test_plain_http_retry_keeps_path_and_query() {
        let (retry, _) =
            next_fallback(&url("https://example.com/a/b?c=1"), "example.com").unwrap();
        assert_eq!(retry.as_str(), "http://example.com/a/b?c=1");
    }

    #[test]
    fn test_http_origin_falls_back_to_secure_subdomain() {
        let (retry, info) = next_fallback(&url("http://example.com/"), "example.com").unwrap();
        assert_eq!(retry.as_str(), "https://secure.example.com/");
        assert_eq!(info, InfoType::FallbackSecureSubdomain);
    }

    #[test]
    fn test_secure_subdomain_falls_back_to_login_subdomain() {
        let (retry, info) =
            next_fallback(&url("https://secure.example.com/"), "example.com").unwrap();
        assert_eq!(retry.as_str(), "https://login.example.com/");
        assert_eq!(info, InfoType::FallbackLoginSubdomain);
    }

    #[test]
    fn test_other_https_failure_retries_origin_over_http() {
        let (retry, info) =
            next_fallback(&url("https://login.example.com/"), "example.com").unwrap();
        assert_eq!(retry.as_str(), "http://example.com/");
        assert_eq!(info, InfoType::FallbackLastResort);

        let (retry, info) = next_fallback(&url("https://cdn.other.net/x"), "example.com").unwrap();
        assert_eq!(retry.as_str(), "http://example.com/");
        assert_eq!(info, InfoType::FallbackLastResort);
    }

    #[test]
    fn test_plain_http_failure_off_origin_exhausts_ladder() {
        assert!(next_fallback(&url("http://cdn.other.net/"), "example.com").is_none());
        assert!(next_fallback(&url("http://login.example.com/"), "example.com").is_none());
    }

    #[test]
    fn test_full_ladder_walk_for_one_origin() {
        let origin = "example.com";
        let mut attempts = vec![url("https://example.com/")];
        while let Some((retry, _)) = next_fallback(attempts.last().unwrap(), origin) {
            if attempts.contains(&retry) {
                break;
            }
            attempts.push(retry);
        }
        let walked: Vec<&str> = attempts.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            walked,
            vec![
                "https://example.com/",
                "http://example.com/",
                "https://secure.example.com/",
                "https://login.example.com/",
            ]
        );
    }
}
