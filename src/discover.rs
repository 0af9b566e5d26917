//! Link discovery.
//!
//! Scans fetched page bytes for embedded `https://` URLs that are worth
//! probing. The filters here only drop the obviously degenerate candidates;
//! the crawler's visited registry is the authoritative dedup.

use regex::bytes::Regex;
use std::sync::LazyLock;
use url::Url;

/// Helper function to safely compile a regex pattern, panicking with a detailed error message
/// if compilation fails. Used for static regex patterns that are compile-time constants.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

// Deliberately crude: matches a scheme plus host and path characters, so a
// URL embedded mid-sentence is cut at the first quote, bracket, or space.
static SECURE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)https://[a-z0-9./@:]+", "SECURE_URL_RE"));

/// Extracts candidate HTTPS URLs from raw page bytes.
///
/// A match is accepted only if it parses as a URL, its host contains a dot,
/// its host is neither the literal `ssl.` token nor the crawl origin's host,
/// and it is not the URL the page itself was fetched from. Everything else
/// is dropped silently; rejected matches are frequent and expected.
pub fn extract_links<'a>(
    body: &'a [u8],
    origin_host: &'a str,
    current_url: &'a Url,
) -> impl Iterator<Item = Url> + 'a {
    SECURE_URL_RE.find_iter(body).filter_map(move |m| {
        let candidate = std::str::from_utf8(m.as_bytes()).ok()?;
        let url = Url::parse(candidate).ok()?;
        let host = url.host_str()?;
        if !host.contains('.') || host == "ssl." {
            return None;
        }
        if host == origin_host || url == *current_url {
            return None;
        }
        Some(url)
    })
}
