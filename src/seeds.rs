//! Seed list loading.
//!
//! Seeds come from a text file, one domain per line. Ranked lists in the
//! `rank,domain` CSV style are accepted as well: the domain is whatever
//! follows the first comma, and a line without a comma is taken whole.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use crate::config::SeedScheme;

/// Turns one line of the seed file into a crawlable URL.
///
/// Returns `None` for blank lines, comment lines, and domains that do not
/// form a valid URL under the configured scheme prefix.
fn parse_seed_line(line: &str, scheme: SeedScheme) -> Option<Url> {
    let domain = match line.split_once(',') {
        Some((_, rest)) => rest,
        None => line,
    };
    let domain = domain.trim();
    if domain.is_empty() || domain.starts_with('#') {
        return None;
    }
    Url::parse(&format!("{}{}", scheme.prefix(), domain)).ok()
}

/// Loads seed URLs from the given file.
///
/// `from` and `to` select a 1-indexed inclusive window of lines; either bound
/// may be 0 to leave that side unrestricted. Lines that fail to parse are
/// skipped with a debug log rather than aborting the run.
pub async fn load_seeds(
    path: &Path,
    scheme: SeedScheme,
    from: usize,
    to: usize,
) -> Result<Vec<Url>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open seed file {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut seeds = Vec::new();
    let mut line_number = 0usize;
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read seed file")?
    {
        line_number += 1;
        if from > 0 && line_number < from {
            continue;
        }
        if to > 0 && line_number > to {
            break;
        }
        match parse_seed_line(&line, scheme) {
            Some(url) => seeds.push(url),
            None => debug!("Skipping seed line {}: {:?}", line_number, line),
        }
    }

    info!("Loaded {} seed URLs from {}", seeds.len(), path.display());
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_plain_domain() {
        let url = parse_seed_line("example.com", SeedScheme::Https).unwrap();
        assert_eq!(url.as_str(), "https://www.example.com/");
    }

    #[test]
    fn test_parse_ranked_csv_line() {
        let url = parse_seed_line("1,google.com", SeedScheme::Https).unwrap();
        assert_eq!(url.as_str(), "https://www.google.com/");
    }

    #[test]
    fn test_parse_http_scheme() {
        let url = parse_seed_line("example.com", SeedScheme::Http).unwrap();
        assert_eq!(url.as_str(), "http://www.example.com/");
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        assert!(parse_seed_line("", SeedScheme::Https).is_none());
        assert!(parse_seed_line("   ", SeedScheme::Https).is_none());
        assert!(parse_seed_line("# top sites", SeedScheme::Https).is_none());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let url = parse_seed_line("  42,  example.org \t", SeedScheme::Https).unwrap();
        assert_eq!(url.as_str(), "https://www.example.org/");
    }

    fn write_seed_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        for line in lines {
            writeln!(file, "{}", line).expect("Failed to write temp file");
        }
        file
    }

    #[tokio::test]
    async fn test_load_all_lines() {
        let file = write_seed_file(&["1,example.com", "2,example.org", "3,example.net"]);
        let seeds = load_seeds(file.path(), SeedScheme::Https, 0, 0)
            .await
            .unwrap();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].as_str(), "https://www.example.com/");
        assert_eq!(seeds[2].as_str(), "https://www.example.net/");
    }

    #[tokio::test]
    async fn test_load_respects_line_range() {
        let file = write_seed_file(&["1,a.com", "2,b.com", "3,c.com", "4,d.com"]);
        let seeds = load_seeds(file.path(), SeedScheme::Https, 2, 3)
            .await
            .unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].as_str(), "https://www.b.com/");
        assert_eq!(seeds[1].as_str(), "https://www.c.com/");
    }

    #[tokio::test]
    async fn test_load_open_ended_range() {
        let file = write_seed_file(&["1,a.com", "2,b.com", "3,c.com"]);
        let seeds = load_seeds(file.path(), SeedScheme::Https, 3, 0)
            .await
            .unwrap();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].as_str(), "https://www.c.com/");
    }

    #[tokio::test]
    async fn test_load_skips_unparseable_lines() {
        let file = write_seed_file(&["1,example.com", "", "# comment", "2,example.org"]);
        let seeds = load_seeds(file.path(), SeedScheme::Https, 0, 0)
            .await
            .unwrap();
        assert_eq!(seeds.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_an_error() {
        let result = load_seeds(
            Path::new("/nonexistent/seeds.csv"),
            SeedScheme::Https,
            0,
            0,
        )
        .await;
        assert!(result.is_err());
    }
}
