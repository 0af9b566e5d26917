//! Report aggregation and rendering.
//!
//! Sightings accumulate in a map keyed by certificate URL and organization;
//! each key carries the set of seeds that led to it. Accumulation is
//! idempotent, so the same seed reaching the same certificate twice (via two
//! redirect paths, say) never inflates the report. Rendering happens exactly
//! once, after the crawl has finished.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::FieldSeparator;
use crate::models::CertificateSighting;

#[derive(Debug)]
struct ReferrerEntry {
    leaf_country: String,
    root_country: String,
    referrers: BTreeSet<String>,
}

/// Accumulates certificate sightings and renders the final report.
///
/// Keys and referrer sets are ordered maps, so two identical crawls render
/// byte-identical reports regardless of completion interleaving.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    entries: BTreeMap<(String, String), ReferrerEntry>,
}

impl ResultAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sighting. The country metadata of the first sighting of
    /// a key wins; later sightings only contribute their referrer.
    pub fn record(&mut self, sighting: CertificateSighting) {
        let CertificateSighting {
            certificate_url,
            referrer,
            organizations,
            leaf_country,
            root_country,
        } = sighting;
        let key = (certificate_url.to_string(), organizations.join(", "));
        let entry = self.entries.entry(key).or_insert_with(|| ReferrerEntry {
            leaf_country,
            root_country,
            referrers: BTreeSet::new(),
        });
        entry.referrers.insert(referrer);
    }

    /// Number of distinct (certificate URL, organization) keys.
    pub fn distinct_keys(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no sighting has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the report: a header row, one row per key with its sorted
    /// referrers appended, and a trailing total line.
    pub fn render<W: Write>(&self, writer: &mut W, separator: FieldSeparator) -> io::Result<()> {
        let sep = separator.as_char();
        writeln!(
            writer,
            "certificate URL{sep}site cert country{sep}root cert organization{sep}root cert country{sep}referrers"
        )?;
        for ((certificate_url, organizations), entry) in &self.entries {
            write!(
                writer,
                "{}{sep}{}{sep}{}{sep}{}",
                certificate_url,
                entry.leaf_country,
                escape_field(organizations, sep),
                entry.root_country
            )?;
            for referrer in &entry.referrers {
                write!(writer, "{sep}{referrer}")?;
            }
            writeln!(writer)?;
        }
        writeln!(writer, "total{sep}{}", self.entries.len())?;
        Ok(())
    }
}

/// Backslash-escapes every occurrence of the separator character.
fn escape_field(value: &str, sep: char) -> String {
    value.replace(sep, &format!("\\{sep}"))
}

/// Writes the rendered report to the given file, or to stdout when no path
/// is set.
pub fn write_report(
    aggregator: &ResultAggregator,
    output: Option<&PathBuf>,
    separator: FieldSeparator,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).context(format!(
            "Failed to create output file: {}",
            output_path.display()
        ))?;
        Box::new(file)
    } else {
        Box::new(io::stdout())
    };

    aggregator
        .render(&mut writer, separator)
        .context("Failed to render report")?;
    writer.flush().context("Failed to flush report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn sighting(cert: &str, referrer: &str, orgs: &[&str]) -> CertificateSighting {
        CertificateSighting {
            certificate_url: Url::parse(cert).unwrap(),
            referrer: referrer.to_string(),
            organizations: orgs.iter().map(|s| s.to_string()).collect(),
            leaf_country: "US".to_string(),
            root_country: "BM".to_string(),
        }
    }

    fn rendered(aggregator: &ResultAggregator, separator: FieldSeparator) -> String {
        let mut out = Vec::new();
        aggregator.render(&mut out, separator).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_duplicate_sighting_keeps_one_referrer() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(sighting("https://a.com/", "https://seed.com/", &["Acme"]));
        aggregator.record(sighting("https://a.com/", "https://seed.com/", &["Acme"]));

        assert_eq!(aggregator.distinct_keys(), 1);
        let text = rendered(&aggregator, FieldSeparator::Semicolon);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "https://a.com/;US;Acme;BM;https://seed.com/");
    }

    #[test]
    fn test_referrers_accumulate_sorted() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(sighting("https://a.com/", "https://z.com/", &["Acme"]));
        aggregator.record(sighting("https://a.com/", "https://b.com/", &["Acme"]));

        let text = rendered(&aggregator, FieldSeparator::Semicolon);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "https://a.com/;US;Acme;BM;https://b.com/;https://z.com/");
    }

    #[test]
    fn test_same_url_different_organization_is_a_new_key() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(sighting("https://a.com/", "https://s.com/", &["Acme"]));
        aggregator.record(sighting("https://a.com/", "https://s.com/", &["Globex"]));
        assert_eq!(aggregator.distinct_keys(), 2);
    }

    #[test]
    fn test_first_sighting_country_metadata_wins() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(sighting("https://a.com/", "https://s.com/", &["Acme"]));
        let mut second = sighting("https://a.com/", "https://t.com/", &["Acme"]);
        second.leaf_country = "DE".to_string();
        second.root_country = "FR".to_string();
        aggregator.record(second);

        let text = rendered(&aggregator, FieldSeparator::Semicolon);
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("https://a.com/;US;Acme;BM;"));
    }

    #[test]
    fn test_separator_is_escaped_in_organization_field() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(sighting("https://a.com/", "https://s.com/", &["Acme, Inc"]));

        let text = rendered(&aggregator, FieldSeparator::Comma);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "https://a.com/,US,Acme\\, Inc,BM,https://s.com/");
    }

    #[test]
    fn test_multiple_organizations_join_with_comma() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(sighting(
            "https://a.com/",
            "https://s.com/",
            &["Acme", "Acme Trust"],
        ));

        let text = rendered(&aggregator, FieldSeparator::Semicolon);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "https://a.com/;US;Acme, Acme Trust;BM;https://s.com/");
    }

    #[test]
    fn test_header_and_total_lines_frame_the_report() {
        let mut aggregator = ResultAggregator::new();
        aggregator.record(sighting("https://a.com/", "https://s.com/", &["Acme"]));
        aggregator.record(sighting("https://b.com/", "https://s.com/", &["Globex"]));

        let text = rendered(&aggregator, FieldSeparator::Semicolon);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines.first().copied().unwrap(),
            "certificate URL;site cert country;root cert organization;root cert country;referrers"
        );
        assert_eq!(lines.last().copied().unwrap(), "total;2");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_crawl_still_renders_header_and_zero_total() {
        let aggregator = ResultAggregator::new();
        let text = rendered(&aggregator, FieldSeparator::Semicolon);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "total;0");
    }
}
