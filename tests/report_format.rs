//! Report rendering checks through the public API.
//!
//! These verify the exact on-disk shape of the final report: header row,
//! one row per (certificate URL, organization) key, escaping, and the
//! trailing total line, under both separators.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use url::Url;

use cert_census::models::CertificateSighting;
use cert_census::report::{write_report, ResultAggregator};
use cert_census::FieldSeparator;

fn sighting(
    cert: &str,
    referrer: &str,
    orgs: &[&str],
    leaf_country: &str,
    root_country: &str,
) -> CertificateSighting {
    CertificateSighting {
        certificate_url: Url::parse(cert).unwrap(),
        referrer: referrer.to_string(),
        organizations: orgs.iter().map(|s| s.to_string()).collect(),
        leaf_country: leaf_country.to_string(),
        root_country: root_country.to_string(),
    }
}

#[test]
fn test_written_report_has_header_rows_and_total() {
    let mut aggregator = ResultAggregator::new();
    aggregator.record(sighting(
        "https://www.facebook.com/",
        "https://www.facebook.com/",
        &["DigiCert Inc"],
        "US",
        "US",
    ));
    aggregator.record(sighting(
        "https://www.qt.io/",
        "https://www.qt.io/",
        &["Let's Encrypt"],
        "FI",
        "US",
    ));

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("report.csv");
    write_report(&aggregator, Some(&path), FieldSeparator::Semicolon)
        .expect("Report should be written");

    let content = fs::read_to_string(&path).expect("Report should be readable");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "certificate URL;site cert country;root cert organization;root cert country;referrers"
    );
    // Rows come out keyed and sorted, so the order is stable across runs.
    assert_eq!(
        lines[1],
        "https://www.facebook.com/;US;DigiCert Inc;US;https://www.facebook.com/"
    );
    assert_eq!(
        lines[2],
        "https://www.qt.io/;FI;Let's Encrypt;US;https://www.qt.io/"
    );
    assert_eq!(lines[3], "total;2");
}

#[test]
fn test_comma_separator_escapes_organization_commas() {
    let mut aggregator = ResultAggregator::new();
    aggregator.record(sighting(
        "https://www.example.com/",
        "https://seed.example.com/",
        &["Acme, Inc"],
        "US",
        "DE",
    ));

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("report.csv");
    write_report(&aggregator, Some(&path), FieldSeparator::Comma)
        .expect("Report should be written");

    let content = fs::read_to_string(&path).expect("Report should be readable");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[1],
        "https://www.example.com/,US,Acme\\, Inc,DE,https://seed.example.com/"
    );
}

#[test]
fn test_semicolon_separator_escapes_organization_semicolons() {
    let mut aggregator = ResultAggregator::new();
    aggregator.record(sighting(
        "https://www.example.com/",
        "https://seed.example.com/",
        &["Weird; CA"],
        "US",
        "DE",
    ));

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("report.csv");
    write_report(&aggregator, Some(&path), FieldSeparator::Semicolon)
        .expect("Report should be written");

    let content = fs::read_to_string(&path).expect("Report should be readable");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[1],
        "https://www.example.com/;US;Weird\\; CA;DE;https://seed.example.com/"
    );
}

#[test]
fn test_empty_aggregator_writes_header_and_zero_total() {
    let aggregator = ResultAggregator::new();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("report.csv");
    write_report(&aggregator, Some(&path), FieldSeparator::Semicolon)
        .expect("Report should be written");

    let content = fs::read_to_string(&path).expect("Report should be readable");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "total;0");
}

#[test]
fn test_unwritable_output_path_is_an_error() {
    let aggregator = ResultAggregator::new();
    let path = PathBuf::from("/nonexistent-dir/report.csv");

    let result = write_report(&aggregator, Some(&path), FieldSeparator::Semicolon);

    let err = result.expect_err("Writing into a missing directory should fail");
    assert!(
        format!("{err:#}").contains("Failed to create output file"),
        "unexpected error: {err:#}"
    );
}
