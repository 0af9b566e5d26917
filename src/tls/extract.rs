//! Certificate chain summarization.

use log::debug;
use rustls::pki_types::CertificateDer;
use x509_parser::x509::X509Name;

use crate::models::ChainSummary;

/// Summarizes a peer certificate chain for aggregation.
///
/// The chain arrives leaf first, so the final certificate is the issuing
/// root. Organizations and the root country come from that certificate's
/// issuer; the leaf country comes from the first certificate's subject.
/// A certificate that fails to parse contributes empty fields, but the
/// sighting is still counted through `chain_len`.
pub(crate) fn summarize_chain(chain: &[CertificateDer<'_>]) -> ChainSummary {
    let mut summary = ChainSummary {
        chain_len: chain.len(),
        ..ChainSummary::default()
    };

    if let Some(root) = chain.last() {
        match x509_parser::parse_x509_certificate(root.as_ref()) {
            Ok((_, cert)) => {
                summary.organizations = organizations(cert.issuer());
                summary.root_country = first_country(cert.issuer());
            }
            Err(e) => debug!("Could not parse root certificate: {e}"),
        }
    }

    if let Some(leaf) = chain.first() {
        match x509_parser::parse_x509_certificate(leaf.as_ref()) {
            Ok((_, cert)) => {
                summary.leaf_country = first_country(cert.subject());
            }
            Err(e) => debug!("Could not parse leaf certificate: {e}"),
        }
    }

    summary
}

/// All Organization attribute values of a name, in certificate order.
fn organizations(name: &X509Name<'_>) -> Vec<String> {
    name.iter_organization()
        .filter_map(|attr| attr.as_str().ok())
        .map(str::to_string)
        .collect()
}

/// The first Country attribute value of a name, or empty.
fn first_country(name: &X509Name<'_>) -> String {
    name.iter_country()
        .filter_map(|attr| attr.as_str().ok())
        .next()
        .unwrap_or_default()
        .to_string()
}
