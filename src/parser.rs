/*!
 * Report parser entry point
 *
 * This is the seam between raw bureau bytes and the normalized record:
 * callers hand in a file path, string, or byte buffer and get back a fully
 * populated [`CreditReport`]. Parsing is pure and synchronous, so a single
 * `ReportParser` can be shared across concurrent calls.
 */

use std::path::Path;

use tracing::debug;

use crate::data_types::CreditReport;
use crate::extract::extract_report;
use crate::xml::XmlNode;
use crate::{InprofileError, Result};

/// Credit report parser with builder-style configuration
#[derive(Debug, Clone)]
pub struct ReportParser {
    /// Whether to normalize the extracted PAN to uppercase
    uppercase_pan: bool,
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Self {
            uppercase_pan: true,
        }
    }

    /// Enable or disable PAN uppercasing
    ///
    /// PAN is case-insensitive at the bureau, but consumers store it
    /// uppercase by convention, so this defaults to on.
    pub fn with_uppercase_pan(mut self, uppercase: bool) -> Self {
        self.uppercase_pan = uppercase;
        self
    }

    /// Parse a credit report from an XML string
    pub fn parse_str(&self, xml: &str) -> Result<CreditReport> {
        debug!(bytes = xml.len(), "parsing credit report document");

        let doc = XmlNode::parse(xml)?;
        let mut report = extract_report(&doc)?;

        if self.uppercase_pan {
            report.basic_details.pan.make_ascii_uppercase();
        }

        debug!(
            accounts = report.credit_accounts.len(),
            addresses = report.addresses.len(),
            score = report.credit_score.score,
            "extracted credit report"
        );
        Ok(report)
    }

    /// Parse a credit report from a raw byte buffer
    ///
    /// Bureau exports are ASCII in practice; invalid UTF-8 sequences are
    /// replaced rather than rejected.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<CreditReport> {
        self.parse_str(&String::from_utf8_lossy(bytes))
    }

    /// Parse a credit report from an XML file on disk
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<CreditReport> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InprofileError::file_not_found_with_suggestion(
                path.to_path_buf(),
            ));
        }

        let bytes = std::fs::read(path)
            .map_err(|err| InprofileError::io(path.to_path_buf(), err))?;
        self.parse_bytes(&bytes)
    }
}

/// Parse a credit report from an XML string with default settings
pub fn parse_report_str(xml: &str) -> Result<CreditReport> {
    ReportParser::new().parse_str(xml)
}
