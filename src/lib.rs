/*!
 * # inprofile: Experian credit report extraction
 *
 * A Rust library for converting Experian "INProfileResponse" credit-bureau
 * XML documents into normalized, strongly-typed credit report records.
 *
 * ## Features
 *
 * - 🧾 **Normalized output**: one fully populated [`CreditReport`](data_types::CreditReport)
 *   per document, with documented defaults for every missing field
 * - 🌲 **Shape-tolerant parsing**: repeated XML sections are handled uniformly
 *   whether they occur once or many times
 * - 🔢 **Decoded bureau codes**: account type, portfolio type, account status,
 *   and ownership type come back as human-readable labels
 * - 🛡️ **Two failure modes only**: malformed XML and a missing report root;
 *   everything else degrades to defaults instead of erroring
 * - 🧩 **Pure core**: no I/O or shared state inside extraction, safe to call
 *   concurrently
 *
 * ## Quick Start
 *
 * ```no_run
 * use inprofile::prelude::*;
 *
 * # fn main() -> Result<()> {
 * let report = ReportParser::new().parse_file("./reports/subject.xml")?;
 *
 * println!("{} scored {}", report.basic_details.full_name, report.credit_score.score);
 * println!("{} accounts, {} overdue in total",
 *     report.credit_accounts.len(), report.total_overdue());
 * # Ok(())
 * # }
 * ```
 *
 * ## Parsing from memory
 *
 * ```
 * use inprofile::prelude::*;
 *
 * # fn main() -> Result<()> {
 * let xml = "<INProfileResponse><SCORE><BureauScore>720</BureauScore></SCORE></INProfileResponse>";
 * let report = parse_report_str(xml)?;
 * assert_eq!(report.credit_score.score, 720);
 * assert_eq!(report.credit_score.range, "300-900");
 * # Ok(())
 * # }
 * ```
 *
 * ## Error model
 *
 * Bureau documents vary widely in completeness, so missing sections are never
 * an error: they resolve to empty strings, zeros, or empty sequences. Only two
 * conditions abort extraction, both surfaced as [`InprofileError`]:
 * malformed XML (`XmlParse`) and a document without the `INProfileResponse`
 * root (`MissingRoot`). Persistence concerns (durable IDs, timestamps,
 * storage) belong to the caller.
 */

// Re-export error types from root
pub use error::{InprofileError, Result};

// Public modules
pub mod data_types;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod parser;
pub mod xml;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```
/// use inprofile::prelude::*;
/// ```
pub mod prelude {
    pub use crate::data_types::*;
    pub use crate::error::{InprofileError, Result};
    pub use crate::extract::extract_report;
    pub use crate::normalize::{format_date, to_int};
    pub use crate::parser::{parse_report_str, ReportParser};
    pub use crate::xml::XmlNode;
}

/// Bureau format constants
pub mod constants {
    /// Root element of an Experian credit report document
    pub const ROOT_ELEMENT: &str = "INProfileResponse";

    /// Fixed bureau score range
    pub const SCORE_RANGE: &str = "300-900";

    /// Lowest score the bureau issues
    pub const SCORE_MIN: i64 = 300;

    /// Highest score the bureau issues
    pub const SCORE_MAX: i64 = 900;

    /// Flag value marking a suit filed / wilful default on a tradeline
    pub const SUIT_FILED_CODE: &str = "01";

    /// Written-off/settled status reported when the bureau sends nothing
    pub const DEFAULT_WRITTEN_OFF_STATUS: &str = "00";
}
