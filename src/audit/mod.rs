//! Parsing of `npm audit --json` output.
//!
//! Both audit schemas are supported:
//!
//! | npm version | Top-level key | Advisory location |
//! |-------------|---------------|-------------------|
//! | 6 and older | `advisories` | each map value |
//! | 7 and newer | `vulnerabilities` | `via` list of each package |
//!
//! # Example
//!
//! ```
//! use auditreport::audit::parse_audit;
//!
//! let json = r#"{"vulnerabilities": {"minimist": {"via": [
//!     {"title": "Prototype Pollution", "name": "minimist", "severity": "critical"},
//!     "mkdirp"
//! ]}}}"#;
//!
//! let vulns = parse_audit(json)?;
//! assert_eq!(vulns.len(), 1);
//! assert_eq!(vulns[0].package, "minimist");
//! # Ok::<(), auditreport::ReportError>(())
//! ```

mod mapper;
mod schema;

pub use mapper::map_entry;
pub use schema::AuditDocument;

use crate::error::Result;
use crate::model::Vulnerability;
use tracing::debug;

/// Parses audit JSON text into normalized vulnerabilities.
pub fn parse_audit(text: &str) -> Result<Vec<Vulnerability>> {
    let document = AuditDocument::parse(text)?;
    Ok(normalize(document))
}

/// Maps every entry of the document, dropping the ones that are not
/// standalone advisories. Order is preserved and duplicates are kept.
pub fn normalize(document: AuditDocument) -> Vec<Vulnerability> {
    let kind = document.kind();
    let entries = document.into_entries();
    let vulnerabilities: Vec<Vulnerability> = entries.iter().filter_map(map_entry).collect();

    debug!(
        schema = kind,
        entries = entries.len(),
        kept = vulnerabilities.len(),
        "normalized audit document"
    );

    vulnerabilities
}
