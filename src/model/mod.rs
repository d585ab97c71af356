//! Core data types for normalized vulnerabilities and report summaries.
//!
//! - [`Vulnerability`] - One advisory, normalized from either audit schema
//! - [`Severity`] - The closed set of severity labels npm audit emits
//! - [`ReportSummary`] - Totals and per-severity counts
//!
//! # Example
//!
//! ```
//! use auditreport::{ReportSummary, Vulnerability};
//!
//! let vuln = Vulnerability::new("Prototype Pollution", "lodash", "high");
//! let summary = ReportSummary::from_vulnerabilities(&[vuln]);
//!
//! assert_eq!(summary.vulns_found, 1);
//! assert_eq!(summary.high_vulns, 1);
//! ```

mod summary;
mod vulnerability;

pub use summary::*;
pub use vulnerability::*;
