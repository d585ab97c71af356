//! Report assembly.
//!
//! Bundles the normalized vulnerabilities, their summary, a title and a
//! generation timestamp into the [`ReportPayload`] handed to the renderers.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::audit::parse_audit;
use crate::config::IgnoreConfig;
use crate::error::Result;
use crate::model::{ReportSummary, Vulnerability};

/// Title used when neither the command line nor the config provides one.
pub const DEFAULT_TITLE: &str = "npm audit report";

/// e.g. `07 of March, 2024 - 09:05:03`
const TIMESTAMP_FORMAT: &str = "%d of %B, %Y - %H:%M:%S";

/// Source of the report generation time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Everything a renderer needs to produce a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub title: String,
    pub date: String,
    #[serde(flatten)]
    pub summary: ReportSummary,
    pub vulnerabilities: Vec<Vulnerability>,
}

impl ReportPayload {
    /// Assembles a payload. `title` falls back to [`DEFAULT_TITLE`].
    pub fn assemble(
        vulnerabilities: Vec<Vulnerability>,
        title: Option<&str>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            title: title.unwrap_or(DEFAULT_TITLE).to_string(),
            date: format_timestamp(clock.now()),
            summary: ReportSummary::from_vulnerabilities(&vulnerabilities),
            vulnerabilities,
        }
    }
}

pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Runs the whole pipeline: parse, normalize, drop ignored entries, then
/// assemble.
pub fn generate(
    audit_json: &str,
    title: Option<&str>,
    ignore: &IgnoreConfig,
    clock: &dyn Clock,
) -> Result<ReportPayload> {
    let mut vulnerabilities = parse_audit(audit_json)?;

    let before = vulnerabilities.len();
    vulnerabilities.retain(|v| !ignore.should_ignore(v));
    if vulnerabilities.len() != before {
        tracing::info!(ignored = before - vulnerabilities.len(), "dropped ignored advisories");
    }

    Ok(ReportPayload::assemble(vulnerabilities, title, clock))
}
