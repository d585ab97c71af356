use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Severity, Vulnerability};

/// Totals computed from a normalized vulnerability list.
///
/// Entries whose severity is not one of the five known labels count toward
/// `vulns_found` but toward no bucket, so the bucket sum can be smaller than
/// the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub vulns_found: usize,
    /// Distinct `package` values, compared exactly.
    pub vulnerable_dependencies: usize,
    pub critical_vulns: usize,
    pub high_vulns: usize,
    pub moderate_vulns: usize,
    pub low_vulns: usize,
    pub info_vulns: usize,
}

impl ReportSummary {
    pub fn from_vulnerabilities(vulnerabilities: &[Vulnerability]) -> Self {
        let vulnerable_dependencies = vulnerabilities
            .iter()
            .map(|v| v.package.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut summary = Self {
            vulns_found: vulnerabilities.len(),
            vulnerable_dependencies,
            ..Self::default()
        };

        for severity in vulnerabilities.iter().filter_map(Vulnerability::severity_level) {
            *summary.bucket_mut(severity) += 1;
        }

        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical_vulns,
            Severity::High => self.high_vulns,
            Severity::Moderate => self.moderate_vulns,
            Severity::Low => self.low_vulns,
            Severity::Info => self.info_vulns,
        }
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Critical => &mut self.critical_vulns,
            Severity::High => &mut self.high_vulns,
            Severity::Moderate => &mut self.moderate_vulns,
            Severity::Low => &mut self.low_vulns,
            Severity::Info => &mut self.info_vulns,
        }
    }

    /// Sum of the five severity buckets.
    pub fn severity_total(&self) -> usize {
        Severity::ALL.iter().map(|s| self.count(*s)).sum()
    }

    /// The most severe level with at least one entry.
    pub fn most_severe(&self) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| self.count(*s) > 0)
    }
}
