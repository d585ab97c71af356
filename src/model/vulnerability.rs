use serde::{Deserialize, Serialize};

/// Severity labels used by `npm audit`.
///
/// Declaration order runs from most to least severe, so the derived `Ord`
/// sorts `Critical` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Moderate,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Moderate,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Moderate => "moderate",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Moderate => "Moderate",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }

    /// Matches a raw audit label exactly. `"High"` or `"medium"` return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Severity::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::from_label(&s.to_lowercase()).ok_or_else(|| {
            format!(
                "Unknown severity: {}. Use 'critical', 'high', 'moderate', 'low', or 'info'",
                s
            )
        })
    }
}

/// A single advisory in normalized form.
///
/// `severity` is kept as the raw label from the audit output. Labels outside
/// [`Severity::ALL`] are preserved so they still show up in the report, they
/// just don't land in any severity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Advisory title. Never empty.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub package: String,
    pub severity: String,
    /// CWE ids followed by CVE ids, joined with `", "`.
    pub cwes: String,
}

impl Vulnerability {
    pub fn new(
        name: impl Into<String>,
        package: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            link: None,
            package: package.into(),
            severity: severity.into(),
            cwes: String::new(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_cwes(mut self, cwes: impl Into<String>) -> Self {
        self.cwes = cwes.into();
        self
    }

    /// The recognized severity level, if the raw label is one of the five.
    pub fn severity_level(&self) -> Option<Severity> {
        Severity::from_label(&self.severity)
    }

    /// Individual CWE/CVE identifiers.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.cwes.split(", ").filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_label_exact() {
        assert_eq!(Severity::from_label("critical"), Some(Severity::Critical));
        assert_eq!(Severity::from_label("moderate"), Some(Severity::Moderate));
        assert_eq!(Severity::from_label("info"), Some(Severity::Info));
        assert_eq!(Severity::from_label("High"), None);
        assert_eq!(Severity::from_label("medium"), None);
        assert_eq!(Severity::from_label(""), None);
    }

    #[test]
    fn test_severity_from_str_is_case_insensitive() {
        assert_eq!("HIGH".parse::<Severity>(), Ok(Severity::High));
        assert_eq!("Low".parse::<Severity>(), Ok(Severity::Low));
        assert!("medium".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_ordering() {
        let mut levels = vec![Severity::Info, Severity::Critical, Severity::Low];
        levels.sort();
        assert_eq!(levels, vec![Severity::Critical, Severity::Low, Severity::Info]);
    }

    #[test]
    fn test_severity_level_unknown_label() {
        let vuln = Vulnerability::new("Title", "pkg", "urgent");
        assert_eq!(vuln.severity_level(), None);
        assert_eq!(vuln.severity, "urgent");
    }

    #[test]
    fn test_identifiers() {
        let vuln = Vulnerability::new("Title", "pkg", "low").with_cwes("CWE-79, CVE-2021-1");
        let ids: Vec<&str> = vuln.identifiers().collect();
        assert_eq!(ids, vec!["CWE-79", "CVE-2021-1"]);

        let empty = Vulnerability::new("Title", "pkg", "low");
        assert_eq!(empty.identifiers().count(), 0);
    }

    #[test]
    fn test_link_skipped_when_absent() {
        let vuln = Vulnerability::new("Title", "pkg", "low");
        let json = serde_json::to_value(&vuln).unwrap();
        assert!(json.get("link").is_none());

        let linked = vuln.with_link("https://github.com/advisories/GHSA-1");
        let json = serde_json::to_value(&linked).unwrap();
        assert_eq!(json["link"], "https://github.com/advisories/GHSA-1");
    }
}
