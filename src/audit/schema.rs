use serde_json::{Map, Value};

use crate::error::Result;

/// The shape of an `npm audit --json` document, decided once up front.
///
/// npm 6 and earlier emit a flat `advisories` map. npm 7+ emit a
/// `vulnerabilities` map keyed by package name, where each package lists its
/// causes under `via`. A `via` element is either an advisory object or the
/// name of another vulnerable package that this one depends on.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditDocument {
    /// npm 7+ `vulnerabilities` map.
    Modern(Map<String, Value>),
    /// npm 6 `advisories` map.
    Legacy(Map<String, Value>),
    /// Neither key present: nothing to report.
    Empty,
}

impl AuditDocument {
    /// Parses audit JSON text. Invalid JSON is an error; valid JSON of an
    /// unrecognized shape is [`AuditDocument::Empty`].
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    /// The presence of `vulnerabilities` alone selects the modern shape, even
    /// when `advisories` is also present. A key whose value is not an object
    /// yields [`AuditDocument::Empty`].
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut root) = value else {
            return AuditDocument::Empty;
        };

        if let Some(packages) = root.remove("vulnerabilities") {
            return match packages {
                Value::Object(packages) => AuditDocument::Modern(packages),
                _ => AuditDocument::Empty,
            };
        }

        match root.remove("advisories") {
            Some(Value::Object(advisories)) => AuditDocument::Legacy(advisories),
            _ => AuditDocument::Empty,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AuditDocument::Modern(_) => "modern",
            AuditDocument::Legacy(_) => "legacy",
            AuditDocument::Empty => "empty",
        }
    }

    /// Flattens the document into raw advisory-like entries in document order.
    ///
    /// For the modern shape this includes the plain-string `via` elements;
    /// they are dropped later by the mapper.
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            AuditDocument::Modern(packages) => {
                let mut entries = Vec::new();
                for (_, package) in packages {
                    let Value::Object(mut package) = package else {
                        continue;
                    };
                    if let Some(Value::Array(via)) = package.remove("via") {
                        entries.extend(via);
                    }
                }
                entries
            }
            AuditDocument::Legacy(advisories) => advisories.into_iter().map(|(_, a)| a).collect(),
            AuditDocument::Empty => Vec::new(),
        }
    }
}
