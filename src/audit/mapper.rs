use serde_json::{Map, Value};
use tracing::warn;

use crate::model::Vulnerability;

/// Converts one raw entry into a [`Vulnerability`].
///
/// Returns `None` for anything that is not a standalone advisory: non-object
/// entries such as the package names in a modern `via` list, and objects
/// without a non-empty `title`.
pub fn map_entry(entry: &Value) -> Option<Vulnerability> {
    let advisory = entry.as_object()?;
    let title = non_empty_str(advisory, "title")?;

    let package = non_empty_str(advisory, "name")
        .or_else(|| str_field(advisory, "module_name"))
        .unwrap_or_default();
    if package.is_empty() {
        warn!(title, "advisory has no package name");
    }

    let cwes = identifiers(advisory.get("cwe"))
        .chain(identifiers(advisory.get("cves")))
        .collect::<Vec<_>>()
        .join(", ");

    Some(Vulnerability {
        name: title.to_string(),
        link: str_field(advisory, "url").map(str::to_string),
        package: package.to_string(),
        severity: str_field(advisory, "severity").unwrap_or_default().to_string(),
        cwes,
    })
}

fn str_field<'a>(advisory: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    advisory.get(key).and_then(Value::as_str)
}

fn non_empty_str<'a>(advisory: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    str_field(advisory, key).filter(|s| !s.is_empty())
}

/// npm 6 writes `cwe` as a single string, npm 7+ as a list. Absent or null
/// yields nothing.
fn identifiers(value: Option<&Value>) -> Box<dyn Iterator<Item = String> + '_> {
    match value {
        Some(Value::Array(items)) => Box::new(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
        ),
        Some(Value::String(s)) => Box::new(std::iter::once(s.clone())),
        _ => Box::new(std::iter::empty()),
    }
}
