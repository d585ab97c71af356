//! Configuration file handling.
//!
//! # Configuration Location
//!
//! - Linux: `~/.config/auditreport/config.toml`
//! - macOS: `~/Library/Application Support/auditreport/config.toml`
//! - Windows: `%APPDATA%\auditreport\config.toml`
//!
//! Command-line flags always take precedence over values from this file.
//!
//! # Example Configuration
//!
//! ```toml
//! default_title = "Frontend dependency audit"
//! default_file_name = "audit.html"
//! default_output_dir = "reports"
//! default_format = "html"
//! fail_on = "high"
//!
//! [ignore]
//! packages = ["@types/*"]
//! advisories = ["CVE-2021-23337", "Regular Expression Denial of Service"]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{Severity, Vulnerability};
use crate::report::DEFAULT_TITLE;

/// File name used when neither `--name` nor the config provides one.
pub const DEFAULT_FILE_NAME: &str = "npm-audit.html";

/// Application configuration.
///
/// ```no_run
/// use auditreport::Config;
///
/// let config = Config::load().unwrap_or_default();
/// println!("Reports go to {}", config.default_file_name);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Report title when `--title` is not given.
    pub default_title: String,

    /// Report file name when `--name` is not given.
    pub default_file_name: String,

    /// Destination folder when `--output` is not given.
    ///
    /// Default: the current working directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output_dir: Option<PathBuf>,

    /// Valid values: "html", "json"
    pub default_format: String,

    /// Exit non-zero when an advisory at or above this severity is reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<Severity>,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Advisories to leave out of the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Package names to drop. Supports `*` wildcards (e.g. "@types/*").
    pub packages: Vec<String>,

    /// Advisory titles or CWE/CVE ids to drop.
    pub advisories: Vec<String>,
}

impl IgnoreConfig {
    pub fn should_ignore_package(&self, package: &str) -> bool {
        self.packages.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, package)
            } else {
                pattern == package
            }
        })
    }

    pub fn should_ignore_advisory(&self, vuln: &Vulnerability) -> bool {
        self.advisories
            .iter()
            .any(|entry| *entry == vuln.name || vuln.identifiers().any(|id| id == entry.as_str()))
    }

    pub fn should_ignore(&self, vuln: &Vulnerability) -> bool {
        self.should_ignore_package(&vuln.package) || self.should_ignore_advisory(vuln)
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    let first = parts[0];
    if !first.is_empty() {
        match remaining.strip_prefix(first) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    let last = parts[parts.len() - 1];
    if !last.is_empty() {
        match remaining.strip_suffix(last) {
            Some(rest) => remaining = rest,
            None => return false,
        }
    }

    for part in parts[1..parts.len() - 1].iter().filter(|p| !p.is_empty()) {
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            default_output_dir: None,
            default_format: "html".to_string(),
            fail_on: None,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config file, or defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Writes the config file, creating its parent directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("auditreport")
            .join("config.toml")
    }

    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}
