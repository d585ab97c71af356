//! Renderers for a [`ReportPayload`].

mod cli;
mod html;
mod json;

pub use cli::{format_summary_table, print_summary_table};
pub use html::generate_html_string;
pub use json::generate_json_string;

use crate::report::ReportPayload;
use anyhow::Result;

/// Output format for the written report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Self-contained HTML page
    Html,
    /// The raw payload as JSON
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'html' or 'json'", s)),
        }
    }
}

/// Render the payload to the text that gets written to disk
pub fn render(payload: &ReportPayload, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(generate_html_string(payload)),
        OutputFormat::Json => Ok(generate_json_string(payload)?),
    }
}
