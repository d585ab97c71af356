use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning audit output into a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The audit input was not valid JSON.
    #[error("failed to parse audit JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The destination folder does not exist.
    #[error("output directory does not exist: {}", .0.display())]
    OutputDirMissing(PathBuf),

    /// Writing the report file failed.
    #[error("failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
