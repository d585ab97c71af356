use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// Writes `contents` to `dir/file_name` and returns the full path.
///
/// The destination folder must already exist; it is never created.
pub fn write_report(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(ReportError::OutputDirMissing(dir.to_path_buf()));
    }

    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(path)
}
