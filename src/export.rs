//! JSON export for issue records.

use crate::error::{IssueDbError, Result};
use crate::model::Issue;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::Path;
use tracing::info;

/// Serialize issues as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn issues_to_json(issues: &[Issue]) -> Result<String> {
    Ok(serde_json::to_string_pretty(issues)?)
}

/// Write issues to `output_path` as a JSON array, atomically, returning the
/// number of issues written.
///
/// The data lands in a sibling temp file first and is renamed into place
/// after a flush and fsync, so readers never observe a half-written file.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem step fails.
pub fn export_issues(issues: &[Issue], output_path: &Path) -> Result<usize> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = output_path.with_extension("json.tmp");
    let temp_file = File::create(&temp_path)?;
    let mut writer = BufWriter::new(temp_file);

    serde_json::to_writer_pretty(&mut writer, issues)?;
    writer.write_all(b"\n")?;

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| IssueDbError::Io(e.into_error()))?
        .sync_all()?;
    fs::rename(&temp_path, output_path)?;

    info!(count = issues.len(), path = %output_path.display(), "exported issues");
    Ok(issues.len())
}
