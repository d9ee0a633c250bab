//! Export command implementation.

use crate::cli::ExportArgs;
use crate::config;
use crate::error::Result;
use crate::export::{export_issues, issues_to_json};
use crate::storage::ListFilters;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct ExportSummary {
    count: usize,
    path: String,
}

/// Execute the export command.
///
/// With `--output` the array is written atomically to that file; otherwise
/// it goes to stdout, in either output mode.
///
/// # Errors
///
/// Returns an error if the database query or the file write fails.
pub fn execute(args: &ExportArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let config = config::Config::resolve(cli);
    let store = config::open_store(&config)?;

    let filters = ListFilters {
        tag: args.tag,
        status: args.status,
    };
    let issues = store.list_issues(&filters)?;
    info!(count = issues.len(), "Exporting issues");

    match &args.output {
        Some(path) => {
            let count = export_issues(&issues, path)?;
            if json {
                let summary = ExportSummary {
                    count,
                    path: path.display().to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Exported {count} issue(s) to {}", path.display());
            }
        }
        None => {
            println!("{}", issues_to_json(&issues)?);
        }
    }

    Ok(())
}
