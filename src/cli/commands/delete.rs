//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::config;
use crate::error::{IssueDbError, Result};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct DeleteOutput {
    id: i64,
    deleted: bool,
    remaining: usize,
}

/// Execute the delete command. Removes the row outright; use
/// `set-status <ID> deleted` to keep a record around while marking it.
///
/// # Errors
///
/// Returns [`IssueDbError::IssueNotFound`] when no issue has the given id,
/// or an error if the database delete fails.
pub fn execute(args: &DeleteArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let config = config::Config::resolve(cli);
    let mut store = config::open_store(&config)?;

    if !store.delete_issue(args.id)? {
        return Err(IssueDbError::IssueNotFound { id: args.id });
    }
    let remaining = store.count_issues()?;
    info!(id = args.id, remaining, "Deleted issue");

    if json {
        let output = DeleteOutput {
            id: args.id,
            deleted: true,
            remaining,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Deleted issue #{} ({remaining} remaining)", args.id);
    }

    Ok(())
}
