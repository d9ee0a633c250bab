//! Set-status command implementation.

use crate::cli::SetStatusArgs;
use crate::config;
use crate::error::{IssueDbError, Result};
use tracing::info;

/// Execute the set-status command.
///
/// # Errors
///
/// Returns [`IssueDbError::IssueNotFound`] when no issue has the given id,
/// or an error if the database update fails.
pub fn execute(args: &SetStatusArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let config = config::Config::resolve(cli);
    let mut store = config::open_store(&config)?;

    if !store.update_status(args.id, args.status)? {
        return Err(IssueDbError::IssueNotFound { id: args.id });
    }
    info!(id = args.id, status = %args.status, "Updated issue status");

    if json {
        let issue = store
            .get_issue(args.id)?
            .ok_or(IssueDbError::IssueNotFound { id: args.id })?;
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!("Issue #{} set to {}", args.id, args.status);
    }

    Ok(())
}
