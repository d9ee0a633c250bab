//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config;
use crate::error::{IssueDbError, Result};
use crate::format::format_issue_details;
use tracing::debug;

/// Execute the show command.
///
/// # Errors
///
/// Returns [`IssueDbError::IssueNotFound`] when no issue has the given id,
/// or an error if the database query fails.
pub fn execute(args: &ShowArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let config = config::Config::resolve(cli);
    let store = config::open_store(&config)?;

    debug!(id = args.id, "Fetching issue");
    let issue = store
        .get_issue(args.id)?
        .ok_or(IssueDbError::IssueNotFound { id: args.id })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        print!("{}", format_issue_details(&issue));
    }

    Ok(())
}
