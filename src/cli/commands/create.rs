//! Create command implementation.

use crate::cli::CreateArgs;
use crate::config;
use crate::error::{IssueDbError, Result};
use tracing::info;

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if a field fails validation or the database cannot be
/// written.
pub fn execute(args: &CreateArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let config = config::Config::resolve(cli);
    let mut store = config::open_store(&config)?;

    let id = store.create_issue(&args.name, &args.detail, args.tag, &args.user)?;
    info!(id, tag = %args.tag, "Created issue");

    if json {
        let issue = store
            .get_issue(id)?
            .ok_or(IssueDbError::IssueNotFound { id })?;
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        println!("Created issue #{id}");
    }

    Ok(())
}
