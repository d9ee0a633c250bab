//! List command implementation.

use crate::cli::ListArgs;
use crate::config;
use crate::error::Result;
use crate::format::format_issue_list;
use crate::paginate::paginate;
use crate::storage::ListFilters;
use tracing::{debug, info};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the query fails.
pub fn execute(args: &ListArgs, json: bool, cli: &config::CliOverrides) -> Result<()> {
    let overrides = config::CliOverrides {
        db: cli.db.clone(),
        page_size: args.page_size,
    };
    let config = config::Config::resolve(&overrides);
    let store = config::open_store(&config)?;

    let filters = ListFilters {
        tag: args.tag,
        status: args.status,
    };
    debug!(filters = ?filters, "Applied list filters");

    let issues = store.list_issues(&filters)?;
    info!(count = issues.len(), "Found issues");

    let page = paginate(issues, args.page, config.page_size);

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", format_issue_list(&page));
    }

    Ok(())
}
