//! Configuration management for `issuedb`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides (`--db`, `--page-size`)
//! 2. Environment variables (`ISSUEDB_FILE`, `ISSUEDB_PAGE_SIZE`)
//! 3. Defaults

use crate::error::Result;
use crate::storage::IssueStore;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Default database filename, resolved against the working directory.
pub const DEFAULT_DB_FILENAME: &str = "issues.db";
/// Default number of issues per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Environment variable naming the database file.
pub const ENV_DB_FILE: &str = "ISSUEDB_FILE";
/// Environment variable overriding the listing page size.
pub const ENV_PAGE_SIZE: &str = "ISSUEDB_PAGE_SIZE";

/// Resolved configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub page_size: usize,
}

/// CLI overrides for config resolution (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db: Option<PathBuf>,
    pub page_size: Option<usize>,
}

impl Config {
    /// Resolve configuration from CLI overrides and the process environment.
    #[must_use]
    pub fn resolve(cli: &CliOverrides) -> Self {
        let db_env = env::var(ENV_DB_FILE).ok();
        let page_env = env::var(ENV_PAGE_SIZE).ok();
        Self::resolve_with_env(cli, db_env.as_deref(), page_env.as_deref())
    }

    fn resolve_with_env(
        cli: &CliOverrides,
        db_env: Option<&str>,
        page_env: Option<&str>,
    ) -> Self {
        let db_path = cli
            .db
            .clone()
            .or_else(|| {
                db_env
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILENAME));

        let page_size = cli
            .page_size
            .or_else(|| parse_page_size(page_env))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { db_path, page_size }
    }

    /// Path shown in diagnostics, absolute where the filesystem allows it.
    #[must_use]
    pub fn display_path(&self) -> PathBuf {
        dunce::canonicalize(&self.db_path).unwrap_or_else(|_| self.db_path.clone())
    }
}

/// Open the store named by `config`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if directories cannot be created or the database cannot
/// be opened.
pub fn open_store(config: &Config) -> Result<IssueStore> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    debug!(path = %config.display_path().display(), "opening issue store");
    IssueStore::open(&config.db_path)
}

fn parse_page_size(raw: Option<&str>) -> Option<usize> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<usize>() {
        Ok(size) if size > 0 => Some(size),
        _ => {
            warn!(value, "ignoring invalid page size");
            None
        }
    }
}
