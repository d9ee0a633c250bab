//! Error types for `issuedb`.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IssueDbError>;

/// Errors surfaced by the store, the migration manager, and the export path.
#[derive(Debug, Error)]
pub enum IssueDbError {
    /// A caller-supplied field violates a length or enum-domain constraint.
    /// Checked before any write; no partial row exists when this is returned.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A lookup by id matched no row where the caller required one.
    ///
    /// The store itself reports missing rows as `Ok(None)` / `Ok(false)`;
    /// this variant exists for callers (the CLI) that need a hard failure.
    #[error("no issue found with id #{id}")]
    IssueNotFound { id: i64 },

    /// A migration step failed. The database stays at the last stamped version.
    #[error("migration to schema version {version} failed")]
    Migration {
        version: i32,
        #[source]
        source: rusqlite::Error,
    },

    /// The stored schema version is newer than this build understands.
    #[error("database schema version {stored} is newer than supported version {supported}")]
    SchemaTooNew { stored: i32, supported: i32 },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IssueDbError {
    /// Build a validation error for a named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
