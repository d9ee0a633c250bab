//! `SQLite` storage implementation.

use crate::error::{IssueDbError, Result};
use crate::model::{Issue, Status, Tag};
use crate::storage::schema::{self, apply_schema, migrate};
use crate::validation::{validate_detail, validate_name, validate_user_id};
use rusqlite::{Connection, params};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// SQLite-backed issue store owning its connection.
#[derive(Debug)]
pub struct IssueStore {
    conn: Connection,
}

/// Optional filters for listing issues. Set filters are ANDed together.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilters {
    pub tag: Option<Tag>,
    pub status: Option<Status>,
}

impl IssueStore {
    /// Open the database at the given path, creating it if missing, and
    /// bring its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established, schema
    /// application fails, or the stored schema is newer than this build.
    pub fn open(path: &Path) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        apply_schema(&conn)?;
        migrate(&mut conn)?;
        debug!(path = %path.display(), "opened issue store");
        Ok(Self { conn })
    }

    /// Open an in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        migrate(&mut conn)?;
        Ok(Self { conn })
    }

    /// Close the store explicitly.
    ///
    /// Dropping the store closes the connection as well; this variant
    /// surfaces close-time errors instead of discarding them.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` fails to finalize the connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| IssueDbError::Sqlite(e))
    }

    /// Schema version of the underlying database.
    ///
    /// # Errors
    ///
    /// Returns an error if the version marker cannot be read.
    pub fn schema_version(&self) -> Result<i32> {
        schema::current_version(&self.conn)
    }

    /// Create an issue in `Proposed` status and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a field is empty or over its length
    /// limit, or an error if the insert fails.
    pub fn create_issue(
        &mut self,
        name: &str,
        detail: &str,
        tag: Tag,
        user_id: &str,
    ) -> Result<i64> {
        validate_name(name)?;
        validate_detail(detail)?;
        validate_user_id(user_id)?;

        self.conn.execute(
            "INSERT INTO issue (tag, status, name, detail, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![tag.code(), Status::Proposed.code(), name, detail, user_id],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "created issue");
        Ok(id)
    }

    /// Fetch a single issue by id, or `None` if no row matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_issue(&self, id: i64) -> Result<Option<Issue>> {
        let result = self.conn.query_row(
            "SELECT id, tag, status, name, detail, user_id FROM issue WHERE id = ?1",
            params![id],
            issue_from_row,
        );

        match result {
            Ok(issue) => Ok(Some(issue)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List issues matching the filters, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_issues(&self, filters: &ListFilters) -> Result<Vec<Issue>> {
        let mut sql =
            String::from("SELECT id, tag, status, name, detail, user_id FROM issue WHERE 1=1");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(tag) = filters.tag {
            let _ = write!(sql, " AND tag = ?{}", params.len() + 1);
            params.push(Box::new(tag.code()));
        }
        if let Some(status) = filters.status {
            let _ = write!(sql, " AND status = ?{}", params.len() + 1);
            params.push(Box::new(status.code()));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(AsRef::as_ref).collect();
        let issues = stmt
            .query_map(param_refs.as_slice(), issue_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(count = issues.len(), "listed issues");
        Ok(issues)
    }

    /// Set the status of an existing issue, leaving every other column
    /// untouched. Returns `false` when no issue has the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_status(&mut self, id: i64, status: Status) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE issue SET status = ?1 WHERE id = ?2",
            params![status.code(), id],
        )?;
        Ok(rows > 0)
    }

    /// Remove an issue row outright. Returns `false` when no issue has the
    /// given id.
    ///
    /// This is independent of the `Deleted` status, which only marks a
    /// record while keeping it stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_issue(&mut self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM issue WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    /// Total number of stored issues.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_issues(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM issue", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

/// Map a `SELECT id, tag, status, name, detail, user_id` row to an [`Issue`].
///
/// Stored codes outside the known ranges are reported as out-of-range column
/// values so they surface as storage faults rather than validation errors.
fn issue_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Issue> {
    let tag_code: i64 = row.get(1)?;
    let status_code: i64 = row.get(2)?;

    Ok(Issue {
        id: row.get(0)?,
        tag: Tag::from_code(tag_code)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(1, tag_code))?,
        status: Status::from_code(status_code)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(2, status_code))?,
        name: row.get(3)?,
        detail: row.get(4)?,
        user_id: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::CURRENT_SCHEMA_VERSION;
    use crate::validation::MAX_NAME_LEN;

    fn store_with_one_issue() -> (IssueStore, i64) {
        let mut store = IssueStore::open_memory().unwrap();
        let id = store
            .create_issue("Crash on save", "Editor crashes when saving", Tag::Bug, "alice")
            .unwrap();
        (store, id)
    }

    #[test]
    fn open_memory_reports_current_schema_version() {
        let store = IssueStore::open_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let mut store = IssueStore::open_memory().unwrap();
        let first = store
            .create_issue("First", "", Tag::Bug, "alice")
            .unwrap();
        let second = store
            .create_issue("Second", "", Tag::Feature, "bob")
            .unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn create_starts_in_proposed_status() {
        let (store, id) = store_with_one_issue();
        let issue = store.get_issue(id).unwrap().unwrap();
        assert_eq!(issue.status, Status::Proposed);
    }

    #[test]
    fn create_rejects_empty_name() {
        let mut store = IssueStore::open_memory().unwrap();
        let err = store
            .create_issue("", "detail", Tag::Bug, "alice")
            .unwrap_err();
        assert!(matches!(err, IssueDbError::Validation { ref field, .. } if field == "name"));
        assert_eq!(store.count_issues().unwrap(), 0);
    }

    #[test]
    fn create_rejects_oversized_name_without_truncating() {
        let mut store = IssueStore::open_memory().unwrap();
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = store
            .create_issue(&long, "detail", Tag::Bug, "alice")
            .unwrap_err();
        assert!(matches!(err, IssueDbError::Validation { ref field, .. } if field == "name"));
        assert_eq!(store.count_issues().unwrap(), 0);
    }

    #[test]
    fn create_accepts_name_at_limit() {
        let mut store = IssueStore::open_memory().unwrap();
        let exact = "x".repeat(MAX_NAME_LEN);
        let id = store
            .create_issue(&exact, "detail", Tag::Bug, "alice")
            .unwrap();
        let issue = store.get_issue(id).unwrap().unwrap();
        assert_eq!(issue.name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn get_round_trips_all_fields() {
        let mut store = IssueStore::open_memory().unwrap();
        let id = store
            .create_issue("Dark mode", "Add a dark theme", Tag::Enhancement, "carol")
            .unwrap();

        let issue = store.get_issue(id).unwrap().unwrap();
        assert_eq!(issue.id, id);
        assert_eq!(issue.name, "Dark mode");
        assert_eq!(issue.detail, "Add a dark theme");
        assert_eq!(issue.tag, Tag::Enhancement);
        assert_eq!(issue.status, Status::Proposed);
        assert_eq!(issue.user_id, "carol");
    }

    #[test]
    fn get_missing_id_returns_none() {
        let store = IssueStore::open_memory().unwrap();
        assert!(store.get_issue(42).unwrap().is_none());
    }

    #[test]
    fn update_status_changes_only_the_status_column() {
        let (mut store, id) = store_with_one_issue();
        let before = store.get_issue(id).unwrap().unwrap();

        assert!(store.update_status(id, Status::Approved).unwrap());

        let after = store.get_issue(id).unwrap().unwrap();
        assert_eq!(after.status, Status::Approved);
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.detail, before.detail);
        assert_eq!(after.tag, before.tag);
        assert_eq!(after.user_id, before.user_id);
    }

    #[test]
    fn update_status_missing_id_returns_false() {
        let mut store = IssueStore::open_memory().unwrap();
        assert!(!store.update_status(42, Status::Approved).unwrap());
    }

    #[test]
    fn delete_removes_the_row() {
        let (mut store, id) = store_with_one_issue();
        assert!(store.delete_issue(id).unwrap());
        assert!(store.get_issue(id).unwrap().is_none());
        assert!(store.list_issues(&ListFilters::default()).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_id_returns_false() {
        let mut store = IssueStore::open_memory().unwrap();
        assert!(!store.delete_issue(42).unwrap());
    }

    #[test]
    fn deleted_status_keeps_the_row_stored() {
        let (mut store, id) = store_with_one_issue();
        assert!(store.update_status(id, Status::Deleted).unwrap());

        let issue = store.get_issue(id).unwrap().unwrap();
        assert_eq!(issue.status, Status::Deleted);
        assert_eq!(store.count_issues().unwrap(), 1);
    }

    #[test]
    fn list_orders_by_ascending_id() {
        let mut store = IssueStore::open_memory().unwrap();
        for name in ["a", "b", "c"] {
            store.create_issue(name, "", Tag::Bug, "alice").unwrap();
        }

        let issues = store.list_issues(&ListFilters::default()).unwrap();
        let ids: Vec<i64> = issues.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn list_filters_by_tag_and_status_together() {
        let mut store = IssueStore::open_memory().unwrap();
        let a = store.create_issue("a", "", Tag::Bug, "u").unwrap();
        let b = store.create_issue("b", "", Tag::Feature, "u").unwrap();
        let _c = store.create_issue("c", "", Tag::Feature, "u").unwrap();
        store.update_status(b, Status::Approved).unwrap();
        store.update_status(a, Status::Approved).unwrap();

        let filters = ListFilters {
            tag: Some(Tag::Feature),
            status: Some(Status::Approved),
        };
        let issues = store.list_issues(&filters).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, b);
    }

    #[test]
    fn list_on_empty_store_returns_empty_vec() {
        let store = IssueStore::open_memory().unwrap();
        assert!(store.list_issues(&ListFilters::default()).unwrap().is_empty());
    }

    #[test]
    fn close_succeeds() {
        let (store, _) = store_with_one_issue();
        store.close().unwrap();
    }
}
