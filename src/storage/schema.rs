//! Database schema and forward-only migration logic.

use crate::error::{IssueDbError, Result};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::time::Duration;
use tracing::{debug, info};

/// Schema version stamped into fresh databases.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Lock wait budget for contention from other handles on the same file.
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// The complete SQL schema for the issue database.
///
/// This always describes the newest layout; [`MIGRATIONS`] exists to bring
/// stores created by older builds forward to it. All statements use
/// `IF NOT EXISTS`, so applying the schema is idempotent.
pub const SCHEMA_SQL: &str = r"
    -- Issue records
    CREATE TABLE IF NOT EXISTS issue (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tag INTEGER NOT NULL,
        status INTEGER NOT NULL,
        name TEXT NOT NULL,
        detail TEXT NOT NULL,
        user_id TEXT NOT NULL
    );

    -- Filter access patterns
    CREATE INDEX IF NOT EXISTS idx_issue_tag ON issue(tag);
    CREATE INDEX IF NOT EXISTS idx_issue_status ON issue(status);
";

/// A forward-only migration step keyed by the version it produces.
pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub apply: fn(&Transaction<'_>) -> rusqlite::Result<()>,
}

/// Pending steps for stores below [`CURRENT_SCHEMA_VERSION`], in ascending
/// version order. Version 1 is the baseline created by [`apply_schema`];
/// every later version must have exactly one entry here, appended without
/// touching already-applied steps.
pub const MIGRATIONS: &[Migration] = &[];

/// Configure the connection and apply the baseline schema.
///
/// Sets the busy timeout plus WAL/synchronous pragmas, then runs
/// [`SCHEMA_SQL`].
///
/// # Errors
///
/// Returns an error if a pragma cannot be set or the DDL fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;

    // NORMAL synchronous is safe with WAL: committed data survives OS crash.
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Read the stored schema version.
///
/// Returns 0 when no version marker exists yet (missing or empty
/// `schema_version` table). A marker table that exists but cannot be read is
/// a hard error, kept distinct from the fresh-database case.
///
/// # Errors
///
/// Returns an error if the marker table exists but the version cannot be
/// read.
pub fn current_version(conn: &Connection) -> Result<i32> {
    if !table_exists(conn, "schema_version")? {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?;

    Ok(version.unwrap_or(0))
}

/// Bring the database to [`CURRENT_SCHEMA_VERSION`].
///
/// A fresh database gets the marker table and the current stamp. An older
/// one has each pending step from [`MIGRATIONS`] applied in ascending order;
/// every step runs inside one transaction together with its version stamp,
/// so a failed step leaves the store at the last stamped version. A stored
/// version newer than this build is refused.
///
/// # Errors
///
/// Returns an error if the version cannot be read, a step fails, or the
/// stored version is newer than [`CURRENT_SCHEMA_VERSION`].
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )?;

    let stored = current_version(conn)?;
    if stored > CURRENT_SCHEMA_VERSION {
        return Err(IssueDbError::SchemaTooNew {
            stored,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    if stored == CURRENT_SCHEMA_VERSION {
        debug!(version = stored, "schema is up to date");
        return Ok(());
    }

    if stored == 0 {
        // Fresh database: the baseline DDL is already in place, only the
        // stamp is missing.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        set_version(&tx, CURRENT_SCHEMA_VERSION)?;
        tx.commit()?;
        info!(
            version = CURRENT_SCHEMA_VERSION,
            "stamped fresh database schema"
        );
        return Ok(());
    }

    run_pending(conn, stored, MIGRATIONS)
}

/// Apply every step newer than `stored`, each atomic with its stamp.
fn run_pending(conn: &mut Connection, stored: i32, steps: &[Migration]) -> Result<()> {
    for step in steps {
        if step.version <= stored {
            continue;
        }

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        (step.apply)(&tx).map_err(|source| IssueDbError::Migration {
            version: step.version,
            source,
        })?;
        set_version(&tx, step.version)?;
        tx.commit()?;

        info!(version = step.version, name = step.name, "applied migration");
    }

    Ok(())
}

fn set_version(tx: &Transaction<'_>, version: i32) -> Result<()> {
    debug!(version, "stamping schema version");
    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    Ok(stmt.exists([table])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn fresh_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("apply schema");
        conn
    }

    #[test]
    fn apply_schema_creates_issue_table_and_indexes() {
        let conn = fresh_conn();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();
        assert!(tables.contains(&"issue".to_string()));

        let indexes: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND sql IS NOT NULL")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();
        assert!(indexes.contains(&"idx_issue_tag".to_string()));
        assert!(indexes.contains(&"idx_issue_status".to_string()));
    }

    #[test]
    fn apply_schema_is_idempotent() {
        let conn = fresh_conn();
        apply_schema(&conn).expect("second apply");
    }

    #[test]
    fn apply_schema_sets_busy_timeout() {
        let conn = fresh_conn();
        let timeout: i64 = conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
    }

    #[test]
    fn apply_schema_sets_journal_mode() {
        let conn = fresh_conn();
        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        // In-memory databases report MEMORY journaling regardless of the pragma.
        assert!(
            journal_mode.eq_ignore_ascii_case("wal") || journal_mode.eq_ignore_ascii_case("memory")
        );
    }

    #[test]
    fn version_is_zero_before_any_marker() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
    }

    #[test]
    fn empty_marker_table_reads_as_fresh() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE schema_version (version INTEGER NOT NULL)", [])
            .unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
    }

    #[test]
    fn migrate_stamps_fresh_database() {
        let mut conn = fresh_conn();
        migrate(&mut conn).expect("migrate");
        assert_eq!(current_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn migrate_is_idempotent_at_current_version() {
        let mut conn = fresh_conn();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).expect("second migrate");
        assert_eq!(current_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn migrate_refuses_newer_stored_version() {
        let mut conn = fresh_conn();
        migrate(&mut conn).unwrap();
        conn.execute("UPDATE schema_version SET version = 99", [])
            .unwrap();

        let err = migrate(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            IssueDbError::SchemaTooNew { stored: 99, supported } if supported == CURRENT_SCHEMA_VERSION
        ));
        assert_eq!(current_version(&conn).unwrap(), 99);
    }

    fn add_notes_column(tx: &Transaction<'_>) -> rusqlite::Result<()> {
        tx.execute(
            "ALTER TABLE issue ADD COLUMN notes TEXT NOT NULL DEFAULT ''",
            [],
        )?;
        Ok(())
    }

    fn broken_step(tx: &Transaction<'_>) -> rusqlite::Result<()> {
        tx.execute("ALTER TABLE no_such_table ADD COLUMN x TEXT", [])?;
        Ok(())
    }

    #[test]
    fn pending_steps_apply_in_order_and_stamp_each_version() {
        let mut conn = fresh_conn();
        migrate(&mut conn).unwrap();

        let steps = [Migration {
            version: 2,
            name: "add notes column",
            apply: add_notes_column,
        }];
        run_pending(&mut conn, 1, &steps).expect("run pending");

        assert_eq!(current_version(&conn).unwrap(), 2);
        let has_notes: bool = conn
            .prepare("SELECT 1 FROM pragma_table_info('issue') WHERE name = 'notes'")
            .unwrap()
            .exists([])
            .unwrap();
        assert!(has_notes);
    }

    #[test]
    fn already_applied_steps_are_skipped() {
        let mut conn = fresh_conn();
        migrate(&mut conn).unwrap();

        let steps = [Migration {
            version: 1,
            name: "baseline",
            apply: broken_step,
        }];
        // Version 1 is already stamped, so the broken step never runs.
        run_pending(&mut conn, 1, &steps).expect("skip applied step");
        assert_eq!(current_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn failed_step_leaves_version_at_last_stamp() {
        let mut conn = fresh_conn();
        migrate(&mut conn).unwrap();

        let steps = [Migration {
            version: 2,
            name: "broken",
            apply: broken_step,
        }];
        let err = run_pending(&mut conn, 1, &steps).unwrap_err();
        assert!(matches!(err, IssueDbError::Migration { version: 2, .. }));
        assert_eq!(current_version(&conn).unwrap(), 1);
    }
}
