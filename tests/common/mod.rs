#![allow(dead_code)]

use issuedb::model::{Status, Tag};
use issuedb::storage::IssueStore;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        issuedb::logging::init_test_logging();
    });
}

pub fn test_db() -> IssueStore {
    init_test_logging();
    IssueStore::open_memory().expect("Failed to create test database")
}

pub fn test_db_with_dir() -> (IssueStore, TempDir) {
    init_test_logging();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("issues.db");
    let store = IssueStore::open(&db_path).expect("Failed to create test database");
    (store, dir)
}

/// Seed five issues spanning every tag and several statuses:
///
/// 1. Bug/Proposed, 2. Feature/Approved, 3. Feature/Rejected,
/// 4. Enhancement/Proposed, 5. Bug/Deleted.
///
/// Returns the assigned ids in creation order.
pub fn seed_mixed(store: &mut IssueStore) -> Vec<i64> {
    let rows = [
        ("Crash on save", Tag::Bug, Status::Proposed, "alice"),
        ("Dark mode", Tag::Feature, Status::Approved, "bob"),
        ("CSV import", Tag::Feature, Status::Rejected, "alice"),
        ("Faster startup", Tag::Enhancement, Status::Proposed, "carol"),
        ("Old crash", Tag::Bug, Status::Deleted, "bob"),
    ];

    let mut ids = Vec::with_capacity(rows.len());
    for (name, tag, status, user) in rows {
        let id = store.create_issue(name, "", tag, user).expect("create");
        if status != Status::Proposed {
            store.update_status(id, status).expect("set status");
        }
        ids.push(id);
    }
    ids
}
