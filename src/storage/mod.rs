//! `SQLite` storage layer for `issuedb`.
//!
//! This module provides the persistence layer using `SQLite` with:
//! - WAL mode for concurrent reads
//! - A versioned, forward-only schema migration mechanism
//! - Row-count based existence reporting for updates and deletes
//!
//! # Submodules
//!
//! - [`schema`] - Database schema and migration steps
//! - [`sqlite`] - Main `SQLite` store implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::{IssueStore, ListFilters};
