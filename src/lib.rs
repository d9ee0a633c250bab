//! `issuedb` - Embedded issue record store backed by `SQLite`
//!
//! This crate provides the core functionality for the `idb` CLI tool: a
//! small persistent store for issue records with typed tags and statuses,
//! length-validated text fields, and a versioned schema.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Issue, Tag, Status)
//! - [`validation`] - Field length limits and checks
//! - [`storage`] - `SQLite` database layer and schema migrations
//! - [`paginate`] - Page math for listings
//! - [`format`] - Output formatting (text, JSON)
//! - [`export`] - Atomic JSON export
//! - [`config`] - Configuration management
//! - [`logging`] - Tracing setup for the CLI and tests
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod model;
pub mod paginate;
pub mod storage;
pub mod validation;

pub use error::{IssueDbError, Result};
pub use model::{Issue, Status, Tag};
pub use storage::{IssueStore, ListFilters};
