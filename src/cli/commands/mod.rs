//! Subcommand implementations.
//!
//! Each module exposes an `execute` function taking its parsed arguments,
//! the JSON output flag, and the global config overrides.

pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod schema;
pub mod set_status;
pub mod show;
pub mod version;
