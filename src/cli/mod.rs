//! Command-line interface for `issuedb`.
//!
//! Defines the clap derive tree and dispatches to the per-command modules
//! under [`commands`]. Every command supports `--json` for machine-readable
//! output on stdout; diagnostics go to stderr via tracing.

pub mod commands;

use crate::model::{Status, Tag};
use crate::{config, logging};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// Track issues in a local `SQLite` database.
#[derive(Debug, Parser)]
#[command(name = "idb", version, about = "Track issues in a local SQLite database")]
pub struct Cli {
    /// Database file (created on first use)
    #[arg(long, global = true, env = "ISSUEDB_FILE", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write JSON logs to this file
    #[arg(long, global = true, env = "ISSUEDB_LOG", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new issue
    Create(CreateArgs),
    /// Show one issue by id
    Show(ShowArgs),
    /// List issues, optionally filtered by tag and status
    List(ListArgs),
    /// Change the status of an issue
    SetStatus(SetStatusArgs),
    /// Remove an issue outright
    Delete(DeleteArgs),
    /// Export issues as a JSON array
    Export(ExportArgs),
    /// Print JSON Schemas for machine-readable outputs
    Schema(SchemaArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Issue name (at most 255 characters)
    pub name: String,

    /// Longer description (at most 2000 characters)
    #[arg(short, long, default_value = "")]
    pub detail: String,

    /// Issue kind: bug, feature, enhancement (or 0..=2)
    #[arg(short, long, default_value = "bug", value_parser = parse_tag)]
    pub tag: Tag,

    /// Reporting user (at most 63 characters)
    #[arg(short, long, default_value = "")]
    pub user: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Issue id
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only issues with this tag
    #[arg(short, long, value_parser = parse_tag)]
    pub tag: Option<Tag>,

    /// Only issues with this status
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<Status>,

    /// Page to display (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Issues per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SetStatusArgs {
    /// Issue id
    pub id: i64,

    /// New status: proposed, approved, rejected, deleted (or 0..=3)
    #[arg(value_parser = parse_status)]
    pub status: Status,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Issue id
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Only issues with this tag
    #[arg(short, long, value_parser = parse_tag)]
    pub tag: Option<Tag>,

    /// Only issues with this status
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<Status>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Which schemas to emit
    #[arg(long, value_enum, default_value_t = SchemaTarget::All)]
    pub target: SchemaTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaTarget {
    All,
    Issue,
    Page,
}

/// Parse a tag argument, accepting labels (`bug`) and numeric codes (`0`).
fn parse_tag(raw: &str) -> Result<Tag, String> {
    Tag::from_str(raw).map_err(|e| e.to_string())
}

/// Parse a status argument, accepting labels (`approved`) and numeric codes (`1`).
fn parse_status(raw: &str) -> Result<Status, String> {
    Status::from_str(raw).map_err(|e| e.to_string())
}

/// Parse arguments, initialize logging, and run the selected command.
///
/// # Errors
///
/// Returns an error when the command fails; usage errors exit through clap
/// with status 2 before this returns.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let overrides = config::CliOverrides {
        db: cli.db.clone().filter(|p| !p.as_os_str().is_empty()),
        page_size: None,
    };

    match &cli.command {
        Command::Create(args) => commands::create::execute(args, cli.json, &overrides)?,
        Command::Show(args) => commands::show::execute(args, cli.json, &overrides)?,
        Command::List(args) => commands::list::execute(args, cli.json, &overrides)?,
        Command::SetStatus(args) => commands::set_status::execute(args, cli.json, &overrides)?,
        Command::Delete(args) => commands::delete::execute(args, cli.json, &overrides)?,
        Command::Export(args) => commands::export::execute(args, cli.json, &overrides)?,
        Command::Schema(args) => commands::schema::execute(args)?,
        Command::Version => commands::version::execute(cli.json),
    }

    Ok(())
}
