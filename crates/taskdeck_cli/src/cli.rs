//! Argument definitions for the taskdeck binary.
//!
//! The subcommands mirror the mobile app surface this tool grew out of:
//! a filtered list view, quick create/edit, complete, delete, a display-only
//! reorder, and JSON backup import/export.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskdeck_core::{Category, Priority, Status, TaskValidationError};

#[derive(Debug, Parser)]
#[command(name = "taskdeck", version, about = "Local-first personal task tracker")]
pub struct Cli {
    /// Path to the task database file.
    #[arg(long, global = true, env = "TASKDECK_DB", default_value = "taskdeck.db3")]
    pub db: PathBuf,

    /// Directory for rolling log files; logging is off when omitted.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List tasks; near-due rows are flagged with `!`.
    List(ListArgs),
    /// Create a task.
    Add(AddArgs),
    /// Edit a task by merging the provided fields.
    Edit(EditArgs),
    /// Mark a task completed.
    Done { id: i64 },
    /// Delete a task, cancelling its reminder first.
    Rm { id: i64 },
    /// Reorder the displayed list (1-based positions, display only).
    Move { from: usize, to: usize },
    /// Show the dashboard counters.
    Stats,
    /// Export the collection as pretty JSON.
    Export(ExportArgs),
    /// Replace the collection with the tasks from a JSON file.
    Import { path: PathBuf },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by category (personal, work, social).
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    /// Filter by priority (low, medium, high).
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    /// Filter by status (initial, in-progress, completed).
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
    /// Case-insensitive substring search over titles.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
    /// Due day, YYYY-MM-DD.
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    /// Due time, HH:MM. A reminder needs both a date and a time.
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
    #[arg(long, value_parser = parse_date, conflicts_with = "clear_date")]
    pub date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_time, conflicts_with = "clear_time")]
    pub time: Option<NaiveTime>,
    /// Remove the due date.
    #[arg(long)]
    pub clear_date: bool,
    /// Remove the due time.
    #[arg(long)]
    pub clear_time: bool,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Target file; defaults to `taskdeck-backup-YYYY-MM-DD.json`.
    pub path: Option<PathBuf>,
    /// Print to stdout instead of writing a file.
    #[arg(long, conflicts_with = "path")]
    pub stdout: bool,
}

fn parse_category(value: &str) -> Result<Category, String> {
    value
        .parse()
        .map_err(|err: TaskValidationError| err.to_string())
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    value
        .parse()
        .map_err(|err: TaskValidationError| err.to_string())
}

fn parse_status(value: &str) -> Result<Status, String> {
    value
        .parse()
        .map_err(|err: TaskValidationError| err.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}` (expected YYYY-MM-DD): {err}"))
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|err| format!("invalid time `{value}` (expected HH:MM): {err}"))
}
