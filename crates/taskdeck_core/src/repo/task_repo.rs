//! Task repository contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Persist the full task collection as one JSON document under a single
//!   key, matching whole-collection load/save semantics.
//! - Keep SQL and serialization details behind the repository boundary.
//!
//! # Invariants
//! - A missing key loads as the empty collection.
//! - Corrupt persisted JSON is a typed error, never silently dropped.
//! - Repository construction rejects unmigrated connections.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::task::{Task, TaskValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Single key under which the whole collection is stored.
pub const TASKS_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    /// Persisted collection text failed to decode.
    InvalidData(String),
    /// Collection could not be encoded for storage.
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::Serialize(err) => write!(f, "failed to encode task collection: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-collection persistence contract.
pub trait TaskRepository {
    /// Loads the full collection; a never-written store yields an empty list.
    fn load_all(&self) -> RepoResult<Vec<Task>>;
    /// Rewrites the full collection synchronously.
    fn save_all(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed key-value repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load_all(&self) -> RepoResult<Vec<Task>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [TASKS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text).map_err(|err| {
                RepoError::InvalidData(format!(
                    "corrupt collection under key `{TASKS_KEY}`: {err}"
                ))
            }),
        }
    }

    fn save_all(&self, tasks: &[Task]) -> RepoResult<()> {
        let payload = serde_json::to_string(tasks).map_err(RepoError::Serialize)?;

        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![TASKS_KEY, payload],
        )?;

        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected = latest_version();
    let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual != expected {
        return Err(RepoError::UninitializedConnection {
            expected_version: expected,
            actual_version: actual,
        });
    }

    if !table_exists(conn, "kv_store")? {
        return Err(RepoError::MissingRequiredTable("kv_store"));
    }

    for column in ["key", "value", "updated_at"] {
        if !table_has_column(conn, "kv_store", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "kv_store",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
