//! Canonical task record plus create/edit input shapes.
//!
//! # Responsibility
//! - Keep one storage shape for the whole-collection store.
//! - Own the partial-field merge used by edit and status-change flows.
//!
//! # Invariants
//! - `id` is the creation timestamp in epoch milliseconds, bumped on
//!   collision so it stays unique within one store.
//! - No invariant is enforced across fields: a completed task may still
//!   carry a future due date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable identifier for a task: epoch milliseconds at creation time.
pub type TaskId = i64;

/// Task grouping used by the category filter selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Social,
}

/// Urgency level shown in the list view and reminder body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Three-valued task lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Initial,
    InProgress,
    Completed,
}

impl Category {
    /// Stable lowercase label, also used for CLI parsing.
    pub fn label(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Social => "social",
        }
    }
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "social" => Ok(Self::Social),
            other => Err(TaskValidationError::UnknownValue {
                field: "category",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(TaskValidationError::UnknownValue {
                field: "priority",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Status {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "initial" => Ok(Self::Initial),
            "in-progress" | "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(TaskValidationError::UnknownValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Validation failure for draft/patch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is required and must contain at least one non-space character.
    BlankTitle,
    /// A textual enum value did not match any known variant.
    UnknownValue { field: &'static str, value: String },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::UnknownValue { field, value } => {
                write!(f, "unknown {field} value `{value}`")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record persisted as part of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation timestamp in epoch milliseconds; unique within the store.
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    /// Scheduled day, if any.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Scheduled time of day; missing time means end-of-day for the
    /// near-due check and disables reminder scheduling.
    #[serde(default)]
    pub due_time: Option<NaiveTime>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Materializes a draft into a full record with identity fields set.
    pub fn from_draft(id: TaskId, created_at: DateTime<Utc>, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            status: draft.status,
            due_date: draft.due_date,
            due_time: draft.due_time,
            notes: draft.notes,
            created_at,
        }
    }

    /// Combined due date-time, with a `23:59` fallback when only the day
    /// is scheduled. `None` when the task has no due date at all.
    pub fn due_datetime(&self) -> Option<NaiveDateTime> {
        self.due_date
            .map(|date| date.and_time(self.due_time.unwrap_or_else(end_of_day)))
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Shallow-merges the provided patch fields into this record.
    ///
    /// Unset patch fields leave the record untouched; `Some(None)` on the
    /// schedule fields clears them.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(due_time) = patch.due_time {
            self.due_time = due_time;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
    }
}

/// Creation input: everything the user supplies, with UI defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub notes: String,
}

impl TaskDraft {
    /// Draft with the given title and the quick-create defaults
    /// (personal / medium / initial).
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Rejects drafts that would persist a blank title.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }
}

/// Partial-field merge input for edit and status-change flows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// Outer `Some` means "set the field"; `Some(None)` clears the date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Same double-optional semantics as `due_date`.
    pub due_time: Option<Option<NaiveTime>>,
    pub notes: Option<String>,
}

impl TaskPatch {
    /// Patch that only flips the lifecycle status.
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Rejects patches that would blank out the title.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TaskValidationError::BlankTitle);
            }
        }
        Ok(())
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}
