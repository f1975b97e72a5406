//! Reminder planning over a platform notification backend.
//!
//! # Invariants
//! - One reminder per task; the fire time is the due date-time minus one
//!   hour, and reminders are only planned for future fire times.
//! - Near-due uses the open-closed window `(now, now + 24h]`.
//! - Cancellation requests removal by task id and swallows backend errors.

use crate::model::task::{Task, TaskId};
use chrono::{Duration, NaiveDateTime};
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Pure near-due predicate.
///
/// A task is near-due iff it has a due date, is not completed, and its due
/// date-time (missing time counts as `23:59`) lies in `(now, now + 24h]`.
pub fn is_near_due(task: &Task, now: NaiveDateTime) -> bool {
    if task.is_completed() {
        return false;
    }
    match task.due_datetime() {
        Some(due) => due > now && due <= now + Duration::hours(24),
        None => false,
    }
}

/// Scans the collection for near-due tasks, preserving order.
///
/// Backs the startup summary and the row-level list flags.
pub fn near_due_tasks<'a>(tasks: &'a [Task], now: NaiveDateTime) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| is_near_due(task, now))
        .collect()
}

/// Failure reported by a notification backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification backend error: {}", self.0)
    }
}

impl Error for NotifyError {}

/// One planned local notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub task_id: TaskId,
    pub title: String,
    pub body: String,
    pub fire_at: NaiveDateTime,
}

/// Seam over the platform local-notification API.
pub trait NotificationBackend {
    fn check_permission(&self) -> Result<bool, NotifyError>;
    fn request_permission(&mut self) -> Result<bool, NotifyError>;
    /// Schedules one notification, replacing any pending one for the same
    /// task id.
    fn schedule(&mut self, request: ReminderRequest) -> Result<(), NotifyError>;
    /// Requests removal of the pending notification for a task id.
    /// Cancelling an unknown id is not an error.
    fn cancel(&mut self, task_id: TaskId) -> Result<(), NotifyError>;
}

/// Plans task reminders, respecting platform permission state.
pub struct ReminderScheduler<B: NotificationBackend> {
    backend: B,
    enabled: bool,
}

impl<B: NotificationBackend> ReminderScheduler<B> {
    /// Resolves permission once: check first, request on denial. Any
    /// backend failure disables scheduling without blocking task work.
    pub fn new(mut backend: B) -> Self {
        let enabled = match backend.check_permission() {
            Ok(true) => true,
            Ok(false) => match backend.request_permission() {
                Ok(granted) => granted,
                Err(err) => {
                    warn!("event=permission_request module=notify status=error error={err}");
                    false
                }
            },
            Err(err) => {
                warn!("event=permission_check module=notify status=error error={err}");
                false
            }
        };

        if !enabled {
            info!("event=reminders module=notify status=disabled");
        }

        Self { backend, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Plans the single reminder for a task: due date-time minus one hour.
    ///
    /// Skipped (returning `false`) when scheduling is disabled, the task
    /// lacks either a date or a time, or the fire time is already past.
    pub fn schedule_for(&mut self, task: &Task, now: NaiveDateTime) -> bool {
        if !self.enabled {
            return false;
        }
        let (Some(date), Some(time)) = (task.due_date, task.due_time) else {
            return false;
        };

        let fire_at = date.and_time(time) - Duration::hours(1);
        if fire_at <= now {
            return false;
        }

        let request = ReminderRequest {
            task_id: task.id,
            title: "Task reminder".to_string(),
            body: format!("\"{}\" - priority {}", task.title, task.priority),
            fire_at,
        };

        match self.backend.schedule(request) {
            Ok(()) => {
                info!(
                    "event=reminder_schedule module=notify status=ok id={} fire_at={fire_at}",
                    task.id
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=reminder_schedule module=notify status=error id={} error={err}",
                    task.id
                );
                false
            }
        }
    }

    /// Cancels the task's pending reminder; backend errors are swallowed.
    pub fn cancel(&mut self, task_id: TaskId) {
        if let Err(err) = self.backend.cancel(task_id) {
            warn!("event=reminder_cancel module=notify status=error id={task_id} error={err}");
        }
    }
}

/// In-memory backend standing in for the platform notification store.
///
/// Used by the CLI session and by tests; holds at most one pending
/// request per task id.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    permission_granted: bool,
    pending: BTreeMap<TaskId, ReminderRequest>,
}

impl MemoryBackend {
    pub fn granted() -> Self {
        Self {
            permission_granted: true,
            pending: BTreeMap::new(),
        }
    }

    pub fn denied() -> Self {
        Self::default()
    }

    /// Pending requests in task-id order.
    pub fn pending(&self) -> impl Iterator<Item = &ReminderRequest> {
        self.pending.values()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl NotificationBackend for MemoryBackend {
    fn check_permission(&self) -> Result<bool, NotifyError> {
        Ok(self.permission_granted)
    }

    fn request_permission(&mut self) -> Result<bool, NotifyError> {
        Ok(self.permission_granted)
    }

    fn schedule(&mut self, request: ReminderRequest) -> Result<(), NotifyError> {
        self.pending.insert(request.task_id, request);
        Ok(())
    }

    fn cancel(&mut self, task_id: TaskId) -> Result<(), NotifyError> {
        self.pending.remove(&task_id);
        Ok(())
    }
}
