//! Task use-case service: in-memory mirror over whole-collection storage.
//!
//! # Responsibility
//! - Load the full collection once on init and mirror it in memory.
//! - Persist the entire collection synchronously after every mutation.
//!
//! # Invariants
//! - The mirror only changes after a successful save, so a failed save
//!   leaves memory and disk consistent.
//! - `update` on an unknown id is a no-op: the collection stays unchanged.
//! - New ids are unique even when two tasks are created within the same
//!   millisecond.

use crate::filter::TaskFilter;
use crate::model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use chrono::Utc;
use log::{info, warn};

/// Dashboard counters shown above the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Everything with status other than completed.
    pub pending: usize,
    /// High-priority tasks that are not yet completed.
    pub high_priority_open: usize,
}

/// Use-case service wrapping a [`TaskRepository`].
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Loads the full collection from the repository.
    pub fn load(repo: R) -> RepoResult<Self> {
        let tasks = repo.load_all()?;
        info!(
            "event=store_load module=service status=ok count={}",
            tasks.len()
        );
        Ok(Self { repo, tasks })
    }

    /// Ordered snapshot of the collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds one task by id via linear scan.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Creates a task from a draft: assigns a unique id and creation
    /// timestamp, appends, and persists.
    pub fn create(&mut self, draft: TaskDraft) -> RepoResult<Task> {
        draft.validate()?;

        let now = Utc::now();
        let id = next_task_id(&self.tasks, now.timestamp_millis());
        let task = Task::from_draft(id, now, draft);

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;

        info!("event=task_create module=service status=ok id={id}");
        Ok(task)
    }

    /// Shallow-merges the patch into the task with the given id.
    ///
    /// Returns the updated record, or `None` when the id is unknown (the
    /// collection is left untouched in that case).
    pub fn update(&mut self, id: TaskId, patch: &TaskPatch) -> RepoResult<Option<Task>> {
        patch.validate()?;

        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            warn!("event=task_update module=service status=skip reason=not_found id={id}");
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.commit(next)?;

        info!("event=task_update module=service status=ok id={id}");
        Ok(Some(updated))
    }

    /// Removes the task with the given id; returns whether anything was
    /// removed. Removal is filter-and-reassign over the collection.
    pub fn delete(&mut self, id: TaskId) -> RepoResult<bool> {
        if !self.tasks.iter().any(|task| task.id == id) {
            warn!("event=task_delete module=service status=skip reason=not_found id={id}");
            return Ok(false);
        }

        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        info!("event=task_delete module=service status=ok id={id}");
        Ok(true)
    }

    /// Evaluates the four filter predicates per record, preserving order.
    pub fn filter(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    /// Serializes the full collection to pretty-printed JSON.
    pub fn export_json(&self) -> RepoResult<String> {
        let payload = serde_json::to_string_pretty(&self.tasks).map_err(RepoError::Serialize)?;
        info!(
            "event=export module=service status=ok count={}",
            self.tasks.len()
        );
        Ok(payload)
    }

    /// Parses a JSON array and replaces the entire collection with it.
    ///
    /// Returns the imported count. Malformed input returns 0 and leaves
    /// the prior collection untouched in memory and on disk; only
    /// persistence failures surface as errors.
    pub fn import_json(&mut self, payload: &str) -> RepoResult<usize> {
        let imported: Vec<Task> = match serde_json::from_str(payload) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!("event=import module=service status=rejected error={err}");
                return Ok(0);
            }
        };

        let count = imported.len();
        self.commit(imported)?;

        info!("event=import module=service status=ok count={count}");
        Ok(count)
    }

    /// Computes the dashboard counters over the current collection.
    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.is_completed()).count();
        let high_priority_open = self
            .tasks
            .iter()
            .filter(|t| t.priority == Priority::High && !t.is_completed())
            .count();

        TaskStats {
            total,
            completed,
            pending: total - completed,
            high_priority_open,
        }
    }

    /// Persists the candidate collection, then swaps it into the mirror.
    fn commit(&mut self, next: Vec<Task>) -> RepoResult<()> {
        self.repo.save_all(&next)?;
        self.tasks = next;
        Ok(())
    }
}

/// Next unique id: creation time in epoch milliseconds, bumped past the
/// current maximum when the clock has not advanced since the last create.
fn next_task_id(tasks: &[Task], now_ms: i64) -> TaskId {
    let max_existing = tasks.iter().map(|task| task.id).max().unwrap_or(0);
    now_ms.max(max_existing + 1)
}
