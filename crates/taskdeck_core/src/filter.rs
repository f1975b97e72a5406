//! Filter evaluation over the task collection.
//!
//! # Responsibility
//! - Combine the four independent list-view predicates by logical AND.
//!
//! # Invariants
//! - `None` is the "all" sentinel: it disables a predicate entirely.
//! - Text search is a case-insensitive substring match on the title only.
//! - Filtering preserves stored order and never mutates the collection.

use crate::model::task::{Category, Priority, Status, Task};

/// Four optional predicates driving the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// Free-text search over the title; empty text disables the predicate.
    pub search: Option<String>,
}

impl TaskFilter {
    /// True when every predicate is disabled.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.search.as_deref().is_none_or(str::is_empty)
    }

    /// A record passes only if every enabled predicate matches.
    pub fn matches(&self, task: &Task) -> bool {
        let category_ok = self.category.is_none_or(|wanted| task.category == wanted);
        let priority_ok = self.priority.is_none_or(|wanted| task.priority == wanted);
        let status_ok = self.status.is_none_or(|wanted| task.status == wanted);
        let search_ok = self.search.as_deref().is_none_or(|needle| {
            needle.is_empty()
                || task
                    .title
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
        });

        category_ok && priority_ok && status_ok && search_ok
    }
}

/// Evaluates the filter over a slice, preserving order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_tasks, TaskFilter};
    use crate::model::task::{Category, Priority, Status, Task, TaskDraft};
    use chrono::Utc;

    fn task(id: i64, title: &str, category: Category, priority: Priority, status: Status) -> Task {
        let mut draft = TaskDraft::new(title);
        draft.category = category;
        draft.priority = priority;
        draft.status = status;
        Task::from_draft(id, Utc::now(), draft)
    }

    fn fixtures() -> Vec<Task> {
        vec![
            task(1, "Pay rent", Category::Personal, Priority::High, Status::Initial),
            task(2, "Quarterly report", Category::Work, Priority::High, Status::InProgress),
            task(3, "Team lunch", Category::Social, Priority::Low, Status::Completed),
        ]
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let tasks = fixtures();
        let filter = TaskFilter::default();
        assert!(filter.is_empty());

        let result = filter_tasks(&tasks, &filter);
        let ids: Vec<i64> = result.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn each_predicate_narrows_independently() {
        let tasks = fixtures();

        let by_category = TaskFilter {
            category: Some(Category::Work),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks(&tasks, &by_category).len(), 1);

        let by_priority = TaskFilter {
            priority: Some(Priority::High),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks(&tasks, &by_priority).len(), 2);

        let by_status = TaskFilter {
            status: Some(Status::Completed),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks(&tasks, &by_status)[0].id, 3);
    }

    #[test]
    fn predicates_combine_by_and() {
        let tasks = fixtures();
        let filter = TaskFilter {
            category: Some(Category::Work),
            priority: Some(Priority::Low),
            ..TaskFilter::default()
        };
        assert!(filter_tasks(&tasks, &filter).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_title_only() {
        let mut tasks = fixtures();
        tasks[0].description = "report".to_string();

        let filter = TaskFilter {
            search: Some("REPORT".to_string()),
            ..TaskFilter::default()
        };
        let result = filter_tasks(&tasks, &filter);
        // Only the title match counts; the description mention does not.
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn empty_search_text_disables_the_predicate() {
        let tasks = fixtures();
        let filter = TaskFilter {
            search: Some(String::new()),
            ..TaskFilter::default()
        };
        assert_eq!(filter_tasks(&tasks, &filter).len(), 3);
    }
}
