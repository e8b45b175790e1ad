//! Filtered view of the task collection.
//!
//! Every consumer (task list, sidebar badge, CLI `list`) goes through
//! [`project`] so filter and search semantics live in one place.

use crate::store::{Task, TaskFilter, TaskPriority, TaskStatus};

/// Apply `filter`, then the case-insensitive title search, preserving input order.
///
/// A query that is empty after trimming matches everything. The result is
/// always an owned copy; callers can't reach the store's collection through it.
pub fn project(tasks: &[Task], filter: TaskFilter, search_query: &str) -> Vec<Task> {
    let query = search_query.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .filter(|task| query.is_empty() || task.title.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Last projection, reused while `(revision, filter, query)` is unchanged.
#[derive(Debug, Default)]
pub struct FilteredView {
    key: Option<(u64, TaskFilter, String)>,
    rows: Vec<Task>,
}

impl FilteredView {
    pub fn get(
        &mut self,
        tasks: &[Task],
        revision: u64,
        filter: TaskFilter,
        search_query: &str,
    ) -> &[Task] {
        let fresh = matches!(
            &self.key,
            Some((rev, f, q)) if *rev == revision && *f == filter && q == search_query
        );
        if !fresh {
            self.rows = project(tasks, filter, search_query);
            self.key = Some((revision, filter, search_query.to_string()));
        }
        &self.rows
    }

    /// The rows from the most recent [`FilteredView::get`].
    pub fn rows(&self) -> &[Task] {
        &self.rows
    }
}

/// Per-status and urgent counts for the overview and CLI footers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub backlog: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub urgent: usize,
}

impl TaskCounts {
    pub fn open(&self) -> usize {
        self.total - self.done
    }

    /// Completion percentage, 0 for an empty board.
    pub fn completion_pct(&self) -> u16 {
        if self.total == 0 {
            0
        } else {
            ((self.done * 100) / self.total) as u16
        }
    }
}

pub fn summarize(tasks: &[Task]) -> TaskCounts {
    let mut counts = TaskCounts {
        total: tasks.len(),
        ..TaskCounts::default()
    };
    for task in tasks {
        match task.status {
            TaskStatus::Backlog => counts.backlog += 1,
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Done => counts.done += 1,
        }
        if task.priority == TaskPriority::Urgent {
            counts.urgent += 1;
        }
    }
    counts
}
