//! Visible-subset projection for search and completion filtering.
//!
//! # Responsibility
//! - Derive the visible task subset from the full set plus search text and
//!   completion filter.
//!
//! # Invariants
//! - Pure and stateless; recomputing with the same inputs yields the same
//!   output.
//! - Output preserves the relative order of the input sequence.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// Tri-state completion filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionFilter {
    /// Pass every task.
    All,
    /// Pass only completed tasks.
    Completed,
    /// Pass only tasks still in progress.
    Incomplete,
}

impl CompletionFilter {
    /// Returns whether a task with the given completion flag passes.
    pub fn matches(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed,
            Self::Incomplete => !completed,
        }
    }
}

/// Derives the visible task subset.
///
/// Search is a case-insensitive substring match of `query` against each
/// title; the empty query matches everything. Both predicates are ANDed.
pub fn project(tasks: &[Task], query: &str, filter: CompletionFilter) -> Vec<Task> {
    let needle = query.to_lowercase();

    tasks
        .iter()
        .filter(|task| filter.matches(task.completed))
        .filter(|task| needle.is_empty() || task.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
