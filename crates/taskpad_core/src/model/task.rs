//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record backing the task list.
//! - Guard the creation boundary against blank titles.
//!
//! # Invariants
//! - `id` is assigned by the store, is unique among live rows and is never
//!   mutated afterwards.
//! - `title` is set once at creation; `completed` is the only field toggled
//!   in place.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable store-assigned identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Canonical record for one task-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned row id.
    pub id: TaskId,
    /// User-entered title, persisted as given.
    pub title: String,
    /// Completion flag; `false` on creation.
    pub completed: bool,
}

impl Task {
    /// Creates a task record with a freshly assigned id and default state.
    ///
    /// Used by the repository after the store allocated the row id. The
    /// title must already have passed [`validate_title`].
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Creation-boundary validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty after trimming"),
        }
    }
}

impl Error for TaskValidationError {}

/// Validates a caller-supplied title before it may touch storage.
///
/// Accepted input is stored untouched; trimming is applied only to decide
/// whether the title carries any content.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_title, Task, TaskValidationError};

    #[test]
    fn new_task_starts_incomplete() {
        let task = Task::new(7, "water plants");
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "water plants");
        assert!(!task.completed);
    }

    #[test]
    fn validate_title_rejects_blank_input() {
        assert_eq!(validate_title(""), Err(TaskValidationError::EmptyTitle));
        assert_eq!(validate_title("   "), Err(TaskValidationError::EmptyTitle));
        assert_eq!(validate_title("\t\n"), Err(TaskValidationError::EmptyTitle));
    }

    #[test]
    fn validate_title_accepts_padded_input() {
        assert!(validate_title("  Buy milk  ").is_ok());
    }
}
