//! Task list use-case service.
//!
//! # Responsibility
//! - Hold the in-memory reflection of the persisted task set.
//! - Run every mutation as mutate -> full re-read -> notify.
//! - Apply the degraded-mode policy when persistence is unavailable.
//!
//! # Invariants
//! - After any successful mutation the snapshot is a full re-read of the
//!   store, visible before the caller observes the return value.
//! - Validation failures surface to the caller and never touch storage.
//! - Storage failures are logged and leave the snapshot unchanged.
//! - Mutations are serialized through `&mut self`; overlapping edits cannot
//!   interleave.

use crate::model::task::{validate_title, Task, TaskId, TaskValidationError};
use crate::notify::{ChangeNotifier, SubscriptionId};
use crate::projection::{project, CompletionFilter};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use log::{error, info};

/// Stateful facade over the task repository.
///
/// Constructed once at startup with an injected repository, or detached
/// when opening the store failed and the host should keep running without
/// persistence.
pub struct TaskService<R: TaskRepository> {
    repo: Option<R>,
    tasks: Vec<Task>,
    notifier: ChangeNotifier,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service over a ready repository and performs the initial
    /// full read.
    pub fn new(repo: R) -> RepoResult<Self> {
        let tasks = repo.list()?;
        info!(
            "event=service_init module=service status=ok tasks={}",
            tasks.len()
        );
        Ok(Self {
            repo: Some(repo),
            tasks,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Creates a service with persistence disabled.
    ///
    /// Every mutation becomes a logged no-op; the host process keeps
    /// running against an empty task set.
    pub fn detached() -> Self {
        info!("event=service_init module=service status=degraded reason=persistence_disabled");
        Self {
            repo: None,
            tasks: Vec::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Returns whether a repository is attached.
    pub fn persistence_enabled(&self) -> bool {
        self.repo.is_some()
    }

    /// Current in-memory reflection of the persisted task set.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Derives the visible subset for the given search text and filter.
    pub fn visible(&self, query: &str, filter: CompletionFilter) -> Vec<Task> {
        project(&self.tasks, query, filter)
    }

    /// Registers a subscriber that receives the full replacement snapshot
    /// after every successful mutation or refresh.
    pub fn subscribe(&mut self, subscriber: impl Fn(&[Task]) + 'static) -> SubscriptionId {
        self.notifier.subscribe(subscriber)
    }

    /// Removes a subscriber. Returns whether the handle was live.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Validates and persists a new task.
    ///
    /// Returns `Ok(Some(task))` on success, `Ok(None)` when persistence is
    /// disabled or the engine failed (logged, snapshot unchanged), and a
    /// validation error for blank titles before storage is touched.
    pub fn add_task(&mut self, title: &str) -> Result<Option<Task>, TaskValidationError> {
        validate_title(title)?;

        let inserted = match self.repo.as_ref() {
            Some(repo) => repo.insert(title),
            None => {
                info!("event=task_insert module=service status=skipped reason=persistence_disabled");
                return Ok(None);
            }
        };

        match inserted {
            Ok(task) => {
                self.reload_and_notify("task_insert");
                Ok(Some(task))
            }
            Err(RepoError::Validation(err)) => Err(err),
            Err(err) => {
                error!(
                    "event=task_insert module=service status=error error_code=task_insert_failed error={err}"
                );
                Ok(None)
            }
        }
    }

    /// Sets the completion flag of one task.
    ///
    /// Missing ids and storage failures are observational no-ops.
    pub fn set_completion(&mut self, id: TaskId, completed: bool) {
        let outcome = match self.repo.as_ref() {
            Some(repo) => repo.set_completion(id, completed),
            None => {
                info!(
                    "event=task_set_completion module=service status=skipped reason=persistence_disabled"
                );
                return;
            }
        };

        match outcome {
            Ok(()) => self.reload_and_notify("task_set_completion"),
            Err(err) => error!(
                "event=task_set_completion module=service status=error error_code=task_update_failed error={err}"
            ),
        }
    }

    /// Flips the completion flag of one task based on the current snapshot.
    ///
    /// Unknown ids leave the set unchanged.
    pub fn toggle_task(&mut self, id: TaskId) {
        let Some(task) = self.tasks.iter().find(|task| task.id == id) else {
            return;
        };
        let next = !task.completed;
        self.set_completion(id, next);
    }

    /// Deletes one task.
    ///
    /// Missing ids and storage failures are observational no-ops.
    pub fn delete_task(&mut self, id: TaskId) {
        let outcome = match self.repo.as_ref() {
            Some(repo) => repo.delete(id),
            None => {
                info!("event=task_delete module=service status=skipped reason=persistence_disabled");
                return;
            }
        };

        match outcome {
            Ok(()) => self.reload_and_notify("task_delete"),
            Err(err) => error!(
                "event=task_delete module=service status=error error_code=task_delete_failed error={err}"
            ),
        }
    }

    /// Re-reads the full task set and notifies subscribers.
    pub fn refresh(&mut self) {
        self.reload_and_notify("task_refresh");
    }

    fn reload_and_notify(&mut self, event: &'static str) {
        let listed = match self.repo.as_ref() {
            Some(repo) => repo.list(),
            None => return,
        };

        match listed {
            Ok(tasks) => {
                self.tasks = tasks;
                self.notifier.notify(&self.tasks);
                info!(
                    "event={event} module=service status=ok tasks={}",
                    self.tasks.len()
                );
            }
            Err(err) => error!(
                "event={event} module=service status=error error_code=task_reload_failed error={err}"
            ),
        }
    }
}
