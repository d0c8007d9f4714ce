//! Task use-case service.
//!
//! # Responsibility
//! - Provide create/list/get/toggle/update/delete/stats entry points.
//! - Translate repository errors into use-case errors callers can act on.
//! - Describe each result as a [`TaskOutcome`] notice, leaving presentation to
//!   the caller.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Log lines carry ids and status only, never task text.
//! - A rejected update leaves the stored record untouched and hands it back.

use crate::model::task::{NewTask, Task, TaskId, TaskUpdate, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository, TaskStats};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Task text failed validation; nothing was written.
    Validation(TaskValidationError),
    /// Target task does not exist.
    NotFound(TaskId),
    /// Update text failed validation. Carries the unchanged stored record so
    /// an edit form can be redisplayed.
    UpdateRejected {
        current: Box<Task>,
        error: TaskValidationError,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::UpdateRejected { error, .. } => write!(f, "{error}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::UpdateRejected { error, .. } => Some(error),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Transient feedback describing what an operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub kind: NoticeKind,
    pub message: String,
}

impl TaskOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn created() -> Self {
        Self::success("Task added successfully!")
    }

    /// Names the state the task was toggled into.
    pub fn toggled(task: &Task) -> Self {
        if task.completed {
            Self::success("Task completed!")
        } else {
            Self::success("Task reopened!")
        }
    }

    pub fn updated() -> Self {
        Self::success("Task updated successfully!")
    }

    pub fn deleted() -> Self {
        Self::success("Task deleted successfully!")
    }

    pub fn not_found() -> Self {
        Self::error("Task not found!")
    }

    /// Maps a failed operation to its notice.
    ///
    /// Storage failures get a generic message; details stay in the logs.
    pub fn from_error(err: &TaskServiceError) -> Self {
        match err {
            TaskServiceError::Validation(inner)
            | TaskServiceError::UpdateRejected { error: inner, .. } => {
                Self::error(inner.to_string())
            }
            TaskServiceError::NotFound(_) => Self::not_found(),
            TaskServiceError::Repo(_) => Self::error("Something went wrong. Please try again."),
        }
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one task; priority defaults to `medium`.
    pub fn create_task(&self, new_task: &NewTask) -> TaskServiceResult<Task> {
        match self.repo.create_task(new_task) {
            Ok(task) => {
                info!("event=task_create module=service status=ok id={}", task.id);
                Ok(task)
            }
            Err(err) => {
                warn!("event=task_create module=service status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Lists all tasks, newest first.
    pub fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks()?)
    }

    /// Gets one task, failing with `NotFound` when absent.
    pub fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Flips the completed flag and returns the updated record.
    pub fn toggle_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        let task = self.repo.toggle_task(id).map_err(TaskServiceError::from)?;
        info!(
            "event=task_toggle module=service status=ok id={} completed={}",
            task.id, task.completed
        );
        Ok(task)
    }

    /// Replaces text and (when given) priority of an existing task.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `UpdateRejected` carrying the stored record when text is invalid.
    pub fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskServiceResult<Task> {
        match self.repo.update_task(id, update) {
            Ok(task) => {
                info!("event=task_update module=service status=ok id={id}");
                Ok(task)
            }
            Err(RepoError::Validation(error)) => {
                warn!("event=task_update module=service status=rejected id={id}");
                let current = self.get_task(id)?;
                Err(TaskServiceError::UpdateRejected {
                    current: Box::new(current),
                    error,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Hard-deletes a task. Deleting twice yields `NotFound`.
    pub fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Returns aggregate counts read from one snapshot.
    pub fn task_stats(&self) -> TaskServiceResult<TaskStats> {
        Ok(self.repo.task_stats()?)
    }
}
