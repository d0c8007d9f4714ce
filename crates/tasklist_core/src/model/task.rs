//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by core.
//! - Own text validation shared by create and update paths.
//!
//! # Invariants
//! - `id` is assigned by storage, never reused and never changed.
//! - `task` holds 1..=200 Unicode scalar values for every stored record.
//! - `created_at` is set once at creation and never modified.
//! - `priority` is a free-form label; no closed set is enforced.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned task identifier.
pub type TaskId = i64;

/// Maximum task text length, counted in Unicode scalar values.
pub const MAX_TASK_CHARS: usize = 200;

/// Priority applied when a caller does not provide one.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Canonical task record.
///
/// Field names double as the external JSON schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub task: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub priority: String,
}

impl Task {
    /// Returns a copy with `completed` flipped and every other field kept.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Re-checks text invariants for a record loaded from storage.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_task_text(&self.task)
    }
}

/// Write model for task creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub task: String,
    /// `None` resolves to [`DEFAULT_PRIORITY`].
    pub priority: Option<String>,
}

impl NewTask {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_task_text(&self.task)
    }

    /// Priority value that will be persisted.
    pub fn resolved_priority(&self) -> &str {
        self.priority.as_deref().unwrap_or(DEFAULT_PRIORITY)
    }
}

/// Write model for task edits.
///
/// `priority = None` keeps the stored priority.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskUpdate {
    pub task: String,
    pub priority: Option<String>,
}

impl TaskUpdate {
    pub fn new(task: impl Into<String>, priority: Option<String>) -> Self {
        Self {
            task: task.into(),
            priority,
        }
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_task_text(&self.task)
    }
}

/// Validation failures for task text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is missing or the empty string.
    Empty,
    /// Text exceeds [`MAX_TASK_CHARS`].
    TooLong { max: usize, actual: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Task cannot be empty!"),
            Self::TooLong { max, .. } => {
                write!(f, "Task is too long! Maximum {max} characters.")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Checks task text against the length contract.
///
/// Whitespace is not trimmed: `"  "` is accepted as a task.
pub fn validate_task_text(text: &str) -> Result<(), TaskValidationError> {
    if text.is_empty() {
        return Err(TaskValidationError::Empty);
    }

    let actual = text.chars().count();
    if actual > MAX_TASK_CHARS {
        return Err(TaskValidationError::TooLong {
            max: MAX_TASK_CHARS,
            actual,
        });
    }

    Ok(())
}
