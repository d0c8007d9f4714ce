//! Process-wide task store handle.
//!
//! # Responsibility
//! - Own the single SQLite connection opened at startup.
//! - Expose task use-cases to concurrent callers through `&self`.
//!
//! # Invariants
//! - The schema is ensured before a `TaskStore` value exists.
//! - Calls are serialized on one connection; each call is one atomic unit and
//!   concurrent writes to the same task resolve last-write-wins.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::task::{NewTask, Task, TaskId, TaskUpdate};
use crate::repo::task_repo::{SqliteTaskRepository, TaskStats};
use crate::service::task_service::{TaskService, TaskServiceError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Mutex;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surfaced by [`TaskStore`] operations.
#[derive(Debug)]
pub enum StoreError {
    /// Opening the database or ensuring its schema failed.
    Open(DbError),
    /// A previous caller panicked while holding the connection.
    LockPoisoned,
    /// The use-case itself failed.
    Task(TaskServiceError),
}

impl StoreError {
    /// Returns the use-case error, if this is one.
    pub fn as_task_error(&self) -> Option<&TaskServiceError> {
        match self {
            Self::Task(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open task store: {err}"),
            Self::LockPoisoned => write!(f, "task store connection lock poisoned"),
            Self::Task(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::LockPoisoned => None,
            Self::Task(err) => Some(err),
        }
    }
}

impl From<TaskServiceError> for StoreError {
    fn from(value: TaskServiceError) -> Self {
        Self::Task(value)
    }
}

/// Shared, explicitly constructed task store.
///
/// Wrap in `Arc` to hand one instance to every request handler.
pub struct TaskStore {
    conn: Mutex<Connection>,
}

impl TaskStore {
    /// Opens (creating if needed) the database file and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path).map_err(StoreError::Open)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory().map_err(StoreError::Open)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn create(&self, new_task: &NewTask) -> StoreResult<Task> {
        self.with_service(|service| service.create_task(new_task))
    }

    pub fn list(&self) -> StoreResult<Vec<Task>> {
        self.with_service(|service| service.list_tasks())
    }

    pub fn get(&self, id: TaskId) -> StoreResult<Task> {
        self.with_service(|service| service.get_task(id))
    }

    pub fn toggle(&self, id: TaskId) -> StoreResult<Task> {
        self.with_service(|service| service.toggle_task(id))
    }

    pub fn update(&self, id: TaskId, update: &TaskUpdate) -> StoreResult<Task> {
        self.with_service(|service| service.update_task(id, update))
    }

    pub fn delete(&self, id: TaskId) -> StoreResult<()> {
        self.with_service(|service| service.delete_task(id))
    }

    pub fn stats(&self) -> StoreResult<TaskStats> {
        self.with_service(|service| service.task_stats())
    }

    fn with_service<T>(
        &self,
        f: impl FnOnce(&TaskService<SqliteTaskRepository<'_>>) -> Result<T, TaskServiceError>,
    ) -> StoreResult<T> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let service = TaskService::new(SqliteTaskRepository::new(&conn));
        Ok(f(&service)?)
    }
}
