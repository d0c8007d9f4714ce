//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, toggle and aggregate APIs over the `tasks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate task text before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Multi-statement operations run inside one transaction, so callers never
//!   observe a half-applied toggle/update/delete or torn aggregate counts.

use crate::db::DbError;
use crate::model::task::{NewTask, Task, TaskId, TaskUpdate, TaskValidationError};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    task,
    completed,
    created_at,
    priority
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Aggregate counts over all tasks.
///
/// `pending` is derived as `total - completed`, and the breakdown values sum
/// to `total` because both come from one read snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    /// Count per exact (case-sensitive) priority string.
    pub priority_breakdown: BTreeMap<String, u64>,
}

/// Repository interface for task operations.
pub trait TaskRepository {
    fn create_task(&self, new_task: &NewTask) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists every task, newest first.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn toggle_task(&self, id: TaskId) -> RepoResult<Task>;
    fn update_task(&self, id: TaskId, update: &TaskUpdate) -> RepoResult<Task>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn task_stats(&self) -> RepoResult<TaskStats>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection obtained from `open_db`/`open_db_in_memory`, whose
    /// schema has already been ensured.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, new_task: &NewTask) -> RepoResult<Task> {
        new_task.validate()?;

        let created_at = now_epoch_ms();
        let priority = new_task.resolved_priority();
        self.conn.execute(
            "INSERT INTO tasks (task, completed, created_at, priority)
             VALUES (?1, 0, ?2, ?3);",
            params![new_task.task.as_str(), created_at, priority],
        )?;

        Ok(Task {
            id: self.conn.last_insert_rowid(),
            task: new_task.task.clone(),
            completed: false,
            created_at,
            priority: priority.to_string(),
        })
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        select_task(self.conn, id)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn toggle_task(&self, id: TaskId) -> RepoResult<Task> {
        let tx = self.conn.unchecked_transaction()?;
        let current = select_task(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        let toggled = current.toggled();

        tx.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(toggled.completed), id],
        )?;
        tx.commit()?;

        Ok(toggled)
    }

    fn update_task(&self, id: TaskId, update: &TaskUpdate) -> RepoResult<Task> {
        let tx = self.conn.unchecked_transaction()?;
        let current = select_task(&tx, id)?.ok_or(RepoError::NotFound(id))?;
        // Missing ids win over invalid text, matching the edit-form flow.
        update.validate()?;
        let priority = update
            .priority
            .clone()
            .unwrap_or_else(|| current.priority.clone());

        tx.execute(
            "UPDATE tasks SET task = ?1, priority = ?2 WHERE id = ?3;",
            params![update.task.as_str(), priority.as_str(), id],
        )?;
        tx.commit()?;

        Ok(Task {
            task: update.task.clone(),
            priority,
            ..current
        })
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn task_stats(&self) -> RepoResult<TaskStats> {
        let tx = self.conn.unchecked_transaction()?;

        let (total, completed): (i64, i64) = tx.query_row(
            "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM tasks;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut priority_breakdown = BTreeMap::new();
        {
            let mut stmt =
                tx.prepare("SELECT priority, COUNT(*) FROM tasks GROUP BY priority;")?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let priority: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                priority_breakdown.insert(priority, count_to_u64(count)?);
            }
        }
        tx.commit()?;

        let total = count_to_u64(total)?;
        let completed = count_to_u64(completed)?;
        Ok(TaskStats {
            total,
            completed,
            pending: total - completed,
            priority_breakdown,
        })
    }
}

fn select_task(conn: &Connection, id: TaskId) -> RepoResult<Option<Task>> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_task_row(row)?));
    }

    Ok(None)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id: row.get("id")?,
        task: row.get("task")?,
        completed,
        created_at: row.get("created_at")?,
        priority: row.get("priority")?,
    };
    task.validate()?;
    Ok(task)
}

fn count_to_u64(value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative aggregate count `{value}`")))
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
