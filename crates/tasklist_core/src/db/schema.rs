//! Task table schema.
//!
//! `schema.sql` only uses `IF NOT EXISTS`, so it is applied on every open
//! and never touches existing rows.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const TASKS_TABLE_SQL: &str = include_str!("schema.sql");
const TASKS_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at DESC, id DESC);";

/// Columns every task query reads.
const TASK_COLUMNS: &[&str] = &["id", "task", "completed", "created_at", "priority"];

/// Creates the `tasks` table when missing and checks an existing one.
///
/// # Errors
/// - `IncompatibleSchema` when a pre-existing `tasks` table lacks one of the
///   columns task queries read.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(TASKS_TABLE_SQL)?;
    verify_task_columns(conn)?;
    conn.execute_batch(TASKS_INDEX_SQL)?;
    info!("event=db_schema module=db status=ok table=tasks");
    Ok(())
}

fn verify_task_columns(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('tasks');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    match TASK_COLUMNS
        .iter()
        .find(|&&column| !columns.iter().any(|name| name == column))
    {
        Some(&column) => Err(DbError::IncompatibleSchema { column }),
        None => Ok(()),
    }
}
