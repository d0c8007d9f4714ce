//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the task store.
//! - Ensure the `tasks` table exists with the columns the store reads.
//!
//! # Invariants
//! - A connection handed out by [`open_db`] or [`open_db_in_memory`] already
//!   carries a compatible `tasks` table; nothing checks it again afterwards.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::ensure_schema;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The database already has a `tasks` table, but not one this store can use.
    IncompatibleSchema { column: &'static str },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::IncompatibleSchema { column } => {
                write!(f, "existing `tasks` table has no `{column}` column")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::IncompatibleSchema { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
