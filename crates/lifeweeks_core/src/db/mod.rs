//! The single SQLite file behind the birth-date setting, the stats cache and
//! the reflection log.
//!
//! Callers get a [`rusqlite::Connection`] from [`open_db`] (or
//! [`open_db_in_memory`] in tests) with the schema already current; the
//! repositories in [`crate::repo`] never create tables themselves.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the app database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A migration step failed; its transaction was rolled back and the
    /// file keeps its previous `user_version`.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer app build. It is left untouched.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Whether retrying with this build can never succeed.
    pub fn needs_app_update(&self) -> bool {
        matches!(self, Self::SchemaTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::Migration { version, source } => {
                write!(f, "schema migration v{version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "life-in-weeks data uses schema v{found}, this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
