//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQL details from services.
//!
//! # Invariants
//! - Every mutating call commits before it returns.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use chrono::{DateTime, Utc};

pub mod reflection_repo;
pub mod settings_repo;

pub use reflection_repo::{RepoError, RepoResult};

/// Instants are persisted as Unix epoch milliseconds.
pub fn to_epoch_ms(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

/// Inverse of [`to_epoch_ms`]; `None` for out-of-range values.
pub fn from_epoch_ms(value: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(value)
}

pub(crate) fn table_exists(conn: &rusqlite::Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
