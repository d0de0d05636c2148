//! Reflection repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist, list and hard-delete reflection records.
//! - Normalize stored type labels on read.
//!
//! # Invariants
//! - Listing is `date DESC`, ties in insertion order (`seq ASC`).
//! - Type labels are written in current form only; legacy labels are mapped
//!   at read time and never rewritten in place.

use crate::db::DbError;
use crate::model::reflection::{Reflection, ReflectionId, ReflectionType};
use crate::repo::{from_epoch_ms, table_exists, to_epoch_ms};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const REFLECTION_SELECT_SQL: &str = "SELECT
    uuid,
    date,
    type,
    explanation
FROM reflections";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for settings and reflection storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(ReflectionId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "reflection not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
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

/// Repository interface for reflection records.
pub trait ReflectionRepository {
    /// Appends one record and commits.
    fn insert_reflection(&self, reflection: &Reflection) -> RepoResult<()>;
    fn get_reflection(&self, id: ReflectionId) -> RepoResult<Option<Reflection>>;
    /// All records, newest first.
    fn list_reflections(&self) -> RepoResult<Vec<Reflection>>;
    /// Removes one record and commits. `NotFound` when it is already gone.
    fn delete_reflection(&self, id: ReflectionId) -> RepoResult<()>;
}

/// SQLite-backed reflection repository.
pub struct SqliteReflectionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReflectionRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "reflections")? {
            return Err(RepoError::MissingRequiredTable("reflections"));
        }
        Ok(Self { conn })
    }
}

impl ReflectionRepository for SqliteReflectionRepository<'_> {
    fn insert_reflection(&self, reflection: &Reflection) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO reflections (uuid, date, type, explanation)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                reflection.id.to_string(),
                to_epoch_ms(reflection.date),
                reflection.kind.label(),
                reflection.explanation.as_str(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_reflection(&self, id: ReflectionId) -> RepoResult<Option<Reflection>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REFLECTION_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reflection_row(row)?));
        }
        Ok(None)
    }

    fn list_reflections(&self) -> RepoResult<Vec<Reflection>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REFLECTION_SELECT_SQL} ORDER BY date DESC, seq ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut reflections = Vec::new();
        while let Some(row) = rows.next()? {
            reflections.push(parse_reflection_row(row)?);
        }
        Ok(reflections)
    }

    fn delete_reflection(&self, id: ReflectionId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "DELETE FROM reflections WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_reflection_row(row: &Row<'_>) -> RepoResult<Reflection> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in reflections.uuid"
        ))
    })?;

    let date_ms: i64 = row.get("date")?;
    let date = from_epoch_ms(date_ms).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "out of range timestamp `{date_ms}` in reflections.date"
        ))
    })?;

    let label: String = row.get("type")?;
    let kind = ReflectionType::parse_label(&label).unwrap_or_else(|| {
        debug!(
            "event=reflection_read module=repo status=fallback field=type reflection_id={id}"
        );
        ReflectionType::default()
    });

    Ok(Reflection {
        id,
        date,
        kind,
        explanation: row.get("explanation")?,
    })
}
