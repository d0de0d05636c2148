//! Key/value settings storage.
//!
//! Holds the birth date (`userBirthday`) and the stats memo fields. Values
//! are text; callers own their encoding.

use crate::repo::{table_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key of the persisted `yyyy-MM-dd` birth date. Absent means unset.
pub const BIRTH_DATE_KEY: &str = "userBirthday";

/// Repository interface for scalar settings.
pub trait SettingsRepository {
    fn get_setting(&self, key: &str) -> RepoResult<Option<String>>;
    /// Upserts all entries in one commit.
    fn set_settings(&self, entries: &[(&str, String)]) -> RepoResult<()>;
    /// Returns whether a value was removed.
    fn remove_setting(&self, key: &str) -> RepoResult<bool>;

    fn set_setting(&self, key: &str, value: String) -> RepoResult<()> {
        self.set_settings(&[(key, value)])
    }
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "settings")? {
            return Err(RepoError::MissingRequiredTable("settings"));
        }
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn get_setting(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_settings(&self, entries: &[(&str, String)]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_setting(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM settings WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}
