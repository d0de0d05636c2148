//! Reflection use-case service.
//!
//! # Invariants
//! - No update path exists; edits are delete + create.
//! - Log events carry ids and types only, never explanation text.

use crate::model::reflection::{Reflection, ReflectionId, ReflectionType};
use crate::repo::reflection_repo::{ReflectionRepository, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use log::info;

/// Use-case service wrapper for reflection records.
pub struct ReflectionService<R: ReflectionRepository> {
    repo: R,
}

impl<R: ReflectionRepository> ReflectionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a reflection dated `now` and returns it once committed.
    pub fn create_reflection(
        &self,
        kind: ReflectionType,
        explanation: impl Into<String>,
        now: DateTime<Utc>,
    ) -> RepoResult<Reflection> {
        let reflection = Reflection::new(kind, explanation, now);
        self.repo.insert_reflection(&reflection)?;
        info!(
            "event=reflection_create module=service status=ok reflection_id={} type={}",
            reflection.id,
            reflection.kind.label()
        );
        Ok(reflection)
    }

    /// All reflections, newest first.
    pub fn list_reflections(&self) -> RepoResult<Vec<Reflection>> {
        self.repo.list_reflections()
    }

    pub fn get_reflection(&self, id: ReflectionId) -> RepoResult<Option<Reflection>> {
        self.repo.get_reflection(id)
    }

    /// Deletes exactly `reflection`.
    ///
    /// Returns `RepoError::NotFound` when it was already removed; callers
    /// whose UI already dropped the row may ignore that.
    pub fn delete_reflection(&self, reflection: &Reflection) -> RepoResult<()> {
        self.delete_by_id(reflection.id)
    }

    pub fn delete_by_id(&self, id: ReflectionId) -> RepoResult<()> {
        match self.repo.delete_reflection(id) {
            Ok(()) => {
                info!("event=reflection_delete module=service status=ok reflection_id={id}");
                Ok(())
            }
            Err(RepoError::NotFound(id)) => {
                info!("event=reflection_delete module=service status=not_found reflection_id={id}");
                Err(RepoError::NotFound(id))
            }
            Err(err) => Err(err),
        }
    }
}
