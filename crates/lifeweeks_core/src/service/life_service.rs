//! Birth date and life stats use-case service.
//!
//! # Responsibility
//! - Own the `LifeStatsCache` for the running app.
//! - Persist the birth date and keep the memo consistent with it.
//!
//! # Invariants
//! - Every birth date change recomputes and saves the memo, regardless of
//!   staleness.
//! - An unparseable stored birth date behaves as unset.

use crate::model::life_stats::{BirthDate, CachedStats};
use crate::repo::settings_repo::{SettingsRepository, BIRTH_DATE_KEY};
use crate::repo::RepoResult;
use crate::stats::cache::LifeStatsCache;
use chrono::{DateTime, Utc};
use log::{info, warn};

/// Service facade over settings storage and the stats memo.
pub struct LifeService<S: SettingsRepository> {
    settings: S,
    cache: LifeStatsCache,
}

impl<S: SettingsRepository> LifeService<S> {
    /// Creates a service and loads the durable memo from `settings`.
    pub fn load(settings: S) -> RepoResult<Self> {
        let cache = LifeStatsCache::load_from(&settings)?;
        Ok(Self { settings, cache })
    }

    pub fn cache(&self) -> &LifeStatsCache {
        &self.cache
    }

    /// Reads the configured birth date.
    pub fn birth_date(&self) -> RepoResult<Option<BirthDate>> {
        let raw = self.settings.get_setting(BIRTH_DATE_KEY)?;
        let parsed = BirthDate::parse_lenient(raw.as_deref());
        if raw.is_some() && parsed.is_none() {
            warn!("event=birth_date_read module=service status=degraded reason=unparseable");
        }
        Ok(parsed)
    }

    /// Stores a new birth date and recomputes stats for it.
    pub fn set_birth_date(
        &mut self,
        birth_date: BirthDate,
        now: DateTime<Utc>,
    ) -> RepoResult<CachedStats> {
        self.settings
            .set_setting(BIRTH_DATE_KEY, birth_date.to_string())?;
        info!("event=birth_date_set module=service status=ok");
        self.refresh(Some(birth_date), now)
    }

    /// Removes the birth date; stats fall back to the unset state.
    pub fn clear_birth_date(&mut self, now: DateTime<Utc>) -> RepoResult<CachedStats> {
        let removed = self.settings.remove_setting(BIRTH_DATE_KEY)?;
        info!("event=birth_date_clear module=service status=ok removed={removed}");
        self.refresh(None, now)
    }

    /// Returns current stats, recomputing first only when the memo is stale.
    pub fn stats(&mut self, now: DateTime<Utc>) -> RepoResult<CachedStats> {
        let birth_date = self.birth_date()?;
        if let Some(cached) = self.cache.cached() {
            if !self.cache.needs_update(birth_date, now) {
                return Ok(cached.clone());
            }
        }
        self.refresh(birth_date, now)
    }

    fn refresh(
        &mut self,
        birth_date: Option<BirthDate>,
        now: DateTime<Utc>,
    ) -> RepoResult<CachedStats> {
        let fresh = self.cache.update(birth_date, now);
        self.cache.save_to(&self.settings)?;
        info!(
            "event=stats_refresh module=service status=ok birth_date_set={}",
            birth_date.is_some()
        );
        Ok(fresh)
    }
}
