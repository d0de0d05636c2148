//! Memo of the last computed life stats.
//!
//! # Responsibility
//! - Decide when stats are stale enough to recompute.
//! - Load and save the memo through settings storage so cold starts can show
//!   the last numbers immediately.
//!
//! # Invariants
//! - Staleness is wall-clock time since the last computation (7 days), not a
//!   calendar week boundary. Results can lag a true weekly cadence by up to 6
//!   days.
//! - `save_to` writes every field in one commit; a partial memo is never left
//!   behind by this module.

use crate::model::life_stats::{BirthDate, CachedStats, LifeStats};
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::{from_epoch_ms, to_epoch_ms, RepoResult};
use crate::stats::date_math;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

pub const CACHED_AGE_KEY: &str = "cachedAge";
pub const CACHED_WEEKS_LIVED_KEY: &str = "cachedWeeksLived";
pub const CACHED_WEEKS_REMAINING_KEY: &str = "cachedWeeksRemaining";
pub const CACHED_PERCENTAGE_KEY: &str = "cachedPercentage";
pub const LAST_UPDATE_KEY: &str = "lastUpdateDate";

const CACHE_KEYS: [&str; 5] = [
    CACHED_AGE_KEY,
    CACHED_WEEKS_LIVED_KEY,
    CACHED_WEEKS_REMAINING_KEY,
    CACHED_PERCENTAGE_KEY,
    LAST_UPDATE_KEY,
];

/// Minimum elapsed time before cached stats are recomputed.
pub fn refresh_interval() -> Duration {
    Duration::days(7)
}

/// Last computed stats, owned by the app's composition root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifeStatsCache {
    cached: Option<CachedStats>,
}

impl LifeStatsCache {
    /// Creates an empty cache: the first `needs_update` call returns `true`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cached(cached: Option<CachedStats>) -> Self {
        Self { cached }
    }

    /// Last stored value, without recomputation.
    pub fn cached(&self) -> Option<&CachedStats> {
        self.cached.as_ref()
    }

    /// Whether `update` should run before stats are shown.
    pub fn needs_update(&self, birth_date: Option<BirthDate>, now: DateTime<Utc>) -> bool {
        let Some(cached) = self.cached.as_ref() else {
            return true;
        };
        if birth_date.is_none() && !cached.stats.is_unset() {
            return true;
        }

        let elapsed = now - cached.last_computed_at;
        elapsed >= refresh_interval()
    }

    /// Recomputes and overwrites the memo. Must run on every birth date change.
    pub fn update(&mut self, birth_date: Option<BirthDate>, now: DateTime<Utc>) -> CachedStats {
        let fresh = CachedStats {
            stats: date_math::life_stats(birth_date, now),
            last_computed_at: now,
        };
        debug!(
            "event=stats_update module=stats status=ok weeks_lived={} weeks_remaining={}",
            fresh.stats.weeks_lived, fresh.stats.weeks_remaining
        );
        self.cached = Some(fresh.clone());
        fresh
    }

    /// Reads the durable memo. Missing or malformed fields mean "never computed".
    pub fn load_from<S: SettingsRepository + ?Sized>(settings: &S) -> RepoResult<Self> {
        let mut values = Vec::with_capacity(CACHE_KEYS.len());
        for key in CACHE_KEYS {
            values.push(settings.get_setting(key)?);
        }

        let present = values.iter().filter(|value| value.is_some()).count();
        if present == 0 {
            return Ok(Self::new());
        }

        let cached = parse_cached(&values);
        if cached.is_none() {
            warn!(
                "event=stats_cache_load module=stats status=discarded fields_present={present}"
            );
        }
        Ok(Self { cached })
    }

    /// Writes the memo durably. A never-computed cache writes nothing.
    pub fn save_to<S: SettingsRepository + ?Sized>(&self, settings: &S) -> RepoResult<()> {
        let Some(cached) = self.cached.as_ref() else {
            return Ok(());
        };

        settings.set_settings(&[
            (CACHED_AGE_KEY, cached.stats.age.to_string()),
            (CACHED_WEEKS_LIVED_KEY, cached.stats.weeks_lived.to_string()),
            (
                CACHED_WEEKS_REMAINING_KEY,
                cached.stats.weeks_remaining.to_string(),
            ),
            (CACHED_PERCENTAGE_KEY, cached.stats.percentage.clone()),
            (
                LAST_UPDATE_KEY,
                to_epoch_ms(cached.last_computed_at).to_string(),
            ),
        ])
    }
}

fn parse_cached(values: &[Option<String>]) -> Option<CachedStats> {
    let [age, lived, remaining, percentage, last_update] = values else {
        return None;
    };

    let stats = LifeStats {
        age: age.as_deref()?.parse().ok()?,
        weeks_lived: lived.as_deref()?.parse().ok()?,
        weeks_remaining: remaining.as_deref()?.parse().ok()?,
        percentage: percentage.clone()?,
    };
    let last_computed_at = from_epoch_ms(last_update.as_deref()?.parse().ok()?)?;

    Some(CachedStats {
        stats,
        last_computed_at,
    })
}
