//! Core domain logic for Life in Weeks.
//!
//! Computes life statistics from a birth date, memoizes them durably and
//! manages daily reflection records. UI hosts reach this crate through
//! `lifeweeks_ffi`.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod stats;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::life_stats::{BirthDate, BirthDateError, CachedStats, LifeStats, TOTAL_LIFE_WEEKS};
pub use model::reflection::{Reflection, ReflectionId, ReflectionType};
pub use notify::plan::{
    daily_reflection_notification, pending_notifications, schedule_all, weekly_notification,
    NotificationRequest, NotificationScheduler, NotificationTrigger, SchedulerError,
};
pub use notify::signal::NavigationSignal;
pub use repo::reflection_repo::{
    ReflectionRepository, RepoError, RepoResult, SqliteReflectionRepository,
};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use service::life_service::LifeService;
pub use service::reflection_service::ReflectionService;
pub use stats::cache::LifeStatsCache;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
