//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-level composition: DB location and the navigation signal.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through response envelopes, never thrown.
//! - `now` is read from the system clock here and nowhere in core.

use chrono::Utc;
use lifeweeks_core::db::open_db;
use lifeweeks_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    pending_notifications, ping as ping_inner, BirthDate,
    CachedStats, LifeService, NavigationSignal, NotificationRequest, NotificationTrigger,
    Reflection, ReflectionService, ReflectionType, RepoError, SqliteReflectionRepository,
    SqliteSettingsRepository,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const ENTRY_DB_FILE_NAME: &str = "lifeweeks.sqlite3";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static REFLECTION_NAVIGATION: NavigationSignal = NavigationSignal::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Life stats envelope for the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeStatsResponse {
    pub ok: bool,
    pub age: u32,
    pub weeks_lived: u32,
    pub weeks_remaining: u32,
    /// One fractional digit, e.g. `62.7`. May exceed `100.0`.
    pub percentage: String,
    /// Epoch milliseconds of the computation that produced these numbers.
    pub computed_at_epoch_ms: i64,
    pub message: String,
}

impl LifeStatsResponse {
    fn success(cached: CachedStats, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            age: cached.stats.age,
            weeks_lived: cached.stats.weeks_lived,
            weeks_remaining: cached.stats.weeks_remaining,
            percentage: cached.stats.percentage,
            computed_at_epoch_ms: cached.last_computed_at.timestamp_millis(),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        let defaults = lifeweeks_core::LifeStats::default();
        Self {
            ok: false,
            age: defaults.age,
            weeks_lived: defaults.weeks_lived,
            weeks_remaining: defaults.weeks_remaining,
            percentage: defaults.percentage,
            computed_at_epoch_ms: 0,
            message: message.into(),
        }
    }
}

/// One reflection row for list/detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionItem {
    pub reflection_id: String,
    pub date_epoch_ms: i64,
    /// Current display label (`Spent Well|Wasted`).
    pub kind: String,
    pub explanation: String,
}

/// Reflection list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionListResponse {
    /// Newest first.
    pub items: Vec<ReflectionItem>,
    pub message: String,
}

/// Generic action response envelope for reflection commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionActionResponse {
    pub ok: bool,
    pub reflection_id: Option<String>,
    pub message: String,
}

impl ReflectionActionResponse {
    fn success(message: impl Into<String>, reflection_id: String) -> Self {
        Self {
            ok: true,
            reflection_id: Some(reflection_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            reflection_id: None,
            message: message.into(),
        }
    }
}

/// Repeating notification the host should register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPlanItem {
    pub id: String,
    pub title: String,
    pub body: String,
    /// 1 = Sunday ... 7 = Saturday; `None` for daily triggers.
    pub weekday: Option<u32>,
    pub hour: u32,
    pub minute: u32,
    pub payload_type: Option<String>,
}

/// Stores the birth date (`yyyy-MM-dd`) and returns freshly computed stats.
///
/// # FFI contract
/// - Rejects malformed dates with `ok=false`; nothing is stored then.
#[flutter_rust_bridge::frb(sync)]
pub fn set_birth_date(birth_date: String) -> LifeStatsResponse {
    let parsed = match BirthDate::parse(birth_date.as_str()) {
        Ok(parsed) => parsed,
        Err(err) => return LifeStatsResponse::failure(format!("set_birth_date failed: {err}")),
    };
    match with_life_service(|service| service.set_birth_date(parsed, Utc::now())) {
        Ok(cached) => LifeStatsResponse::success(cached, "Birth date saved."),
        Err(err) => LifeStatsResponse::failure(format!("set_birth_date failed: {err}")),
    }
}

/// Removes the birth date; stats return to the unset state.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_birth_date() -> LifeStatsResponse {
    match with_life_service(|service| service.clear_birth_date(Utc::now())) {
        Ok(cached) => LifeStatsResponse::success(cached, "Birth date cleared."),
        Err(err) => LifeStatsResponse::failure(format!("clear_birth_date failed: {err}")),
    }
}

/// Returns the stored birth date, or `None` when unset or unreadable.
#[flutter_rust_bridge::frb(sync)]
pub fn birth_date() -> Option<String> {
    match with_life_service(|service| service.birth_date()) {
        Ok(value) => value.map(|date| date.to_string()),
        Err(err) => {
            warn!("event=ffi_birth_date module=ffi status=error error={err}");
            None
        }
    }
}

/// Returns current stats, recomputing only when the memo is a week old.
#[flutter_rust_bridge::frb(sync)]
pub fn life_stats() -> LifeStatsResponse {
    match with_life_service(|service| service.stats(Utc::now())) {
        Ok(cached) => LifeStatsResponse::success(cached, "OK"),
        Err(err) => LifeStatsResponse::failure(format!("life_stats failed: {err}")),
    }
}

/// Records a reflection dated now. Unknown `kind` labels fall back to `Spent Well`.
#[flutter_rust_bridge::frb(sync)]
pub fn reflection_create(kind: String, explanation: String) -> ReflectionActionResponse {
    let kind = ReflectionType::from_label(kind.trim());
    match with_reflection_service(|service| {
        service.create_reflection(kind, explanation, Utc::now())
    }) {
        Ok(Ok(created)) => {
            ReflectionActionResponse::success("Reflection saved.", created.id.to_string())
        }
        Ok(Err(err)) => {
            ReflectionActionResponse::failure(format!("reflection_create failed: {err}"))
        }
        Err(err) => ReflectionActionResponse::failure(format!("reflection_create failed: {err}")),
    }
}

/// Lists reflections newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn reflection_list() -> ReflectionListResponse {
    let listed = with_reflection_service(|service| service.list_reflections())
        .and_then(|result| result.map_err(|err| err.to_string()));
    match listed {
        Ok(reflections) => {
            let items = reflections
                .into_iter()
                .map(to_reflection_item)
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No reflections yet.".to_string()
            } else {
                format!("Found {} reflection(s).", items.len())
            };
            ReflectionListResponse { items, message }
        }
        Err(err) => ReflectionListResponse {
            items: Vec::new(),
            message: format!("reflection_list failed: {err}"),
        },
    }
}

/// Deletes one reflection.
///
/// # FFI contract
/// - Deleting an already-removed reflection reports `ok=true`.
#[flutter_rust_bridge::frb(sync)]
pub fn reflection_delete(reflection_id: String) -> ReflectionActionResponse {
    let id = match Uuid::parse_str(reflection_id.trim()) {
        Ok(id) => id,
        Err(_) => {
            return ReflectionActionResponse::failure(format!(
                "reflection_delete failed: invalid reflection id `{reflection_id}`"
            ))
        }
    };
    match with_reflection_service(|service| service.delete_by_id(id)) {
        Ok(Ok(())) => ReflectionActionResponse::success("Reflection deleted.", id.to_string()),
        Ok(Err(RepoError::NotFound(_))) => {
            ReflectionActionResponse::success("Reflection already removed.", id.to_string())
        }
        Ok(Err(err)) => {
            ReflectionActionResponse::failure(format!("reflection_delete failed: {err}"))
        }
        Err(err) => ReflectionActionResponse::failure(format!("reflection_delete failed: {err}")),
    }
}

/// Notifications to (re)register after permission is granted.
///
/// The weekly reminder is included only when a birth date is set.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_plans() -> Vec<NotificationPlanItem> {
    let weeks_remaining = with_life_service(|service| {
        let birth_date = service.birth_date()?;
        let stats = service.stats(Utc::now())?;
        Ok(birth_date.map(|_| stats.stats.weeks_remaining))
    })
    .unwrap_or_else(|err| {
        warn!("event=ffi_notification_plans module=ffi status=error error={err}");
        None
    });
    pending_notifications(weeks_remaining)
        .into_iter()
        .map(to_plan_item)
        .collect()
}

/// Called by the host when a notification is tapped.
///
/// Returns whether the reflection entry screen should open.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_tapped(payload_type: Option<String>) -> bool {
    REFLECTION_NAVIGATION.handle_notification_tap(payload_type.as_deref())
}

/// Consumes the pending "open reflection entry" request, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn take_reflection_navigation() -> bool {
    REFLECTION_NAVIGATION.take()
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("LIFEWEEKS_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn open_entry_db() -> Result<Connection, String> {
    open_db(resolve_entry_db_path()).map_err(|err| format!("entry DB open failed: {err}"))
}

fn with_life_service<T>(
    f: impl FnOnce(
        &mut LifeService<SqliteSettingsRepository<'_>>,
    ) -> lifeweeks_core::RepoResult<T>,
) -> Result<T, String> {
    let conn = open_entry_db()?;
    let repo = SqliteSettingsRepository::try_new(&conn)
        .map_err(|err| format!("settings repo init failed: {err}"))?;
    let mut service =
        LifeService::load(repo).map_err(|err| format!("stats cache load failed: {err}"))?;
    f(&mut service).map_err(|err| err.to_string())
}

/// Outer error: DB/repo setup failed. Inner result: the use case itself.
fn with_reflection_service<T>(
    f: impl FnOnce(
        &ReflectionService<SqliteReflectionRepository<'_>>,
    ) -> lifeweeks_core::RepoResult<T>,
) -> Result<lifeweeks_core::RepoResult<T>, String> {
    let conn = open_entry_db()?;
    let repo = SqliteReflectionRepository::try_new(&conn)
        .map_err(|err| format!("reflection repo init failed: {err}"))?;
    let service = ReflectionService::new(repo);
    Ok(f(&service))
}

fn to_reflection_item(reflection: Reflection) -> ReflectionItem {
    ReflectionItem {
        reflection_id: reflection.id.to_string(),
        date_epoch_ms: reflection.date.timestamp_millis(),
        kind: reflection.kind.label().to_string(),
        explanation: reflection.explanation,
    }
}

fn to_plan_item(request: NotificationRequest) -> NotificationPlanItem {
    let (weekday, hour, minute) = match request.trigger {
        NotificationTrigger::Weekly {
            weekday,
            hour,
            minute,
        } => (Some(weekday.number_from_sunday()), hour, minute),
        NotificationTrigger::Daily { hour, minute } => (None, hour, minute),
    };
    NotificationPlanItem {
        id: request.id.to_string(),
        title: request.title,
        body: request.body,
        weekday,
        hour,
        minute,
        payload_type: request.payload_type.map(str::to_string),
    }
}
