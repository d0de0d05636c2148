//! Notification requests and the host scheduler seam.

use chrono::Weekday;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const WEEKLY_NOTIFICATION_ID: &str = "weeklyLifeUpdateNotification";
pub const DAILY_REFLECTION_NOTIFICATION_ID: &str = "dailyReflectionNotification";
/// Payload type attached to the daily reminder so taps can be routed.
pub const DAILY_REFLECTION_PAYLOAD: &str = "dailyReflection";

const WEEKLY_TITLE: &str = "Life in Weeks";
const DAILY_TITLE: &str = "Daily Reflection";
const DAILY_BODY: &str =
    "What did you get done today? Another Day Wasted or Something Meaningful";

/// Repeating calendar trigger, in the device's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTrigger {
    Weekly {
        weekday: Weekday,
        hour: u32,
        minute: u32,
    },
    Daily {
        hour: u32,
        minute: u32,
    },
}

/// One repeating notification for the host to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Stable id; scheduling replaces any pending request with the same id.
    pub id: &'static str,
    pub title: String,
    pub body: String,
    pub trigger: NotificationTrigger,
    pub payload_type: Option<&'static str>,
}

/// Sunday 09:00 reminder with the remaining week count.
pub fn weekly_notification(weeks_remaining: u32) -> NotificationRequest {
    NotificationRequest {
        id: WEEKLY_NOTIFICATION_ID,
        title: WEEKLY_TITLE.to_string(),
        body: format!(
            "Another Week Over, A New One Just Begun: {} weeks left.",
            group_thousands(weeks_remaining)
        ),
        trigger: NotificationTrigger::Weekly {
            weekday: Weekday::Sun,
            hour: 9,
            minute: 0,
        },
        payload_type: None,
    }
}

/// Daily 20:00 reminder to write a reflection.
pub fn daily_reflection_notification() -> NotificationRequest {
    NotificationRequest {
        id: DAILY_REFLECTION_NOTIFICATION_ID,
        title: DAILY_TITLE.to_string(),
        body: DAILY_BODY.to_string(),
        trigger: NotificationTrigger::Daily { hour: 20, minute: 0 },
        payload_type: Some(DAILY_REFLECTION_PAYLOAD),
    }
}

/// Formats `1553` as `1,553`. Single fixed format, no locale lookup.
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Host-side failure while registering a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerError(pub String);

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification scheduling failed: {}", self.0)
    }
}

impl Error for SchedulerError {}

/// Reminders the app keeps registered.
///
/// The weekly reminder is only included when a birth date is configured
/// (`weeks_remaining` is `Some`). The daily reminder always comes last.
pub fn pending_notifications(weeks_remaining: Option<u32>) -> Vec<NotificationRequest> {
    let mut requests = Vec::with_capacity(2);
    if let Some(weeks_remaining) = weeks_remaining {
        requests.push(weekly_notification(weeks_remaining));
    }
    requests.push(daily_reflection_notification());
    requests
}

/// Platform notification center, implemented by the host.
pub trait NotificationScheduler {
    /// Asks for (or reports an earlier answer to) alert/badge/sound
    /// permission. Returns whether it is granted.
    fn request_permission(&mut self) -> bool;
    fn remove_pending(&mut self, id: &str);
    fn schedule(&mut self, request: NotificationRequest) -> Result<(), SchedulerError>;
}

/// Replaces the app's pending reminders with [`pending_notifications`].
///
/// Nothing is touched when permission is denied. Scheduling failures are
/// logged and skipped. Returns the number of requests registered.
pub fn schedule_all<N: NotificationScheduler + ?Sized>(
    scheduler: &mut N,
    weeks_remaining: Option<u32>,
) -> usize {
    if !scheduler.request_permission() {
        info!("event=notification_schedule module=notify status=skipped reason=permission_denied");
        return 0;
    }

    let mut scheduled = 0;
    for request in pending_notifications(weeks_remaining) {
        let id = request.id;
        scheduler.remove_pending(id);
        match scheduler.schedule(request) {
            Ok(()) => {
                scheduled += 1;
                info!("event=notification_schedule module=notify status=ok id={id}");
            }
            Err(err) => {
                warn!("event=notification_schedule module=notify status=error id={id} error={err}");
            }
        }
    }
    scheduled
}
