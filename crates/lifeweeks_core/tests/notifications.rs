use chrono::Weekday;
use lifeweeks_core::notify::plan::{
    DAILY_REFLECTION_NOTIFICATION_ID, DAILY_REFLECTION_PAYLOAD, WEEKLY_NOTIFICATION_ID,
};
use lifeweeks_core::{
    daily_reflection_notification, pending_notifications, schedule_all, weekly_notification,
    NavigationSignal, NotificationRequest, NotificationScheduler, NotificationTrigger,
    SchedulerError,
};

struct RecordingScheduler {
    granted: bool,
    permission_requests: usize,
    removed: Vec<String>,
    scheduled: Vec<NotificationRequest>,
    fail_ids: Vec<&'static str>,
}

impl Default for RecordingScheduler {
    fn default() -> Self {
        Self {
            granted: true,
            permission_requests: 0,
            removed: Vec::new(),
            scheduled: Vec::new(),
            fail_ids: Vec::new(),
        }
    }
}

impl NotificationScheduler for RecordingScheduler {
    fn request_permission(&mut self) -> bool {
        self.permission_requests += 1;
        self.granted
    }

    fn remove_pending(&mut self, id: &str) {
        self.removed.push(id.to_string());
    }

    fn schedule(&mut self, request: NotificationRequest) -> Result<(), SchedulerError> {
        if self.fail_ids.contains(&request.id) {
            return Err(SchedulerError("denied".to_string()));
        }
        self.scheduled.push(request);
        Ok(())
    }
}

#[test]
fn weekly_notification_reports_grouped_weeks_left_on_sunday_morning() {
    let request = weekly_notification(1553);
    assert_eq!(request.id, WEEKLY_NOTIFICATION_ID);
    assert_eq!(request.title, "Life in Weeks");
    assert_eq!(
        request.body,
        "Another Week Over, A New One Just Begun: 1,553 weeks left."
    );
    assert_eq!(
        request.trigger,
        NotificationTrigger::Weekly {
            weekday: Weekday::Sun,
            hour: 9,
            minute: 0,
        }
    );
    assert_eq!(request.payload_type, None);
}

#[test]
fn daily_notification_fires_at_eight_pm_with_payload() {
    let request = daily_reflection_notification();
    assert_eq!(request.id, DAILY_REFLECTION_NOTIFICATION_ID);
    assert_eq!(request.trigger, NotificationTrigger::Daily { hour: 20, minute: 0 });
    assert_eq!(request.payload_type, Some(DAILY_REFLECTION_PAYLOAD));
}

#[test]
fn pending_notifications_include_weekly_only_with_birth_date() {
    let with_birth_date: Vec<_> = pending_notifications(Some(1553))
        .into_iter()
        .map(|request| request.id)
        .collect();
    assert_eq!(
        with_birth_date,
        vec![WEEKLY_NOTIFICATION_ID, DAILY_REFLECTION_NOTIFICATION_ID]
    );

    let without: Vec<_> = pending_notifications(None)
        .into_iter()
        .map(|request| request.id)
        .collect();
    assert_eq!(without, vec![DAILY_REFLECTION_NOTIFICATION_ID]);
}

#[test]
fn schedule_all_does_nothing_without_permission() {
    let mut scheduler = RecordingScheduler {
        granted: false,
        ..RecordingScheduler::default()
    };
    assert_eq!(schedule_all(&mut scheduler, Some(1553)), 0);
    assert_eq!(scheduler.permission_requests, 1);
    assert!(scheduler.removed.is_empty());
    assert!(scheduler.scheduled.is_empty());
}

#[test]
fn schedule_all_replaces_pending_requests() {
    let mut scheduler = RecordingScheduler::default();
    assert_eq!(schedule_all(&mut scheduler, Some(1553)), 2);
    assert_eq!(scheduler.permission_requests, 1);
    assert_eq!(
        scheduler.removed,
        vec![WEEKLY_NOTIFICATION_ID, DAILY_REFLECTION_NOTIFICATION_ID]
    );
    assert_eq!(scheduler.scheduled.len(), 2);
}

#[test]
fn schedule_all_skips_weekly_without_birth_date() {
    let mut scheduler = RecordingScheduler::default();
    assert_eq!(schedule_all(&mut scheduler, None), 1);
    assert_eq!(scheduler.scheduled[0].id, DAILY_REFLECTION_NOTIFICATION_ID);
}

#[test]
fn schedule_all_continues_after_a_failure() {
    let mut scheduler = RecordingScheduler {
        fail_ids: vec![WEEKLY_NOTIFICATION_ID],
        ..RecordingScheduler::default()
    };
    assert_eq!(schedule_all(&mut scheduler, Some(10)), 1);
    assert_eq!(scheduler.scheduled[0].id, DAILY_REFLECTION_NOTIFICATION_ID);
}

#[test]
fn navigation_signal_is_consumed_once() {
    let signal = NavigationSignal::new();
    assert!(!signal.take());

    assert!(!signal.handle_notification_tap(None));
    assert!(!signal.handle_notification_tap(Some("weekly")));
    assert!(!signal.is_pending());

    assert!(signal.handle_notification_tap(Some(DAILY_REFLECTION_PAYLOAD)));
    assert!(signal.is_pending());
    assert!(signal.take());
    assert!(!signal.take());
}
