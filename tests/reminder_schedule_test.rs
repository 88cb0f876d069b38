use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Mutex;
use xmas_countdown::core::reminders::{reminder_identifier, ReminderService, REMINDER_TITLE};
use xmas_countdown::core::settings::SettingsRepository;
use xmas_countdown::domain::model::{ReminderMessages, ScheduledNotification};
use xmas_countdown::domain::ports::NotificationScheduler;
use xmas_countdown::{CountdownError, MemoryKeyValueStore, ReminderKind};

#[derive(Default)]
struct RecordingScheduler {
    scheduled: Mutex<Vec<ScheduledNotification>>,
    fail_on: Option<&'static str>,
    cancelled: Mutex<u32>,
}

impl RecordingScheduler {
    fn failing_on(identifier: &'static str) -> Self {
        Self {
            fail_on: Some(identifier),
            ..Default::default()
        }
    }

    fn identifiers(&self) -> Vec<String> {
        self.scheduled
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.identifier.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationScheduler for RecordingScheduler {
    async fn request_permission(&self) -> xmas_countdown::Result<bool> {
        Ok(true)
    }

    async fn schedule(&self, notification: ScheduledNotification) -> xmas_countdown::Result<()> {
        if self.fail_on == Some(notification.identifier.as_str()) {
            return Err(CountdownError::NotificationError {
                message: "scheduler offline".to_string(),
            });
        }
        self.scheduled.lock().unwrap().push(notification);
        Ok(())
    }

    async fn cancel_all(&self) -> xmas_countdown::Result<()> {
        self.scheduled.lock().unwrap().clear();
        *self.cancelled.lock().unwrap() += 1;
        Ok(())
    }
}

fn at(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, month, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_schedules_all_three_reminders_once() -> Result<()> {
    let settings = SettingsRepository::new(MemoryKeyValueStore::new());
    let scheduler = RecordingScheduler::default();
    let service = ReminderService::new(&settings, &scheduler);
    let messages = ReminderMessages::default();

    let report = service
        .schedule_christmas_notifications(2025, &messages, at(11, 30))
        .await;
    assert_eq!(report.scheduled, ReminderKind::ALL.to_vec());
    assert!(report.already_sent.is_empty());

    let scheduled = scheduler.scheduled.lock().unwrap().clone();
    assert_eq!(scheduled.len(), 3);
    assert_eq!(scheduled[0].identifier, "christmas-2025-oneWeek");
    assert_eq!(scheduled[0].title, REMINDER_TITLE);
    assert_eq!(scheduled[0].body, messages.one_week);
    assert_eq!(scheduled[1].trigger.to_string(), "2025-12-22 00:00:00");

    for kind in ReminderKind::ALL {
        assert!(settings.has_notification_been_sent(2025, kind).await);
    }

    // 第二次執行不會重複排程
    let report = service
        .schedule_christmas_notifications(2025, &messages, at(12, 1))
        .await;
    assert!(report.scheduled.is_empty());
    assert_eq!(report.already_sent, ReminderKind::ALL.to_vec());
    assert_eq!(scheduler.identifiers().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_past_triggers_are_not_scheduled() -> Result<()> {
    let settings = SettingsRepository::new(MemoryKeyValueStore::new());
    let scheduler = RecordingScheduler::default();
    let service = ReminderService::new(&settings, &scheduler);

    let report = service
        .schedule_christmas_notifications(2025, &ReminderMessages::default(), at(12, 20))
        .await;

    assert_eq!(
        report.scheduled,
        vec![ReminderKind::ThreeDays, ReminderKind::OneDay]
    );
    assert!(!settings.has_notification_been_sent(2025, ReminderKind::OneWeek).await);
    Ok(())
}

#[tokio::test]
async fn test_failed_schedule_leaves_flag_unset() -> Result<()> {
    let settings = SettingsRepository::new(MemoryKeyValueStore::new());
    let failing_id = "christmas-2025-threeDays";
    assert_eq!(reminder_identifier(2025, ReminderKind::ThreeDays), failing_id);
    let scheduler = RecordingScheduler::failing_on(failing_id);
    let service = ReminderService::new(&settings, &scheduler);

    let report = service
        .schedule_christmas_notifications(2025, &ReminderMessages::default(), at(12, 1))
        .await;

    assert_eq!(report.failed, vec![ReminderKind::ThreeDays]);
    assert_eq!(
        report.scheduled,
        vec![ReminderKind::OneWeek, ReminderKind::OneDay]
    );
    assert!(!settings.has_notification_been_sent(2025, ReminderKind::ThreeDays).await);
    Ok(())
}

#[tokio::test]
async fn test_reset_allows_rescheduling() -> Result<()> {
    let settings = SettingsRepository::new(MemoryKeyValueStore::new());
    let scheduler = RecordingScheduler::default();
    let service = ReminderService::new(&settings, &scheduler);
    let messages = ReminderMessages {
        one_week: "a".to_string(),
        three_days: "b".to_string(),
        one_day: "c".to_string(),
    };

    service
        .schedule_christmas_notifications(2025, &messages, at(12, 1))
        .await;
    service.cancel_all().await;
    service.reset(2025).await;
    assert_eq!(*scheduler.cancelled.lock().unwrap(), 1);

    let report = service
        .schedule_christmas_notifications(2025, &messages, at(12, 1))
        .await;
    assert_eq!(report.scheduled.len(), 3);
    let bodies: Vec<_> = scheduler
        .scheduled
        .lock()
        .unwrap()
        .iter()
        .map(|n| n.body.clone())
        .collect();
    assert_eq!(bodies, vec!["a", "b", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_flags_are_per_year() -> Result<()> {
    let settings = SettingsRepository::new(MemoryKeyValueStore::new());
    settings
        .mark_notification_as_sent(2025, ReminderKind::OneDay)
        .await;

    assert!(settings.has_notification_been_sent(2025, ReminderKind::OneDay).await);
    assert!(!settings.has_notification_been_sent(2026, ReminderKind::OneDay).await);
    assert!(!settings.has_notification_been_sent(2025, ReminderKind::OneWeek).await);
    Ok(())
}
