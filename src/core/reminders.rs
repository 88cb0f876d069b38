use crate::core::calendar::reminder_trigger;
use crate::core::settings::SettingsRepository;
use crate::domain::model::{ReminderKind, ReminderMessages, ScheduledNotification};
use crate::domain::ports::{KeyValueStore, NotificationScheduler};
use chrono::NaiveDateTime;

pub const REMINDER_TITLE: &str = "Christmas Countdown";

pub fn reminder_identifier(year: i32, kind: ReminderKind) -> String {
    format!("christmas-{}-{}", year, kind)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedReminder {
    pub kind: ReminderKind,
    pub notification: ScheduledNotification,
}

/// 只保留觸發時間仍在未來的提醒，順序為一週、三天、一天
pub fn plan_reminders(
    year: i32,
    now: NaiveDateTime,
    messages: &ReminderMessages,
) -> Vec<PlannedReminder> {
    ReminderKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let trigger = reminder_trigger(year, kind)?;
            (trigger > now).then(|| PlannedReminder {
                kind,
                notification: ScheduledNotification {
                    identifier: reminder_identifier(year, kind),
                    title: REMINDER_TITLE.to_string(),
                    body: messages.message_for(kind).to_string(),
                    trigger,
                },
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    pub scheduled: Vec<ReminderKind>,
    pub already_sent: Vec<ReminderKind>,
    pub failed: Vec<ReminderKind>,
}

impl ScheduleReport {
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty() && self.already_sent.is_empty() && self.failed.is_empty()
    }
}

pub struct ReminderService<'a, S: KeyValueStore, N: NotificationScheduler + ?Sized> {
    settings: &'a SettingsRepository<S>,
    scheduler: &'a N,
}

impl<'a, S: KeyValueStore, N: NotificationScheduler + ?Sized> ReminderService<'a, S, N> {
    pub fn new(settings: &'a SettingsRepository<S>, scheduler: &'a N) -> Self {
        Self {
            settings,
            scheduler,
        }
    }

    /// Asks the host for permission; failures count as "denied".
    pub async fn request_permission(&self) -> bool {
        match self.scheduler.request_permission().await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::error!("❌ Error requesting notification permissions: {}", e);
                false
            }
        }
    }

    pub async fn schedule_christmas_notifications(
        &self,
        year: i32,
        messages: &ReminderMessages,
        now: NaiveDateTime,
    ) -> ScheduleReport {
        let mut report = ScheduleReport::default();

        for planned in plan_reminders(year, now, messages) {
            if self
                .settings
                .has_notification_been_sent(year, planned.kind)
                .await
            {
                tracing::debug!("⏭️ Reminder {} for {} already scheduled", planned.kind, year);
                report.already_sent.push(planned.kind);
                continue;
            }

            match self.scheduler.schedule(planned.notification).await {
                Ok(()) => {
                    self.settings
                        .mark_notification_as_sent(year, planned.kind)
                        .await;
                    report.scheduled.push(planned.kind);
                }
                Err(e) => {
                    // 旗標保持未設定，下次啟動會重試
                    tracing::error!("❌ Error scheduling notification {}: {}", planned.kind, e);
                    report.failed.push(planned.kind);
                }
            }
        }

        report
    }

    pub async fn cancel_all(&self) {
        if let Err(e) = self.scheduler.cancel_all().await {
            tracing::error!("❌ Error canceling notifications: {}", e);
        }
    }

    pub async fn reset(&self, year: i32) {
        self.settings.reset_notification_flags(year).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(month: u32, day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_plan_includes_all_future_reminders() {
        let plan = plan_reminders(2025, at(12, 1, 0), &ReminderMessages::default());
        let kinds: Vec<_> = plan.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, ReminderKind::ALL.to_vec());
        assert_eq!(plan[0].notification.identifier, "christmas-2025-oneWeek");
        assert_eq!(plan[0].notification.title, REMINDER_TITLE);
        assert_eq!(plan[2].notification.body, "🎁 Christmas is tomorrow!");
    }

    #[test]
    fn test_plan_skips_past_and_current_triggers() {
        // 三天前提醒的觸發時間正好是 12/22 00:00，不算未來
        let plan = plan_reminders(2025, at(12, 22, 0), &ReminderMessages::default());
        let kinds: Vec<_> = plan.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![ReminderKind::OneDay]);

        assert!(plan_reminders(2025, at(12, 24, 1), &ReminderMessages::default()).is_empty());
    }
}
