use crate::core::calendar::{resolve_target_year, CalendarSnapshot};
use crate::core::music::MusicPlayer;
use crate::core::reminders::{ReminderService, ScheduleReport};
use crate::core::settings::SettingsRepository;
use crate::domain::model::{AppSettings, SettingsPatch};
use crate::domain::ports::{AudioBackend, KeyValueStore, NotificationScheduler};
use crate::utils::error::Result;
use chrono::NaiveDateTime;

/// Startup and settings-change flow of the countdown screen.
///
/// 持有目前的設定、音樂播放器與通知排程器；日期計算一律交給
/// `core::calendar`，這裡只負責協調副作用。
pub struct CountdownApp<S: KeyValueStore, N: NotificationScheduler, A: AudioBackend> {
    repository: SettingsRepository<S>,
    scheduler: N,
    music: MusicPlayer<A>,
    settings: AppSettings,
}

impl<S, N, A> CountdownApp<S, N, A>
where
    S: KeyValueStore,
    N: NotificationScheduler,
    A: AudioBackend,
{
    pub fn new(store: S, scheduler: N, music: MusicPlayer<A>) -> Self {
        Self {
            repository: SettingsRepository::new(store),
            scheduler,
            music,
            settings: AppSettings::default(),
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn repository(&self) -> &SettingsRepository<S> {
        &self.repository
    }

    pub fn scheduler(&self) -> &N {
        &self.scheduler
    }

    pub fn music(&self) -> &MusicPlayer<A> {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicPlayer<A> {
        &mut self.music
    }

    pub fn reminders(&self) -> ReminderService<'_, S, N> {
        ReminderService::new(&self.repository, &self.scheduler)
    }

    pub fn snapshot(&self, now: NaiveDateTime) -> CalendarSnapshot {
        CalendarSnapshot::evaluate(self.settings.selected_year, now)
    }

    /// Reloads settings from the store, falling back to defaults.
    pub async fn reload(&mut self) -> &AppSettings {
        self.settings = self.repository.load().await;
        tracing::debug!("⚙️ Loaded settings: {:?}", self.settings);
        &self.settings
    }

    /// 載入設定、初始化音樂，啟用通知時排程提醒
    pub async fn start(&mut self, now: NaiveDateTime) -> Option<ScheduleReport> {
        self.reload().await;

        let custom_url = self.settings.custom_music_url.clone();
        self.music
            .initialize(Some(custom_url.as_str()).filter(|u| !u.is_empty()))
            .await;
        self.music.set_volume(self.settings.music_volume).await;

        self.auto_advance(now).await;

        if self.settings.notifications_enabled {
            self.schedule_reminders(now).await
        } else {
            None
        }
    }

    /// Persists the next year once Dec 26 of the selected year has begun.
    pub async fn auto_advance(&mut self, now: NaiveDateTime) -> Option<i32> {
        let selected = self.settings.selected_year;
        let target = resolve_target_year(selected, now);
        if target == selected {
            return None;
        }

        self.settings.selected_year = target;
        let patch = SettingsPatch {
            selected_year: Some(target),
            ..Default::default()
        };
        if let Err(e) = self.repository.save(&patch).await {
            tracing::error!("❌ Error saving advanced year {}: {}", target, e);
        }
        tracing::info!("📅 Christmas {} has passed, now counting toward {}", selected, target);
        Some(target)
    }

    /// Saves `patch` and applies its side effects. Validation and storage
    /// errors are returned; collaborator failures are only logged.
    pub async fn save_settings(
        &mut self,
        patch: &SettingsPatch,
        now: NaiveDateTime,
    ) -> Result<Option<ScheduleReport>> {
        self.repository.save(patch).await?;
        self.settings.apply(patch);

        if let Some(volume) = patch.music_volume {
            self.music.set_volume(volume).await;
        }

        if let Some(url) = patch.custom_music_url.as_deref().filter(|u| !u.is_empty()) {
            self.music.initialize(Some(url)).await;
            self.music.set_volume(self.settings.music_volume).await;
        }

        match patch.notifications_enabled {
            Some(true) => Ok(self.schedule_reminders(now).await),
            Some(false) => {
                let reminders = self.reminders();
                reminders.cancel_all().await;
                reminders.reset(self.settings.selected_year).await;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Schedules reminders for the selected year. `None` when permission
    /// is denied.
    pub async fn schedule_reminders(&self, now: NaiveDateTime) -> Option<ScheduleReport> {
        let reminders = self.reminders();
        if !reminders.request_permission().await {
            tracing::warn!("🔕 Permission denied: notification permissions are required for reminders");
            return None;
        }

        let report = reminders
            .schedule_christmas_notifications(
                self.settings.selected_year,
                &self.settings.reminder_messages(),
                now,
            )
            .await;
        tracing::info!(
            "🔔 Reminders for {}: {} scheduled, {} already scheduled, {} failed",
            self.settings.selected_year,
            report.scheduled.len(),
            report.already_sent.len(),
            report.failed.len()
        );
        Some(report)
    }
}
