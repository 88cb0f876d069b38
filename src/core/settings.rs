use crate::domain::model::{
    AppSettings, ReminderKind, SettingsPatch, MAX_SELECTED_YEAR, MIN_SELECTED_YEAR,
};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{CountdownError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_optional_url, validate_range, Validate,
};
use std::str::FromStr;

pub mod keys {
    pub const SELECTED_YEAR: &str = "selectedYear";
    pub const CURRENT_THEME: &str = "currentTheme";
    pub const SNOW_INTENSITY: &str = "snowIntensity";
    pub const MUSIC_VOLUME: &str = "musicVolume";
    pub const CUSTOM_MUSIC_URL: &str = "customMusicUrl";
    pub const NOTIFICATIONS_ENABLED: &str = "notificationsEnabled";
    pub const NOTIFICATION_ONE_WEEK: &str = "notificationOneWeek";
    pub const NOTIFICATION_THREE_DAYS: &str = "notificationThreeDays";
    pub const NOTIFICATION_ONE_DAY: &str = "notificationOneDay";
    pub const LANGUAGE: &str = "language";
    pub const NOTIFICATION_SENT: &str = "notificationSent";
}

pub fn notification_sent_key(year: i32, kind: ReminderKind) -> String {
    format!("{}-{}-{}", keys::NOTIFICATION_SENT, year, kind)
}

impl SettingsPatch {
    fn check_fields(&self) -> Result<()> {
        if let Some(year) = self.selected_year {
            validate_range(keys::SELECTED_YEAR, year, MIN_SELECTED_YEAR, MAX_SELECTED_YEAR)?;
        }
        if let Some(snow) = self.snow_intensity {
            validate_range(keys::SNOW_INTENSITY, snow, 0, 100)?;
        }
        if let Some(volume) = self.music_volume {
            validate_range(keys::MUSIC_VOLUME, volume, 0, 100)?;
        }
        if let Some(theme) = &self.current_theme {
            validate_non_empty_string(keys::CURRENT_THEME, theme)?;
        }
        if let Some(language) = &self.language {
            validate_non_empty_string(keys::LANGUAGE, language)?;
        }
        if let Some(url) = &self.custom_music_url {
            validate_optional_url(keys::CUSTOM_MUSIC_URL, url)?;
        }
        Ok(())
    }
}

/// 使用者輸入的設定錯誤屬於 Input 類別，而非設定檔錯誤
impl Validate for SettingsPatch {
    fn validate(&self) -> Result<()> {
        self.check_fields()
            .map_err(|e| CountdownError::ValidationError {
                message: match e {
                    CountdownError::InvalidConfigValueError { field, value, reason } => {
                        format!("'{}' for '{}': {}", value, field, reason)
                    }
                    other => other.to_string(),
                },
            })
    }
}

/// Typed access to the app settings kept in a [`KeyValueStore`].
pub struct SettingsRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 讀取設定；任何錯誤都退回預設值
    pub async fn load(&self) -> AppSettings {
        match self.try_load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("❌ Error loading settings: {}", e);
                AppSettings::default()
            }
        }
    }

    pub async fn try_load(&self) -> Result<AppSettings> {
        let defaults = AppSettings::default();

        let selected_year = self
            .number(
                keys::SELECTED_YEAR,
                defaults.selected_year,
                MIN_SELECTED_YEAR,
                MAX_SELECTED_YEAR,
            )
            .await?;
        let snow_intensity = self
            .number(keys::SNOW_INTENSITY, defaults.snow_intensity, 0, 100)
            .await?;
        let music_volume = self
            .number(keys::MUSIC_VOLUME, defaults.music_volume, 0, 100)
            .await?;

        Ok(AppSettings {
            selected_year,
            current_theme: self.text(keys::CURRENT_THEME, defaults.current_theme).await?,
            snow_intensity,
            music_volume,
            custom_music_url: self
                .text(keys::CUSTOM_MUSIC_URL, defaults.custom_music_url)
                .await?,
            notifications_enabled: self
                .store
                .get_item(keys::NOTIFICATIONS_ENABLED)
                .await?
                .is_some_and(|value| value == "true"),
            notification_one_week: self
                .text(keys::NOTIFICATION_ONE_WEEK, defaults.notification_one_week)
                .await?,
            notification_three_days: self
                .text(keys::NOTIFICATION_THREE_DAYS, defaults.notification_three_days)
                .await?,
            notification_one_day: self
                .text(keys::NOTIFICATION_ONE_DAY, defaults.notification_one_day)
                .await?,
            language: self.text(keys::LANGUAGE, defaults.language).await?,
        })
    }

    async fn text(&self, key: &str, default: String) -> Result<String> {
        Ok(self
            .store
            .get_item(key)
            .await?
            .filter(|value| !value.is_empty())
            .unwrap_or(default))
    }

    async fn number<T>(&self, key: &str, default: T, min: T, max: T) -> Result<T>
    where
        T: FromStr + PartialOrd + Copy + std::fmt::Display,
    {
        let Some(raw) = self.store.get_item(key).await?.filter(|v| !v.is_empty()) else {
            return Ok(default);
        };

        match raw.trim().parse::<T>() {
            Ok(value) if (min..=max).contains(&value) => Ok(value),
            _ => {
                tracing::warn!(
                    "⚠️ Ignoring stored value '{}' for '{}', using {}",
                    raw,
                    key,
                    default
                );
                Ok(default)
            }
        }
    }

    /// Writes only the fields present in `patch`.
    pub async fn save(&self, patch: &SettingsPatch) -> Result<()> {
        patch.validate()?;

        if let Some(year) = patch.selected_year {
            self.store
                .set_item(keys::SELECTED_YEAR, &year.to_string())
                .await?;
        }
        if let Some(theme) = &patch.current_theme {
            self.store.set_item(keys::CURRENT_THEME, theme).await?;
        }
        if let Some(snow) = patch.snow_intensity {
            self.store
                .set_item(keys::SNOW_INTENSITY, &snow.to_string())
                .await?;
        }
        if let Some(volume) = patch.music_volume {
            self.store
                .set_item(keys::MUSIC_VOLUME, &volume.to_string())
                .await?;
        }
        if let Some(url) = &patch.custom_music_url {
            self.store.set_item(keys::CUSTOM_MUSIC_URL, url).await?;
        }
        if let Some(enabled) = patch.notifications_enabled {
            self.store
                .set_item(keys::NOTIFICATIONS_ENABLED, &enabled.to_string())
                .await?;
        }
        if let Some(message) = &patch.notification_one_week {
            self.store
                .set_item(keys::NOTIFICATION_ONE_WEEK, message)
                .await?;
        }
        if let Some(message) = &patch.notification_three_days {
            self.store
                .set_item(keys::NOTIFICATION_THREE_DAYS, message)
                .await?;
        }
        if let Some(message) = &patch.notification_one_day {
            self.store
                .set_item(keys::NOTIFICATION_ONE_DAY, message)
                .await?;
        }
        if let Some(language) = &patch.language {
            self.store.set_item(keys::LANGUAGE, language).await?;
        }

        tracing::debug!("💾 Settings saved: {:?}", patch);
        Ok(())
    }

    pub async fn has_notification_been_sent(&self, year: i32, kind: ReminderKind) -> bool {
        match self.store.get_item(&notification_sent_key(year, kind)).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!("⚠️ Could not read sent flag for {} {}: {}", year, kind, e);
                false
            }
        }
    }

    pub async fn mark_notification_as_sent(&self, year: i32, kind: ReminderKind) {
        if let Err(e) = self
            .store
            .set_item(&notification_sent_key(year, kind), "true")
            .await
        {
            tracing::error!("❌ Error marking notification as sent: {}", e);
        }
    }

    pub async fn reset_notification_flags(&self, year: i32) {
        for kind in ReminderKind::ALL {
            if let Err(e) = self
                .store
                .remove_item(&notification_sent_key(year, kind))
                .await
            {
                tracing::error!("❌ Error resetting notification flags: {}", e);
                return;
            }
        }
        tracing::info!("🔄 Reminder flags reset for {}", year);
    }
}
