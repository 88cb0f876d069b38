use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_MINUTE: u64 = 60;

/// 距離聖誕節的剩餘時間，每次查詢都重新計算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountdownTime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub total_seconds: u64,
}

impl CountdownTime {
    pub const ZERO: CountdownTime = CountdownTime {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        total_seconds: 0,
    };

    pub fn from_total_seconds(total_seconds: u64) -> Self {
        Self {
            days: total_seconds / SECONDS_PER_DAY,
            hours: (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total_seconds % SECONDS_PER_MINUTE,
            total_seconds,
        }
    }

    /// Rebuilds the total from the four components.
    pub fn recomposed_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds == 0
    }
}

impl fmt::Display for CountdownTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderKind {
    OneWeek,
    ThreeDays,
    OneDay,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 3] = [
        ReminderKind::OneWeek,
        ReminderKind::ThreeDays,
        ReminderKind::OneDay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::OneWeek => "oneWeek",
            ReminderKind::ThreeDays => "threeDays",
            ReminderKind::OneDay => "oneDay",
        }
    }

    pub fn days_before(&self) -> i64 {
        match self {
            ReminderKind::OneWeek => 7,
            ReminderKind::ThreeDays => 3,
            ReminderKind::OneDay => 1,
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReminderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown reminder kind: {}", s))
    }
}

pub const DEFAULT_SELECTED_YEAR: i32 = 2025;
/// 可選年份範圍，chrono 可完整表示其中每一年的聖誕節與隔年
pub const MIN_SELECTED_YEAR: i32 = 1;
pub const MAX_SELECTED_YEAR: i32 = 9999;
pub const DEFAULT_THEME: &str = "classic";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_ONE_WEEK_MESSAGE: &str = "🎄 Only 1 week until Christmas!";
pub const DEFAULT_THREE_DAYS_MESSAGE: &str = "🎅 Just 3 days left until Christmas!";
pub const DEFAULT_ONE_DAY_MESSAGE: &str = "🎁 Christmas is tomorrow!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub selected_year: i32,
    pub current_theme: String,
    pub snow_intensity: u8,
    pub music_volume: u8,
    pub custom_music_url: String,
    pub notifications_enabled: bool,
    pub notification_one_week: String,
    pub notification_three_days: String,
    pub notification_one_day: String,
    pub language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            selected_year: DEFAULT_SELECTED_YEAR,
            current_theme: DEFAULT_THEME.to_string(),
            snow_intensity: 50,
            music_volume: 50,
            custom_music_url: String::new(),
            notifications_enabled: false,
            notification_one_week: DEFAULT_ONE_WEEK_MESSAGE.to_string(),
            notification_three_days: DEFAULT_THREE_DAYS_MESSAGE.to_string(),
            notification_one_day: DEFAULT_ONE_DAY_MESSAGE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl AppSettings {
    pub fn reminder_messages(&self) -> ReminderMessages {
        ReminderMessages {
            one_week: self.notification_one_week.clone(),
            three_days: self.notification_three_days.clone(),
            one_day: self.notification_one_day.clone(),
        }
    }

    /// 合併部分更新
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(year) = patch.selected_year {
            self.selected_year = year;
        }
        if let Some(theme) = &patch.current_theme {
            self.current_theme = theme.clone();
        }
        if let Some(snow) = patch.snow_intensity {
            self.snow_intensity = snow;
        }
        if let Some(volume) = patch.music_volume {
            self.music_volume = volume;
        }
        if let Some(url) = &patch.custom_music_url {
            self.custom_music_url = url.clone();
        }
        if let Some(enabled) = patch.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(message) = &patch.notification_one_week {
            self.notification_one_week = message.clone();
        }
        if let Some(message) = &patch.notification_three_days {
            self.notification_three_days = message.clone();
        }
        if let Some(message) = &patch.notification_one_day {
            self.notification_one_day = message.clone();
        }
        if let Some(language) = &patch.language {
            self.language = language.clone();
        }
    }
}

/// Partial settings update; only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub selected_year: Option<i32>,
    pub current_theme: Option<String>,
    pub snow_intensity: Option<u8>,
    pub music_volume: Option<u8>,
    pub custom_music_url: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub notification_one_week: Option<String>,
    pub notification_three_days: Option<String>,
    pub notification_one_day: Option<String>,
    pub language: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderMessages {
    pub one_week: String,
    pub three_days: String,
    pub one_day: String,
}

impl ReminderMessages {
    pub fn message_for(&self, kind: ReminderKind) -> &str {
        match kind {
            ReminderKind::OneWeek => &self.one_week,
            ReminderKind::ThreeDays => &self.three_days,
            ReminderKind::OneDay => &self.one_day,
        }
    }
}

impl Default for ReminderMessages {
    fn default() -> Self {
        AppSettings::default().reminder_messages()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub trigger: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub start_color: &'static str,
    pub end_color: &'static str,
    pub card_color: &'static str,
    pub sparkle_color: &'static str,
}
