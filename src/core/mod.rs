pub mod calendar;
pub mod countdown;
pub mod music;
pub mod reminders;
pub mod settings;
pub mod themes;

pub use crate::domain::model::{AppSettings, CountdownTime, ReminderKind, SettingsPatch};
pub use crate::domain::ports::{AudioBackend, Clock, KeyValueStore, NotificationScheduler};
pub use crate::utils::error::Result;
