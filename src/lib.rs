pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    FileKeyValueStore, FixedClock, LoggingAudioBackend, MemoryKeyValueStore, OutboxScheduler,
    SystemClock,
};
pub use app::CountdownApp;
pub use config::TomlConfig;
pub use core::calendar::{CalendarEngine, CalendarSnapshot};
pub use core::countdown::CountdownTicker;
pub use core::music::MusicPlayer;
pub use domain::model::{AppSettings, CountdownTime, ReminderKind, SettingsPatch};
pub use utils::error::{CountdownError, Result};
