use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use xmas_countdown::core::settings::keys;
use xmas_countdown::domain::ports::KeyValueStore;
use xmas_countdown::{
    CountdownApp, FileKeyValueStore, LoggingAudioBackend, MusicPlayer, OutboxScheduler,
    ReminderKind, SettingsPatch,
};

type TestApp = CountdownApp<FileKeyValueStore, OutboxScheduler, LoggingAudioBackend>;

fn at(year: i32, month: u32, day: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn build_app(temp_dir: &TempDir, permission: bool) -> TestApp {
    CountdownApp::new(
        FileKeyValueStore::new(temp_dir.path().join("settings.toml")),
        OutboxScheduler::new(temp_dir.path().join("outbox.json"), permission),
        MusicPlayer::new(LoggingAudioBackend::new()),
    )
}

#[tokio::test]
async fn test_start_with_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut app = build_app(&temp_dir, true);

    let report = app.start(at(2025, 11, 1, 8)).await;

    assert!(report.is_none(), "notifications are off by default");
    assert_eq!(app.settings().selected_year, 2025);
    assert!(app.music().is_loaded());
    assert!(!app.music().is_playing());
    assert_eq!(app.music().volume(), 0.5);
    assert!(app.scheduler().pending().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_start_schedules_reminders_when_enabled() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FileKeyValueStore::new(temp_dir.path().join("settings.toml"));
    store.set_item(keys::NOTIFICATIONS_ENABLED, "true").await?;
    store
        .set_item(keys::NOTIFICATION_ONE_DAY, "Tomorrow!")
        .await?;

    let mut app = build_app(&temp_dir, true);
    let report = app.start(at(2025, 12, 20, 8)).await.expect("permission granted");

    assert_eq!(
        report.scheduled,
        vec![ReminderKind::ThreeDays, ReminderKind::OneDay]
    );
    let pending = app.scheduler().pending().await?;
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[1].body, "Tomorrow!");
    Ok(())
}

#[tokio::test]
async fn test_permission_denied_schedules_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut app = build_app(&temp_dir, false);
    app.reload().await;

    let patch = SettingsPatch {
        notifications_enabled: Some(true),
        ..Default::default()
    };
    let report = app.save_settings(&patch, at(2025, 12, 1, 8)).await?;

    assert!(report.is_none());
    assert!(app.settings().notifications_enabled);
    assert!(app.scheduler().pending().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_auto_advance_persists_next_year() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut app = build_app(&temp_dir, true);

    app.start(at(2025, 12, 26, 0)).await;
    assert_eq!(app.settings().selected_year, 2026);

    let snapshot = app.snapshot(at(2025, 12, 26, 0));
    assert_eq!(snapshot.target_year, 2026);
    assert!(!snapshot.year_advanced());

    let mut reopened = build_app(&temp_dir, true);
    reopened.reload().await;
    assert_eq!(reopened.settings().selected_year, 2026);

    // 聖誕節當天不前進
    let other_dir = TempDir::new()?;
    let mut other = build_app(&other_dir, true);
    other.reload().await;
    assert_eq!(other.auto_advance(at(2025, 12, 25, 23)).await, None);
    Ok(())
}

#[tokio::test]
async fn test_save_settings_applies_music_side_effects() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut app = build_app(&temp_dir, true);
    app.start(at(2025, 11, 1, 8)).await;

    let patch = SettingsPatch {
        music_volume: Some(20),
        custom_music_url: Some("https://example.com/sleigh-bells.mp3".to_string()),
        ..Default::default()
    };
    app.save_settings(&patch, at(2025, 11, 1, 8)).await?;

    assert_eq!(app.music().source(), Some("https://example.com/sleigh-bells.mp3"));
    let track = app.music().backend().state();
    assert_eq!(track.url.as_deref(), Some("https://example.com/sleigh-bells.mp3"));
    assert!(track.looping);
    assert!((track.volume - 0.2).abs() < f32::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_invalid_patch_is_rejected_and_not_applied() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut app = build_app(&temp_dir, true);
    app.reload().await;

    let patch = SettingsPatch {
        snow_intensity: Some(150),
        ..Default::default()
    };
    assert!(app.save_settings(&patch, at(2025, 11, 1, 8)).await.is_err());
    assert_eq!(app.settings().snow_intensity, 50);
    Ok(())
}

#[tokio::test]
async fn test_disabling_notifications_cancels_and_resets() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut app = build_app(&temp_dir, true);
    app.reload().await;
    let now = at(2025, 12, 1, 8);

    let enable = SettingsPatch {
        notifications_enabled: Some(true),
        ..Default::default()
    };
    let report = app.save_settings(&enable, now).await?.expect("scheduled");
    assert_eq!(report.scheduled.len(), 3);

    let disable = SettingsPatch {
        notifications_enabled: Some(false),
        ..Default::default()
    };
    app.save_settings(&disable, now).await?;
    assert!(app.scheduler().pending().await?.is_empty());
    assert!(
        !app.repository()
            .has_notification_been_sent(2025, ReminderKind::OneWeek)
            .await
    );
    Ok(())
}
