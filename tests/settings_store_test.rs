use anyhow::Result;
use tempfile::TempDir;
use xmas_countdown::core::settings::{keys, notification_sent_key, SettingsRepository};
use xmas_countdown::domain::ports::KeyValueStore;
use xmas_countdown::utils::error::ErrorSeverity;
use xmas_countdown::{AppSettings, CountdownError, FileKeyValueStore, ReminderKind, SettingsPatch};

#[tokio::test]
async fn test_settings_survive_reopening_the_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("settings.toml");

    let repository = SettingsRepository::new(FileKeyValueStore::new(&path));
    let patch = SettingsPatch {
        selected_year: Some(2027),
        current_theme: Some("aurora".to_string()),
        snow_intensity: Some(90),
        notifications_enabled: Some(true),
        notification_one_week: Some("Seven sleeps!".to_string()),
        ..Default::default()
    };
    repository.save(&patch).await?;

    let reopened = SettingsRepository::new(FileKeyValueStore::new(&path));
    let settings = reopened.load().await;

    let mut expected = AppSettings::default();
    expected.apply(&patch);
    assert_eq!(settings, expected);
    assert_eq!(settings.music_volume, 50);
    Ok(())
}

#[tokio::test]
async fn test_only_present_fields_are_written() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FileKeyValueStore::new(temp_dir.path().join("settings.toml"));
    let repository = SettingsRepository::new(store);

    repository
        .save(&SettingsPatch {
            language: Some("fr".to_string()),
            ..Default::default()
        })
        .await?;

    let store = repository.store();
    assert_eq!(store.get_item(keys::LANGUAGE).await?.as_deref(), Some("fr"));
    assert_eq!(store.get_item(keys::SELECTED_YEAR).await?, None);
    assert_eq!(store.get_item(keys::MUSIC_VOLUME).await?, None);
    Ok(())
}

#[tokio::test]
async fn test_empty_strings_fall_back_to_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FileKeyValueStore::new(temp_dir.path().join("settings.toml"));
    store.set_item(keys::CURRENT_THEME, "").await?;
    store.set_item(keys::NOTIFICATION_ONE_DAY, "").await?;

    let settings = SettingsRepository::new(store).load().await;
    assert_eq!(settings.current_theme, "classic");
    assert_eq!(settings.notification_one_day, "🎁 Christmas is tomorrow!");
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_loads_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(&path, "selectedYear = [")?;

    let repository = SettingsRepository::new(FileKeyValueStore::new(&path));
    assert!(repository.try_load().await.is_err());
    assert_eq!(repository.load().await, AppSettings::default());
    // 讀取失敗時視為尚未送出
    assert!(!repository
        .has_notification_been_sent(2025, ReminderKind::OneWeek)
        .await);
    Ok(())
}

#[tokio::test]
async fn test_sent_flags_are_stored_under_year_and_kind() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("settings.toml");
    let repository = SettingsRepository::new(FileKeyValueStore::new(&path));

    repository
        .mark_notification_as_sent(2025, ReminderKind::OneWeek)
        .await;
    repository
        .mark_notification_as_sent(2025, ReminderKind::OneDay)
        .await;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.contains(&notification_sent_key(2025, ReminderKind::OneWeek)));

    repository.reset_notification_flags(2025).await;
    for kind in ReminderKind::ALL {
        assert!(!repository.has_notification_been_sent(2025, kind).await);
    }
    Ok(())
}

#[tokio::test]
async fn test_hand_edited_numbers_stay_writable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(&path, "selectedYear = 2026\nmusicVolume = 30\n")?;

    let repository = SettingsRepository::new(FileKeyValueStore::new(&path));
    let settings = repository.load().await;
    assert_eq!(settings.selected_year, 2026);
    assert_eq!(settings.music_volume, 30);

    repository
        .save(&SettingsPatch {
            music_volume: Some(80),
            ..Default::default()
        })
        .await?;
    repository
        .mark_notification_as_sent(2026, ReminderKind::OneDay)
        .await;

    let reloaded = repository.load().await;
    assert_eq!(reloaded.selected_year, 2026);
    assert_eq!(reloaded.music_volume, 80);
    assert!(repository
        .has_notification_been_sent(2026, ReminderKind::OneDay)
        .await);
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_patch_is_an_input_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repository =
        SettingsRepository::new(FileKeyValueStore::new(temp_dir.path().join("settings.toml")));

    let err = repository
        .save(&SettingsPatch {
            music_volume: Some(150),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CountdownError::ValidationError { .. }));
    assert_eq!(err.severity(), ErrorSeverity::High);
    assert!(err.user_friendly_message().starts_with("Invalid input"));

    for year in [-5, 300_000] {
        let result = repository
            .save(&SettingsPatch {
                selected_year: Some(year),
                ..Default::default()
            })
            .await;
        assert!(result.is_err(), "{} accepted", year);
    }
    assert!(!temp_dir.path().join("settings.toml").exists());
    Ok(())
}
