use crate::core::countdown::DEFAULT_TICK_INTERVAL;
use crate::core::music::DEFAULT_MUSIC_URL;
use crate::utils::error::{CountdownError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "xmas-countdown.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    pub display: Option<DisplayConfig>,
    pub music: Option<MusicConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub settings_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: "./.xmas-countdown/settings.toml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub outbox_path: String,
    pub permission_granted: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            outbox_path: "./.xmas-countdown/notifications.json".to_string(),
            permission_granted: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub tick_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    pub default_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CountdownError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用內建預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.settings_path", &self.storage.settings_path)?;
        validate_path("notifications.outbox_path", &self.notifications.outbox_path)?;

        if let Some(interval) = self.display.as_ref().and_then(|d| d.tick_interval_ms) {
            validate_positive_number("display.tick_interval_ms", interval, 1)?;
        }

        if let Some(url) = self.music.as_ref().and_then(|m| m.default_url.as_deref()) {
            validate_url("music.default_url", url)?;
        }

        Ok(())
    }

    pub fn settings_path(&self) -> &str {
        &self.storage.settings_path
    }

    pub fn outbox_path(&self) -> &str {
        &self.notifications.outbox_path
    }

    pub fn tick_interval(&self) -> Duration {
        self.display
            .as_ref()
            .and_then(|d| d.tick_interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TICK_INTERVAL)
    }

    pub fn default_music_url(&self) -> &str {
        self.music
            .as_ref()
            .and_then(|m| m.default_url.as_deref())
            .unwrap_or(DEFAULT_MUSIC_URL)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.as_ref().map(|l| l.format).unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
