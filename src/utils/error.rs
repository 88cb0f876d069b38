use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error on key '{key}': {message}")]
    StorageError { key: String, message: String },

    #[error("Notification error: {message}")]
    NotificationError { message: String },

    #[error("Audio error: {message}")]
    AudioError { message: String },

    #[error("Invalid date/time '{value}': {reason}")]
    InvalidDateTime { value: String, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Notification,
    Audio,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CountdownError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfigValueError { .. }
            | Self::TomlParseError(_) => ErrorCategory::Configuration,
            Self::IoError(_)
            | Self::SerializationError(_)
            | Self::TomlWriteError(_)
            | Self::StorageError { .. } => ErrorCategory::Storage,
            Self::NotificationError { .. } => ErrorCategory::Notification,
            Self::AudioError { .. } => ErrorCategory::Audio,
            Self::InvalidDateTime { .. } | Self::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 音樂與通知都是盡力而為
            ErrorCategory::Audio | ErrorCategory::Notification => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => {
                "Check that the settings file location exists and is writable".to_string()
            }
            Self::StorageError { key, .. } => {
                format!("Fix or remove the settings file, then set '{}' again", key)
            }
            Self::SerializationError(_) | Self::TomlWriteError(_) => {
                "The stored data could not be encoded; try removing the file and retrying"
                    .to_string()
            }
            Self::TomlParseError(_) => "Make sure the file is valid TOML".to_string(),
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and try again", field)
            }
            Self::NotificationError { .. } => {
                "Reminders are optional; re-enable notifications once permission is granted"
                    .to_string()
            }
            Self::AudioError { .. } => {
                "Check the music URL or fall back to the default track".to_string()
            }
            Self::InvalidDateTime { .. } => {
                "Use the format YYYY-MM-DDTHH:MM:SS, e.g. 2025-12-24T12:00:00".to_string()
            }
            Self::ValidationError { .. } => "Check the provided values".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Could not access saved settings: {}", self),
            ErrorCategory::Notification => format!("Reminder could not be scheduled: {}", self),
            ErrorCategory::Audio => format!("Music is unavailable: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CountdownError>;
