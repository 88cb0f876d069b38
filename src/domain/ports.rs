use crate::domain::model::ScheduledNotification;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// 現在時刻來源；整個行程使用同一個本地時區
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub trait KeyValueStore: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_item(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Returns whether the host allows local alerts.
    async fn request_permission(&self) -> Result<bool>;
    async fn schedule(&self, notification: ScheduledNotification) -> Result<()>;
    async fn cancel_all(&self) -> Result<()>;
}

#[async_trait]
pub trait AudioBackend: Send + Sync {
    async fn load(&self, url: &str, looping: bool, volume: f32) -> Result<()>;
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn set_volume(&self, volume: f32) -> Result<()>;
    async fn unload(&self) -> Result<()>;
}
