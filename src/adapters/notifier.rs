use crate::domain::model::ScheduledNotification;
use crate::domain::ports::NotificationScheduler;
use crate::utils::error::{CountdownError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes scheduled alerts to a JSON file for the host's notification daemon.
///
/// 同一個 identifier 再次排程會取代舊的項目，與行動平台的行為一致。
#[derive(Debug)]
pub struct OutboxScheduler {
    path: PathBuf,
    permission_granted: bool,
    lock: tokio::sync::Mutex<()>,
}

impl OutboxScheduler {
    pub fn new<P: AsRef<Path>>(path: P, permission_granted: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            permission_granted,
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn pending(&self) -> Result<Vec<ScheduledNotification>> {
        let _guard = self.lock.lock().await;
        self.read_outbox().await
    }

    async fn read_outbox(&self) -> Result<Vec<ScheduledNotification>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) if data.is_empty() => Ok(Vec::new()),
            Ok(data) => serde_json::from_slice(&data).map_err(|e| {
                CountdownError::NotificationError {
                    message: format!("outbox {} is unreadable: {}", self.path.display(), e),
                }
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_outbox(&self, items: &[ScheduledNotification]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationScheduler for OutboxScheduler {
    async fn request_permission(&self) -> Result<bool> {
        if !self.permission_granted {
            tracing::debug!("🔕 Notification permission not granted by configuration");
        }
        Ok(self.permission_granted)
    }

    async fn schedule(&self, notification: ScheduledNotification) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_outbox().await?;
        items.retain(|existing| existing.identifier != notification.identifier);

        tracing::info!(
            "🔔 Scheduled '{}' for {}",
            notification.identifier,
            notification.trigger
        );
        items.push(notification);
        items.sort_by_key(|item| item.trigger);

        self.write_outbox(&items).await
    }

    async fn cancel_all(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write_outbox(&[]).await?;
        tracing::info!("🧹 Cancelled all scheduled notifications");
        Ok(())
    }
}
