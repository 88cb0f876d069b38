use crate::domain::ports::KeyValueStore;
use crate::utils::error::{CountdownError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use toml::Value;

/// 以單一 TOML 檔保存字串鍵值，每次寫入都會整檔重寫
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: tokio::sync::Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 讀取整個檔案；手動編輯留下的數字與布林值轉成字串，表格與陣列略過
    async fn read_all(&self, key: &str) -> Result<BTreeMap<String, String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let table = toml::from_str::<toml::Table>(&content).map_err(|e| {
            CountdownError::StorageError {
                key: key.to_string(),
                message: format!("{} is not valid TOML: {}", self.path.display(), e),
            }
        })?;

        let mut items = BTreeMap::new();
        for (name, value) in table {
            let text = match value {
                Value::String(s) => s,
                Value::Integer(i) => i.to_string(),
                Value::Float(f) => f.to_string(),
                Value::Boolean(b) => b.to_string(),
                Value::Datetime(d) => d.to_string(),
                Value::Array(_) | Value::Table(_) => {
                    tracing::warn!(
                        "⚠️ Skipping non-scalar entry '{}' in {}",
                        name,
                        self.path.display()
                    );
                    continue;
                }
            };
            items.insert(name, text);
        }
        Ok(items)
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = toml::to_string(items)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let items = self.read_all(key).await?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all(key).await?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await?;
        tracing::debug!("💾 Stored '{}' in {}", key, self.path.display());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all(key).await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
            tracing::debug!("🗑️ Removed '{}' from {}", key, self.path.display());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        items.remove(key);
        Ok(())
    }
}
