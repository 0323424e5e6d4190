//! JSON-file backed key-value store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStorePort;

/// File name used inside a cache directory.
pub const STORE_FILE_NAME: &str = "store.json";

type Entries = BTreeMap<String, String>;

/// Persists all entries as one JSON object.
///
/// Every mutation rewrites the whole file through a temporary file in the same
/// directory, so a reader never observes a partial batch.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Creates store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates store inside `dir` using the default file name.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORE_FILE_NAME))
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Entries::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: Entries) -> Result<(), StorageError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &entries))
            .await
            .map_err(|e| StorageError::unavailable(format!("write task failed: {e}")))?
    }

    async fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await.or_else(|e| match e {
            StorageError::Serialization { .. } => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable store file");
                Ok(Entries::new())
            }
            other => Err(other),
        })?;
        apply(&mut entries);
        self.persist(entries).await
    }
}

fn write_atomic(path: &Path, entries: &Entries) -> Result<(), StorageError> {
    let content = serde_json::to_string(entries)?;
    let parent = path
        .parent()
        .ok_or_else(|| StorageError::io("store path has no parent directory"))?;
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<String>>, StorageError> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(keys.iter().map(|k| entries.get(k).cloned()).collect())
    }

    async fn set_many(&self, items: &[(String, String)]) -> Result<(), StorageError> {
        self.update(|entries| {
            for (key, value) in items {
                entries.insert(key.clone(), value.clone());
            }
        })
        .await?;
        debug!(count = items.len(), path = %self.path.display(), "Stored entries");
        Ok(())
    }

    async fn remove_many(&self, keys: &[String]) -> Result<(), StorageError> {
        self.update(|entries| {
            for key in keys {
                entries.remove(key);
            }
        })
        .await
    }
}
