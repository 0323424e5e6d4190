//! Persistent key-value store port definition.

use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// String-keyed persistent storage.
///
/// Batch operations see and apply all of their keys at once, so readers never
/// observe half of a batch.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Reads several values from one snapshot, in key order.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<String>>, StorageError>;

    /// Writes several values as one batch.
    async fn set_many(&self, entries: &[(String, String)]) -> Result<(), StorageError>;

    /// Removes several keys as one batch. Missing keys are ignored.
    async fn remove_many(&self, keys: &[String]) -> Result<(), StorageError>;

    /// Reads a single value.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut values = self.get_many(&[key.to_string()]).await?;
        Ok(values.pop().flatten())
    }

    /// Writes a single value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_many(&[(key.to_string(), value.to_string())]).await
    }
}
