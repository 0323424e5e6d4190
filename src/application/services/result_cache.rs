//! Time-to-live cache of a single aggregated result over a key-value store.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::{ClockPort, KeyValueStorePort};

/// Default record lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3_600_000);

/// Default prefix shared by the payload and timestamp keys.
pub const DEFAULT_KEY_PREFIX: &str = "vitrine:";

const TIMESTAMP_SUFFIX: &str = ":timestamp";

/// A cached payload with its write time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheRecord<T> {
    /// Cached value.
    pub payload: T,
    /// Write time in epoch milliseconds.
    pub written_at_millis: i64,
}

impl<T> CacheRecord<T> {
    /// Whether the record is still fresh at `now_millis`.
    #[must_use]
    pub fn is_fresh(&self, now_millis: i64, ttl: Duration) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_millis.saturating_sub(self.written_at_millis) < ttl_ms
    }
}

/// TTL cache backed by persistent key-value storage.
///
/// Every dataset is stored under two keys, payload and write timestamp, which
/// are always written and read together as one batch.
pub struct ResultCache<T> {
    store: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
    ttl: Duration,
    prefix: String,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Clone for ResultCache<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            ttl: self.ttl,
            prefix: self.prefix.clone(),
            _payload: PhantomData,
        }
    }
}

impl<T> ResultCache<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates cache with the default TTL and prefix.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            store,
            clock,
            ttl: DEFAULT_TTL,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
            _payload: PhantomData,
        }
    }

    /// Overrides the TTL.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Overrides the key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the configured TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    fn keys(&self, key: &str) -> [String; 2] {
        let payload = format!("{}{key}", self.prefix);
        let timestamp = format!("{payload}{TIMESTAMP_SUFFIX}");
        [payload, timestamp]
    }

    /// Reads the stored record regardless of age.
    ///
    /// Unreadable or corrupt records count as absent.
    pub async fn read_record(&self, key: &str) -> Option<CacheRecord<T>> {
        let keys = self.keys(key);
        let values = match self.store.get_many(&keys).await {
            Ok(values) => values,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        let mut values = values.into_iter();
        let (Some(Some(payload)), Some(Some(written_at))) = (values.next(), values.next()) else {
            trace!(key, "Cache miss");
            return None;
        };

        let Ok(written_at_millis) = written_at.parse::<i64>() else {
            warn!(key, value = %written_at, "Corrupt cache timestamp");
            return None;
        };

        match serde_json::from_str(&payload) {
            Ok(payload) => Some(CacheRecord {
                payload,
                written_at_millis,
            }),
            Err(e) => {
                warn!(key, error = %e, "Corrupt cache payload");
                None
            }
        }
    }

    /// Returns the cached payload if present and younger than the TTL.
    ///
    /// Expired records are left in place and ignored.
    pub async fn read(&self, key: &str) -> Option<T> {
        let record = self.read_record(key).await?;
        let now = self.clock.now_millis();

        if record.is_fresh(now, self.ttl) {
            debug!(key, age_ms = now - record.written_at_millis, "Cache hit");
            Some(record.payload)
        } else {
            debug!(key, age_ms = now - record.written_at_millis, "Cache record expired");
            None
        }
    }

    /// Replaces the stored record and stamps it with the current time.
    ///
    /// # Errors
    /// Returns error if serialization or the store write fails.
    pub async fn write(&self, key: &str, payload: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(payload)?;
        let [payload_key, timestamp_key] = self.keys(key);
        let now = self.clock.now_millis();

        self.store
            .set_many(&[(payload_key, json), (timestamp_key, now.to_string())])
            .await?;

        debug!(key, written_at = now, "Cache record written");
        Ok(())
    }

    /// Removes the stored record.
    ///
    /// # Errors
    /// Returns error if the store write fails.
    pub async fn invalidate(&self, key: &str) -> Result<(), StorageError> {
        self.store.remove_many(&self.keys(key)).await?;
        debug!(key, "Cache record invalidated");
        Ok(())
    }
}
