//! Infrastructure layer with external service adapters.

/// Storefront REST API client.
pub mod api;
pub mod clock;
/// Application configuration.
pub mod config;
pub mod navigation;
/// Key-value store adapters.
pub mod storage;

pub use api::StorefrontApiClient;
pub use clock::SystemClock;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use navigation::BrowserNavigator;
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};
