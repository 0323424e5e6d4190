//! Key-value store adapters.

mod file_store;
mod memory_store;

pub use file_store::{FileKeyValueStore, STORE_FILE_NAME};
pub use memory_store::MemoryKeyValueStore;
