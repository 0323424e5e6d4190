//! Domain error types.

mod catalog_error;
mod storage_error;

pub use catalog_error::CatalogError;
pub use storage_error::StorageError;
