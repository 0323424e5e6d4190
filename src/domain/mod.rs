//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CatalogEntry, Category, Product, Subcategory, ViewportClass};
pub use errors::{CatalogError, StorageError};
pub use ports::{CatalogPort, ClockPort, KeyValueStorePort, SelectionPort};
