//! Item selection port definition.

use crate::domain::entities::CatalogEntry;

/// Receives the carousel's activation intent. The carousel never navigates itself.
pub trait SelectionPort: Send + Sync {
    /// Called when the shopper activates the focal item.
    fn select(&self, entry: &CatalogEntry);
}
