//! Featured products loading use case.

use tracing::{debug, error, info, warn};

use crate::application::services::{CatalogAggregator, ResultCache};
use crate::domain::entities::CatalogEntry;
use crate::domain::errors::CatalogError;

/// Default cache key of the featured products dataset.
pub const FEATURED_PRODUCTS_KEY: &str = "featured-products";

/// Where a loaded list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Served from a fresh cache record.
    Cache,
    /// Aggregated from the remote catalog.
    Network,
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A non-empty, ordered featured products list.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedProducts {
    /// Entries in display order.
    pub entries: Vec<CatalogEntry>,
    /// Origin of the entries.
    pub source: LoadSource,
}

/// Loads featured products, preferring the cache and writing through on refresh.
#[derive(Clone)]
pub struct LoadFeaturedProductsUseCase {
    aggregator: CatalogAggregator,
    cache: ResultCache<Vec<CatalogEntry>>,
    key: String,
}

impl LoadFeaturedProductsUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(aggregator: CatalogAggregator, cache: ResultCache<Vec<CatalogEntry>>) -> Self {
        Self {
            aggregator,
            cache,
            key: FEATURED_PRODUCTS_KEY.to_string(),
        }
    }

    /// Overrides the cache key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Returns cached entries if fresh, otherwise aggregates and caches them.
    ///
    /// # Errors
    /// Returns `CatalogError::EmptyCatalog` when the catalog has no products and
    /// the aggregation error when any fetch fails.
    pub async fn execute(&self) -> Result<FeaturedProducts, CatalogError> {
        if let Some(entries) = self.cache.read(&self.key).await
            && !entries.is_empty()
        {
            info!(entries = entries.len(), "Featured products served from cache");
            return Ok(FeaturedProducts {
                entries,
                source: LoadSource::Cache,
            });
        }

        debug!("Cache miss, aggregating catalog");
        self.refresh().await
    }

    /// Aggregates the catalog and replaces the cache record, skipping the cache read.
    ///
    /// A failed aggregation leaves the cache untouched. Empty results are not cached.
    ///
    /// # Errors
    /// Same as [`Self::execute`].
    pub async fn refresh(&self) -> Result<FeaturedProducts, CatalogError> {
        let entries = self.aggregator.aggregate().await.map_err(|e| {
            error!(error = %e, "Catalog aggregation failed");
            e
        })?;

        if entries.is_empty() {
            warn!("Catalog aggregation returned no products");
            return Err(CatalogError::EmptyCatalog);
        }

        if let Err(e) = self.cache.write(&self.key, &entries).await {
            warn!(error = %e, "Failed to cache featured products");
        }

        info!(entries = entries.len(), "Featured products loaded from network");
        Ok(FeaturedProducts {
            entries,
            source: LoadSource::Network,
        })
    }
}
