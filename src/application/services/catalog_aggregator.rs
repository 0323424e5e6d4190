//! Reduces the category hierarchy to one representative product per leaf.

use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::{debug, info, warn};

use crate::domain::entities::{CatalogEntry, Category};
use crate::domain::errors::CatalogError;
use crate::domain::ports::CatalogPort;

/// Walks category → subcategory → product through a [`CatalogPort`].
#[derive(Clone)]
pub struct CatalogAggregator {
    catalog: Arc<dyn CatalogPort>,
}

impl CatalogAggregator {
    /// Creates aggregator over the given catalog.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    /// Aggregates the catalog into a flat list ordered by category, then subcategory.
    ///
    /// Leaves without a product contribute nothing. Any failed request aborts the
    /// whole aggregation; partial results are never returned.
    ///
    /// # Errors
    /// Returns the first error raised by the catalog.
    pub async fn aggregate(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let categories = self.catalog.fetch_categories().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch categories");
            e
        })?;

        debug!(count = categories.len(), "Fetched categories");

        let mut entries = Vec::with_capacity(categories.len());
        for category in &categories {
            self.collect_category(category, &mut entries).await?;
        }

        info!(
            categories = categories.len(),
            entries = entries.len(),
            "Catalog aggregated"
        );

        Ok(entries)
    }

    async fn collect_category(
        &self,
        category: &Category,
        entries: &mut Vec<CatalogEntry>,
    ) -> Result<(), CatalogError> {
        let subcategories = self.catalog.fetch_subcategories(category.id()).await?;

        if subcategories.is_empty() {
            let product = self.catalog.fetch_latest_in_category(category.id()).await?;
            debug!(
                category_id = %category.id(),
                found = product.is_some(),
                "Category has no subcategories, used category scope"
            );
            if let Some(product) = product {
                entries.push(CatalogEntry::in_category(product, category.name()));
            }
            return Ok(());
        }

        // Fan out per subcategory; try_join_all keeps input order.
        let products = try_join_all(
            subcategories
                .iter()
                .map(|sub| self.catalog.fetch_latest_active_in_subcategory(sub.id())),
        )
        .await?;

        debug!(
            category_id = %category.id(),
            subcategories = subcategories.len(),
            "Fetched subcategory products"
        );

        entries.extend(
            subcategories
                .iter()
                .zip(products)
                .filter_map(|(sub, product)| {
                    product.map(|p| CatalogEntry::in_subcategory(p, category.name(), sub.name()))
                }),
        );

        Ok(())
    }
}
