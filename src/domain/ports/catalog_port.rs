//! Catalog fetch port definition.

use async_trait::async_trait;

use crate::domain::entities::{Category, CategoryId, Product, Subcategory, SubcategoryId};
use crate::domain::errors::CatalogError;

/// Port for reading the remote catalog hierarchy.
///
/// Empty results are `Ok`; only transport or decoding failures are errors.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetches every category in listing order.
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Fetches the subcategories of a category in listing order.
    async fn fetch_subcategories(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Subcategory>, CatalogError>;

    /// Fetches the most recently created active product of a subcategory.
    async fn fetch_latest_active_in_subcategory(
        &self,
        subcategory_id: &SubcategoryId,
    ) -> Result<Option<Product>, CatalogError>;

    /// Fetches the most recently created product scoped directly to a category.
    async fn fetch_latest_in_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Option<Product>, CatalogError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    /// Request that the mock can be told to fail.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum FailurePoint {
        Categories,
        Subcategories(CategoryId),
        SubcategoryProduct(SubcategoryId),
        CategoryProduct(CategoryId),
    }

    /// In-memory catalog for testing.
    #[derive(Default)]
    pub struct MockCatalog {
        categories: Vec<Category>,
        subcategories: HashMap<CategoryId, Vec<Subcategory>>,
        subcategory_products: HashMap<SubcategoryId, Product>,
        category_products: HashMap<CategoryId, Product>,
        failure: Mutex<Option<FailurePoint>>,
        requests: AtomicUsize,
    }

    impl MockCatalog {
        /// Creates an empty catalog.
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a category.
        pub fn with_category(mut self, category: Category) -> Self {
            self.categories.push(category);
            self
        }

        /// Adds a subcategory under its parent.
        pub fn with_subcategory(mut self, subcategory: Subcategory) -> Self {
            self.subcategories
                .entry(subcategory.category_id().clone())
                .or_default()
                .push(subcategory);
            self
        }

        /// Sets the latest active product of a subcategory.
        pub fn with_subcategory_product(mut self, id: &str, product: Product) -> Self {
            self.subcategory_products
                .insert(SubcategoryId::new(id), product);
            self
        }

        /// Sets the latest product of a category.
        pub fn with_category_product(mut self, id: &str, product: Product) -> Self {
            self.category_products.insert(CategoryId::new(id), product);
            self
        }

        /// Makes the given request fail from now on.
        pub fn fail_at(&self, point: FailurePoint) {
            *self.failure.lock() = Some(point);
        }

        /// Clears any configured failure.
        pub fn heal(&self) {
            *self.failure.lock() = None;
        }

        /// Number of requests served, including failed ones.
        pub fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }

        fn check(&self, point: &FailurePoint) -> Result<(), CatalogError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.failure.lock().as_ref() == Some(point) {
                Err(CatalogError::network("mock failure"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CatalogPort for MockCatalog {
        async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
            self.check(&FailurePoint::Categories)?;
            Ok(self.categories.clone())
        }

        async fn fetch_subcategories(
            &self,
            category_id: &CategoryId,
        ) -> Result<Vec<Subcategory>, CatalogError> {
            self.check(&FailurePoint::Subcategories(category_id.clone()))?;
            Ok(self
                .subcategories
                .get(category_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn fetch_latest_active_in_subcategory(
            &self,
            subcategory_id: &SubcategoryId,
        ) -> Result<Option<Product>, CatalogError> {
            self.check(&FailurePoint::SubcategoryProduct(subcategory_id.clone()))?;
            Ok(self.subcategory_products.get(subcategory_id).cloned())
        }

        async fn fetch_latest_in_category(
            &self,
            category_id: &CategoryId,
        ) -> Result<Option<Product>, CatalogError> {
            self.check(&FailurePoint::CategoryProduct(category_id.clone()))?;
            Ok(self.category_products.get(category_id).cloned())
        }
    }
}
