//! Storefront catalog HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{CategoryResponse, Envelope, ProductPage, SubcategoryResponse};
use crate::domain::entities::{Category, CategoryId, Product, Subcategory, SubcategoryId};
use crate::domain::errors::CatalogError;
use crate::domain::ports::CatalogPort;

/// Default storefront API base URL.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// Catalog client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct StorefrontApiClient {
    client: Client,
    base_url: String,
}

impl StorefrontApiClient {
    /// Creates client against `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, CatalogError> {
        let url = self.url(path);
        debug!(url = %url, "Fetching catalog resource");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, url = %url, "Catalog request failed");
                if e.is_timeout() {
                    CatalogError::network("request timed out")
                } else if e.is_connect() {
                    CatalogError::network("failed to connect to storefront API")
                } else {
                    CatalogError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %url, "Catalog request rejected");
            return Err(status_error(status));
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            warn!(error = %e, url = %url, "Failed to parse catalog response");
            CatalogError::invalid_response(format!("failed to parse {path}: {e}"))
        })?;

        Ok(envelope.data)
    }

    async fn first_product(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<Product>, CatalogError> {
        Ok(self
            .get_data::<ProductPage>(path, query)
            .await?
            .and_then(ProductPage::into_first))
    }
}

fn status_error(status: StatusCode) -> CatalogError {
    match status {
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            CatalogError::network("storefront API is temporarily unavailable")
        }
        _ => CatalogError::network(format!("storefront API returned {status}")),
    }
}

#[async_trait]
impl CatalogPort for StorefrontApiClient {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let categories = self
            .get_data::<Vec<CategoryResponse>>("/category", &[])
            .await?
            .unwrap_or_default();

        Ok(categories.into_iter().map(Category::from).collect())
    }

    async fn fetch_subcategories(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Subcategory>, CatalogError> {
        let path = format!("/sub-category/category/{category_id}");
        let subcategories = self
            .get_data::<Vec<SubcategoryResponse>>(&path, &[])
            .await?
            .unwrap_or_default();

        Ok(subcategories
            .into_iter()
            .map(|s| s.into_subcategory(category_id))
            .collect())
    }

    async fn fetch_latest_active_in_subcategory(
        &self,
        subcategory_id: &SubcategoryId,
    ) -> Result<Option<Product>, CatalogError> {
        let path = format!("/product/subcategory/{subcategory_id}");
        self.first_product(&path, &[("page", "1"), ("limit", "1"), ("isActive", "true")])
            .await
    }

    async fn fetch_latest_in_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Option<Product>, CatalogError> {
        let path = format!("/product/category/{category_id}");
        self.first_product(&path, &[("page", "1"), ("limit", "1")]).await
    }
}
