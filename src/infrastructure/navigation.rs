//! Opens activated products in the system browser.

use tracing::{info, warn};

use crate::domain::entities::{CatalogEntry, ProductId};
use crate::domain::ports::SelectionPort;

/// Default storefront URL.
pub const DEFAULT_STOREFRONT_URL: &str = "http://localhost:3000";

/// Navigates to a product's detail page.
#[derive(Debug, Clone)]
pub struct BrowserNavigator {
    storefront_url: String,
}

impl BrowserNavigator {
    /// Creates navigator for the given storefront origin.
    #[must_use]
    pub fn new(storefront_url: impl Into<String>) -> Self {
        Self {
            storefront_url: storefront_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Detail page URL of a product.
    #[must_use]
    pub fn product_url(&self, id: &ProductId) -> String {
        format!("{}/product/{id}", self.storefront_url)
    }
}

impl Default for BrowserNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_STOREFRONT_URL)
    }
}

fn open_url(url: &str) {
    match opener::open(url) {
        Ok(()) => info!(url = %url, "Opened product page"),
        Err(e) => warn!(url = %url, error = %e, "Failed to open product page"),
    }
}

impl SelectionPort for BrowserNavigator {
    fn select(&self, entry: &CatalogEntry) {
        let url = self.product_url(entry.product().id());

        if tokio::runtime::Handle::try_current().is_ok() {
            tokio::task::spawn_blocking(move || open_url(&url));
        } else {
            open_url(&url);
        }
    }
}
