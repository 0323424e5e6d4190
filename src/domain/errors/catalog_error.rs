//! Catalog loading error types.

use thiserror::Error;

/// Failures surfaced while loading the featured catalog.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum CatalogError {
    #[error("network error while fetching catalog: {message}")]
    Network { message: String },

    #[error("catalog API returned an invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("catalog contains no products")]
    EmptyCatalog,
}

impl CatalogError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns whether a retry may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::InvalidResponse { .. })
    }

    /// Single message shown to the shopper.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Network { .. } | Self::InvalidResponse { .. } => {
                "Failed to load products. Please try again later."
            }
            Self::EmptyCatalog => "No products available.",
        }
    }
}
