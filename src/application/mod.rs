//! Application layer with services, the carousel engine and use cases.

/// Carousel engine.
pub mod carousel;
/// Catalog, cache and image services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use carousel::{CarouselDriver, CarouselEngine, CarouselSettings};
pub use services::{CatalogAggregator, ImageUrlTransformer, ResultCache};
pub use use_cases::{FeaturedProducts, LoadFeaturedProductsUseCase, LoadSource};
