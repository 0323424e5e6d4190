//! Application services.

pub mod catalog_aggregator;
pub mod image_url_transformer;
pub mod result_cache;

pub use catalog_aggregator::CatalogAggregator;
pub use image_url_transformer::{ImageCandidate, ImageIntent, ImageUrlTransformer, Quality};
pub use result_cache::{CacheRecord, ResultCache};
