//! Use case implementations.

mod load_featured_products_use_case;

pub use load_featured_products_use_case::{
    FEATURED_PRODUCTS_KEY, FeaturedProducts, LoadFeaturedProductsUseCase, LoadSource,
};
