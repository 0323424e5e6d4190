//! Domain entity definitions.

mod category;
mod product;
mod viewport;

pub use category::{Category, CategoryId, Subcategory, SubcategoryId};
pub use product::{CatalogEntry, ColorVariant, Product, ProductId};
pub use viewport::{DEFAULT_MOBILE_BREAKPOINT, ViewportClass, items_per_page};
