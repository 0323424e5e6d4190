//! Product and catalog entry entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A color variant carrying its own image set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Variant name, e.g. "Navy".
    pub name: String,
    /// Ordered image URLs for this variant.
    #[serde(default)]
    pub images: Vec<String>,
}

impl ColorVariant {
    /// Creates a color variant.
    #[must_use]
    pub fn new(name: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            name: name.into(),
            images,
        }
    }
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_price: Option<f64>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    colors: Vec<ColorVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a product with no images.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            images: Vec::new(),
            colors: Vec::new(),
            created_at: None,
        }
    }

    /// Sets the pre-discount price.
    #[must_use]
    pub const fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Sets the flat image list.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Appends a color variant.
    #[must_use]
    pub fn with_color(mut self, color: ColorVariant) -> Self {
        self.colors.push(color);
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Returns the product ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current price.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Returns the pre-discount price, if any.
    #[must_use]
    pub const fn original_price(&self) -> Option<f64> {
        self.original_price
    }

    /// Returns the flat image list.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Returns the color variants.
    #[must_use]
    pub fn colors(&self) -> &[ColorVariant] {
        &self.colors
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// First image of the flat list, falling back to the first color variant that has one.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .or_else(|| self.colors.iter().find_map(|c| c.images.first()))
            .map(String::as_str)
    }

    /// Whole-percent discount relative to the original price.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn discount_percent(&self) -> Option<u8> {
        let original = self.original_price?;
        if original <= 0.0 || original <= self.price {
            return None;
        }
        let percent = ((original - self.price) / original * 100.0).round();
        Some(percent.clamp(0.0, 100.0) as u8)
    }
}

/// A product annotated with its position in the category hierarchy.
/// This is the unit that gets cached and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    product: Product,
    category_name: String,
    subcategory_name: Option<String>,
}

impl CatalogEntry {
    /// Creates an entry for a product listed under a subcategory.
    #[must_use]
    pub fn in_subcategory(
        product: Product,
        category_name: impl Into<String>,
        subcategory_name: impl Into<String>,
    ) -> Self {
        Self {
            product,
            category_name: category_name.into(),
            subcategory_name: Some(subcategory_name.into()),
        }
    }

    /// Creates an entry for a product listed directly under a category.
    #[must_use]
    pub fn in_category(product: Product, category_name: impl Into<String>) -> Self {
        Self {
            product,
            category_name: category_name.into(),
            subcategory_name: None,
        }
    }

    /// Returns the product.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the category name.
    #[must_use]
    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    /// Returns the subcategory name.
    #[must_use]
    pub fn subcategory_name(&self) -> Option<&str> {
        self.subcategory_name.as_deref()
    }

    /// Label used by listings, e.g. "Shoes / Sneakers".
    #[must_use]
    pub fn breadcrumb(&self) -> String {
        match &self.subcategory_name {
            Some(sub) => format!("{} / {sub}", self.category_name),
            None => self.category_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_image_prefers_flat_list() {
        let product = Product::new("p1", "Tee", 20.0)
            .with_images(vec!["a.jpg".to_string()])
            .with_color(ColorVariant::new("Red", vec!["red.jpg".to_string()]));

        assert_eq!(product.primary_image(), Some("a.jpg"));
    }

    #[test]
    fn test_primary_image_falls_back_to_colors() {
        let product = Product::new("p1", "Tee", 20.0)
            .with_color(ColorVariant::new("Empty", vec![]))
            .with_color(ColorVariant::new("Blue", vec!["blue.jpg".to_string()]));

        assert_eq!(product.primary_image(), Some("blue.jpg"));
        assert_eq!(Product::new("p2", "Bare", 1.0).primary_image(), None);
    }

    #[test]
    fn test_discount_percent() {
        let product = Product::new("p1", "Tee", 75.0).with_original_price(100.0);
        assert_eq!(product.discount_percent(), Some(25));

        let no_discount = Product::new("p2", "Tee", 100.0).with_original_price(80.0);
        assert_eq!(no_discount.discount_percent(), None);
    }

    #[test]
    fn test_catalog_entry_serialization_shape() {
        let entry = CatalogEntry::in_category(Product::new("p1", "Tee", 10.0), "Shirts");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["categoryName"], "Shirts");
        assert!(json["subcategoryName"].is_null());
        assert_eq!(json["product"]["id"], "p1");
    }

    #[test]
    fn test_breadcrumb() {
        let product = Product::new("p1", "Tee", 10.0);
        let entry = CatalogEntry::in_subcategory(product.clone(), "Shirts", "Polo");

        assert_eq!(entry.breadcrumb(), "Shirts / Polo");
        assert_eq!(CatalogEntry::in_category(product, "Shirts").breadcrumb(), "Shirts");
    }
}
