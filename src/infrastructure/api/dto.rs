use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::{Category, CategoryId, ColorVariant, Product, Subcategory};

/// Storefront API response wrapper. A missing `data` field means "no result".
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Payload.
    pub data: Option<T>,
}

/// Category as returned by `GET /category`.
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    /// Category ID.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
}

impl From<CategoryResponse> for Category {
    fn from(dto: CategoryResponse) -> Self {
        Self::new(dto.id, dto.name)
    }
}

/// Parent reference, either a bare ID or a populated object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// Bare ID.
    Id(String),
    /// Populated category.
    Object {
        /// Category ID.
        #[serde(alias = "_id")]
        id: String,
    },
}

impl CategoryRef {
    fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

/// Subcategory as returned by `GET /sub-category/category/{id}`.
#[derive(Debug, Deserialize)]
pub struct SubcategoryResponse {
    /// Subcategory ID.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Parent category.
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

impl SubcategoryResponse {
    /// Converts to the domain type, using `parent` when the response omits it.
    #[must_use]
    pub fn into_subcategory(self, parent: &CategoryId) -> Subcategory {
        let category_id = self
            .category
            .map_or_else(|| parent.clone(), |c| CategoryId::new(c.into_id()));
        Subcategory::new(self.id, self.name, category_id)
    }
}

/// Color variant of a product response.
#[derive(Debug, Deserialize)]
pub struct ColorResponse {
    /// Variant name.
    #[serde(default)]
    pub name: String,
    /// Variant images.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Product as returned by the product listing endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Product ID.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current price.
    pub price: f64,
    /// Pre-discount price.
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Flat image list.
    #[serde(default)]
    pub images: Vec<String>,
    /// Color variants.
    #[serde(default)]
    pub colors: Vec<ColorResponse>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ProductResponse> for Product {
    fn from(dto: ProductResponse) -> Self {
        let mut product = Self::new(dto.id, dto.name, dto.price).with_images(dto.images);
        if let Some(original) = dto.original_price {
            product = product.with_original_price(original);
        }
        if let Some(created_at) = dto.created_at {
            product = product.with_created_at(created_at);
        }
        dto.colors.into_iter().fold(product, |p, c| {
            p.with_color(ColorVariant::new(c.name, c.images))
        })
    }
}

/// Product listing payload: a bare list or a paginated object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductPage {
    /// Bare list.
    List(Vec<ProductResponse>),
    /// Paginated object.
    Paged {
        /// Products of the page.
        #[serde(default)]
        products: Vec<ProductResponse>,
    },
}

impl ProductPage {
    /// Returns the first product of the page.
    #[must_use]
    pub fn into_first(self) -> Option<Product> {
        let products = match self {
            Self::List(products) | Self::Paged { products } => products,
        };
        products.into_iter().next().map(Product::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_envelope() {
        let json = r#"{"data":[{"_id":"c1","name":"Shirts"},{"id":"c2","name":"Bags"}]}"#;
        let envelope: Envelope<Vec<CategoryResponse>> = serde_json::from_str(json).unwrap();

        let categories: Vec<Category> = envelope.data.unwrap().into_iter().map(Into::into).collect();
        assert_eq!(categories[0].id().as_str(), "c1");
        assert_eq!(categories[1].name(), "Bags");
    }

    #[test]
    fn test_missing_data_is_none() {
        let envelope: Envelope<Vec<CategoryResponse>> =
            serde_json::from_str(r#"{"message":"ok"}"#).unwrap();

        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_subcategory_parent_forms() {
        let parent = CategoryId::new("c9");
        let bare: SubcategoryResponse =
            serde_json::from_str(r#"{"_id":"s1","name":"Polo","category":"c1"}"#).unwrap();
        let populated: SubcategoryResponse = serde_json::from_str(
            r#"{"_id":"s2","name":"Linen","category":{"_id":"c2","name":"Shirts"}}"#,
        )
        .unwrap();
        let missing: SubcategoryResponse =
            serde_json::from_str(r#"{"_id":"s3","name":"Other"}"#).unwrap();

        assert_eq!(bare.into_subcategory(&parent).category_id().as_str(), "c1");
        assert_eq!(populated.into_subcategory(&parent).category_id().as_str(), "c2");
        assert_eq!(missing.into_subcategory(&parent).category_id().as_str(), "c9");
    }

    #[test]
    fn test_product_page_forms() {
        let list: ProductPage = serde_json::from_str(
            r#"[{"_id":"p1","name":"Tee","price":20,"originalPrice":25,"images":["a.jpg"],"createdAt":"2024-03-01T10:00:00Z"}]"#,
        )
        .unwrap();
        let paged: ProductPage = serde_json::from_str(
            r#"{"products":[{"_id":"p2","name":"Cap","price":9.5,"colors":[{"name":"Red","images":["r.jpg"]}]}],"total":1}"#,
        )
        .unwrap();
        let empty: ProductPage = serde_json::from_str("[]").unwrap();

        let tee = list.into_first().unwrap();
        assert_eq!(tee.original_price(), Some(25.0));
        assert!(tee.created_at().is_some());

        let cap = paged.into_first().unwrap();
        assert_eq!(cap.primary_image(), Some("r.jpg"));

        assert!(empty.into_first().is_none());
    }
}
