//! Shop products.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bioarchitettura_core::{CategoryId, Price, ProductId, ProductType, Slug};

use super::Category;

/// A product sold in the shop, with its category embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub cover_image: Option<String>,
    pub featured: bool,
    pub in_stock: bool,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<Category>,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    pub product_type: ProductType,
    pub cover_image: Option<String>,
    pub featured: bool,
    pub in_stock: bool,
    pub category_id: Option<CategoryId>,
}
