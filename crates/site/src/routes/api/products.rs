//! Product API handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use bioarchitettura_core::{CategoryId, Price, ProductType, Slug};

use super::{parse_body, parse_limit, parse_query, require_text};
use crate::db::{ProductFilter, ProductRepository};
use crate::error::{ApiError, ApiResultExt, AppError};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

/// Query parameters for `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub featured: Option<String>,
    pub limit: Option<String>,
}

const fn default_in_stock() -> bool {
    true
}

/// Body of `POST /api/products`.
///
/// `featured` defaults to `false` and `inStock` to `true`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    pub category_id: Option<CategoryId>,
}

impl CreateProduct {
    fn validate(self) -> Result<NewProduct, ApiError> {
        require_text("title", &self.title)?;

        Ok(NewProduct {
            title: self.title,
            slug: self.slug,
            description: self.description,
            price: self.price,
            product_type: self.product_type,
            cover_image: self.cover_image,
            featured: self.featured,
            in_stock: self.in_stock,
            category_id: self.category_id,
        })
    }
}

/// `GET /api/products` - in-stock products, newest first.
///
/// `featured` only filters when it is exactly `true`.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let query = parse_query(query)?;
    let limit = parse_limit(query.limit.as_deref())?;
    let product_type = query
        .product_type
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<ProductType>()
                .map_err(|e| ApiError::bad_request(e.to_string()))
        })
        .transpose()?;

    let filter = ProductFilter {
        product_type,
        featured: (query.featured.as_deref() == Some("true")).then_some(true),
        limit,
        ..ProductFilter::storefront()
    };

    let products = ProductRepository::new(state.pool())
        .list(filter)
        .await
        .api_context("Failed to fetch products")?;

    Ok(Json(products))
}

/// `GET /api/products/{slug}` - a single in-stock product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let not_found = || {
        ApiError::new(
            "Failed to fetch product",
            AppError::NotFound("Product not found".to_string()),
        )
    };
    let slug = Slug::parse(&slug).map_err(|_| not_found())?;

    ProductRepository::new(state.pool())
        .find_by_slug(&slug)
        .await
        .api_context("Failed to fetch product")?
        .map(Json)
        .ok_or_else(not_found)
}

/// `POST /api/products` - create a product.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let input = parse_body(body)?.validate()?;

    let product = ProductRepository::new(state.pool())
        .create(&input)
        .await
        .api_context("Failed to create product")?;

    tracing::info!(product_id = %product.id, slug = %product.slug, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}
