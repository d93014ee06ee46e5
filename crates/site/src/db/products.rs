//! Product repository.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use bioarchitettura_core::{CategoryId, Price, ProductId, ProductType, Slug};

use super::categories::parse_slug;
use super::{RepositoryError, map_write_error};
use crate::models::{Category, NewProduct, Product};

const SELECT_PRODUCT: &str = r"
    SELECT
        p.id, p.title, p.slug, p.description, p.price, p.product_type,
        p.cover_image, p.featured, p.in_stock, p.category_id,
        p.created_at, p.updated_at,
        c.name AS category_name, c.slug AS category_slug
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
";

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    title: String,
    slug: String,
    description: String,
    price: String,
    product_type: String,
    cover_image: Option<String>,
    featured: bool,
    in_stock: bool,
    category_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
    category_slug: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price: Price = row.price.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price '{}': {e}", row.price))
        })?;
        let product_type: ProductType = row
            .product_type
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("{e}")))?;

        let category = match (row.category_id, row.category_name, row.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category {
                id: CategoryId::new(id),
                name,
                slug: parse_slug(&slug)?,
            }),
            _ => None,
        };

        Ok(Self {
            id: ProductId::new(row.id),
            title: row.title,
            slug: parse_slug(&row.slug)?,
            description: row.description,
            price,
            product_type,
            cover_image: row.cover_image,
            featured: row.featured,
            in_stock: row.in_stock,
            category_id: row.category_id.map(CategoryId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
            category,
        })
    }
}

/// Filters for listing products. Every set field is an equality match.
///
/// Ordering is fixed: newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub product_type: Option<ProductType>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
    pub category_id: Option<CategoryId>,
    pub limit: Option<NonZeroU32>,
}

impl ProductFilter {
    /// Filter for storefront listings: in-stock products only.
    #[must_use]
    pub const fn storefront() -> Self {
        Self {
            product_type: None,
            featured: None,
            in_stock: Some(true),
            category_id: None,
            limit: None,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List products matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_PRODUCT);
        query.push(" WHERE 1 = 1");

        if let Some(product_type) = filter.product_type {
            query.push(" AND p.product_type = ");
            query.push_bind(product_type.as_str());
        }
        if let Some(featured) = filter.featured {
            query.push(" AND p.featured = ");
            query.push_bind(featured);
        }
        if let Some(in_stock) = filter.in_stock {
            query.push(" AND p.in_stock = ");
            query.push_bind(in_stock);
        }
        if let Some(category_id) = filter.category_id {
            query.push(" AND p.category_id = ");
            query.push_bind(category_id.as_i64());
        }

        query.push(" ORDER BY p.created_at DESC, p.id DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(i64::from(limit.get()));
        }

        let rows: Vec<ProductRow> = query.build_query_as().fetch_all(self.pool).await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by ID, in stock or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCT} WHERE p.id = ?"))
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Get an in-stock product by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "{SELECT_PRODUCT} WHERE p.slug = ? AND p.in_stock = 1"
        ))
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Create a new product with a single INSERT.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug already exists.
    /// Returns `RepositoryError::InvalidReference` if the category does not
    /// exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &NewProduct) -> Result<Product, RepositoryError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO products (
                title, slug, description, price, product_type, cover_image,
                featured, in_stock, category_id, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(&input.title)
        .bind(input.slug.as_str())
        .bind(&input.description)
        .bind(input.price.to_string())
        .bind(input.product_type.as_str())
        .bind(&input.cover_image)
        .bind(input.featured)
        .bind(input.in_stock)
        .bind(input.category_id.map(|c| c.as_i64()))
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, "product"))?;

        self.find_by_id(ProductId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Count all products, out of stock included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?)
    }
}
